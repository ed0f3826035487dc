//! Poems with their keywords drawn as glyph art
//!
//! Lines are split into word and whitespace tokens. A word whose stem is a
//! keyword is drawn with the glyph table and sits inline, bottom-aligned with
//! the rest of its line; every other word gets a two-space indent.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use glyphart_core::{
    keyword_stem,
    request::{Decoration, Layout},
    GlyphTable,
};

use crate::decorate::{align_rows, block_width, decorate, row_width};
use crate::text::compose_block;

/// Indent placed before words that are not keywords
pub const PLAIN_WORD_INDENT: &str = "  ";

/// A composed poem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoemArt {
    pub ascii: String,
    /// Keyword tokens that were drawn as glyph art
    pub highlighted: usize,
}

/// Compose a poem, drawing keyword tokens with `table`
pub fn compose_poem(
    poem: &str,
    table: &GlyphTable,
    keywords: &BTreeSet<String>,
    layout: Layout,
    decoration: Decoration,
) -> PoemArt {
    compose_poem_with(poem, keywords, layout, decoration, |token| {
        Arc::new(compose_block(token, table))
    })
}

/// Compose a poem, asking `draw` for the art of each keyword token
///
/// `draw` returns the rows for one token; an empty result means the token is
/// printed as written.
pub fn compose_poem_with<F>(
    poem: &str,
    keywords: &BTreeSet<String>,
    layout: Layout,
    decoration: Decoration,
    mut draw: F,
) -> PoemArt
where
    F: FnMut(&str) -> Arc<Vec<String>>,
{
    let stems: HashSet<String> = keywords
        .iter()
        .map(|keyword| keyword_stem(keyword))
        .filter(|stem| !stem.is_empty())
        .collect();

    let mut body = Vec::new();
    let mut highlighted = 0;

    for line in poem.split('\n') {
        if line.trim().is_empty() {
            body.push(line.to_string());
            continue;
        }

        let mut segments: Vec<Arc<Vec<String>>> = Vec::new();
        for token in tokens(line) {
            let is_space = token.chars().all(char::is_whitespace);
            if is_space {
                segments.push(Arc::new(vec![token.to_string()]));
            } else if stems.contains(&keyword_stem(token)) {
                highlighted += 1;
                let art = draw(token);
                if art.is_empty() {
                    segments.push(Arc::new(vec![token.to_string()]));
                } else {
                    segments.push(art);
                }
            } else {
                segments.push(Arc::new(vec![format!("{PLAIN_WORD_INDENT}{token}")]));
            }
        }

        body.extend(stack_segments(&segments));
    }

    let rows = decorate(align_rows(&body, layout), decoration);
    PoemArt {
        ascii: rows.join("\n"),
        highlighted,
    }
}

/// Split a line into alternating runs of whitespace and non-whitespace
fn tokens(line: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_space: Option<bool> = None;

    for (at, ch) in line.char_indices() {
        let space = ch.is_whitespace();
        match in_space {
            Some(previous) if previous != space => {
                out.push(&line[start..at]);
                start = at;
            },
            _ => {},
        }
        in_space = Some(space);
    }
    if start < line.len() {
        out.push(&line[start..]);
    }
    out
}

/// Lay segments side by side, bottom-aligned, each padded to its own width
fn stack_segments(segments: &[Arc<Vec<String>>]) -> Vec<String> {
    let height = segments.iter().map(|rows| rows.len()).max().unwrap_or(1);
    let mut lines = vec![String::new(); height];

    for rows in segments {
        let width = block_width(rows);
        let offset = height - rows.len();
        for (index, line) in lines.iter_mut().enumerate() {
            match index.checked_sub(offset).and_then(|row| rows.get(row)) {
                Some(row) => {
                    line.push_str(row);
                    line.push_str(&" ".repeat(width - row_width(row)));
                },
                None => line.push_str(&" ".repeat(width)),
            }
        }
    }

    lines.into_iter().map(|line| line.trim_end().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One row per letter, drawn as the letter itself
    fn identity_font() -> GlyphTable {
        GlyphTable::new(
            "identity",
            ('A'..='Z').map(|ch| (ch, vec![ch.to_string()])),
        )
    }

    fn keywords(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|word| (*word).to_string()).collect()
    }

    #[test]
    fn test_keyword_is_drawn_and_other_words_indented() {
        let art = compose_poem(
            "the brave knight rides",
            &identity_font(),
            &keywords(&["knight"]),
            Layout::Left,
            Decoration::None,
        );
        assert_eq!(art.ascii, "  the   brave KNIGHT   rides");
        assert_eq!(art.highlighted, 1);
    }

    #[test]
    fn test_keyword_matches_through_punctuation_and_case() {
        let art = compose_poem(
            "Knight, arise",
            &identity_font(),
            &keywords(&["KNIGHT"]),
            Layout::Left,
            Decoration::None,
        );
        // The comma has no glyph and becomes a gap
        assert_eq!(art.ascii, "KNIGHT    arise");
    }

    #[test]
    fn test_blank_lines_pass_through() {
        let art = compose_poem(
            "one\n\ntwo",
            &identity_font(),
            &BTreeSet::new(),
            Layout::Left,
            Decoration::None,
        );
        assert_eq!(art.ascii, "  one\n\n  two");
        assert_eq!(art.highlighted, 0);
    }

    #[test]
    fn test_tall_keyword_is_bottom_aligned() {
        let table = GlyphTable::from_rows("tall", &[('B', &["P", "Q"])]);
        let art = compose_poem("a b", &table, &keywords(&["b"]), Layout::Left, Decoration::None);
        assert_eq!(art.ascii, "    P\n  a Q");
    }

    #[test]
    fn test_layout_and_border() {
        let art = compose_poem(
            "sun\nmoonrise",
            &identity_font(),
            &BTreeSet::new(),
            Layout::Right,
            Decoration::Border,
        );
        assert_eq!(
            art.ascii,
            "+------------+\n|        sun |\n|   moonrise |\n+------------+"
        );
    }

    #[test]
    fn test_motif_matches_body_width() {
        let art = compose_poem(
            "tide",
            &identity_font(),
            &BTreeSet::new(),
            Layout::Left,
            Decoration::Waves,
        );
        assert_eq!(art.ascii, "~~~~~~\n  tide\n~~~~~~");
    }

    #[test]
    fn test_tokens_keep_whitespace_runs() {
        assert_eq!(tokens("  a  bc "), vec!["  ", "a", "  ", "bc", " "]);
        assert!(tokens("").is_empty());
    }
}
