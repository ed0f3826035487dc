//! Glyph tables: a fixed-height drawing for every supported character

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// Character reference used to size fallback gaps
pub const REFERENCE_CHAR: char = 'A';

/// A font made of text
///
/// Every glyph is a list of rows. Keys are stored uppercase, and each glyph's
/// rows are right-padded to the same width so columns line up. The table's
/// height is the tallest glyph; shorter glyphs are padded with spaces when
/// composed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphTable {
    name: String,
    height: usize,
    glyphs: HashMap<char, Vec<String>>,
    fingerprint: u64,
}

impl GlyphTable {
    /// Build a table from owned glyph rows
    pub fn new(
        name: impl Into<String>,
        glyphs: impl IntoIterator<Item = (char, Vec<String>)>,
    ) -> Self {
        let mut table = HashMap::new();
        for (ch, rows) in glyphs {
            let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
            let rows = rows
                .into_iter()
                .map(|row| pad_right(&row, width))
                .collect::<Vec<_>>();
            for key in ch.to_uppercase() {
                table.insert(key, rows.clone());
            }
        }

        Self::assemble(name.into(), table)
    }

    fn assemble(name: String, glyphs: HashMap<char, Vec<String>>) -> Self {
        let height = glyphs.values().map(Vec::len).max().unwrap_or(0);
        let fingerprint = hash_drawings(&glyphs);
        Self {
            name,
            height,
            glyphs,
            fingerprint,
        }
    }

    /// Build a table from static row slices
    pub fn from_rows(name: impl Into<String>, glyphs: &[(char, &[&str])]) -> Self {
        Self::new(
            name,
            glyphs.iter().map(|(ch, rows)| {
                (*ch, rows.iter().map(|row| (*row).to_string()).collect())
            }),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Hash of every drawing; tables that draw alike share it
    ///
    /// Two tables registered under one name in turn get different
    /// fingerprints unless their glyphs are identical.
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// Number of rows every composed line gets
    pub fn height(&self) -> usize {
        self.height
    }

    /// A table with no rows composes nothing
    pub fn is_empty(&self) -> bool {
        self.height == 0
    }

    /// How many characters have a drawing
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn contains(&self, ch: char) -> bool {
        self.glyph(ch).is_some()
    }

    /// Rows for a character, matched case-insensitively
    pub fn glyph(&self, ch: char) -> Option<&[String]> {
        self.glyphs
            .get(&ch)
            .or_else(|| ch.to_uppercase().next().and_then(|up| self.glyphs.get(&up)))
            .map(Vec::as_slice)
    }

    /// Column width of a character's drawing
    pub fn glyph_width(&self, ch: char) -> Option<usize> {
        self.glyph(ch)
            .map(|rows| rows.iter().map(|row| row.chars().count()).max().unwrap_or(0))
    }

    /// Width of the gap left for characters the table cannot draw
    ///
    /// Sized to [`REFERENCE_CHAR`], falling back to the widest glyph, then 1.
    pub fn fallback_width(&self) -> usize {
        self.glyph_width(REFERENCE_CHAR)
            .filter(|width| *width > 0)
            .or_else(|| {
                self.glyphs
                    .keys()
                    .filter_map(|ch| self.glyph_width(*ch))
                    .max()
                    .filter(|width| *width > 0)
            })
            .unwrap_or(1)
    }

    /// Every character with a drawing, sorted
    pub fn chars(&self) -> Vec<char> {
        let mut chars: Vec<char> = self.glyphs.keys().copied().collect();
        chars.sort_unstable();
        chars
    }

    /// Copy of this table under another name with one character swapped for another
    ///
    /// Handy for deriving styled variants (solid blocks, dots) from one drawing.
    pub fn restyled(&self, name: impl Into<String>, from: char, to: char) -> Self {
        let glyphs = self
            .glyphs
            .iter()
            .map(|(ch, rows)| {
                let rows = rows
                    .iter()
                    .map(|row| row.chars().map(|c| if c == from { to } else { c }).collect())
                    .collect();
                (*ch, rows)
            })
            .collect();
        Self::assemble(name.into(), glyphs)
    }
}

fn hash_drawings(glyphs: &HashMap<char, Vec<String>>) -> u64 {
    let mut entries: Vec<(&char, &Vec<String>)> = glyphs.iter().collect();
    entries.sort_unstable_by_key(|(ch, _)| **ch);

    let mut hasher = DefaultHasher::new();
    entries.hash(&mut hasher);
    hasher.finish()
}

fn pad_right(row: &str, width: usize) -> String {
    let len = row.chars().count();
    let mut padded = String::with_capacity(row.len() + width.saturating_sub(len));
    padded.push_str(row);
    padded.extend(std::iter::repeat(' ').take(width.saturating_sub(len)));
    padded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_is_tallest_glyph() {
        let table = GlyphTable::from_rows("ragged", &[('a', &["x", "y", "z"]), ('B', &["p"])]);
        assert_eq!(table.height(), 3);
        assert_eq!(table.glyph('A').map(<[String]>::len), Some(3));
        assert!(table.contains('b'));
    }

    #[test]
    fn test_rows_are_padded_to_glyph_width() {
        let table = GlyphTable::from_rows("pad", &[('L', &["#", "###"])]);
        assert_eq!(table.glyph('L'), Some(&["#  ".to_string(), "###".to_string()][..]));
        assert_eq!(table.glyph_width('L'), Some(3));
    }

    #[test]
    fn test_fallback_width() {
        let with_a = GlyphTable::from_rows("a", &[('A', &["####"]), ('W', &["######"])]);
        assert_eq!(with_a.fallback_width(), 4);

        let without_a = GlyphTable::from_rows("w", &[('W', &["######"]), ('I', &["#"])]);
        assert_eq!(without_a.fallback_width(), 6);

        let empty = GlyphTable::new("empty", Vec::new());
        assert!(empty.is_empty());
        assert_eq!(empty.fallback_width(), 1);
    }

    #[test]
    fn test_restyled_swaps_ink() {
        let table = GlyphTable::from_rows("std", &[('I', &["#", "#"])]);
        let block = table.restyled("block", '#', '█');
        assert_eq!(block.name(), "block");
        assert_eq!(block.glyph('I'), Some(&["█".to_string(), "█".to_string()][..]));
        assert_ne!(block.fingerprint(), table.fingerprint());
    }

    #[test]
    fn test_fingerprint_follows_drawings_not_name() {
        let first = GlyphTable::from_rows("standard", &[('K', &["k"])]);
        let redrawn = GlyphTable::from_rows("standard", &[('K', &["#"])]);
        let renamed = GlyphTable::from_rows("other", &[('K', &["k"])]);
        assert_ne!(first.fingerprint(), redrawn.fingerprint());
        assert_eq!(first.fingerprint(), renamed.fingerprint());
    }
}
