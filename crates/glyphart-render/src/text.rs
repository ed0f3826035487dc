//! Banner text drawn with glyph tables
//!
//! Every character contributes one row per table row; the rows are glued
//! side by side so a word reads left to right as one block of art.

use glyphart_core::GlyphTable;

/// Draw `text` with `table`, one block per input line
///
/// A table with no rows cannot draw anything, so the text comes back as-is.
pub fn compose_text(text: &str, table: &GlyphTable) -> String {
    if table.is_empty() {
        return text.to_string();
    }

    text.split('\n')
        .map(|line| compose_block(line, table).join("\n"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Draw a single line as `table.height()` rows
///
/// Characters the table lacks, and rows missing from ragged glyphs, become
/// runs of spaces as wide as the table's reference glyph.
pub fn compose_block(line: &str, table: &GlyphTable) -> Vec<String> {
    let upper = line.to_uppercase();
    let blank = " ".repeat(table.fallback_width());

    (0..table.height())
        .map(|row| {
            let mut out = String::new();
            for ch in upper.chars() {
                match table.glyph(ch).and_then(|rows| rows.get(row)) {
                    Some(glyph_row) => out.push_str(glyph_row),
                    None => out.push_str(&blank),
                }
            }
            out
        })
        .collect()
}
