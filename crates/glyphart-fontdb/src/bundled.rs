//! Glyph drawings that ship with the library
//!
//! Drawings are stored without inter-letter spacing; [`spaced`] adds the gap
//! column when the tables are built.

use glyphart_core::GlyphTable;

/// Five-row hash-mark letters
pub const STANDARD: &[(char, &[&str])] = &[
    ('A', &[" ### ", "#   #", "#####", "#   #", "#   #"]),
    ('B', &["#### ", "#   #", "#### ", "#   #", "#### "]),
    ('C', &[" ####", "#    ", "#    ", "#    ", " ####"]),
    ('D', &["#### ", "#   #", "#   #", "#   #", "#### "]),
    ('E', &["#####", "#    ", "#### ", "#    ", "#####"]),
    ('F', &["#####", "#    ", "#### ", "#    ", "#    "]),
    ('G', &[" ####", "#    ", "#  ##", "#   #", " ####"]),
    ('H', &["#   #", "#   #", "#####", "#   #", "#   #"]),
    ('I', &["#####", "  #  ", "  #  ", "  #  ", "#####"]),
    ('J', &["#####", "   # ", "   # ", "#  # ", " ##  "]),
    ('K', &["#   #", "#  # ", "###  ", "#  # ", "#   #"]),
    ('L', &["#    ", "#    ", "#    ", "#    ", "#####"]),
    ('M', &["#   #", "## ##", "# # #", "#   #", "#   #"]),
    ('N', &["#   #", "##  #", "# # #", "#  ##", "#   #"]),
    ('O', &[" ### ", "#   #", "#   #", "#   #", " ### "]),
    ('P', &["#### ", "#   #", "#### ", "#    ", "#    "]),
    ('Q', &[" ### ", "#   #", "# # #", "#  # ", " ## #"]),
    ('R', &["#### ", "#   #", "#### ", "#  # ", "#   #"]),
    ('S', &[" ####", "#    ", " ### ", "    #", "#### "]),
    ('T', &["#####", "  #  ", "  #  ", "  #  ", "  #  "]),
    ('U', &["#   #", "#   #", "#   #", "#   #", " ### "]),
    ('V', &["#   #", "#   #", "#   #", " # # ", "  #  "]),
    ('W', &["#   #", "#   #", "# # #", "## ##", "#   #"]),
    ('X', &["#   #", " # # ", "  #  ", " # # ", "#   #"]),
    ('Y', &["#   #", " # # ", "  #  ", "  #  ", "  #  "]),
    ('Z', &["#####", "   # ", "  #  ", " #   ", "#####"]),
    ('0', &[" ### ", "#  ##", "# # #", "##  #", " ### "]),
    ('1', &["  #  ", " ##  ", "  #  ", "  #  ", " ### "]),
    ('2', &[" ### ", "#   #", "  ## ", " #   ", "#####"]),
    ('3', &["#### ", "    #", " ### ", "    #", "#### "]),
    ('4', &["#   #", "#   #", "#####", "    #", "    #"]),
    ('5', &["#####", "#    ", "#### ", "    #", "#### "]),
    ('6', &[" ### ", "#    ", "#### ", "#   #", " ### "]),
    ('7', &["#####", "    #", "   # ", "  #  ", "  #  "]),
    ('8', &[" ### ", "#   #", " ### ", "#   #", " ### "]),
    ('9', &[" ### ", "#   #", " ####", "    #", " ### "]),
    (' ', &["   ", "   ", "   ", "   ", "   "]),
    ('!', &["#", "#", "#", " ", "#"]),
    ('?', &[" ### ", "#   #", "  ## ", "     ", "  #  "]),
    ('.', &[" ", " ", " ", " ", "#"]),
    (',', &["  ", "  ", "  ", " #", "# "]),
    ('-', &["    ", "    ", "####", "    ", "    "]),
    ('\'', &["#", "#", " ", " ", " "]),
    (':', &[" ", "#", " ", "#", " "]),
];

/// Three-row line-art letters
pub const SMALL: &[(char, &[&str])] = &[
    ('A', &[" _ ", "|_|", "| |"]),
    ('B', &[" _ ", "|_)", "|_)"]),
    ('C', &[" _ ", "|  ", "|_ "]),
    ('D', &[" _ ", r"| \", "|_/"]),
    ('E', &[" _ ", "|_ ", "|_ "]),
    ('F', &[" _ ", "|_ ", "|  "]),
    ('G', &[" __", "| _", "|_|"]),
    ('H', &["   ", "|_|", "| |"]),
    ('I', &[" ", "|", "|"]),
    ('J', &["   ", "  |", "|_|"]),
    ('K', &["   ", "|_/", r"| \"]),
    ('L', &["   ", "|  ", "|_ "]),
    ('M', &["    ", r"|\/|", "|  |"]),
    ('N', &["    ", r"|\ |", r"| \|"]),
    ('O', &[" _ ", r"/ \", r"\_/"]),
    ('P', &[" _ ", "|_)", "|  "]),
    ('Q', &[" _ ", r"/ \", r"\_X"]),
    ('R', &[" _ ", "|_)", r"| \"]),
    ('S', &[" __", "(_ ", "__)"]),
    ('T', &["___", " | ", " | "]),
    ('U', &["   ", "| |", "|_|"]),
    ('V', &["   ", r"\ /", " V "]),
    ('W', &["    ", "|  |", r"|/\|"]),
    ('X', &["   ", r"\_/", r"/ \"]),
    ('Y', &["   ", r"\_/", " | "]),
    ('Z', &["__ ", " / ", "/_ "]),
    ('0', &[" _ ", "| |", "|_|"]),
    ('1', &["  ", " |", " |"]),
    ('2', &[" _ ", " _|", "|_ "]),
    ('3', &[" _ ", " _|", " _|"]),
    ('4', &["   ", "|_|", "  |"]),
    ('5', &[" _ ", "|_ ", " _|"]),
    ('6', &[" _ ", "|_ ", "|_|"]),
    ('7', &[" _ ", "  |", "  |"]),
    ('8', &[" _ ", "|_|", "|_|"]),
    ('9', &[" _ ", "|_|", " _|"]),
    (' ', &["  ", "  ", "  "]),
    ('!', &[" ", "|", "."]),
    ('?', &["__ ", " _)", " . "]),
    ('.', &[" ", " ", "."]),
    (',', &[" ", " ", ","]),
    ('-', &["  ", "__", "  "]),
    ('\'', &["|", " ", " "]),
    (':', &[" ", ".", "."]),
];

/// Build a table whose glyphs carry `gap` trailing columns of spacing
pub fn spaced(name: &str, drawings: &[(char, &[&str])], gap: usize) -> GlyphTable {
    let padding = " ".repeat(gap);
    GlyphTable::new(
        name,
        drawings.iter().map(|(ch, rows)| {
            let rows = rows.iter().map(|row| format!("{row}{padding}")).collect();
            (*ch, rows)
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_uniform(drawings: &[(char, &[&str])], height: usize) {
        for (ch, rows) in drawings {
            assert_eq!(rows.len(), height, "glyph {ch:?} has the wrong height");
            let width = rows[0].chars().count();
            for row in rows.iter() {
                assert_eq!(row.chars().count(), width, "glyph {ch:?} is ragged");
            }
        }
    }

    #[test]
    fn test_standard_is_uniform() {
        assert_uniform(STANDARD, 5);
    }

    #[test]
    fn test_small_is_uniform() {
        assert_uniform(SMALL, 3);
    }

    #[test]
    fn test_every_letter_and_digit_is_drawn() {
        for drawings in [STANDARD, SMALL] {
            for ch in ('A'..='Z').chain('0'..='9') {
                assert!(
                    drawings.iter().any(|(c, _)| *c == ch),
                    "missing glyph {ch:?}"
                );
            }
        }
    }

    #[test]
    fn test_spacing_is_appended() {
        let table = spaced("standard", STANDARD, 1);
        assert_eq!(table.glyph_width('A'), Some(6));
        assert_eq!(table.fallback_width(), 6);
    }
}
