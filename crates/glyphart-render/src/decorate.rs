//! Borders, motif lines, and alignment for composed art

use glyphart_core::request::{Decoration, Layout};

/// Display width of a row, counted in characters
pub fn row_width(row: &str) -> usize {
    row.chars().count()
}

/// Width of the widest row
pub fn block_width(rows: &[String]) -> usize {
    rows.iter().map(|row| row_width(row)).max().unwrap_or(0)
}

/// Shift every row inside the widest one
///
/// Trailing spaces are dropped afterwards; alignment only ever adds leading
/// padding.
pub fn align_rows(rows: &[String], layout: Layout) -> Vec<String> {
    let width = block_width(rows);
    rows.iter()
        .map(|row| {
            let slack = width - row_width(row);
            let lead = match layout {
                Layout::Left => 0,
                Layout::Center => slack / 2,
                Layout::Right => slack,
            };
            format!("{}{}", " ".repeat(lead), row).trim_end().to_string()
        })
        .collect()
}

/// Enclose rows in a `+---+` box with one space of inner margin
pub fn frame(rows: &[String]) -> Vec<String> {
    let width = block_width(rows);
    let edge = format!("+{}+", "-".repeat(width + 2));

    let mut framed = Vec::with_capacity(rows.len() + 2);
    framed.push(edge.clone());
    for row in rows {
        let pad = width - row_width(row);
        framed.push(format!("| {}{} |", row, " ".repeat(pad)));
    }
    framed.push(edge);
    framed
}

/// `pattern` repeated and cut to exactly `width` characters
pub fn motif_line(pattern: &str, width: usize) -> String {
    pattern.chars().cycle().take(width).collect()
}

/// Repeating pattern drawn above and below the body, if any
pub fn motif(decoration: Decoration) -> Option<&'static str> {
    match decoration {
        Decoration::None | Decoration::Border => None,
        Decoration::Stars => Some("* "),
        Decoration::Waves => Some("~"),
        Decoration::Dots => Some(". "),
    }
}

/// Apply a decoration around a body of rows
pub fn decorate(rows: Vec<String>, decoration: Decoration) -> Vec<String> {
    match decoration {
        Decoration::None => rows,
        Decoration::Border => frame(&rows),
        other => {
            let Some(pattern) = motif(other) else {
                return rows;
            };
            let line = motif_line(pattern, block_width(&rows).max(1));
            let line = line.trim_end().to_string();
            let mut decorated = Vec::with_capacity(rows.len() + 2);
            decorated.push(line.clone());
            decorated.extend(rows);
            decorated.push(line);
            decorated
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|line| (*line).to_string()).collect()
    }

    #[test]
    fn test_align_center_and_right() {
        let body = rows(&["abcd", "ab"]);
        assert_eq!(align_rows(&body, Layout::Left), rows(&["abcd", "ab"]));
        assert_eq!(align_rows(&body, Layout::Center), rows(&["abcd", " ab"]));
        assert_eq!(align_rows(&body, Layout::Right), rows(&["abcd", "  ab"]));
    }

    #[test]
    fn test_frame_pads_short_rows() {
        assert_eq!(
            frame(&rows(&["abc", "a"])),
            rows(&["+-----+", "| abc |", "| a   |", "+-----+"])
        );
    }

    #[test]
    fn test_motif_line_is_cut_to_width() {
        assert_eq!(motif_line("* ", 5), "* * *");
        assert_eq!(motif_line("~", 3), "~~~");
        assert_eq!(motif_line("", 3), "");
    }

    #[test]
    fn test_stars_wrap_the_body() {
        assert_eq!(
            decorate(rows(&["four"]), Decoration::Stars),
            rows(&["* *", "four", "* *"])
        );
        assert_eq!(
            decorate(rows(&["four"]), Decoration::Waves),
            rows(&["~~~~", "four", "~~~~"])
        );
    }

    #[test]
    fn test_none_leaves_rows_alone() {
        assert_eq!(decorate(rows(&["x"]), Decoration::None), rows(&["x"]));
    }
}
