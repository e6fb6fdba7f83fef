//! Plain-text grid output

use std::fmt::Write;

use crate::layout::{PlacementResult, GRID_SIZE};

use super::{glyph, TextConfig};

/// Render a solved layout as a text grid.
///
/// Rows are space-separated glyphs, prefixed by the row index when axes
/// are enabled. The output always ends with a newline.
pub fn render_text(name: &str, result: &PlacementResult, config: &TextConfig) -> String {
    let mut out = String::new();

    if config.show_header {
        let _ = writeln!(out, "--- Layout for {} ---", name);
        let _ = writeln!(out, "Total Spots: {}", result.footprint_count);
        let _ = writeln!(out, "Legend: {}", result.legend);
    }

    if config.show_axes {
        let columns: Vec<String> = (0..GRID_SIZE).map(|c| c.to_string()).collect();
        let _ = writeln!(out, "   {}", columns.join(" "));
    }

    for (r, row) in result.grid.rows().enumerate() {
        let line: Vec<String> = row.iter().map(|tag| glyph(*tag).to_string()).collect();
        if config.show_axes {
            let _ = writeln!(out, "{}  {}", r, line.join(" "));
        } else {
            let _ = writeln!(out, "{}", line.join(" "));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{solve, FootprintSize, ItemSpec};

    #[test]
    fn test_header_lines() {
        let spec = ItemSpec::new(FootprintSize::Three)
            .with_destructive(true)
            .with_companion("GLIMMERCAP", 16, FootprintSize::One);
        let text = render_text("BLOOMPOD", &solve(&spec), &TextConfig::default());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "--- Layout for BLOOMPOD ---");
        assert_eq!(lines[1], "Total Spots: 1");
        assert_eq!(lines[2], "Legend: . : Crop, 0 : GLIMMERCAP (16)");
        assert_eq!(lines[3], "   0 1 2 3 4 5 6 7 8 9");
        assert_eq!(lines[4], "0  # # # # # # # # # #");
        assert_eq!(lines[7], "3  # # # 0 0 0 0 0 # #");
        assert_eq!(lines[9], "5  # # # 0 . . . 0 # #");
        assert_eq!(lines.len(), 14);
    }

    #[test]
    fn test_bare_grid() {
        let spec = ItemSpec::new(FootprintSize::One).with_destructive(true);
        let config = TextConfig::new().with_header(false).with_axes(false);
        let text = render_text("SNOOZLING", &solve(&spec), &config);

        assert_eq!(text.lines().count(), 10);
        assert_eq!(text.lines().nth(4), Some("# # # # # ? # # # #"));
        assert_eq!(text.lines().nth(5), Some("# # # # ? . ? # # #"));
    }
}
