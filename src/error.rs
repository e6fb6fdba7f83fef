//! Error types for catalog loading and validation

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown item '{name}'{}", format_suggestions(.suggestions))]
    UnknownItem {
        name: String,
        suggestions: Vec<String>,
    },

    #[error("Item '{item}' has footprint size {size}, expected 1, 2 or 3")]
    InvalidSize { item: String, size: u8 },
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean {}?)", suggestions.join(", "))
    }
}

impl CatalogError {
    /// Near-miss item names for an unknown lookup
    pub fn suggestions(&self) -> &[String] {
        match self {
            CatalogError::UnknownItem { suggestions, .. } => suggestions,
            _ => &[],
        }
    }

    /// Location of the error in the catalog source, when the parser reported one
    pub fn span(&self, source: &str) -> Option<Span> {
        match self {
            CatalogError::Toml(err) => err.span(),
            CatalogError::Json(err) if err.line() > 0 => {
                let start = line_column_offset(source, err.line(), err.column());
                Some(start..(start + 1).min(source.len()))
            }
            _ => None,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let Some(span) = self.span(source) else {
            return self.to_string();
        };

        let message = match self {
            CatalogError::Toml(err) => err.message().to_string(),
            other => other.to_string(),
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message("invalid catalog")
            .with_label(
                Label::new((filename, span))
                    .with_message(message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

/// Byte offset of a 1-based line and column, clamped to the source length
fn line_column_offset(source: &str, line: usize, column: usize) -> usize {
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(source.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_item_message() {
        let err = CatalogError::UnknownItem {
            name: "NOCTILUM".to_string(),
            suggestions: vec!["NOCTILUME".to_string()],
        };
        assert_eq!(err.to_string(), "Unknown item 'NOCTILUM' (did you mean NOCTILUME?)");
        assert_eq!(err.suggestions(), ["NOCTILUME".to_string()]);
    }

    #[test]
    fn test_unknown_item_without_suggestions() {
        let err = CatalogError::UnknownItem {
            name: "ZZZ".to_string(),
            suggestions: vec![],
        };
        assert_eq!(err.to_string(), "Unknown item 'ZZZ'");
    }

    #[test]
    fn test_line_column_offset() {
        let source = "ab\ncde\nf";
        assert_eq!(line_column_offset(source, 1, 1), 0);
        assert_eq!(line_column_offset(source, 2, 2), 4);
        assert_eq!(line_column_offset(source, 3, 1), 7);
        assert_eq!(line_column_offset(source, 9, 9), source.len());
    }

    #[test]
    fn test_format_toml_error_has_context() {
        let source = "[SNOOZLING]\nsize = \"big\"\n";
        let parsed = toml::from_str::<std::collections::BTreeMap<String, Record>>(source);
        let err = CatalogError::from(parsed.unwrap_err());
        assert!(err.span(source).is_some());
        let report = err.format(source, "items.toml");
        assert!(report.contains("items.toml"));
        assert!(report.contains("invalid catalog"));
    }

    #[derive(serde::Deserialize, Debug)]
    #[allow(dead_code)]
    struct Record {
        size: u8,
    }

    #[test]
    fn test_format_without_span_falls_back() {
        let err = CatalogError::InvalidSize {
            item: "BLOOMPOD".to_string(),
            size: 4,
        };
        assert_eq!(
            err.format("", "items.toml"),
            "Item 'BLOOMPOD' has footprint size 4, expected 1, 2 or 3"
        );
    }
}
