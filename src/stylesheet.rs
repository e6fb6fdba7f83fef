//! Stylesheet system for color palette support
//!
//! This module provides symbolic color tokens that can be resolved to concrete
//! color values via stylesheets, so a plot can be rendered with different
//! color schemes.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing stylesheets
#[derive(Error, Debug)]
pub enum StylesheetError {
    #[error("Failed to read stylesheet file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse stylesheet TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// A stylesheet mapping symbolic colors to concrete values
#[derive(Debug, Clone)]
pub struct Stylesheet {
    /// Optional name for the stylesheet
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    /// Color mappings: token name -> hex color
    pub colors: HashMap<String, String>,
}

/// TOML structure for deserializing stylesheets
#[derive(Deserialize)]
struct TomlStylesheet {
    metadata: Option<TomlMetadata>,
    colors: HashMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

/// Default color palette, mirroring the terminal colors of the text output
const DEFAULT_PALETTE: &str = r##"
[colors]
# Cell categories
footprint = "#4caf50"
unusable = "#9e9e9e"
unknown = "#f44336"

# Companion colors, cycled by symbol code point
companion-0 = "#fbc02d"
companion-1 = "#1e88e5"
companion-2 = "#8e24aa"
companion-3 = "#00acc1"
companion-4 = "#eceff1"
companion-5 = "#e53935"

# Chrome
background = "#ffffff"
grid-line = "#424242"
text = "#212121"
"##;

/// Number of companion color tokens in the palette
pub const COMPANION_COLORS: usize = 6;

/// Palette token for a companion symbol
pub fn companion_token(symbol: char) -> String {
    format!("companion-{}", symbol as usize % COMPANION_COLORS)
}

impl Stylesheet {
    /// Load stylesheet from TOML file
    pub fn from_file(path: &Path) -> Result<Self, StylesheetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load stylesheet from TOML string
    pub fn from_str(content: &str) -> Result<Self, StylesheetError> {
        let parsed: TomlStylesheet = toml::from_str(content)?;

        Ok(Stylesheet {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            colors: parsed.colors,
        })
    }

    /// Resolve a symbolic color token to a concrete value
    ///
    /// Returns None if the token is not defined in this stylesheet.
    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.colors.get(token).map(|s| s.as_str())
    }

    /// Resolve a symbolic color token with fallback to default palette
    ///
    /// Fallback order:
    /// 1. Check this stylesheet for exact token
    /// 2. Check default palette for exact token
    /// 3. Use category default (companion-* → first companion color, etc.)
    pub fn resolve_or_default(&self, token: &str) -> String {
        // Try this stylesheet first
        if let Some(color) = self.resolve(token) {
            return color.to_string();
        }

        // Fallback to default palette
        let default = Self::default();
        if let Some(color) = default.resolve(token) {
            return color.to_string();
        }

        // Final fallback: category defaults
        if token.starts_with("companion") {
            return "#fbc02d".to_string();
        }
        if token.starts_with("text") || token.starts_with("grid") {
            return "#212121".to_string();
        }
        if token.starts_with("background") {
            return "#ffffff".to_string();
        }

        // Unknown category - return neutral gray
        "#9e9e9e".to_string()
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::from_str(DEFAULT_PALETTE).unwrap_or_else(|_| Self {
            name: None,
            description: None,
            colors: HashMap::new(),
        })
    }
}
