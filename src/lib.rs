//! Plot Layout - crop footprint packing for a 10×10 plot
//!
//! This library provides a catalog loader, layout solver, and renderers for
//! planning how many crop footprints and their companion tiles fit in a plot.
//!
//! # Example
//!
//! ```rust
//! use plot_layout::{solve, FootprintSize, ItemSpec};
//!
//! let spec = ItemSpec::new(FootprintSize::Three).with_companion("ASHWREATH", 20, FootprintSize::One);
//! let result = solve(&spec);
//! assert_eq!(result.footprint_count, 4);
//! ```

pub mod catalog;
pub mod error;
pub mod layout;
pub mod renderer;
pub mod stylesheet;

pub use catalog::{Catalog, ItemRecord};
pub use error::CatalogError;
pub use layout::lint::{LintCategory, LintWarning};
pub use layout::{solve, FootprintSize, ItemSpec, PlacementResult, Strategy};
pub use renderer::{render_svg, render_svg_with_stylesheet, render_text, SvgConfig, TextConfig};

use thiserror::Error;

// Re-export Stylesheet for public API
pub use stylesheet::{Stylesheet, StylesheetError};

/// Errors that can occur during the render pipeline
#[derive(Debug, Error)]
pub enum PlanError {
    /// Error loading the catalog or resolving an item
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Error loading a stylesheet
    #[error("stylesheet error: {0}")]
    Stylesheet(#[from] StylesheetError),
}

/// Output format for rendered layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Svg,
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Text output configuration
    pub text: TextConfig,
    /// Stylesheet for color resolution
    pub stylesheet: Stylesheet,
    /// Which renderer to use
    pub format: OutputFormat,
    /// Run lint checks after solving
    pub lint: bool,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Set the text configuration
    pub fn with_text(mut self, config: TextConfig) -> Self {
        self.text = config;
        self
    }

    /// Set the stylesheet for color resolution
    pub fn with_stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheet = stylesheet;
        self
    }

    /// Set the output format
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Enable or disable lint output
    pub fn with_lint(mut self, lint: bool) -> Self {
        self.lint = lint;
        self
    }
}

/// Solve and render one catalog item with default configuration
///
/// # Example
///
/// ```rust
/// use plot_layout::{render_item, Catalog};
///
/// let catalog = Catalog::from_toml_str("[SNOOZLING]\ndestructive = true\n").unwrap();
/// let text = render_item(&catalog, "SNOOZLING").unwrap();
/// assert!(text.starts_with("--- Layout for SNOOZLING ---"));
/// ```
pub fn render_item(catalog: &Catalog, name: &str) -> Result<String, PlanError> {
    render_item_with_config(catalog, name, &RenderConfig::default())
}

/// Solve and render one catalog item with custom configuration
pub fn render_item_with_config(
    catalog: &Catalog,
    name: &str,
    config: &RenderConfig,
) -> Result<String, PlanError> {
    render_with_lint(catalog, name, config).map(|(output, _)| output)
}

/// Solve and render one catalog item, also returning lint warnings
///
/// Lint checks only run when `config.lint` is set; otherwise the warning
/// list is empty.
pub fn render_with_lint(
    catalog: &Catalog,
    name: &str,
    config: &RenderConfig,
) -> Result<(String, Vec<LintWarning>), PlanError> {
    let spec = catalog.item_spec(name)?;
    let result = solve(&spec);

    let output = match config.format {
        OutputFormat::Text => render_text(name, &result, &config.text),
        OutputFormat::Svg => render_svg_with_stylesheet(&result, &config.svg, &config.stylesheet),
    };

    let warnings = if config.lint {
        layout::lint::check(&result)
    } else {
        Vec::new()
    };
    for warning in &warnings {
        tracing::warn!(item = name, category = %warning.category, "{}", warning.message);
    }

    Ok((output, warnings))
}
