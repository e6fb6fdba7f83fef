//! Configuration for text and SVG rendering

/// Configuration options for SVG output
#[derive(Debug, Clone)]
pub struct SvgConfig {
    /// Edge length of one grid cell in user units
    pub cell_size: f64,

    /// Padding around the viewBox
    pub viewbox_padding: f64,

    /// Whether to include XML declaration and standalone attributes
    pub standalone: bool,

    /// Whether to format output with indentation
    pub pretty_print: bool,

    /// Prefix for CSS class names (e.g., "pl-" for "pl-cell")
    pub class_prefix: Option<String>,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            cell_size: 40.0,
            viewbox_padding: 20.0,
            standalone: true,
            pretty_print: true,
            class_prefix: Some("pl-".to_string()),
        }
    }
}

impl SvgConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cell size
    pub fn with_cell_size(mut self, size: f64) -> Self {
        self.cell_size = size;
        self
    }

    /// Set the viewBox padding
    pub fn with_viewbox_padding(mut self, padding: f64) -> Self {
        self.viewbox_padding = padding;
        self
    }

    /// Set whether output is standalone
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Set the CSS class prefix
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }

    /// Remove the CSS class prefix
    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }
}

/// Configuration options for plain-text output
#[derive(Debug, Clone)]
pub struct TextConfig {
    /// Print the item name, spot count and legend above the grid
    pub show_header: bool,

    /// Print row and column indices around the grid
    pub show_axes: bool,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            show_header: true,
            show_axes: true,
        }
    }
}

impl TextConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, show: bool) -> Self {
        self.show_header = show;
        self
    }

    pub fn with_axes(mut self, show: bool) -> Self {
        self.show_axes = show;
        self
    }
}
