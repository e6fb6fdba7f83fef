//! SVG generation from solved layouts

use std::collections::BTreeMap;

use crate::layout::{CellTag, PlacementResult, Symbol, GRID_SIZE};
use crate::stylesheet::{companion_token, Stylesheet, COMPANION_COLORS};

use super::{glyph, SvgConfig};

/// Cell categories that get a fill rule of their own
const CATEGORY_TOKENS: [&str; 3] = ["footprint", "unusable", "unknown"];

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    styles: Vec<String>,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            styles: vec![],
            elements: vec![],
            indent: 1,
        }
    }

    /// Add CSS custom properties from a stylesheet, layered over the default palette
    pub fn add_stylesheet(&mut self, stylesheet: &Stylesheet) {
        let mut colors: BTreeMap<String, String> = Stylesheet::default().colors.into_iter().collect();
        colors.extend(stylesheet.colors.iter().map(|(k, v)| (k.clone(), v.clone())));

        let mut css = String::from(":root {\n");
        for (token, value) in &colors {
            css.push_str(&format!("      --{}: {};\n", token, value));
        }
        css.push_str("    }");
        self.styles.push(css);

        let prefix = self.prefix();
        let companions = (0..COMPANION_COLORS).map(|i| format!("companion-{}", i));
        for token in CATEGORY_TOKENS.iter().map(|t| t.to_string()).chain(companions) {
            self.styles
                .push(format!(".{}{} {{ fill: var(--{}); }}", prefix, token, token));
        }
        self.styles.push(format!(
            ".{}cell {{ stroke: var(--grid-line); stroke-width: 1; }}",
            prefix
        ));
        self.styles.push(format!(
            ".{}symbol {{ fill: var(--text); font-family: monospace; }}",
            prefix
        ));
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add a rectangle element
    pub fn add_rect(&mut self, id: Option<&str>, x: f64, y: f64, w: f64, h: f64, classes: &[String]) {
        let prefix = self.prefix();
        let id_attr = id.map(|i| format!(r#" id="{}""#, i)).unwrap_or_default();
        let class_list = std::iter::once(format!("{}cell", prefix))
            .chain(classes.iter().map(|c| format!("{}{}", prefix, c)))
            .collect::<Vec<_>>()
            .join(" ");

        self.elements.push(format!(
            r#"{}<rect{} class="{}" x="{}" y="{}" width="{}" height="{}"/>"#,
            self.indent_str(),
            id_attr,
            class_list,
            x,
            y,
            w,
            h,
        ));
    }

    /// Add a centered text element
    pub fn add_text(&mut self, text: &str, x: f64, y: f64, font_size: f64) {
        let prefix = self.prefix();
        self.elements.push(format!(
            r#"{}<text class="{}symbol" x="{}" y="{}" font-size="{}" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
            self.indent_str(),
            prefix,
            x,
            y,
            font_size,
            escape_xml(text)
        ));
    }

    /// Start a group element
    pub fn start_group(&mut self, id: Option<&str>, classes: &[String]) {
        let id_attr = id.map(|i| format!(r#" id="{}""#, i)).unwrap_or_default();
        let class_attr = if classes.is_empty() {
            String::new()
        } else {
            format!(r#" class="{}""#, classes.join(" "))
        };

        self.elements
            .push(format!("{}<g{}{}>", self.indent_str(), id_attr, class_attr));
        self.indent += 1;
    }

    /// End a group element
    pub fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.elements.push(format!("{}</g>", self.indent_str()));
    }

    /// Finish the document for content spanning `width` × `height`
    pub fn build(self, width: f64, height: f64) -> String {
        let padding = self.config.viewbox_padding;
        let nl = self.newline();

        let mut svg = String::new();

        // XML declaration for standalone
        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
            -padding,
            -padding,
            width + 2.0 * padding,
            height + 2.0 * padding
        ));
        svg.push_str(nl);

        if !self.styles.is_empty() {
            svg.push_str("  <style>");
            svg.push_str(nl);
            for style in &self.styles {
                svg.push_str("    ");
                svg.push_str(style);
                svg.push_str(nl);
            }
            svg.push_str("  </style>");
            svg.push_str(nl);
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Render a solved layout to SVG with the default palette
pub fn render_svg(result: &PlacementResult, config: &SvgConfig) -> String {
    render_svg_with_stylesheet(result, config, &Stylesheet::default())
}

/// Render a solved layout to SVG, resolving colors through `stylesheet`
pub fn render_svg_with_stylesheet(
    result: &PlacementResult,
    config: &SvgConfig,
    stylesheet: &Stylesheet,
) -> String {
    let size = config.cell_size;
    let mut builder = SvgBuilder::new(config.clone());
    builder.add_stylesheet(stylesheet);

    let prefix = config.class_prefix.clone().unwrap_or_default();
    builder.start_group(
        Some("plot"),
        &[format!("{}grid", prefix), format!("{}{}", prefix, result.strategy)],
    );
    for (cell, tag) in result.grid.iter() {
        let x = cell.col as f64 * size;
        let y = cell.row as f64 * size;
        let id = format!("cell-{}-{}", cell.row, cell.col);
        builder.add_rect(Some(&id), x, y, size, size, &[category(tag)]);

        if let CellTag::Companion(_) = tag {
            builder.add_text(&glyph(tag).to_string(), x + size / 2.0, y + size / 2.0, size * 0.5);
        }
    }
    builder.end_group();

    let extent = GRID_SIZE as f64 * size;
    builder.build(extent, extent)
}

/// CSS class and palette token for a cell
fn category(tag: CellTag) -> String {
    match tag {
        CellTag::Empty => "empty".to_string(),
        CellTag::Footprint => "footprint".to_string(),
        CellTag::Unusable => "unusable".to_string(),
        CellTag::Companion(Symbol::UNKNOWN) => "unknown".to_string(),
        CellTag::Companion(symbol) => companion_token(symbol.as_char()),
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
