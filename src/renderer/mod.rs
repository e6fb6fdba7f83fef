//! Renderers for solved layouts
//!
//! This module takes a PlacementResult and produces either the plain-text
//! grid or an SVG string with CSS classes for styling.

pub mod config;
pub mod svg;
pub mod text;

pub use config::{SvgConfig, TextConfig};
pub use svg::{render_svg, render_svg_with_stylesheet};
pub use text::render_text;

use crate::layout::{CellTag, Symbol};

/// Character drawn for a cell
pub fn glyph(tag: CellTag) -> char {
    match tag {
        CellTag::Empty => ' ',
        CellTag::Footprint => Symbol::FOOTPRINT.as_char(),
        CellTag::Unusable => Symbol::UNUSABLE.as_char(),
        CellTag::Companion(symbol) => symbol.as_char(),
    }
}
