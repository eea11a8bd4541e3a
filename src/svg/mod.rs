//! SVG renderer - converts flowchart graphs into SVG strings.
//!
//! Pure string building, no DOM manipulation.

mod renderer;
mod styles;
mod theme;

pub use renderer::{
    canvas_size, escape_xml, render_svg, render_value, try_render_value, SvgOptions, PLACEHOLDER,
};
pub use theme::{Palette, ShapeColors, Theme};
