//! Geometry, font and stroke constants.
//!
//! Edge anchors and label baselines are fixed offsets into the uniform node
//! footprint; consumers depend on these exact numbers.

use crate::types::{NODE_HEIGHT, NODE_WIDTH};

/// Anchor offsets inside the node box (in canvas units)
pub struct Anchors;

impl Anchors {
    /// Horizontal center of the box
    pub const CENTER_X: f64 = NODE_WIDTH / 2.0;
    /// Where an outgoing edge leaves its source
    pub const EDGE_OUT_Y: f64 = 30.0;
    /// Where an incoming edge meets its target
    pub const EDGE_IN_Y: f64 = 10.0;
    /// Baseline of the node label
    pub const LABEL_BASELINE_Y: f64 = 25.0;
    /// Edge labels sit this far above the segment midpoint
    pub const EDGE_LABEL_LIFT: f64 = 5.0;
}

/// Corner radius of start/end terminals
pub const TERMINAL_RADIUS: f64 = 20.0;

/// Fixed font sizes used in the renderer (in px)
pub struct FontSizes;

impl FontSizes {
    pub const NODE_LABEL: f64 = 14.0;
    pub const EDGE_LABEL: f64 = 12.0;
}

pub struct FontFamilies;

impl FontFamilies {
    pub const NODE_LABEL: &'static str = "Arial, sans-serif";
    pub const EDGE_LABEL: &'static str = "Arial";
}

/// Stroke widths per element type (in px)
pub struct StrokeWidths;

impl StrokeWidths {
    pub const NODE: f64 = 2.0;
    pub const CONNECTOR: f64 = 2.0;
}

/// Arrow head dimensions
pub struct ArrowHead;

impl ArrowHead {
    pub const WIDTH: f64 = 10.0;
    pub const HEIGHT: f64 = 7.0;
}
