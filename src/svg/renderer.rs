//! SVG renderer - converts a FlowGraph into an SVG string.
//!
//! Pure string building, no DOM manipulation.
//! Renders back-to-front: edges (with their labels) → nodes (with their labels),
//! so nodes always sit on top of the lines that reach them.

use super::styles::{
    Anchors, ArrowHead, FontFamilies, FontSizes, StrokeWidths, TERMINAL_RADIUS,
};
use super::theme::{Palette, Theme};
use crate::codec::graph_from_value;
use crate::error::CodecError;
use crate::types::{FlowEdge, FlowGraph, FlowNode, NodeKind, Position, NODE_HEIGHT, NODE_WIDTH};
use serde_json::Value;
use tracing::{debug, trace};

/// Emitted instead of a drawing when the input is not a graph at all
pub const PLACEHOLDER: &str = "<div>No flowchart data available</div>";

/// Configuration options for SVG rendering
#[derive(Debug, Clone, PartialEq)]
pub struct SvgOptions {
    pub theme: Theme,
    /// Canvas is never narrower than this plus `margin_x`. Default: 300
    pub min_width: f64,
    /// Canvas is never shorter than this plus `margin_y`. Default: 400
    pub min_height: f64,
    /// Room right of the right-most node origin. Default: 200
    pub margin_x: f64,
    /// Room below the lowest node origin. Default: 100
    pub margin_y: f64,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            min_width: 300.0,
            min_height: 400.0,
            margin_x: 200.0,
            margin_y: 100.0,
        }
    }
}

/// Render a graph as an SVG document.
pub fn render_svg(graph: &FlowGraph, options: &SvgOptions) -> String {
    let palette = Palette::from_theme(options.theme);
    let (width, height) = canvas_size(graph, options);
    let mut parts: Vec<String> = Vec::new();

    parts.push(format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" style="background: {bg}">"#,
        w = width,
        h = height,
        bg = palette.background
    ));
    parts.push("<defs>".to_string());
    parts.push(arrow_marker_def(&palette));
    parts.push("</defs>".to_string());

    // 1. Edges, skipping any whose endpoints do not resolve
    for edge in &graph.edges {
        match (graph.node(&edge.source), graph.node(&edge.target)) {
            (Some(source), Some(target)) => parts.push(render_edge(edge, source, target, &palette)),
            _ => trace!(edge = %edge.id, "skipping dangling edge"),
        }
    }

    // 2. Nodes
    for node in &graph.nodes {
        parts.push(render_node(node, &palette));
    }

    parts.push("</svg>".to_string());

    parts.join("\n")
}

/// Render an arbitrary JSON value, reporting why it is not drawable.
pub fn try_render_value(value: Option<&Value>, options: &SvgOptions) -> Result<String, CodecError> {
    let graph = graph_from_value(value.unwrap_or(&Value::Null))?;
    Ok(render_svg(&graph, options))
}

/// Render an arbitrary JSON value; anything that is not graph-shaped yields
/// [`PLACEHOLDER`]. An empty graph still gets a blank canvas.
pub fn render_value(value: Option<&Value>, options: &SvgOptions) -> String {
    try_render_value(value, options).unwrap_or_else(|err| {
        debug!(error = %err, "rendering placeholder");
        PLACEHOLDER.to_string()
    })
}

/// Canvas dimensions: the furthest node origin (floored at the minimum
/// extent) plus the margins, so every node box fits.
pub fn canvas_size(graph: &FlowGraph, options: &SvgOptions) -> (f64, f64) {
    let max_x = graph
        .nodes
        .iter()
        .map(|n| n.position.x)
        .fold(options.min_width, f64::max);
    let max_y = graph
        .nodes
        .iter()
        .map(|n| n.position.y)
        .fold(options.min_height, f64::max);
    (max_x + options.margin_x, max_y + options.margin_y)
}

// ============================================================================
// Arrow marker definition
// ============================================================================

fn arrow_marker_def(palette: &Palette) -> String {
    let w = ArrowHead::WIDTH;
    let h = ArrowHead::HEIGHT;
    format!(
        r#"  <marker id="arrowhead" markerWidth="{w}" markerHeight="{h}" refX="{w}" refY="{half_h}" orient="auto">
    <polygon points="0 0, {w} {half_h}, 0 {h}" fill="{fill}" />
  </marker>"#,
        w = w,
        h = h,
        half_h = h / 2.0,
        fill = palette.line
    )
}

// ============================================================================
// Edge rendering
// ============================================================================

/// Straight connector from the source's bottom anchor to the target's top
/// anchor. Coordinates print with `f64` `Display`, so integral midpoints have
/// no fraction (`225`, not `225.0`).
fn render_edge(edge: &FlowEdge, source: &FlowNode, target: &FlowNode, palette: &Palette) -> String {
    let x1 = source.position.x + Anchors::CENTER_X;
    let y1 = source.position.y + Anchors::EDGE_OUT_Y;
    let x2 = target.position.x + Anchors::CENTER_X;
    let y2 = target.position.y + Anchors::EDGE_IN_Y;

    let mut parts = vec![
        format!(r#"<g class="edge" data-id="{}">"#, escape_xml(&edge.id)),
        format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}" marker-end="url(#arrowhead)" />"#,
            x1, y1, x2, y2, palette.line, StrokeWidths::CONNECTOR
        ),
    ];

    if let Some(label) = edge.label() {
        let mid = Position::new((x1 + x2) / 2.0, (y1 + y2) / 2.0 - Anchors::EDGE_LABEL_LIFT);
        parts.push(format!(
            r#"<text x="{}" y="{}" text-anchor="middle" fill="{}" font-size="{}" font-family="{}">{}</text>"#,
            mid.x,
            mid.y,
            palette.text,
            FontSizes::EDGE_LABEL,
            FontFamilies::EDGE_LABEL,
            escape_xml(label)
        ));
    }

    parts.push("</g>".to_string());
    parts.join("\n")
}

// ============================================================================
// Node rendering
// ============================================================================

fn render_node(node: &FlowNode, palette: &Palette) -> String {
    let Position { x, y } = node.position;
    let colors = palette.shape(node.kind);

    let shape = match node.kind {
        NodeKind::Start | NodeKind::End => render_terminal(x, y, &colors.fill, &colors.stroke),
        NodeKind::Decision => render_diamond(x, y, &colors.fill, &colors.stroke),
        NodeKind::Process => render_rect(x, y, &colors.fill, &colors.stroke),
    };

    [
        format!(
            r#"<g class="node" data-id="{}" data-type="{}">"#,
            escape_xml(&node.id),
            node.kind.as_str()
        ),
        shape,
        render_node_label(node, palette),
        "</g>".to_string(),
    ]
    .join("\n")
}

fn render_rect(x: f64, y: f64, fill: &str, stroke: &str) -> String {
    format!(
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" stroke="{}" stroke-width="{}" />"#,
        x, y, NODE_WIDTH, NODE_HEIGHT, fill, stroke, StrokeWidths::NODE
    )
}

fn render_terminal(x: f64, y: f64, fill: &str, stroke: &str) -> String {
    format!(
        r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{r}" ry="{r}" fill="{}" stroke="{}" stroke-width="{}" />"#,
        x,
        y,
        NODE_WIDTH,
        NODE_HEIGHT,
        fill,
        stroke,
        StrokeWidths::NODE,
        r = TERMINAL_RADIUS
    )
}

fn render_diamond(x: f64, y: f64, fill: &str, stroke: &str) -> String {
    let cx = x + NODE_WIDTH / 2.0;
    let cy = y + NODE_HEIGHT / 2.0;
    // top, right, bottom, left corners of the bounding box
    let points = format!(
        "{},{} {},{} {},{} {},{}",
        cx,
        y,
        x + NODE_WIDTH,
        cy,
        cx,
        y + NODE_HEIGHT,
        x,
        cy
    );
    format!(
        r#"<polygon points="{}" fill="{}" stroke="{}" stroke-width="{}" />"#,
        points, fill, stroke, StrokeWidths::NODE
    )
}

fn render_node_label(node: &FlowNode, palette: &Palette) -> String {
    format!(
        r#"<text x="{}" y="{}" text-anchor="middle" fill="{}" font-size="{}" font-family="{}" font-weight="bold">{}</text>"#,
        node.position.x + Anchors::CENTER_X,
        node.position.y + Anchors::LABEL_BASELINE_Y,
        palette.text,
        FontSizes::NODE_LABEL,
        FontFamilies::NODE_LABEL,
        escape_xml(node.label())
    )
}

// ============================================================================
// Utilities
// ============================================================================

/// Escape special XML characters in text content
pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
