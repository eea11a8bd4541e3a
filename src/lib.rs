//! flowedit - Edit flowchart graphs and render them to SVG or Mermaid
//!
//! This library holds a small node/edge flowchart model, a set of editing
//! operations over it, and two renderers: an SVG drawing and a Mermaid
//! `flowchart` export. Graphs travel as JSON.
//!
//! # Example
//!
//! ```rust
//! use flowedit::{store, FlowGraph};
//!
//! let graph = store::add_node(&FlowGraph::new(), Some("Start"));
//! let graph = store::add_node(&graph, Some("End"));
//! let graph = store::connect_nodes(&graph, Some("1,2,Yes"));
//!
//! let svg = flowedit::render_to_svg(&graph);
//! assert!(svg.contains(">Start</text>"));
//!
//! let mermaid = flowedit::export_to_mermaid(&graph);
//! assert_eq!(mermaid, "flowchart TD\n    1[Start]\n    2[End]\n    1 -->|Yes| 2");
//! ```
//!
//! # Failure policy
//!
//! Nothing here fails the caller. A malformed edit returns the graph it was
//! given, undecodable JSON becomes the empty graph, and a value that is not a
//! graph renders as a fixed placeholder. Every such operation also has a
//! `try_*` form that returns the reason as a typed error.

pub mod codec;
pub mod error;
pub mod mermaid;
pub mod store;
pub mod svg;
pub mod templates;
pub mod types;

pub use codec::{decode, decode_graph, encode, encode_graph, Payload};
pub use error::{CodecError, StoreError};
pub use mermaid::{export_mermaid, ExportOptions};
pub use store::Selection;
pub use svg::{render_svg, SvgOptions};
pub use types::*;

/// Render a graph to SVG with the default options.
///
/// # Example
/// ```rust
/// let svg = flowedit::render_to_svg(&flowedit::FlowGraph::new());
/// assert!(svg.starts_with("<svg"));
/// ```
pub fn render_to_svg(graph: &FlowGraph) -> String {
    render_svg(graph, &SvgOptions::default())
}

/// Export a graph to Mermaid with the default options.
pub fn export_to_mermaid(graph: &FlowGraph) -> String {
    export_mermaid(graph, &ExportOptions::default())
}
