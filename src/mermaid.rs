//! Mermaid exporter - writes a graph as `flowchart` notation.
//!
//! Only declarations are emitted: all nodes in insertion order, then all
//! edges. No geometry survives, and edge endpoints are written whether or not
//! the nodes they name exist.

use crate::codec::graph_from_value;
use crate::error::CodecError;
use crate::types::{Direction, FlowEdge, FlowGraph, FlowNode, NodeKind};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

lazy_static! {
    // Anything Mermaid could read as syntax inside a label
    static ref RE_LABEL_JUNK: Regex = Regex::new(r"[^\w\s-]").unwrap();
}

/// Returned by [`export_value`] when there is no graph to export
pub const NO_DATA: &str = "No flowchart data available";

const INDENT: &str = "    ";

/// Configuration options for Mermaid export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Declared flow direction. Default: TD
    pub direction: Direction,
}

/// Strip every character that is not a word character, whitespace or `-`.
pub fn sanitize_label(label: &str) -> String {
    RE_LABEL_JUNK.replace_all(label, "").into_owned()
}

pub fn export_mermaid(graph: &FlowGraph, options: &ExportOptions) -> String {
    let mut lines = vec![format!("flowchart {}", options.direction)];
    lines.extend(graph.nodes.iter().map(node_statement));
    lines.extend(graph.edges.iter().map(edge_statement));
    lines.join("\n")
}

pub fn try_export_value(value: Option<&Value>, options: &ExportOptions) -> Result<String, CodecError> {
    let graph = graph_from_value(value.unwrap_or(&Value::Null))?;
    Ok(export_mermaid(&graph, options))
}

/// Export an arbitrary JSON value; anything that is not graph-shaped yields [`NO_DATA`].
pub fn export_value(value: Option<&Value>, options: &ExportOptions) -> String {
    try_export_value(value, options).unwrap_or_else(|err| {
        debug!(error = %err, "nothing to export");
        NO_DATA.to_string()
    })
}

fn node_statement(node: &FlowNode) -> String {
    let label = sanitize_label(node.label());
    let shape = match node.kind {
        NodeKind::Start | NodeKind::End => format!("([{}])", label),
        NodeKind::Decision => format!("{{{}}}", label),
        NodeKind::Process => format!("[{}]", label),
    };
    format!("{}{}{}", INDENT, node.id, shape)
}

fn edge_statement(edge: &FlowEdge) -> String {
    match edge.label() {
        Some(label) => format!(
            "{}{} -->|{}| {}",
            INDENT,
            edge.source,
            sanitize_label(label),
            edge.target
        ),
        None => format!("{}{} --> {}", INDENT, edge.source, edge.target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::example_flowchart;
    use serde_json::json;

    #[test]
    fn test_sanitize_label() {
        assert_eq!(sanitize_label("Decision?"), "Decision");
        assert_eq!(sanitize_label("a-b [c] {d} |e|"), "a-b c d e");
        assert_eq!(sanitize_label("Café_1"), "Café_1");
    }

    #[test]
    fn test_shapes_by_kind() {
        let out = export_mermaid(&example_flowchart(), &ExportOptions::default());
        let expected = [
            "flowchart TD",
            "    1([Start])",
            "    2[Process Step]",
            "    3{Decision}",
            "    4([End])",
            "    1 --> 2",
            "    2 --> 3",
            "    3 -->|Yes| 4",
        ]
        .join("\n");
        assert_eq!(out, expected);
    }

    #[test]
    fn test_direction_option() {
        let opts = ExportOptions {
            direction: Direction::LR,
        };
        assert_eq!(export_mermaid(&FlowGraph::new(), &opts), "flowchart LR");
    }

    #[test]
    fn test_dangling_edges_still_exported() {
        let graph = FlowGraph {
            nodes: Vec::new(),
            edges: vec![FlowEdge::between("x", "y", "")],
        };
        assert_eq!(
            export_mermaid(&graph, &ExportOptions::default()),
            "flowchart TD\n    x --> y"
        );
    }

    #[test]
    fn test_export_value() {
        let opts = ExportOptions::default();
        assert_eq!(export_value(None, &opts), NO_DATA);
        assert_eq!(export_value(Some(&json!("text")), &opts), NO_DATA);
        assert_eq!(export_value(Some(&json!({"nodes": []})), &opts), "flowchart TD");
    }
}
