//! JSON encoding and decoding of graphs.
//!
//! Decoding is permissive: anything that is not valid JSON becomes the empty
//! graph, and values that are already structured pass through untouched. The
//! `try_*` forms say what went wrong instead of falling back.

use crate::error::CodecError;
use crate::types::FlowGraph;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

/// JSON text of the canonical empty graph
pub const EMPTY_GRAPH_JSON: &str = r#"{"nodes":[],"edges":[]}"#;

/// Something handed over the wire: nothing, raw text, or an already decoded value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Payload {
    #[default]
    Absent,
    Text(String),
    Structured(Value),
}

impl From<Option<&str>> for Payload {
    fn from(text: Option<&str>) -> Self {
        match text {
            Some(t) => Payload::Text(t.to_string()),
            None => Payload::Absent,
        }
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Payload::Absent,
            Value::String(s) => Payload::Text(s),
            other => Payload::Structured(other),
        }
    }
}

fn empty_graph_value() -> Value {
    json!({"nodes": [], "edges": []})
}

/// Decode a payload into a JSON value. Unparseable text becomes the empty graph.
pub fn decode(input: Payload) -> Value {
    match input {
        Payload::Absent => empty_graph_value(),
        Payload::Text(text) => serde_json::from_str(&text).unwrap_or_else(|err| {
            debug!(error = %err, "undecodable graph text, using empty graph");
            empty_graph_value()
        }),
        Payload::Structured(value) => value,
    }
}

/// Encode a payload as JSON text. Text is assumed to be encoded already.
pub fn encode(input: Payload) -> String {
    match input {
        Payload::Absent => EMPTY_GRAPH_JSON.to_string(),
        Payload::Text(text) => text,
        Payload::Structured(value) => value.to_string(),
    }
}

/// Interpret a JSON value as a graph. At least one of `nodes` and `edges`
/// must be present; the other defaults to empty.
pub fn graph_from_value(value: &Value) -> Result<FlowGraph, CodecError> {
    let graph_shaped = value
        .as_object()
        .map(|obj| obj.contains_key("nodes") || obj.contains_key("edges"))
        .unwrap_or(false);
    if !graph_shaped {
        return Err(CodecError::NotGraphShaped);
    }
    FlowGraph::deserialize(value).map_err(CodecError::InvalidJson)
}

pub fn try_decode_graph(text: &str) -> Result<FlowGraph, CodecError> {
    let value: Value = serde_json::from_str(text).map_err(CodecError::InvalidJson)?;
    graph_from_value(&value)
}

/// Decode graph text, falling back to the empty graph on any failure.
pub fn decode_graph(text: Option<&str>) -> FlowGraph {
    let Some(text) = text else {
        return FlowGraph::new();
    };
    try_decode_graph(text).unwrap_or_else(|err| {
        debug!(error = %err, "undecodable graph, using empty graph");
        FlowGraph::new()
    })
}

pub fn try_encode_graph(graph: &FlowGraph) -> Result<String, CodecError> {
    serde_json::to_string(graph).map_err(CodecError::Serialize)
}

pub fn encode_graph(graph: &FlowGraph) -> String {
    try_encode_graph(graph).unwrap_or_else(|err| {
        debug!(error = %err, "unencodable graph, sending empty graph");
        EMPTY_GRAPH_JSON.to_string()
    })
}

/// Description of the graph JSON shape, for API documentation.
pub fn describe_shape() -> Value {
    json!({
        "type": "object",
        "description": "Flowchart graph: nodes and edges in insertion order",
        "properties": {
            "nodes": {
                "type": "array",
                "default": [],
                "items": {
                    "type": "object",
                    "properties": {
                        "id": {"type": "string"},
                        "type": {"type": "string", "enum": ["start", "process", "decision", "end"], "default": "process"},
                        "position": {
                            "type": "object",
                            "properties": {"x": {"type": "number"}, "y": {"type": "number"}}
                        },
                        "data": {
                            "type": "object",
                            "properties": {"label": {"type": "string"}}
                        }
                    },
                    "required": ["id"]
                }
            },
            "edges": {
                "type": "array",
                "default": [],
                "items": {
                    "type": "object",
                    "properties": {
                        "id": {"type": "string"},
                        "source": {"type": "string"},
                        "target": {"type": "string"},
                        "label": {"type": "string"}
                    },
                    "required": ["id", "source", "target"]
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::example_flowchart;

    #[test]
    fn test_decode_absent_and_garbage() {
        assert_eq!(decode(Payload::Absent), empty_graph_value());
        assert_eq!(decode(Payload::Text("not json".into())), empty_graph_value());
        assert_eq!(decode_graph(Some("not json")), FlowGraph::new());
        assert_eq!(decode_graph(None), FlowGraph::new());
    }

    #[test]
    fn test_decode_passes_structured_values_through() {
        let odd = json!({"anything": [1, 2, 3]});
        assert_eq!(decode(Payload::Structured(odd.clone())), odd);
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode(Payload::Absent), EMPTY_GRAPH_JSON);
        assert_eq!(encode(Payload::Text("{oops".into())), "{oops");
        assert_eq!(encode(Payload::Structured(json!({"nodes": []}))), r#"{"nodes":[]}"#);
    }

    #[test]
    fn test_graph_round_trip() {
        let g = example_flowchart();
        assert_eq!(decode_graph(Some(&encode_graph(&g))), g);
    }

    #[test]
    fn test_missing_collections_default_empty() {
        let g = try_decode_graph(r#"{"nodes": [{"id": "1", "data": {"label": "A"}}]}"#).unwrap();
        assert_eq!(g.nodes.len(), 1);
        assert!(g.edges.is_empty());
    }

    #[test]
    fn test_try_decode_reports_cause() {
        assert!(matches!(try_decode_graph("[1, 2"), Err(CodecError::InvalidJson(_))));
        assert!(matches!(try_decode_graph("[1, 2]"), Err(CodecError::NotGraphShaped)));
        assert!(matches!(try_decode_graph(r#"{"nodes": 5}"#), Err(CodecError::InvalidJson(_))));
    }

    #[test]
    fn test_payload_from_value() {
        assert_eq!(Payload::from(Value::Null), Payload::Absent);
        assert_eq!(Payload::from(json!("x")), Payload::Text("x".into()));
        assert_eq!(Payload::from(None::<&str>), Payload::Absent);
    }

    #[test]
    fn test_shape_lists_fields() {
        let shape = describe_shape();
        let node = &shape["properties"]["nodes"]["items"]["properties"];
        assert!(node.get("position").is_some());
        assert!(node.get("data").is_some());
        assert!(shape["properties"]["edges"]["items"]["properties"].get("label").is_some());
    }
}
