//! Type definitions for flowchart graph structures

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Fixed footprint of every node, whatever its kind
pub const NODE_WIDTH: f64 = 150.0;
pub const NODE_HEIGHT: f64 = 40.0;

/// The direction declared in the Mermaid header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    TD, // Top-Down (same as TB)
    TB, // Top-Bottom
    LR, // Left-Right
    BT, // Bottom-Top
    RL, // Right-Left
}

impl Direction {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "TD" => Some(Direction::TD),
            "TB" => Some(Direction::TB),
            "LR" => Some(Direction::LR),
            "BT" => Some(Direction::BT),
            "RL" => Some(Direction::RL),
            _ => None,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Direction::TD => "TD",
            Direction::TB => "TB",
            Direction::LR => "LR",
            Direction::BT => "BT",
            Direction::RL => "RL",
        };
        write!(f, "{}", s)
    }
}

/// Kind of a flowchart node.
///
/// Any unrecognized, non-string, `null` or missing `type` deserializes as `Process`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "Option<Value>")]
pub enum NodeKind {
    Start,
    #[default]
    Process,
    Decision,
    End,
}

impl NodeKind {
    pub fn from_str(s: &str) -> Self {
        match s {
            "start" => NodeKind::Start,
            "decision" => NodeKind::Decision,
            "end" => NodeKind::End,
            _ => NodeKind::Process,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Start => "start",
            NodeKind::Process => "process",
            NodeKind::Decision => "decision",
            NodeKind::End => "end",
        }
    }
}

impl From<Option<Value>> for NodeKind {
    fn from(value: Option<Value>) -> Self {
        match value {
            Some(Value::String(s)) => NodeKind::from_str(&s),
            _ => NodeKind::Process,
        }
    }
}

/// Canvas coordinates of a node's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Payload carried by a node (`data` in the JSON shape)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeData {
    #[serde(default, deserialize_with = "lenient_string")]
    pub label: String,
}

/// A node in the flowchart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: NodeKind,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub data: NodeData,
}

impl FlowNode {
    pub fn new(id: impl Into<String>, kind: NodeKind, position: Position, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            position,
            data: NodeData { label: label.into() },
        }
    }

    pub fn label(&self) -> &str {
        &self.data.label
    }
}

/// A directed edge between two node ids.
///
/// Endpoints are not required to exist; an empty label means "no label".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub label: String,
}

impl FlowEdge {
    /// Edge with the conventional `e<source>-<target>` id
    pub fn between(source: impl Into<String>, target: impl Into<String>, label: impl Into<String>) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: format!("e{}-{}", source, target),
            source,
            target,
            label: label.into(),
        }
    }

    pub fn label(&self) -> Option<&str> {
        if self.label.is_empty() {
            None
        } else {
            Some(&self.label)
        }
    }
}

/// The complete flowchart: nodes and edges in insertion order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlowGraph {
    #[serde(default)]
    pub nodes: Vec<FlowNode>,
    #[serde(default)]
    pub edges: Vec<FlowEdge>,
}

impl FlowGraph {
    /// The canonical empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// First node carrying `id`; later duplicates are shadowed
    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&FlowEdge> {
        self.edges.iter().find(|e| e.id == id)
    }
}

/// Labels accept any JSON: `null` is empty, strings pass through, and other
/// values keep their JSON text.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}
