//! Structured edit commands, as produced by a command interpreter.
//!
//! An operation is a JSON object tagged by `operation`:
//!
//! ```json
//! {"operation": "edit_node", "node_id": "2", "new_label": "Brew"}
//! ```

use super::{try_delete_edge, try_delete_node, try_edit_node, StackLayout};
use crate::error::StoreError;
use crate::types::{FlowEdge, FlowGraph, FlowNode, NodeKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

const KNOWN_OPERATIONS: [&str; 5] = ["add_node", "edit_node", "delete_node", "connect_nodes", "delete_edge"];

/// Edge body of a `connect_nodes` operation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeDraft {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum Operation {
    AddNode {
        #[serde(default)]
        node: Option<FlowNode>,
    },
    EditNode {
        #[serde(default)]
        node_id: Option<String>,
        #[serde(default)]
        new_label: Option<String>,
    },
    DeleteNode {
        #[serde(default)]
        node_id: Option<String>,
    },
    ConnectNodes {
        #[serde(default)]
        edge: Option<EdgeDraft>,
    },
    DeleteEdge {
        #[serde(default)]
        edge_id: Option<String>,
    },
}

impl Operation {
    /// Read an operation object. The tag is matched case-insensitively and an
    /// unrecognized tag is reported by name.
    pub fn from_value(value: &Value) -> Result<Self, StoreError> {
        let name = value
            .get("operation")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_lowercase();
        if !KNOWN_OPERATIONS.contains(&name.as_str()) {
            return Err(StoreError::UnknownOperation(name));
        }
        let mut tagged = value.clone();
        tagged["operation"] = Value::String(name);
        serde_json::from_value(tagged).map_err(|e| StoreError::InvalidOperation(e.to_string()))
    }

    pub fn from_json(text: &str) -> Result<Self, StoreError> {
        let value: Value = serde_json::from_str(text).map_err(|e| StoreError::InvalidOperation(e.to_string()))?;
        Self::from_value(&value)
    }
}

/// Apply `op`, returning the new graph and a status line describing it.
pub fn try_apply_operation(graph: &FlowGraph, op: &Operation) -> Result<(FlowGraph, String), StoreError> {
    match op {
        Operation::AddNode { node } => {
            let node = node.clone().unwrap_or_else(|| {
                let count = graph.nodes.len();
                FlowNode::new(
                    (count + 1).to_string(),
                    NodeKind::Process,
                    StackLayout::default().slot(count),
                    "New Node",
                )
            });
            let message = format!("Added new {} node: {}", node.kind.as_str(), node.label());
            let mut next = graph.clone();
            next.nodes.push(node);
            Ok((next, message))
        }
        Operation::EditNode { node_id, new_label } => {
            let id = node_id.as_deref().ok_or(StoreError::MissingField("node"))?;
            let new_label = new_label.as_deref().unwrap_or_default();
            let old_label = graph
                .node(id)
                .map(|n| n.label().to_string())
                .ok_or_else(|| StoreError::NodeNotFound(id.to_string()))?;
            let next = try_edit_node(graph, id, new_label)?;
            Ok((next, format!("Updated node {} from '{}' to '{}'", id, old_label, new_label)))
        }
        Operation::DeleteNode { node_id } => {
            let id = node_id.as_deref().ok_or(StoreError::MissingField("node"))?;
            let next = try_delete_node(graph, id)?;
            Ok((next, format!("Deleted node {} and its connections", id)))
        }
        Operation::ConnectNodes { edge } => {
            let draft = edge.as_ref().ok_or(StoreError::MissingField("edge"))?;
            let (source, target) = match (&draft.source, &draft.target) {
                (Some(s), Some(t)) => (s.as_str(), t.as_str()),
                _ => return Err(StoreError::MissingField("edge")),
            };
            if graph.node(source).is_none() || graph.node(target).is_none() {
                return Err(StoreError::MissingNodes {
                    from: source.to_string(),
                    to: target.to_string(),
                });
            }
            let mut new_edge = FlowEdge::between(source, target, draft.label.clone().unwrap_or_default());
            if let Some(id) = &draft.id {
                new_edge.id = id.clone();
            }
            let mut next = graph.clone();
            next.edges.push(new_edge);
            Ok((next, format!("Connected node {} to node {}", source, target)))
        }
        Operation::DeleteEdge { edge_id } => {
            let id = edge_id.as_deref().ok_or(StoreError::MissingField("edge ID"))?;
            let next = try_delete_edge(graph, id)?;
            Ok((next, format!("Deleted edge {}", id)))
        }
    }
}

/// Like [`try_apply_operation`], but a failure leaves the graph as it was and
/// becomes the status line.
pub fn apply_operation(graph: &FlowGraph, op: &Operation) -> (FlowGraph, String) {
    try_apply_operation(graph, op).unwrap_or_else(|err| {
        debug!(error = %err, "operation not applied");
        (graph.clone(), err.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::example_flowchart;
    use serde_json::json;

    #[test]
    fn test_parse_tagged_operation() {
        let op = Operation::from_json(r#"{"operation": "EDIT_NODE", "node_id": "2", "new_label": "Brew"}"#).unwrap();
        assert_eq!(
            op,
            Operation::EditNode {
                node_id: Some("2".into()),
                new_label: Some("Brew".into())
            }
        );
    }

    #[test]
    fn test_unknown_operation() {
        let err = Operation::from_value(&json!({"operation": "rotate"})).unwrap_err();
        assert_eq!(err, StoreError::UnknownOperation("rotate".into()));
        assert_eq!(err.to_string(), "Unknown operation type: rotate");
    }

    #[test]
    fn test_add_default_node() {
        let g = example_flowchart();
        let (next, msg) = apply_operation(&g, &Operation::AddNode { node: None });
        assert_eq!(msg, "Added new process node: New Node");
        let added = &next.nodes[4];
        assert_eq!(added.id, "5");
        assert_eq!(added.position.y, 450.0);
    }

    #[test]
    fn test_edit_reports_old_label() {
        let op = Operation::from_value(&json!({"operation": "edit_node", "node_id": "1", "new_label": "Begin"})).unwrap();
        let (next, msg) = apply_operation(&example_flowchart(), &op);
        assert_eq!(msg, "Updated node 1 from 'Start' to 'Begin'");
        assert_eq!(next.nodes[0].label(), "Begin");
    }

    #[test]
    fn test_connect_requires_existing_nodes() {
        let g = example_flowchart();
        let op = Operation::ConnectNodes {
            edge: Some(EdgeDraft {
                source: Some("1".into()),
                target: Some("99".into()),
                ..Default::default()
            }),
        };
        let (next, msg) = apply_operation(&g, &op);
        assert_eq!(next, g);
        assert!(msg.starts_with("One or both nodes not found"));

        let op = Operation::ConnectNodes {
            edge: Some(EdgeDraft {
                source: Some("4".into()),
                target: Some("1".into()),
                label: Some("again".into()),
                ..Default::default()
            }),
        };
        let (next, msg) = apply_operation(&g, &op);
        assert_eq!(msg, "Connected node 4 to node 1");
        assert_eq!(next.edges.last().map(|e| e.id.as_str()), Some("e4-1"));
    }

    #[test]
    fn test_delete_operations() {
        let g = example_flowchart();
        let (next, msg) = apply_operation(&g, &Operation::DeleteNode { node_id: Some("2".into()) });
        assert_eq!(msg, "Deleted node 2 and its connections");
        assert_eq!(next.edges.len(), 1);

        let (same, msg) = apply_operation(&g, &Operation::DeleteEdge { edge_id: Some("nope".into()) });
        assert_eq!(same, g);
        assert_eq!(msg, "Edge nope not found");
    }
}
