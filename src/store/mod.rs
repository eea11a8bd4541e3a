//! Graph editing operations.
//!
//! Every operation borrows the current graph and hands back a new one; the
//! input is never touched, so a caller holding an older snapshot keeps it.
//! Each edit comes in two forms: `try_*` reports why nothing happened, the
//! plain form logs that reason and returns the input unchanged.

mod operation;
mod selection;

pub use operation::{apply_operation, try_apply_operation, Operation};
pub use selection::{edit_element, try_edit_element, Selection};

use crate::error::StoreError;
use crate::types::{FlowEdge, FlowGraph, FlowNode, NodeKind, Position};
use tracing::debug;

/// Placement rule for auto-added nodes: a fixed vertical stack that ignores
/// where existing nodes have been moved to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackLayout {
    pub x: f64,
    pub top: f64,
    pub step: f64,
}

impl Default for StackLayout {
    fn default() -> Self {
        Self {
            x: 150.0,
            top: 50.0,
            step: 100.0,
        }
    }
}

impl StackLayout {
    /// Slot for the node that will follow `count` existing nodes
    pub fn slot(&self, count: usize) -> Position {
        Position::new(self.x, self.top + self.step * count as f64)
    }
}

/// Parsed `source,target,label` connect argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectSpec {
    pub source: String,
    pub target: String,
    pub label: String,
}

impl ConnectSpec {
    /// Exactly three comma-separated fields, each trimmed. Empty fields still
    /// count, so `a,,b` has three fields and `a,b` has two.
    pub fn parse(spec: &str) -> Result<Self, StoreError> {
        if spec.is_empty() {
            return Err(StoreError::EmptySpec);
        }
        let fields: Vec<&str> = spec.split(',').map(str::trim).collect();
        match fields.as_slice() {
            [source, target, label] => Ok(Self {
                source: source.to_string(),
                target: target.to_string(),
                label: label.to_string(),
            }),
            _ => Err(StoreError::MalformedSpec { fields: fields.len() }),
        }
    }
}

fn next_id(graph: &FlowGraph) -> String {
    (graph.nodes.len() + 1).to_string()
}

fn with_node(graph: &FlowGraph, node: FlowNode) -> FlowGraph {
    let mut next = graph.clone();
    next.nodes.push(node);
    next
}

fn with_edge(graph: &FlowGraph, edge: FlowEdge) -> FlowGraph {
    let mut next = graph.clone();
    next.edges.push(edge);
    next
}

fn or_unchanged(graph: &FlowGraph, op: &'static str, result: Result<FlowGraph, StoreError>) -> FlowGraph {
    result.unwrap_or_else(|err| {
        debug!(op, error = %err, rejected = err.is_rejection(), "edit not applied");
        graph.clone()
    })
}

// ============================================================================
// Core edits
// ============================================================================

/// Append a `process` node labelled `label` at the next stack slot.
pub fn try_add_node(graph: &FlowGraph, label: Option<&str>, layout: &StackLayout) -> Result<FlowGraph, StoreError> {
    let label = match label {
        Some(l) if !l.is_empty() => l,
        _ => return Err(StoreError::EmptyLabel),
    };
    let position = layout.slot(graph.nodes.len());
    Ok(with_node(
        graph,
        FlowNode::new(next_id(graph), NodeKind::Process, position, label),
    ))
}

pub fn add_node(graph: &FlowGraph, label: Option<&str>) -> FlowGraph {
    or_unchanged(graph, "add_node", try_add_node(graph, label, &StackLayout::default()))
}

/// Append an edge described by `source,target,label`. Endpoints are not
/// checked against the node list.
pub fn try_connect_nodes(graph: &FlowGraph, spec: Option<&str>) -> Result<FlowGraph, StoreError> {
    let spec = ConnectSpec::parse(spec.unwrap_or_default())?;
    Ok(with_edge(
        graph,
        FlowEdge::between(spec.source, spec.target, spec.label),
    ))
}

pub fn connect_nodes(graph: &FlowGraph, spec: Option<&str>) -> FlowGraph {
    or_unchanged(graph, "connect_nodes", try_connect_nodes(graph, spec))
}

/// Reset to the canonical empty graph.
pub fn clear(_graph: &FlowGraph) -> FlowGraph {
    FlowGraph::new()
}

// ============================================================================
// Explicit edits
// ============================================================================

/// Append a node with an explicit kind and position.
pub fn try_add_node_with(
    graph: &FlowGraph,
    kind: NodeKind,
    label: &str,
    position: Position,
) -> Result<FlowGraph, StoreError> {
    if label.is_empty() {
        return Err(StoreError::EmptyLabel);
    }
    Ok(with_node(graph, FlowNode::new(next_id(graph), kind, position, label)))
}

pub fn add_node_with(graph: &FlowGraph, kind: NodeKind, label: &str, position: Position) -> FlowGraph {
    or_unchanged(graph, "add_node_with", try_add_node_with(graph, kind, label, position))
}

/// Relabel the first node carrying `id`.
pub fn try_edit_node(graph: &FlowGraph, id: &str, label: &str) -> Result<FlowGraph, StoreError> {
    let index = graph
        .nodes
        .iter()
        .position(|n| n.id == id)
        .ok_or_else(|| StoreError::NodeNotFound(id.to_string()))?;
    let mut next = graph.clone();
    next.nodes[index].data.label = label.to_string();
    Ok(next)
}

pub fn edit_node(graph: &FlowGraph, id: &str, label: &str) -> FlowGraph {
    or_unchanged(graph, "edit_node", try_edit_node(graph, id, label))
}

/// Relabel the first edge carrying `id`.
pub fn try_edit_edge(graph: &FlowGraph, id: &str, label: &str) -> Result<FlowGraph, StoreError> {
    let index = graph
        .edges
        .iter()
        .position(|e| e.id == id)
        .ok_or_else(|| StoreError::EdgeNotFound(id.to_string()))?;
    let mut next = graph.clone();
    next.edges[index].label = label.to_string();
    Ok(next)
}

/// Drop every node carrying `id` together with every edge touching it.
pub fn try_delete_node(graph: &FlowGraph, id: &str) -> Result<FlowGraph, StoreError> {
    if graph.node(id).is_none() {
        return Err(StoreError::NodeNotFound(id.to_string()));
    }
    Ok(FlowGraph {
        nodes: graph.nodes.iter().filter(|n| n.id != id).cloned().collect(),
        edges: graph
            .edges
            .iter()
            .filter(|e| e.source != id && e.target != id)
            .cloned()
            .collect(),
    })
}

pub fn delete_node(graph: &FlowGraph, id: &str) -> FlowGraph {
    or_unchanged(graph, "delete_node", try_delete_node(graph, id))
}

/// Drop every edge carrying `id`.
pub fn try_delete_edge(graph: &FlowGraph, id: &str) -> Result<FlowGraph, StoreError> {
    if graph.edge(id).is_none() {
        return Err(StoreError::EdgeNotFound(id.to_string()));
    }
    Ok(FlowGraph {
        nodes: graph.nodes.clone(),
        edges: graph.edges.iter().filter(|e| e.id != id).cloned().collect(),
    })
}

pub fn delete_edge(graph: &FlowGraph, id: &str) -> FlowGraph {
    or_unchanged(graph, "delete_edge", try_delete_edge(graph, id))
}
