//! Editing the currently selected element.

use super::{or_unchanged, try_edit_edge, try_edit_node};
use crate::error::StoreError;
use crate::types::FlowGraph;

/// Which element the editing surface has selected
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Node(String),
    Edge(String),
}

/// Replace the label of the selected node or edge with `text`.
pub fn try_edit_element(graph: &FlowGraph, selection: &Selection, text: Option<&str>) -> Result<FlowGraph, StoreError> {
    let text = match text {
        Some(t) if !t.is_empty() => t,
        _ => return Err(StoreError::EmptyEditText),
    };
    match selection {
        Selection::None => Err(StoreError::NothingSelected),
        Selection::Node(id) => try_edit_node(graph, id, text),
        Selection::Edge(id) => try_edit_edge(graph, id, text),
    }
}

pub fn edit_element(graph: &FlowGraph, selection: &Selection, text: Option<&str>) -> FlowGraph {
    or_unchanged(graph, "edit_element", try_edit_element(graph, selection, text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{add_node, connect_nodes};

    fn sample() -> FlowGraph {
        let g = add_node(&FlowGraph::new(), Some("A"));
        let g = add_node(&g, Some("B"));
        connect_nodes(&g, Some("1,2,go"))
    }

    #[test]
    fn test_nothing_selected_is_noop() {
        let g = sample();
        assert_eq!(edit_element(&g, &Selection::None, Some("X")), g);
        assert_eq!(
            try_edit_element(&g, &Selection::None, Some("X")),
            Err(StoreError::NothingSelected)
        );
    }

    #[test]
    fn test_empty_text_is_noop() {
        let g = sample();
        let sel = Selection::Node("1".into());
        assert_eq!(edit_element(&g, &sel, Some("")), g);
        assert_eq!(edit_element(&g, &sel, None), g);
    }

    #[test]
    fn test_edit_selected_node() {
        let g = edit_element(&sample(), &Selection::Node("2".into()), Some("Done"));
        assert_eq!(g.nodes[1].label(), "Done");
        assert_eq!(g.nodes[0].label(), "A");
    }

    #[test]
    fn test_edit_selected_edge() {
        let g = edit_element(&sample(), &Selection::Edge("e1-2".into()), Some("stop"));
        assert_eq!(g.edges[0].label, "stop");
    }

    #[test]
    fn test_stale_selection() {
        let g = sample();
        let err = try_edit_element(&g, &Selection::Node("42".into()), Some("x")).unwrap_err();
        assert!(err.is_rejection());
        assert_eq!(edit_element(&g, &Selection::Node("42".into()), Some("x")), g);
    }
}
