//! Canned graphs: the demo chart, an error placeholder chart, and an offline
//! outline built from free text.

use crate::types::{FlowEdge, FlowGraph, FlowNode, NodeKind, Position};

const FALLBACK_STEPS: [&str; 4] = ["Prepare", "Execute", "Verify", "Complete"];

/// Four-step demo chart: Start, Process Step, Decision?, End.
pub fn example_flowchart() -> FlowGraph {
    let steps = [
        (NodeKind::Start, "Start"),
        (NodeKind::Process, "Process Step"),
        (NodeKind::Decision, "Decision?"),
        (NodeKind::End, "End"),
    ];
    let nodes = steps
        .iter()
        .enumerate()
        .map(|(i, (kind, label))| {
            FlowNode::new((i + 1).to_string(), *kind, Position::new(150.0, 50.0 + 100.0 * i as f64), *label)
        })
        .collect();
    FlowGraph {
        nodes,
        edges: vec![
            FlowEdge::between("1", "2", ""),
            FlowEdge::between("2", "3", ""),
            FlowEdge::between("3", "4", "Yes"),
        ],
    }
}

/// Single node chart carrying a (truncated) error message.
pub fn error_flowchart(message: &str) -> FlowGraph {
    let label = format!("{}...", truncate(message, 20));
    FlowGraph {
        nodes: vec![FlowNode::new("error", NodeKind::Process, Position::new(150.0, 100.0), label)],
        edges: Vec::new(),
    }
}

/// Outline a process from free text without any language model: one step per
/// meaningful word of the first ten, framed by start/initialize and a final
/// success check.
pub fn sketch_from_text(text: &str) -> FlowGraph {
    let mut words: Vec<String> = text
        .split_whitespace()
        .take(10)
        .map(|w| w.chars().filter(|c| c.is_alphanumeric()).collect::<String>())
        .filter(|w| w.chars().count() > 2)
        .map(|w| title_case(&w))
        .collect();
    if words.is_empty() {
        words = FALLBACK_STEPS.iter().map(|s| s.to_string()).collect();
    }

    let mut nodes = vec![
        FlowNode::new("1", NodeKind::Start, Position::new(150.0, 50.0), "Start"),
        FlowNode::new("2", NodeKind::Process, Position::new(150.0, 150.0), "Initialize"),
    ];
    for (i, word) in words.iter().take(5).enumerate() {
        let id = i + 3;
        nodes.push(FlowNode::new(
            id.to_string(),
            NodeKind::Process,
            Position::new(150.0, 50.0 + 100.0 * id as f64),
            truncate(word, 20),
        ));
    }
    for (kind, label) in [(NodeKind::Decision, "Success?"), (NodeKind::End, "Complete")] {
        let count = nodes.len();
        nodes.push(FlowNode::new(
            (count + 1).to_string(),
            kind,
            Position::new(150.0, 50.0 + 100.0 * count as f64),
            label,
        ));
    }

    let edges = nodes
        .windows(2)
        .map(|pair| {
            let label = if pair[0].kind == NodeKind::Decision { "Yes" } else { "" };
            FlowEdge::between(pair[0].id.clone(), pair[1].id.clone(), label)
        })
        .collect();

    FlowGraph { nodes, edges }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Upper-case letters that follow a non-letter, lower-case the rest
fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut prev_is_letter = false;
    for c in word.chars() {
        if prev_is_letter {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_is_letter = c.is_alphabetic();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_shape() {
        let g = example_flowchart();
        let kinds: Vec<_> = g.nodes.iter().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![NodeKind::Start, NodeKind::Process, NodeKind::Decision, NodeKind::End]
        );
        assert_eq!(g.nodes[3].position, Position::new(150.0, 350.0));
        assert_eq!(g.edges[2].label, "Yes");
    }

    #[test]
    fn test_error_flowchart() {
        let g = error_flowchart("Website error while fetching");
        assert_eq!(g.nodes[0].id, "error");
        assert_eq!(g.nodes[0].label(), "Website error while ...");
    }

    #[test]
    fn test_sketch_from_text() {
        let g = sketch_from_text("grind the beans, heat water");
        let labels: Vec<_> = g.nodes.iter().map(|n| n.label()).collect();
        assert_eq!(
            labels,
            vec!["Start", "Initialize", "Grind", "The", "Beans", "Heat", "Water", "Success?", "Complete"]
        );
        assert_eq!(g.nodes[2].position.y, 350.0);
        assert_eq!(g.nodes[7].id, "8");
        assert_eq!(g.nodes[7].position.y, 750.0);
        assert_eq!(g.edges.len(), 8);
        assert_eq!(g.edges[7].label, "Yes");
        assert_eq!(g.edges[7].id, "e8-9");
    }

    #[test]
    fn test_sketch_fallback_words() {
        let g = sketch_from_text("a b !!");
        assert_eq!(g.nodes[2].label(), "Prepare");
        assert_eq!(g.nodes.len(), 8);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("hELLO"), "Hello");
        assert_eq!(title_case("2nd"), "2Nd");
    }
}
