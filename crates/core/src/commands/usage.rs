use super::node::{CommandNode, NodeType};
use itertools::Itertools;

pub fn generate_usage(path: &[&CommandNode]) -> String {
    let mut parts: Vec<String> = path.iter().skip(1).map(|node| get_display_name(node)).collect();

    if let Some(current_node) = path.last() {
        let suffix = build_usage_suffix(current_node);
        if !suffix.is_empty() {
            parts.push(suffix);
        }
    }

    format!("/{}", parts.join(" "))
}

/// Describes everything that may follow `node`. Children become alternatives,
/// bracketed when the node can run on its own or a child takes the rest of
/// the line.
fn build_usage_suffix(node: &CommandNode) -> String {
    if node.children.is_empty() {
        return String::new();
    }

    let alternatives = node
        .children
        .iter()
        .map(|child| {
            let name = get_display_name(child);
            let rest = build_usage_suffix(child);
            if rest.is_empty() {
                name
            } else {
                format!("{} {}", name, rest)
            }
        })
        .join(" | ");

    let optional = node.has_executor() || node.children.iter().any(is_greedy);
    if optional {
        format!("[{}]", alternatives)
    } else if node.children.len() > 1 {
        format!("({})", alternatives)
    } else {
        alternatives
    }
}

fn is_greedy(node: &CommandNode) -> bool {
    matches!(&node.node_type, NodeType::Argument { arg_type, .. } if arg_type.is_greedy())
}

fn get_display_name(node: &CommandNode) -> String {
    match &node.node_type {
        NodeType::Root => String::new(),
        NodeType::Literal { name, .. } => name.clone(),
        NodeType::Argument { name, .. } => format!("<{}>", name),
    }
}

pub fn generate_base_name(path: &[&CommandNode]) -> String {
    let mut parts = Vec::new();

    for node in path {
        match &node.node_type {
            NodeType::Root => {}
            NodeType::Literal { name, .. } => parts.push(name),
            NodeType::Argument { .. } => break,
        }
    }

    format!("/{}", parts.into_iter().join(" "))
}
