use crate::commands::{
    node::{CommandNode, NodeType},
    parser::{self, ParseResult},
    registry::CommandRegistry,
    CommandSender,
};
use crate::server::WarpServer;
use itertools::Itertools;

impl CommandRegistry {
    /// Completions for the last word of a partially typed command line.
    pub fn suggest(&self, server: &WarpServer, sender: CommandSender, line: &str) -> Vec<String> {
        let line = line.trim_start();
        let line = line.strip_prefix('/').unwrap_or(line);
        let (head, prefix) = line.rsplit_once(char::is_whitespace).unwrap_or(("", line));
        let prefix = prefix.to_lowercase();

        let node = if head.trim().is_empty() {
            self.get_root()
        } else {
            match parser::parse(self.get_root(), head) {
                ParseResult::Success { node, path, .. } | ParseResult::Partial { node, path } => {
                    if !path.iter().all(|node| allowed(server, sender, node)) {
                        return Vec::new();
                    }
                    node
                }
                _ => return Vec::new(),
            }
        };

        node.children
            .iter()
            .filter(|child| allowed(server, sender, child))
            .flat_map(|child| candidates(server, sender, child))
            .filter(|candidate| candidate.starts_with(&prefix))
            .sorted()
            .dedup()
            .collect()
    }
}

fn allowed(server: &WarpServer, sender: CommandSender, node: &CommandNode) -> bool {
    node.permissions
        .iter()
        .all(|action| server.is_allowed(sender, *action, None))
}

fn candidates(server: &WarpServer, sender: CommandSender, node: &CommandNode) -> Vec<String> {
    match &node.node_type {
        NodeType::Root => Vec::new(),
        NodeType::Literal { name } => vec![name.clone()],
        NodeType::Argument { .. } => node
            .suggestions
            .map(|provider| provider(server, sender))
            .unwrap_or_default(),
    }
}
