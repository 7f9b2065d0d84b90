use crate::commands::{
    argument_parser,
    node::{CommandNode, NodeType},
    value::Value,
};

pub enum ParseResult<'a> {
    Success {
        node: &'a CommandNode,
        arguments: Vec<(String, Value)>,
        path: Vec<&'a CommandNode>,
    },
    Partial {
        node: &'a CommandNode,
        path: Vec<&'a CommandNode>,
    },
    TooManyArguments {
        path: Vec<&'a CommandNode>,
        remaining: String,
    },
    InvalidArgument {
        path: Vec<&'a CommandNode>,
        remaining: String,
    },
    NothingMatched,
}

pub(super) fn parse<'a>(root: &'a CommandNode, input: &str) -> ParseResult<'a> {
    let mut remaining_input = input;
    let mut path: Vec<&'a CommandNode> = vec![root];
    let mut arguments: Vec<(String, Value)> = Vec::new();

    while parse_next(&mut path, &mut arguments, &mut remaining_input) {}

    let final_node = path[path.len() - 1];

    if matches!(final_node.node_type, NodeType::Root) {
        return ParseResult::NothingMatched;
    }

    let remainder = remaining_input.trim_start();

    if !remainder.is_empty() {
        if final_node.has_executor() && final_node.children.is_empty() {
            ParseResult::TooManyArguments {
                path,
                remaining: remainder.to_string(),
            }
        } else {
            ParseResult::InvalidArgument {
                path,
                remaining: remainder.to_string(),
            }
        }
    } else if final_node.has_executor() {
        ParseResult::Success {
            node: final_node,
            arguments,
            path,
        }
    } else {
        ParseResult::Partial {
            node: final_node,
            path,
        }
    }
}

fn parse_next<'a>(
    path: &mut Vec<&'a CommandNode>,
    arguments: &mut Vec<(String, Value)>,
    remaining_input: &mut &str,
) -> bool {
    let current_node = path[path.len() - 1];

    for child in &current_node.children {
        match &child.node_type {
            NodeType::Root => continue,

            NodeType::Literal { name } => {
                let Some((token, rest)) = argument_parser::consume_token(remaining_input) else {
                    continue;
                };

                if token.eq_ignore_ascii_case(name) {
                    path.push(child);
                    *remaining_input = rest;
                    return true;
                }
            }

            NodeType::Argument { name, arg_type } => {
                if let Ok((value, rest)) = arg_type.parse(remaining_input) {
                    path.push(child);
                    arguments.push((name.clone(), value));
                    *remaining_input = rest;
                    return true;
                }
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::argument::ArgumentType;

    fn noop(_: &mut crate::commands::ExecutionContext<'_>) -> crate::commands::CommandResult<()> {
        Ok(())
    }

    fn tree() -> CommandNode {
        CommandNode::root()
            .then(
                CommandNode::literal("warp")
                    .executes(noop)
                    .then(CommandNode::literal("help").executes(noop))
                    .then(CommandNode::argument("name", ArgumentType::warp_name()).executes(noop)),
            )
            .then(
                CommandNode::literal("renamewarp").then(
                    CommandNode::argument("old", ArgumentType::warp_name()).then(
                        CommandNode::argument("new", ArgumentType::warp_name()).executes(noop),
                    ),
                ),
            )
    }

    #[test]
    fn literal_wins_over_argument() {
        let root = tree();
        let ParseResult::Success { arguments, path, .. } = parse(&root, "warp help") else {
            panic!("expected success");
        };
        assert!(arguments.is_empty());
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn arguments_are_collected() {
        let root = tree();
        let ParseResult::Success { arguments, .. } = parse(&root, "renamewarp Old new") else {
            panic!("expected success");
        };
        let names: Vec<_> = arguments.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["old", "new"]);
        assert!(matches!(&arguments[0].1, Value::WarpName(name) if name == "old"));
    }

    #[test]
    fn failures() {
        let root = tree();
        assert!(matches!(parse(&root, "renamewarp a"), ParseResult::Partial { .. }));
        assert!(matches!(
            parse(&root, "warp spawn extra"),
            ParseResult::TooManyArguments { remaining, .. } if remaining == "extra"
        ));
        assert!(matches!(
            parse(&root, "warp bad.name"),
            ParseResult::InvalidArgument { remaining, .. } if remaining == "bad.name"
        ));
        assert!(matches!(parse(&root, "teleport"), ParseResult::NothingMatched));
    }
}
