mod warps;

use crate::commands::{
    argument::ArgumentType,
    context::ExecutionContext,
    error::CommandResult,
    node::{CommandNode, NodeType},
    parser,
    registry::CommandRegistry,
    usage, COMMAND_REGISTRY,
};

pub fn register_commands(registry: &mut CommandRegistry) {
    warps::register_commands(registry);

    register_help(registry);
    register_stop(registry);
}

fn register_help(registry: &mut CommandRegistry) {
    fn exec_help_command(ctx: &mut ExecutionContext<'_>) -> CommandResult<()> {
        let command = ctx.args().get_greedy("command")?;
        let root = COMMAND_REGISTRY.get_root();

        if command.is_empty() {
            let mut commands = Vec::new();

            for child in &root.children {
                if let NodeType::Literal { name } = &child.node_type {
                    commands.push(format!("/{}", name));
                }
            }

            commands.sort();
            ctx.reply("Run /help <command> for more information.")?;
            ctx.reply("Available commands:")?;
            for cmd in commands {
                ctx.reply(&format!(" {}", cmd))?;
            }
        } else {
            match parser::parse(root, &command) {
                parser::ParseResult::Success { path, .. }
                | parser::ParseResult::Partial { path, .. }
                | parser::ParseResult::TooManyArguments { path, .. }
                | parser::ParseResult::InvalidArgument { path, .. } => {
                    let usage = usage::generate_usage(&path);
                    ctx.reply(&format!("Usage: {}", usage))?;
                }
                parser::ParseResult::NothingMatched => {
                    ctx.reply(&format!("Command not found: {}", command))?;
                }
            }
        }
        Ok(())
    }

    registry.register(CommandNode::literal("help").then(
        CommandNode::argument("command", ArgumentType::greedy_string()).executes(exec_help_command),
    ));
}

fn register_stop(registry: &mut CommandRegistry) {
    registry.register(CommandNode::literal("stop").executes(|ctx| {
        ctx.require_console()?;
        ctx.server.request_shutdown();
        ctx.reply("Stopping server...")
    }));
}
