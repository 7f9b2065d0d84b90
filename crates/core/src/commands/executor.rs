use crate::{
    commands::{
        argument_set::ArgumentSet,
        context::ExecutionContext,
        error::{CommandError, CommandResult, InternalError, UnwrapRuntimeError},
        node::CommandNode,
        parser::{self, ParseResult},
        registry::CommandRegistry,
        usage, CommandSender,
    },
    server::WarpServer,
};

impl CommandRegistry {
    pub fn execute(
        &self,
        server: &mut WarpServer,
        sender: CommandSender,
        command_line: &str,
    ) -> Result<(), InternalError> {
        let command_line = command_line.trim();
        let command_line = command_line.strip_prefix('/').unwrap_or(command_line);
        if command_line.is_empty() {
            return Ok(());
        }

        match parser::parse(self.get_root(), command_line) {
            ParseResult::Success {
                node,
                arguments,
                path,
            } => {
                let mut ctx = ExecutionContext::new(server, sender, ArgumentSet::new(arguments));
                match Self::execute_impl(&mut ctx, node, &path) {
                    Ok(()) => Ok(()),
                    Err(CommandError::Runtime(err)) => {
                        ctx.error(&err.to_string()).unwrap_runtime()?;
                        Ok(())
                    }
                    Err(CommandError::Internal(err)) => Err(err),
                }
            }

            ParseResult::Partial { path, .. } => {
                Self::handle_parse_error(server, sender, &path, "Not enough arguments")
            }
            ParseResult::TooManyArguments { path, remaining } => {
                let message = format!("Too many arguments: {remaining}");
                Self::handle_parse_error(server, sender, &path, &message)
            }
            ParseResult::InvalidArgument { path, remaining } => {
                let message = format!("Invalid argument: {remaining}");
                Self::handle_parse_error(server, sender, &path, &message)
            }

            ParseResult::NothingMatched => {
                let mut ctx = ExecutionContext::new(server, sender, ArgumentSet::empty());
                ctx.error("Command not found!").unwrap_runtime()?;
                Ok(())
            }
        }
    }

    fn execute_impl(
        ctx: &mut ExecutionContext<'_>,
        node: &CommandNode,
        path: &[&CommandNode],
    ) -> CommandResult<()> {
        let Some(executor) = node.executor else {
            unreachable!("Node must have executor to be parsed successfully")
        };

        for node in path {
            for action in &node.permissions {
                ctx.require_permission(*action, None)?;
            }
        }

        executor(ctx)
    }

    fn handle_parse_error(
        server: &mut WarpServer,
        sender: CommandSender,
        path: &[&CommandNode],
        error_message: &str,
    ) -> Result<(), InternalError> {
        let mut ctx = ExecutionContext::new(server, sender, ArgumentSet::empty());

        ctx.error(error_message).unwrap_runtime()?;

        let usage = usage::generate_usage(path);
        ctx.reply_legacy(&format!("&6Usage: &e{}", usage))
            .unwrap_runtime()?;
        let base_name = usage::generate_base_name(path);
        ctx.reply_legacy(&format!(
            "&eRun &e/help {}&e for more information.",
            base_name.trim_start_matches('/')
        ))
        .unwrap_runtime()?;

        Ok(())
    }
}
