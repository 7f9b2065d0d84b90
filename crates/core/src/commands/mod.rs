mod argument;
mod argument_parser;
mod argument_set;
mod builtin;
mod context;
mod error;
mod executor;
mod node;
mod parser;
mod registry;
mod suggest;
mod usage;
mod value;

pub use context::ExecutionContext;
pub use error::{CommandError, CommandResult, InternalError, RuntimeError};
pub use node::CommandNode;
pub use registry::CommandRegistry;

use once_cell::sync::Lazy;

pub static COMMAND_REGISTRY: Lazy<CommandRegistry> = Lazy::new(|| {
    let mut registry = CommandRegistry::new();
    builtin::register_commands(&mut registry);
    registry
});

/// Who issued a command. Players are referred to by their index in
/// `WarpServer::players`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandSender {
    Player(usize),
    Console,
}
