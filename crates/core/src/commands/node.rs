use crate::commands::{
    argument::ArgumentType, context::ExecutionContext, error::CommandResult, CommandSender,
};
use crate::permissions::WarpAction;
use crate::server::WarpServer;

pub type Executor = fn(&mut ExecutionContext<'_>) -> CommandResult<()>;

/// Produces candidate values for an argument, before prefix filtering.
pub type SuggestionProvider = fn(&WarpServer, CommandSender) -> Vec<String>;

#[derive(Clone)]
pub struct CommandNode {
    pub(super) node_type: NodeType,
    pub(super) children: Vec<CommandNode>,
    pub(super) executor: Option<Executor>,
    pub(super) permissions: Vec<WarpAction>,
    pub(super) suggestions: Option<SuggestionProvider>,
}

#[derive(Clone)]
pub enum NodeType {
    Root,
    Literal {
        name: String,
    },
    Argument {
        name: String,
        arg_type: ArgumentType,
    },
}

impl CommandNode {
    fn with_type(node_type: NodeType) -> Self {
        Self {
            node_type,
            children: Vec::new(),
            executor: None,
            permissions: Vec::new(),
            suggestions: None,
        }
    }

    pub fn root() -> Self {
        Self::with_type(NodeType::Root)
    }

    pub fn literal(name: impl Into<String>) -> Self {
        Self::with_type(NodeType::Literal { name: name.into() })
    }

    pub fn argument(name: impl Into<String>, arg_type: impl Into<ArgumentType>) -> Self {
        Self::with_type(NodeType::Argument {
            name: name.into(),
            arg_type: arg_type.into(),
        })
    }

    pub fn then(mut self, child: CommandNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn executes(mut self, executor: Executor) -> Self {
        self.executor = Some(executor);
        self
    }

    /// The sender must be allowed `action` to run this node or anything below it.
    pub fn require_permission(mut self, action: WarpAction) -> Self {
        self.permissions.push(action);
        self
    }

    pub fn suggests(mut self, provider: SuggestionProvider) -> Self {
        self.suggestions = Some(provider);
        self
    }

    pub(super) fn has_executor(&self) -> bool {
        self.executor.is_some()
    }
}
