use crate::registry::WarpError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Permission denied: {permission}")]
    PermissionDenied { permission: String },
    #[error("This command can only be executed by players")]
    PlayerOnly,
    #[error("This command can only be executed from the console")]
    ConsoleOnly,
    #[error("Target dimension not found on server: {dimension}")]
    UnknownDimension { dimension: String },
    #[error(transparent)]
    Warp(#[from] WarpError),
}

#[derive(Debug, Error)]
pub enum InternalError {
    #[error(
        "Internal error: Argument '{name}' not found in ArgumentSet (command registration bug)"
    )]
    MissingArgument { name: String },
    #[error("Internal error: Argument '{name}' has wrong type, expected {expected} (command registration bug)")]
    WrongArgumentType { name: String, expected: String },
    #[error("Internal error: Player index {index} is invalid (state management bug)")]
    InvalidPlayerIndex { index: usize },
    #[error("Internal error (bug): {message}")]
    Message { message: String },
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl From<WarpError> for CommandError {
    fn from(err: WarpError) -> Self {
        CommandError::Runtime(err.into())
    }
}

pub type CommandResult<T> = Result<T, CommandError>;

pub(crate) trait UnwrapRuntimeError<T> {
    fn unwrap_runtime(self) -> Result<T, InternalError>;
}

impl<T> UnwrapRuntimeError<T> for CommandResult<T> {
    fn unwrap_runtime(self) -> Result<T, InternalError> {
        self.map_err(|err| match err {
            CommandError::Runtime(err) => InternalError::Message {
                message: format!("Runtime Error: {}", err),
            },
            CommandError::Internal(err) => err,
        })
    }
}
