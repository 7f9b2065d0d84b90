use super::{argument_set::ArgumentSet, CommandSender};
use crate::commands::error::{CommandResult, InternalError, RuntimeError};
use crate::permissions::WarpAction;
use crate::player::Player;
use crate::server::WarpServer;
use crate::store::WarpStore;
use warps_text::TextComponent;

pub struct ExecutionContext<'a> {
    pub server: &'a mut WarpServer,
    sender: CommandSender,
    arguments: ArgumentSet,
}

impl<'a> ExecutionContext<'a> {
    pub(super) fn new(
        server: &'a mut WarpServer,
        sender: CommandSender,
        arguments: ArgumentSet,
    ) -> Self {
        Self {
            server,
            sender,
            arguments,
        }
    }

    pub fn args(&self) -> &ArgumentSet {
        &self.arguments
    }

    pub fn sender(&self) -> CommandSender {
        self.sender
    }

    pub fn store(&self) -> &WarpStore {
        &self.server.store
    }

    pub fn reply(&mut self, message: &str) -> CommandResult<()> {
        match self.sender {
            CommandSender::Player(_) => {
                self.player_mut()?.send_system_message(message);
            }
            CommandSender::Console => {
                println!("{}", message);
            }
        }
        Ok(())
    }

    /// Like [`reply`](Self::reply), with the configured message prefix in front.
    pub fn feedback(&mut self, message: &str) -> CommandResult<()> {
        let message = format!("{} {}", self.server.config.message_prefix, message);
        self.reply(&message)
    }

    pub fn reply_components(&mut self, message: &[TextComponent]) -> CommandResult<()> {
        match self.sender {
            CommandSender::Player(_) => {
                self.player_mut()?.send_chat_message(message);
            }
            CommandSender::Console => {
                println!("{}", TextComponent::plain_text(message));
            }
        }
        Ok(())
    }

    pub fn reply_legacy(&mut self, message: &str) -> CommandResult<()> {
        self.reply_components(&TextComponent::from_legacy_text(message))
    }

    pub fn error(&mut self, message: &str) -> CommandResult<()> {
        let message = format!("{} {}", self.server.config.message_prefix, message);
        match self.sender {
            CommandSender::Player(_) => {
                self.player_mut()?.send_error_message(&message);
            }
            CommandSender::Console => {
                eprintln!("Error: {}", message);
            }
        }
        Ok(())
    }

    pub fn has_permission(&self, action: WarpAction, warp: Option<&str>) -> bool {
        self.server.is_allowed(self.sender, action, warp)
    }

    pub fn require_permission(&self, action: WarpAction, warp: Option<&str>) -> CommandResult<()> {
        if !self.has_permission(action, warp) {
            return Err(RuntimeError::PermissionDenied {
                permission: self.server.authorizer.describe(action, warp),
            }
            .into());
        }
        Ok(())
    }

    pub fn require_console(&self) -> CommandResult<()> {
        match self.sender {
            CommandSender::Console => Ok(()),
            CommandSender::Player(_) => Err(RuntimeError::ConsoleOnly.into()),
        }
    }

    pub fn player(&self) -> CommandResult<&Player> {
        let index = self.player_index()?;
        self.server
            .players
            .get(index)
            .ok_or_else(|| InternalError::InvalidPlayerIndex { index }.into())
    }

    pub fn player_mut(&mut self) -> CommandResult<&mut Player> {
        let index = self.player_index()?;
        self.server
            .players
            .get_mut(index)
            .ok_or_else(|| InternalError::InvalidPlayerIndex { index }.into())
    }

    pub fn player_index(&self) -> CommandResult<usize> {
        match self.sender {
            CommandSender::Player(index) => Ok(index),
            CommandSender::Console => Err(RuntimeError::PlayerOnly.into()),
        }
    }
}
