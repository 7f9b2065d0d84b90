use crate::commands::{CommandSender, COMMAND_REGISTRY};
use crate::config::WarpsConfig;
use crate::permissions::{Authorizer, ConsoleSubject, NodeAuthorizer, WarpAction};
use crate::player::Player;
use crate::store::WarpStore;
use anyhow::Context;
use backtrace::Backtrace;
use std::io::{self, BufRead};
use std::path::Path;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tracing::{error, info, warn};
use warps_save_data::DimensionId;

/// `Message` gets send from the console and ctrl+c threads to the server thread.
#[derive(Debug)]
pub enum Message {
    /// A line typed into the server console.
    ConsoleCommand(String),
    /// Sent on ctrl+c, when the console is closed, or by `/stop`.
    Shutdown,
}

/// The host the warp commands run in: configuration, the warp store, the
/// authorizer, online players and the dimensions players can be sent to.
pub struct WarpServer {
    pub config: WarpsConfig,
    pub store: Arc<WarpStore>,
    pub authorizer: Box<dyn Authorizer>,
    pub players: Vec<Player>,
    pub dimensions: Vec<DimensionId>,
    running: bool,
}

impl WarpServer {
    pub fn new(config: WarpsConfig) -> WarpServer {
        let store = Arc::new(WarpStore::new(config.flush_on_mutation));
        WarpServer::with_store(config, store)
    }

    pub fn with_store(config: WarpsConfig, store: Arc<WarpStore>) -> WarpServer {
        let dimensions = config
            .dimensions
            .iter()
            .filter_map(|id| match DimensionId::parse(id) {
                Ok(dimension) => Some(dimension),
                Err(err) => {
                    warn!("Ignoring configured dimension: {}", err);
                    None
                }
            })
            .collect();
        let authorizer = Box::new(NodeAuthorizer::new(config.op_level()));

        WarpServer {
            config,
            store,
            authorizer,
            players: Vec::new(),
            dimensions,
            running: false,
        }
    }

    pub fn with_authorizer(mut self, authorizer: impl Authorizer + 'static) -> WarpServer {
        self.authorizer = Box::new(authorizer);
        self
    }

    /// Loads the warp file. A file that can't be loaded is logged and the
    /// server carries on with whatever the store already holds.
    pub fn start(&mut self) {
        self.running = true;
        match self.store.load(&self.config.warps_file) {
            Ok(count) => info!("Loaded {} warps from {}", count, self.config.warps_file),
            Err(err) => error!(
                "Failed to load warps from {}: {:?}",
                self.config.warps_file, err
            ),
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
        if let Err(err) = self.store.save() {
            error!("Failed to save warps: {:?}", err);
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn request_shutdown(&mut self) {
        self.running = false;
    }

    pub fn join(&mut self, player: Player) -> CommandSender {
        info!("{} joined", player.username);
        self.players.push(player);
        CommandSender::Player(self.players.len() - 1)
    }

    /// Removes a player. Senders handed out for later players shift down by one.
    pub fn leave(&mut self, uuid: u128) -> Option<Player> {
        let index = self.players.iter().position(|p| p.uuid == uuid)?;
        let player = self.players.remove(index);
        info!("{} left", player.username);
        Some(player)
    }

    pub fn is_allowed(&self, sender: CommandSender, action: WarpAction, warp: Option<&str>) -> bool {
        match sender {
            CommandSender::Console => self.authorizer.is_allowed(&ConsoleSubject, action, warp),
            CommandSender::Player(index) => self
                .players
                .get(index)
                .is_some_and(|player| self.authorizer.is_allowed(player, action, warp)),
        }
    }

    pub fn handle_command(&mut self, sender: CommandSender, command_line: &str) {
        if let Err(err) = COMMAND_REGISTRY.execute(self, sender, command_line) {
            error!("Error executing command '{}': {}", command_line, err);
        }
    }

    pub fn suggest(&self, sender: CommandSender, command_line: &str) -> Vec<String> {
        COMMAND_REGISTRY.suggest(self, sender, command_line)
    }

    fn graceful_shutdown(&mut self) {
        info!("Commencing graceful shutdown...");
        self.stop();
    }

    /// Runs the console server until it is told to stop.
    pub fn run(config_file: &Path) -> anyhow::Result<()> {
        std::panic::set_hook(Box::new(|panic_info| {
            let backtrace = Backtrace::new();
            error!("{}\n{:?}", panic_info, backtrace);
        }));

        info!("Starting server...");
        let start_time = Instant::now();

        let config = WarpsConfig::load(config_file)?;
        let mut server = WarpServer::new(config);
        server.start();

        let (sender, receiver) = mpsc::channel();
        let ctrl_handler_sender = sender.clone();
        ctrlc::set_handler(move || {
            let _ = ctrl_handler_sender.send(Message::Shutdown);
        })
        .context("There was an error setting the ctrlc handler")?;

        thread::Builder::new()
            .name("console".to_string())
            .spawn(move || {
                for line in io::stdin().lock().lines() {
                    match line {
                        Ok(line) => {
                            if sender.send(Message::ConsoleCommand(line)).is_err() {
                                return;
                            }
                        }
                        Err(err) => {
                            warn!("Failed to read from the console: {}", err);
                            break;
                        }
                    }
                }
                let _ = sender.send(Message::Shutdown);
            })
            .context("Failed to start the console thread")?;

        info!("Done! Start took {:?}", start_time.elapsed());

        while server.is_running() {
            match receiver.recv() {
                Ok(Message::ConsoleCommand(line)) => {
                    server.handle_command(CommandSender::Console, &line)
                }
                Ok(Message::Shutdown) | Err(_) => server.request_shutdown(),
            }
        }

        server.graceful_shutdown();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::PermissionSubject;
    use warps_save_data::WarpPoint;

    fn config(dir: &Path) -> WarpsConfig {
        WarpsConfig {
            warps_file: dir.join("warps.json").to_string_lossy().into_owned(),
            dimensions: vec![
                "minecraft:overworld".to_string(),
                "not a dimension".to_string(),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn invalid_dimensions_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let server = WarpServer::new(config(dir.path()));
        assert_eq!(server.dimensions, [DimensionId::overworld()]);
    }

    #[test]
    fn start_and_stop_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut server = WarpServer::new(WarpsConfig {
            flush_on_mutation: false,
            ..config(dir.path())
        });
        server.start();
        assert!(server.is_running());

        let point = WarpPoint::new(DimensionId::overworld(), 0.5, 70.0, 0.5, 0.0, 0.0);
        server.store.set_warp("spawn", point.clone());
        server.stop();
        assert!(!server.is_running());

        let mut restarted = WarpServer::new(config(dir.path()));
        restarted.start();
        assert_eq!(restarted.store.get_warp("spawn"), Ok(point));
    }

    #[test]
    fn stale_player_index_is_not_allowed() {
        let dir = tempfile::tempdir().unwrap();
        let mut server = WarpServer::new(config(dir.path()));
        let mut player = Player::new(7, "Steve", DimensionId::overworld());
        player.op_level = 4;
        let sender = server.join(player);

        assert!(server.is_allowed(sender, WarpAction::Set, None));
        assert!(server.leave(7).is_some());
        assert!(!server.is_allowed(sender, WarpAction::Set, None));
        assert!(server.is_allowed(CommandSender::Console, WarpAction::Set, None));
    }

    struct ReadOnly;

    impl Authorizer for ReadOnly {
        fn is_allowed(
            &self,
            _subject: &dyn PermissionSubject,
            action: WarpAction,
            _warp: Option<&str>,
        ) -> bool {
            !matches!(
                action,
                WarpAction::Set | WarpAction::Delete | WarpAction::Rename
            )
        }

        fn describe(&self, action: WarpAction, _warp: Option<&str>) -> String {
            format!("read-only server ({})", action)
        }
    }

    #[test]
    fn custom_authorizer_decides() {
        let dir = tempfile::tempdir().unwrap();
        let mut server = WarpServer::new(config(dir.path())).with_authorizer(ReadOnly);
        server.start();
        let sender = server.join(Player::new(1, "Steve", DimensionId::overworld()));

        server.handle_command(sender, "setwarp spawn");
        assert!(server.store.is_empty());
        let messages = server.players[0].take_messages();
        assert_eq!(
            warps_text::TextComponent::plain_text(&messages[0]),
            "[Simply Better Warps] Permission denied: read-only server (simplybetter.warps.setwarp)"
        );

        assert!(server.suggest(sender, "warp").contains(&"warps".to_string()));
        assert!(server.suggest(sender, "setw").is_empty());
    }
}
