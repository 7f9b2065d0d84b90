#![allow(dead_code)]

use std::path::PathBuf;
use tempfile::TempDir;
use warps_core::commands::CommandSender;
use warps_core::config::WarpsConfig;
use warps_core::player::{Player, PlayerPos};
use warps_core::server::WarpServer;
use warps_save_data::DimensionId;
use warps_text::TextComponent;

pub const NETHER: &str = "minecraft:the_nether";

/// A started server whose warp file lives in a scratch directory.
pub struct TestServer {
    pub server: WarpServer,
    dir: TempDir,
    next_uuid: u128,
}

impl TestServer {
    pub fn new() -> TestServer {
        TestServer::with_config(|_| {})
    }

    pub fn with_config(configure: impl FnOnce(&mut WarpsConfig)) -> TestServer {
        let dir = tempfile::tempdir().unwrap();
        let mut config = WarpsConfig {
            warps_file: dir
                .path()
                .join("config")
                .join("betterwarps.json")
                .to_string_lossy()
                .into_owned(),
            ..Default::default()
        };
        configure(&mut config);

        let mut server = WarpServer::new(config);
        server.start();
        TestServer {
            server,
            dir,
            next_uuid: 1,
        }
    }

    pub fn warps_path(&self) -> PathBuf {
        PathBuf::from(&self.server.config.warps_file)
    }

    pub fn dir(&self) -> &std::path::Path {
        self.dir.path()
    }

    /// Stops the server and starts a fresh one on the same files.
    pub fn restart(&mut self) {
        self.server.stop();
        self.reopen();
    }

    /// Starts a fresh server on the same files without saving the old one,
    /// like after a crash.
    pub fn reopen(&mut self) {
        let config = self.server.config.clone();
        self.server = WarpServer::new(config);
        self.server.start();
    }

    /// Joins a player in the overworld holding `grants`.
    pub fn join(&mut self, name: &str, op_level: u8, grants: &[&str]) -> CommandSender {
        let mut player = Player::new(self.next_uuid, name, DimensionId::overworld());
        self.next_uuid += 1;
        player.op_level = op_level;
        for node in grants {
            player.permissions.grant(node);
        }
        self.server.join(player)
    }

    /// Joins a player allowed to do anything.
    pub fn join_op(&mut self, name: &str) -> CommandSender {
        self.join(name, 4, &[])
    }

    pub fn player(&mut self, sender: CommandSender) -> &mut Player {
        let CommandSender::Player(index) = sender else {
            panic!("console is not a player");
        };
        &mut self.server.players[index]
    }

    pub fn move_player(&mut self, sender: CommandSender, dimension: &str, x: f64, y: f64, z: f64) {
        let player = self.player(sender);
        player.dimension = DimensionId::parse(dimension).unwrap();
        player.pos = PlayerPos::new(x, y, z);
    }

    pub fn run(&mut self, sender: CommandSender, command: &str) {
        self.server.handle_command(sender, command);
    }

    /// Runs `command` and returns everything the player was sent, as plain text.
    pub fn output(&mut self, sender: CommandSender, command: &str) -> Vec<String> {
        self.player(sender).take_messages();
        self.run(sender, command);
        self.take_output(sender)
    }

    pub fn take_output(&mut self, sender: CommandSender) -> Vec<String> {
        self.player(sender)
            .take_messages()
            .iter()
            .map(|message| TextComponent::plain_text(message))
            .collect()
    }

    /// Runs `command` and returns the raw components of the last message.
    pub fn last_components(&mut self, sender: CommandSender, command: &str) -> Vec<TextComponent> {
        self.player(sender).take_messages();
        self.run(sender, command);
        self.player(sender)
            .take_messages()
            .pop()
            .expect("command sent no message")
    }

    pub fn file_json(&self) -> serde_json::Value {
        let contents = std::fs::read_to_string(self.warps_path()).unwrap();
        serde_json::from_str(&contents).unwrap()
    }
}
