use crate::permissions::{PermissionSubject, PlayerPermissionsCache};
use std::fmt;
use tracing::debug;
use warps_save_data::{DimensionId, WarpPoint};
use warps_text::{ColorCode, TextComponent, TextComponentBuilder};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerPos {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl PlayerPos {
    pub fn new(x: f64, y: f64, z: f64) -> PlayerPos {
        PlayerPos { x, y, z }
    }

    /// The centre of the block column the position is in, at the block's floor.
    pub fn block_center(self) -> PlayerPos {
        PlayerPos {
            x: self.x.floor() + 0.5,
            y: self.y.floor(),
            z: self.z.floor() + 0.5,
        }
    }
}

impl fmt::Display for PlayerPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1}, {:.1})", self.x, self.y, self.z)
    }
}

pub struct Player {
    pub uuid: u128,
    pub username: String,
    pub dimension: DimensionId,
    pub pos: PlayerPos,
    pub yaw: f32,
    pub pitch: f32,
    pub op_level: u8,
    pub permissions: PlayerPermissionsCache,
    /// Every chat message the server sent to this player, oldest first.
    messages: Vec<Vec<TextComponent>>,
}

impl Player {
    pub fn new(uuid: u128, username: impl Into<String>, dimension: DimensionId) -> Player {
        Player {
            uuid,
            username: username.into(),
            dimension,
            pos: PlayerPos::default(),
            yaw: 0.0,
            pitch: 0.0,
            op_level: 0,
            permissions: Default::default(),
            messages: Vec::new(),
        }
    }

    /// Where a warp created by this player right now would point.
    pub fn warp_point(&self) -> WarpPoint {
        let pos = self.pos.block_center();
        WarpPoint::new(
            self.dimension.clone(),
            pos.x,
            pos.y,
            pos.z,
            self.yaw,
            self.pitch,
        )
    }

    pub fn teleport(&mut self, point: &WarpPoint) {
        debug!(
            "Teleporting {} to {} ({}, {}, {})",
            self.username,
            point.dimension(),
            point.x(),
            point.y(),
            point.z()
        );
        self.dimension = point.dimension().clone();
        self.pos = PlayerPos::new(point.x(), point.y(), point.z());
        self.yaw = point.yaw();
        self.pitch = point.pitch();
    }

    pub fn send_chat_message(&mut self, message: &[TextComponent]) {
        self.messages.push(message.to_vec());
    }

    pub fn send_system_message(&mut self, message: &str) {
        self.send_chat_message(&[TextComponent::from(message)]);
    }

    pub fn send_error_message(&mut self, message: &str) {
        let component = TextComponentBuilder::new(message)
            .color_code(ColorCode::Red)
            .finish();
        self.send_chat_message(&[component]);
    }

    /// Removes and returns everything sent so far.
    pub fn take_messages(&mut self) -> Vec<Vec<TextComponent>> {
        std::mem::take(&mut self.messages)
    }
}

impl PermissionSubject for Player {
    fn permission_value(&self, node: &str) -> Option<bool> {
        self.permissions.get_node_val(node)
    }

    fn op_level(&self) -> u8 {
        self.op_level
    }
}
