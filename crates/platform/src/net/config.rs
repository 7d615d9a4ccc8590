use bytemuck::{Pod, Zeroable};

use super::command::{CommandError, NetCommand};

pub const NETCONFIG_ID: i32 = 0x1234_5678;
pub const MAX_NODES: i16 = 8;
pub const MAX_PLAYERS: i16 = 4;

/// The transport configuration block legacy engines read every frame.
///
/// Field order and widths are fixed so the block can be handed to existing
/// callers as raw bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct NetConfig {
    pub id: i32,
    pub command: i16,
    /// Node a received packet came from, -1 when nothing arrived.
    pub remote_node: i16,
    pub data_length: i16,
    pub num_nodes: i16,
    pub ticdup: i16,
    pub extra_tics: i16,
    pub deathmatch: i16,
    pub console_player: i16,
    pub num_players: i16,
    pub net_enabled: i16,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self::single_node()
    }
}

impl NetConfig {
    pub fn single_node() -> Self {
        Self {
            id: NETCONFIG_ID,
            net_enabled: 0,
            num_nodes: 1,
            num_players: 1,
            deathmatch: 0,
            console_player: 0,
            ticdup: 1,
            ..Self::zeroed()
        }
    }

    pub fn is_valid(&self) -> bool {
        self.id == NETCONFIG_ID
            && (1..=MAX_NODES).contains(&self.num_nodes)
            && (1..=MAX_PLAYERS).contains(&self.num_players)
            && (0..self.num_players).contains(&self.console_player)
            && self.ticdup >= 1
    }

    pub fn is_network_game(&self) -> bool {
        self.net_enabled != 0
    }

    pub fn pending_command(&self) -> Result<NetCommand, CommandError> {
        NetCommand::try_from(self.command)
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        bytemuck::try_pod_read_unaligned(bytes).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_node_defaults() {
        let config = NetConfig::single_node();

        assert!(config.is_valid());
        assert!(!config.is_network_game());
        assert_eq!(config.num_nodes, 1);
        assert_eq!(config.num_players, 1);
        assert_eq!(config.deathmatch, 0);
        assert_eq!(config.console_player, 0);
        assert_eq!(config.ticdup, 1);
        assert_eq!(config.command, 0);
        assert_eq!(config.extra_tics, 0);
    }

    #[test]
    fn fixed_layout() {
        let config = NetConfig::single_node();
        let bytes = config.as_bytes();

        assert_eq!(bytes.len(), 24);
        assert_eq!(&bytes[..4], &NETCONFIG_ID.to_ne_bytes());
        assert_eq!(NetConfig::from_bytes(bytes), Some(config));
        assert_eq!(NetConfig::from_bytes(&bytes[..10]), None);
    }

    #[test]
    fn rejects_bad_player_index() {
        let config = NetConfig {
            console_player: 1,
            ..NetConfig::single_node()
        };
        assert!(!config.is_valid());
    }
}
