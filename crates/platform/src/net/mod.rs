mod command;
mod config;
mod dispatch;
mod transport;

pub use command::{CMD_GET, CMD_SEND, CommandError, NetCommand};
pub use config::{MAX_NODES, MAX_PLAYERS, NETCONFIG_ID, NetConfig};
pub use dispatch::CommandDispatcher;
pub use transport::{LoopbackTransport, Transport, TransportStats};
