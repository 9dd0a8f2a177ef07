//! Remote adapter: line-delimited JSON over TCP, bridged into the sync
//! game loop over channels.

pub mod protocol;
pub mod runtime;
pub mod server;

pub use protocol::{ClientMessage, CommandOp, QueryTarget, ServerMessage, PROTOCOL_VERSION};
pub use runtime::{apply_command, Adapter, ClientCommand, InboundCommand, OutboundMessage};
pub use server::{run_server, ServerConfig};
