//! Unified error handling for the bot session layer.

use thiserror::Error;
use tmi_proto::ProtocolError;

/// Errors surfaced by [`Bot`](crate::bot::Bot) operations.
///
/// Handshake-phase failures are fatal to the connection attempt and propagate
/// to the `connect_to` caller; nothing is retried. Send-routing failures are
/// local and recoverable.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BotError {
    /// Transport or framing failure.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// A channel-less send was attempted before any channel was joined.
    #[error("no channel joined")]
    NotJoined,

    /// A send was attempted while no connection is live.
    #[error("not connected")]
    NotConnected,
}

/// Result type for bot operations.
pub type Result<T, E = BotError> = std::result::Result<T, E>;
