//! # tmi-proto
//!
//! A Rust library for the IRC subset spoken by Twitch's chat service (TMI):
//! outbound command encoding, inbound line classification, and a framed
//! tokio transport.
//!
//! ## Features
//!
//! - Outbound command construction with exact wire formats
//! - Heuristic classification of inbound lines into
//!   {keepalive, housekeeping notice, join acknowledgment, chat message}
//! - CRLF line framing that reassembles lines split across reads
//! - Optional Tokio integration for async networking

#![deny(clippy::all)]
#![warn(missing_docs)]

//! ## Quick Start
//!
//! ```rust
//! use tmi_proto::{Command, ServerEvent};
//!
//! // Build outbound lines
//! let join = Command::join("somechannel");
//! assert_eq!(join.to_string(), "JOIN #somechannel");
//!
//! // Classify inbound lines
//! let event = ServerEvent::classify(
//!     ":viewer!viewer@viewer.tmi.twitch.tv PRIVMSG #somechannel :hi",
//! );
//! assert_eq!(
//!     event,
//!     ServerEvent::Privmsg { sender: "viewer".into(), text: "hi".into() }
//! );
//! ```

pub mod command;
pub mod error;
pub mod event;

#[cfg(feature = "tokio")]
pub mod codec;
#[cfg(feature = "tokio")]
pub mod line;
#[cfg(feature = "tokio")]
pub mod transport;

pub use self::command::{Command, DEFAULT_HOST, DEFAULT_PORT, SERVER_ORIGIN};
pub use self::error::ProtocolError;
pub use self::event::ServerEvent;

#[cfg(feature = "tokio")]
pub use self::codec::TmiCodec;
#[cfg(feature = "tokio")]
pub use self::line::{LineCodec, MAX_LINE_LEN};
#[cfg(feature = "tokio")]
pub use self::transport::Transport;
