//! tmi-bot - minimal Twitch chat (TMI) bot client.
//!
//! Opens a single TCP connection to the chat server, authenticates, joins one
//! channel, and dispatches inbound chat to registered callbacks. Protocol
//! framing and parsing live in the `tmi-proto` crate; this crate owns the
//! session state machine and the callback surface.

pub mod bot;
pub mod config;
pub mod error;

pub use crate::bot::{Bot, BotHandle, JoinCallback, MessageCallback};
pub use crate::config::{Config, ConfigError, ServerConfig};
pub use crate::error::BotError;
