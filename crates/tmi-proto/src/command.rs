//! Outbound TMI command types and wire encoding.
//!
//! Twitch's chat service speaks a small IRC subset. Each [`Command`] variant
//! maps to exactly one line format; the other message types the service can
//! emit are read-only from the client's point of view and never built here.
//!
//! # Reference
//! - <https://dev.twitch.tv/docs/irc#supported-irc-messages>

use std::fmt;

/// Default chat server host.
pub const DEFAULT_HOST: &str = "irc.chat.twitch.tv";

/// Default chat server port (unencrypted IRC).
pub const DEFAULT_PORT: u16 = 6667;

/// Origin the service uses in keepalive probes and expects in replies.
pub const SERVER_ORIGIN: &str = "tmi.twitch.tv";

/// Outbound command with its parameters.
///
/// `Display` produces the line without the terminator; the codec appends
/// `\r\n` when encoding. Channel names are stored without the leading `#`,
/// which serialization adds.
///
/// Neither channel names nor message text are escaped. Callers must not embed
/// the line terminator in message text; doing so corrupts the stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `PASS <password>` - authenticate with an OAuth token.
    PASS(String),
    /// `NICK <username>` - set the login identity.
    NICK(String),
    /// `JOIN #<channel>` - join a channel's chat.
    JOIN(String),
    /// `PING :tmi.twitch.tv` - keepalive probe.
    PING,
    /// `PONG :tmi.twitch.tv` - keepalive reply.
    PONG,
    /// `PRIVMSG #<channel> :<text>` - send a chat message.
    PRIVMSG(String, String),
}

impl Command {
    /// Create a PASS command.
    #[must_use]
    pub fn pass<P: Into<String>>(password: P) -> Self {
        Command::PASS(password.into())
    }

    /// Create a NICK command.
    #[must_use]
    pub fn nick<N: Into<String>>(username: N) -> Self {
        Command::NICK(username.into())
    }

    /// Create a JOIN command for a channel (without the leading `#`).
    #[must_use]
    pub fn join<C: Into<String>>(channel: C) -> Self {
        Command::JOIN(channel.into())
    }

    /// Create a PRIVMSG command to a channel (without the leading `#`).
    #[must_use]
    pub fn privmsg<C, M>(channel: C, text: M) -> Self
    where
        C: Into<String>,
        M: Into<String>,
    {
        Command::PRIVMSG(channel.into(), text.into())
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::PASS(password) => write!(f, "PASS {password}"),
            Command::NICK(username) => write!(f, "NICK {username}"),
            Command::JOIN(channel) => write!(f, "JOIN #{channel}"),
            Command::PING => write!(f, "PING :{SERVER_ORIGIN}"),
            Command::PONG => write!(f, "PONG :{SERVER_ORIGIN}"),
            Command::PRIVMSG(channel, text) => write!(f, "PRIVMSG #{channel} :{text}"),
        }
    }
}
