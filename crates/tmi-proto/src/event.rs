//! Inbound line classification.
//!
//! The service multiplexes keepalive probes, housekeeping notices, join
//! acknowledgments, and user chat onto one line stream. [`ServerEvent::classify`]
//! sorts each logical line into one of those categories.
//!
//! This is a best-effort heuristic over the protocol subset a single-channel
//! client actually receives, not a full IRC grammar: lines matching none of
//! the housekeeping patterns are treated as chat. Message types outside this
//! subset (NOTICE, PART, USERSTATE, ...) surface as [`ServerEvent::Notice`]
//! and are skipped.

use lazy_static::lazy_static;
use regex::Regex;

/// Marker for server-origin housekeeping lines (rule 2).
const NOTICE_MARKER: &str = ":tmi.twitch.tv";

/// Marker for join acknowledgments (rule 3). User-origin hosts end in
/// `.tmi.twitch.tv`, so this never collides with rule 2.
const JOIN_MARKER: &str = ".tmi.twitch.tv JOIN";

lazy_static! {
    /// First maximal run of word characters: the sender's login name, which
    /// appears first in a well-formed chat line.
    static ref SENDER: Regex = Regex::new(r"\w+").expect("sender pattern is valid");

    /// Server envelope preceding the message body of a chat line.
    static ref ENVELOPE: Regex =
        Regex::new(r"^:\w+!\w+@\w+\.tmi\.twitch\.tv PRIVMSG #\w+ :")
            .expect("envelope pattern is valid");
}

/// One classified inbound line.
///
/// Produced from a single logical line and consumed exactly once by the
/// session dispatch step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServerEvent {
    /// Keepalive probe; must be answered promptly with
    /// [`Command::PONG`](crate::Command::PONG) or the server drops the
    /// connection.
    Ping,
    /// Server-origin housekeeping (numerics, capability notices). Carries the
    /// raw line for diagnostics; no further action is taken.
    Notice(String),
    /// The server acknowledged a channel join.
    JoinAck,
    /// A user's chat message.
    Privmsg {
        /// Login name of the sender.
        sender: String,
        /// Message body.
        text: String,
    },
}

impl ServerEvent {
    /// Classify one logical line (terminator already stripped).
    ///
    /// Checks are ordered; the first match wins:
    ///
    /// 1. contains `PING` → [`ServerEvent::Ping`]
    /// 2. contains `:tmi.twitch.tv` → [`ServerEvent::Notice`]
    /// 3. contains `.tmi.twitch.tv JOIN` → [`ServerEvent::JoinAck`]
    /// 4. anything else → [`ServerEvent::Privmsg`]
    ///
    /// For chat lines the sender is the first word-character run and the text
    /// is the line with the server envelope stripped. A line that does not
    /// match the envelope passes through unchanged as the text; that
    /// permissive fallback is part of the contract, not an error.
    #[must_use]
    pub fn classify(line: &str) -> Self {
        if line.contains("PING") {
            return ServerEvent::Ping;
        }

        if line.contains(NOTICE_MARKER) {
            return ServerEvent::Notice(line.to_string());
        }

        if line.contains(JOIN_MARKER) {
            return ServerEvent::JoinAck;
        }

        let sender = SENDER
            .find(line)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        let text = ENVELOPE.replace(line, "").into_owned();

        ServerEvent::Privmsg { sender, text }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_ping() {
        assert_eq!(
            ServerEvent::classify("PING :tmi.twitch.tv"),
            ServerEvent::Ping
        );
    }

    #[test]
    fn test_ping_takes_priority() {
        // A housekeeping line mentioning PING still counts as a keepalive.
        let line = ":tmi.twitch.tv PING";
        assert_eq!(ServerEvent::classify(line), ServerEvent::Ping);
    }

    #[test]
    fn test_classify_notice() {
        let line = ":tmi.twitch.tv 001 bot1 :Welcome, GLHF!";
        assert_eq!(
            ServerEvent::classify(line),
            ServerEvent::Notice(line.to_string())
        );
    }

    #[test]
    fn test_classify_join_ack() {
        let line = ":bot1!bot1@bot1.tmi.twitch.tv JOIN #somechannel";
        assert_eq!(ServerEvent::classify(line), ServerEvent::JoinAck);
    }

    #[test]
    fn test_classify_privmsg() {
        let line = ":viewer123!viewer123@viewer123.tmi.twitch.tv PRIVMSG #somechannel :hello there";
        assert_eq!(
            ServerEvent::classify(line),
            ServerEvent::Privmsg {
                sender: "viewer123".to_string(),
                text: "hello there".to_string(),
            }
        );
    }

    #[test]
    fn test_privmsg_text_can_contain_colons() {
        let line = ":a!a@a.tmi.twitch.tv PRIVMSG #chan :look: a colon";
        assert_eq!(
            ServerEvent::classify(line),
            ServerEvent::Privmsg {
                sender: "a".to_string(),
                text: "look: a colon".to_string(),
            }
        );
    }

    #[test]
    fn test_unmatched_line_passes_through() {
        // Lines that don't match the envelope keep their full text.
        let line = "hello there";
        assert_eq!(
            ServerEvent::classify(line),
            ServerEvent::Privmsg {
                sender: "hello".to_string(),
                text: "hello there".to_string(),
            }
        );
    }

    #[test]
    fn test_sender_empty_when_no_word_characters() {
        assert_eq!(
            ServerEvent::classify("!!!"),
            ServerEvent::Privmsg {
                sender: String::new(),
                text: "!!!".to_string(),
            }
        );
    }
}
