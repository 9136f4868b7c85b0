//! Builder → classifier round-trip properties.
//!
//! These tests pin the contract between the two halves of the protocol
//! crate: a chat line built by [`Command`], wrapped in the server envelope a
//! real peer would add, must classify back to the same sender and text.

use proptest::prelude::*;

use tmi_proto::{Command, ServerEvent};

/// Wrap an outbound chat line in the envelope the server prepends when
/// relaying it to other clients.
fn enveloped(sender: &str, privmsg: &Command) -> String {
    format!(":{sender}!{sender}@{sender}.tmi.twitch.tv {privmsg}")
}

#[test]
fn chat_send_round_trips_through_classifier() {
    let cmd = Command::privmsg("somechannel", "hello there");
    let event = ServerEvent::classify(&enveloped("user", &cmd));

    assert_eq!(
        event,
        ServerEvent::Privmsg {
            sender: "user".to_string(),
            text: "hello there".to_string(),
        }
    );
}

#[test]
fn keepalive_probe_classifies_and_reply_matches_builder() {
    assert_eq!(
        ServerEvent::classify("PING :tmi.twitch.tv"),
        ServerEvent::Ping
    );
    // The only valid answer to a keepalive is the fixed PONG line.
    assert_eq!(Command::PONG.to_string(), "PONG :tmi.twitch.tv");
}

#[test]
fn join_ack_classifies_regardless_of_position() {
    for line in [
        ":bot1!bot1@bot1.tmi.twitch.tv JOIN #somechannel",
        ":other!other@other.tmi.twitch.tv JOIN #elsewhere",
    ] {
        assert_eq!(ServerEvent::classify(line), ServerEvent::JoinAck);
    }
}

proptest! {
    // Text is restricted to characters that cannot collide with the
    // higher-priority classification rules (no "PING", no host markers) and
    // never contains the line terminator, per the builder's contract.
    #[test]
    fn privmsg_round_trip(
        channel in "[a-z][a-z0-9_]{0,24}",
        text in "[a-z][a-z0-9 !?.,]{0,120}",
    ) {
        let cmd = Command::privmsg(channel.clone(), text.clone());
        let event = ServerEvent::classify(&enveloped("user", &cmd));

        prop_assert_eq!(
            event,
            ServerEvent::Privmsg {
                sender: "user".to_string(),
                text,
            }
        );
    }

    #[test]
    fn sender_extracted_from_any_login(sender in "[a-z][a-z0-9_]{0,24}") {
        let cmd = Command::privmsg("chan", "hi");
        let event = ServerEvent::classify(&enveloped(&sender, &cmd));

        prop_assert_eq!(
            event,
            ServerEvent::Privmsg {
                sender,
                text: "hi".to_string(),
            }
        );
    }
}
