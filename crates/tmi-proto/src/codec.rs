//! TMI message codec for tokio.
//!
//! This module provides a codec that encodes outbound [`Command`]s and
//! decodes inbound lines into [`ServerEvent`]s using the tokio codec
//! framework.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::command::Command;
use crate::error;
use crate::event::ServerEvent;
use crate::line::LineCodec;

/// Tokio codec for the TMI protocol.
///
/// Wraps [`LineCodec`] so exactly one logical line is classified per decode,
/// regardless of how the bytes arrived. Encoding appends the `\r\n`
/// terminator to the command's `Display` form; `Display` itself never carries
/// it, which keeps the convention consistent across every command kind.
pub struct TmiCodec {
    inner: LineCodec,
}

impl TmiCodec {
    /// Create a new codec with the default line limit.
    pub fn new() -> Self {
        Self {
            inner: LineCodec::new(),
        }
    }
}

impl Default for TmiCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for TmiCodec {
    type Item = ServerEvent;
    type Error = error::ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<ServerEvent>> {
        self.inner.decode(src).map(|res| {
            res.map(|line| ServerEvent::classify(line.trim_end_matches(&['\r', '\n'][..])))
        })
    }
}

impl Encoder<Command> for TmiCodec {
    type Error = error::ProtocolError;

    fn encode(&mut self, cmd: Command, dst: &mut BytesMut) -> error::Result<()> {
        let mut line = cmd.to_string();
        line.push_str("\r\n");
        self.inner.encode(line, dst)
    }
}
