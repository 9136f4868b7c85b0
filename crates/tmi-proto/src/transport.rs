//! Framed TMI transport over TCP.

use anyhow::Result;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_util::codec::Framed;
use tracing::warn;

use crate::codec::TmiCodec;
use crate::command::Command;
use crate::error::ProtocolError;
use crate::event::ServerEvent;

/// TMI transport over a plain TCP connection.
///
/// The connection lifecycle is monotonic: unconnected → connected → closed.
/// There is no reconnection; dropping the transport closes the socket.
pub struct Transport {
    framed: Framed<TcpStream, TmiCodec>,
}

impl Transport {
    /// Connect to the chat server.
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP connection cannot be established.
    pub async fn connect(host: &str, port: u16) -> Result<Self, ProtocolError> {
        let stream = TcpStream::connect((host, port)).await?;
        Ok(Self::tcp(stream))
    }

    /// Create a transport from an already-connected stream.
    pub fn tcp(stream: TcpStream) -> Self {
        if let Err(e) = Self::enable_keepalive(&stream) {
            warn!("failed to enable TCP keepalive: {}", e);
        }

        Self {
            framed: Framed::new(stream, TmiCodec::new()),
        }
    }

    fn enable_keepalive(stream: &TcpStream) -> Result<()> {
        use socket2::{SockRef, TcpKeepalive};
        use std::time::Duration;

        let sock = SockRef::from(stream);
        let keepalive = TcpKeepalive::new()
            .with_time(Duration::from_secs(120))
            .with_interval(Duration::from_secs(30));

        sock.set_tcp_keepalive(&keepalive)?;
        Ok(())
    }

    /// Read the next classified event from the transport.
    ///
    /// Returns `Ok(None)` when the connection is closed. This is distinct
    /// from "nothing available yet", which simply keeps the future pending.
    pub async fn next_event(&mut self) -> Result<Option<ServerEvent>, ProtocolError> {
        match self.framed.next().await {
            Some(Ok(event)) => Ok(Some(event)),
            Some(Err(e)) => Err(e),
            None => Ok(None),
        }
    }

    /// Write one command to the transport.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the underlying write fails.
    pub async fn send(&mut self, command: Command) -> Result<(), ProtocolError> {
        self.framed.send(command).await
    }
}
