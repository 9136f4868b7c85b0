//! Bot session controller: handshake, receive loop, and dispatch.
//!
//! A [`Bot`] owns one [`Transport`], drives the fixed authenticate → identify
//! → join handshake, then runs a receive loop that classifies each inbound
//! line and dispatches it to the registered callbacks. Keepalive probes are
//! answered internally; housekeeping notices are logged and skipped.
//!
//! The receive loop is stopped cooperatively: callbacks get a [`BotHandle`]
//! whose requests (outbound sends, disconnect) are queued on a channel the
//! loop drains between dispatches. A disconnect requested from inside a
//! callback therefore takes effect after the current dispatch completes,
//! never mid-dispatch.

use tokio::sync::mpsc;
use tracing::{debug, info};
use zeroize::Zeroizing;

use tmi_proto::{Command, ServerEvent, Transport, DEFAULT_HOST, DEFAULT_PORT};

use crate::error::BotError;

/// Callback invoked for each inbound chat message with (sender, text).
pub type MessageCallback = Box<dyn FnMut(&BotHandle, &str, &str) + Send>;

/// Callback invoked each time the channel join is acknowledged.
///
/// The server may, in principle, acknowledge more than once; every
/// acknowledgment re-invokes the callback. No deduplication is performed.
pub type JoinCallback = Box<dyn FnMut(&BotHandle) + Send>;

/// Requests queued for the receive loop.
enum BotOp {
    Send(Command),
    Disconnect,
}

/// Outcome of one receive-loop select round. Transport writes happen after
/// the select block, once the read future's borrow has ended.
enum LoopAction {
    /// Write a queued outbound command.
    Send(Command),
    /// Dispatch a classified inbound event.
    Event(ServerEvent),
    /// Server closed the connection.
    Closed,
    /// Disconnect was requested.
    Stop,
}

/// Clonable handle passed to callbacks.
///
/// Requests are applied by the receive loop in submission order, after the
/// dispatch that issued them returns.
#[derive(Clone)]
pub struct BotHandle {
    ops: mpsc::UnboundedSender<BotOp>,
    channel: String,
}

impl BotHandle {
    /// Send a chat message to the joined channel.
    pub fn say(&self, text: &str) {
        let _ = self.ops.send(BotOp::Send(Command::privmsg(&self.channel, text)));
    }

    /// Send a chat message to an arbitrary channel, independent of the
    /// joined one.
    pub fn say_to(&self, channel: &str, text: &str) {
        let _ = self.ops.send(BotOp::Send(Command::privmsg(channel, text)));
    }

    /// Request the receive loop to stop and the connection to close.
    /// Safe to call repeatedly.
    pub fn disconnect(&self) {
        let _ = self.ops.send(BotOp::Disconnect);
    }
}

/// A single-channel chat bot session.
pub struct Bot {
    username: String,
    password: Zeroizing<String>,
    host: String,
    port: u16,
    channel: Option<String>,
    ops: Option<mpsc::UnboundedSender<BotOp>>,
    on_message: Option<MessageCallback>,
    on_join: Option<JoinCallback>,
}

impl Bot {
    /// Create a bot for the default chat server.
    ///
    /// The password is an OAuth token; it is held zeroed-on-drop and never
    /// logged.
    pub fn new<U, P>(username: U, password: P) -> Self
    where
        U: Into<String>,
        P: Into<String>,
    {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            channel: None,
            ops: None,
            on_message: None,
            on_join: None,
        }
    }

    /// Override the chat server endpoint.
    #[must_use]
    pub fn with_server<H: Into<String>>(mut self, host: H, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }

    /// Register the chat-message callback, replacing any previous one.
    pub fn on_message<F>(&mut self, callback: F)
    where
        F: FnMut(&BotHandle, &str, &str) + Send + 'static,
    {
        self.on_message = Some(Box::new(callback));
    }

    /// Register the join-acknowledged callback, replacing any previous one.
    pub fn on_join<F>(&mut self, callback: F)
    where
        F: FnMut(&BotHandle) + Send + 'static,
    {
        self.on_join = Some(Box::new(callback));
    }

    /// The channel joined by the last successful [`Bot::connect_to`], if any.
    pub fn channel(&self) -> Option<&str> {
        self.channel.as_deref()
    }

    /// Connect, authenticate, join `channel`, and run the receive loop.
    ///
    /// Blocks the calling task until a callback invokes
    /// [`BotHandle::disconnect`] or the server closes the connection.
    ///
    /// # Errors
    ///
    /// Fails fast without retrying if the TCP connect or any of the three
    /// handshake sends fails, or if the receive loop hits a transport error.
    pub async fn connect_to(&mut self, channel: &str) -> Result<(), BotError> {
        let mut transport = Transport::connect(&self.host, self.port).await?;
        info!(host = %self.host, port = self.port, "connected to chat server");

        // PASS and NICK must precede JOIN; the server rejects out-of-order
        // registration.
        transport.send(Command::pass(self.password.as_str())).await?;
        transport.send(Command::nick(&self.username)).await?;
        transport.send(Command::join(channel)).await?;
        self.channel = Some(channel.to_string());
        info!(channel = %channel, "handshake sent, entering receive loop");

        let (ops_tx, ops_rx) = mpsc::unbounded_channel();
        let handle = BotHandle {
            ops: ops_tx.clone(),
            channel: channel.to_string(),
        };
        self.ops = Some(ops_tx);

        let result = self.run(&mut transport, &handle, ops_rx).await;
        self.ops = None;
        result
    }

    /// Receive loop: drain queued requests, classify inbound lines, dispatch.
    async fn run(
        &mut self,
        transport: &mut Transport,
        handle: &BotHandle,
        mut ops_rx: mpsc::UnboundedReceiver<BotOp>,
    ) -> Result<(), BotError> {
        loop {
            let action = tokio::select! {
                op = ops_rx.recv() => match op {
                    Some(BotOp::Send(cmd)) => LoopAction::Send(cmd),
                    Some(BotOp::Disconnect) | None => LoopAction::Stop,
                },
                event = transport.next_event() => match event? {
                    Some(event) => LoopAction::Event(event),
                    None => LoopAction::Closed,
                },
            };

            match action {
                LoopAction::Send(cmd) => transport.send(cmd).await?,
                LoopAction::Event(event) => self.dispatch(event, transport, handle).await?,
                LoopAction::Closed => {
                    info!("connection closed by server");
                    break;
                }
                LoopAction::Stop => {
                    info!("disconnect requested, leaving receive loop");
                    break;
                }
            }
        }
        Ok(())
    }

    async fn dispatch(
        &mut self,
        event: ServerEvent,
        transport: &mut Transport,
        handle: &BotHandle,
    ) -> Result<(), BotError> {
        match event {
            ServerEvent::Ping => {
                // Unanswered keepalives get the connection dropped server-side.
                transport.send(Command::PONG).await?;
            }
            ServerEvent::Notice(line) => {
                debug!(line = %line, "server notice");
            }
            ServerEvent::JoinAck => {
                info!(channel = ?self.channel, "join acknowledged");
                if let Some(callback) = self.on_join.as_mut() {
                    callback(handle);
                }
            }
            ServerEvent::Privmsg { sender, text } => {
                if let Some(callback) = self.on_message.as_mut() {
                    callback(handle, &sender, &text);
                }
            }
        }
        Ok(())
    }

    /// Send a chat message to the joined channel.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::NotJoined`] if no channel has been joined, and
    /// [`BotError::NotConnected`] if the session is not running.
    pub fn message(&self, text: &str) -> Result<(), BotError> {
        let channel = self.channel.as_deref().ok_or(BotError::NotJoined)?;
        self.queue(Command::privmsg(channel, text))
    }

    /// Send a chat message to an explicit channel, independent of the joined
    /// one.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::NotConnected`] if the session is not running.
    pub fn message_to(&self, channel: &str, text: &str) -> Result<(), BotError> {
        self.queue(Command::privmsg(channel, text))
    }

    /// Request disconnection. Idempotent: repeated calls, and calls while not
    /// connected, are no-ops.
    pub fn disconnect(&self) {
        if let Some(ops) = &self.ops {
            let _ = ops.send(BotOp::Disconnect);
        }
    }

    fn queue(&self, cmd: Command) -> Result<(), BotError> {
        match &self.ops {
            Some(ops) => ops.send(BotOp::Send(cmd)).map_err(|_| BotError::NotConnected),
            None => Err(BotError::NotConnected),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_before_connect_is_routing_error() {
        let bot = Bot::new("bot1", "oauth:xyz");
        assert!(matches!(bot.message("hi"), Err(BotError::NotJoined)));
    }

    #[test]
    fn test_message_to_before_connect_is_not_connected() {
        let bot = Bot::new("bot1", "oauth:xyz");
        assert!(matches!(
            bot.message_to("elsewhere", "hi"),
            Err(BotError::NotConnected)
        ));
    }

    #[test]
    fn test_disconnect_before_connect_is_noop() {
        let bot = Bot::new("bot1", "oauth:xyz");
        bot.disconnect();
        bot.disconnect();
    }

    #[test]
    fn test_handle_queues_privmsg_for_joined_channel() {
        let (ops, mut rx) = mpsc::unbounded_channel();
        let handle = BotHandle {
            ops,
            channel: "somechannel".to_string(),
        };

        handle.say("hello");
        match rx.try_recv() {
            Ok(BotOp::Send(cmd)) => {
                assert_eq!(cmd, Command::privmsg("somechannel", "hello"));
            }
            _ => panic!("Expected queued send"),
        }
    }

    #[test]
    fn test_handle_say_to_targets_explicit_channel() {
        let (ops, mut rx) = mpsc::unbounded_channel();
        let handle = BotHandle {
            ops,
            channel: "somechannel".to_string(),
        };

        handle.say_to("elsewhere", "hi");
        match rx.try_recv() {
            Ok(BotOp::Send(cmd)) => {
                assert_eq!(cmd, Command::privmsg("elsewhere", "hi"));
            }
            _ => panic!("Expected queued send"),
        }
    }

    #[test]
    fn test_callback_registration_replaces_previous() {
        let mut bot = Bot::new("bot1", "oauth:xyz");
        bot.on_join(|_| panic!("replaced callback must not fire"));
        bot.on_join(|_| {});

        let (ops, _rx) = mpsc::unbounded_channel();
        let handle = BotHandle {
            ops,
            channel: "somechannel".to_string(),
        };
        if let Some(callback) = bot.on_join.as_mut() {
            callback(&handle);
        }
    }
}
