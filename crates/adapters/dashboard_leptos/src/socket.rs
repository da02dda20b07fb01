//! Realtime channel: a Socket.IO client over a bare WebSocket.
//!
//! [`SocketChannel`] is the controller's outbound half. It only queues
//! frames; [`run`] owns the socket, answers heartbeats, delivers
//! `sensor_update` payloads, and reconnects after a close.

use energy_monitor_app::config::RealtimeConfig;
use energy_monitor_app::ports::UpdateChannel;
use energy_monitor_app::socket_io::{self, EnginePacket, SocketPacket};
use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender};
use futures::{FutureExt, SinkExt, StreamExt, future, pin_mut, select};
use gloo_net::websocket::Message;
use gloo_net::websocket::futures::WebSocket;
use gloo_timers::future::sleep;
use serde_json::Value;

/// Why a session ended other than by an orderly close.
#[derive(Debug, thiserror::Error)]
pub enum SocketError {
    #[error("failed to open websocket: {0}")]
    Open(String),

    #[error("websocket transport error: {0}")]
    Transport(String),

    #[error("namespace connection refused: {0}")]
    Refused(String),
}

/// Queues `sensor_update_request` events for the socket task.
#[derive(Debug, Clone)]
pub struct SocketChannel {
    outbox: UnboundedSender<String>,
    request_event: String,
}

impl SocketChannel {
    #[must_use]
    pub fn new(outbox: UnboundedSender<String>, request_event: String) -> Self {
        Self {
            outbox,
            request_event,
        }
    }
}

impl UpdateChannel for SocketChannel {
    fn request_update(&self) {
        let frame = socket_io::encode_event(&self.request_event, None);
        if self.outbox.unbounded_send(frame).is_err() {
            tracing::warn!("realtime task is gone, update request dropped");
        }
    }
}

enum Step {
    Inbound(Option<Result<Message, gloo_net::websocket::WebSocketError>>),
    Outbound(Option<String>),
}

/// What the session loop does after handling one inbound frame.
enum Flow {
    Continue,
    Reply(String),
    Connected,
    Closed,
}

/// Keep a socket open to `url` forever, reconnecting after every close.
///
/// `on_update` receives the payload of every update event. Frames queued on
/// `outbox` are only written once the default namespace is joined; frames
/// left over from a dropped session are discarded and a single request is
/// sent on reconnect instead.
pub async fn run(
    url: String,
    config: RealtimeConfig,
    mut outbox: UnboundedReceiver<String>,
    on_update: impl Fn(Value),
) {
    let mut reconnecting = false;
    loop {
        if reconnecting {
            let mut stale = 0_usize;
            while let Ok(Some(_)) = outbox.try_next() {
                stale += 1;
            }
            if stale > 0 {
                tracing::debug!(stale, "discarded frames queued while disconnected");
            }
        }

        match session(&url, &config, &mut outbox, &on_update, reconnecting).await {
            Ok(()) => tracing::info!(%url, "realtime socket closed"),
            Err(err) => tracing::warn!(%url, error = %err, "realtime socket failed"),
        }
        reconnecting = true;
        sleep(config.reconnect_delay()).await;
    }
}

async fn session(
    url: &str,
    config: &RealtimeConfig,
    outbox: &mut UnboundedReceiver<String>,
    on_update: &impl Fn(Value),
    reconnecting: bool,
) -> Result<(), SocketError> {
    let mut socket = WebSocket::open(url).map_err(|err| SocketError::Open(err.to_string()))?;
    tracing::debug!(%url, "websocket opened");
    let mut joined = false;

    loop {
        let step = {
            let inbound = socket.next().fuse();
            let outbound = async {
                if joined {
                    outbox.next().await
                } else {
                    future::pending().await
                }
            }
            .fuse();
            pin_mut!(inbound, outbound);
            select! {
                frame = inbound => Step::Inbound(frame),
                frame = outbound => Step::Outbound(frame),
            }
        };

        let reply = match step {
            Step::Outbound(Some(frame)) => Some(frame),
            // Every sender is gone: the page is being torn down.
            Step::Outbound(None) => return Ok(()),
            Step::Inbound(None) => return Ok(()),
            Step::Inbound(Some(Err(err))) => return Err(SocketError::Transport(err.to_string())),
            Step::Inbound(Some(Ok(Message::Bytes(bytes)))) => {
                tracing::debug!(len = bytes.len(), "ignoring binary frame");
                None
            }
            Step::Inbound(Some(Ok(Message::Text(text)))) => {
                match handle_frame(&text, config, on_update)? {
                    Flow::Continue => None,
                    Flow::Reply(frame) => Some(frame),
                    Flow::Connected => {
                        joined = true;
                        reconnecting.then(|| socket_io::encode_event(&config.request_event, None))
                    }
                    Flow::Closed => return Ok(()),
                }
            }
        };

        if let Some(frame) = reply {
            socket
                .send(Message::Text(frame))
                .await
                .map_err(|err| SocketError::Transport(err.to_string()))?;
        }
    }
}

fn handle_frame(
    text: &str,
    config: &RealtimeConfig,
    on_update: &impl Fn(Value),
) -> Result<Flow, SocketError> {
    let packet = match socket_io::decode(text) {
        Ok(packet) => packet,
        Err(err) => {
            tracing::warn!(error = %err, "ignoring undecodable realtime frame");
            return Ok(Flow::Continue);
        }
    };

    let flow = match packet {
        EnginePacket::Open(handshake) => {
            tracing::debug!(sid = %handshake.sid, ping_interval = handshake.ping_interval, "engine handshake");
            Flow::Reply(socket_io::encode_connect())
        }
        EnginePacket::Ping => Flow::Reply(socket_io::encode_pong()),
        EnginePacket::Close => Flow::Closed,
        EnginePacket::Pong | EnginePacket::Upgrade | EnginePacket::Noop => Flow::Continue,
        EnginePacket::Message(SocketPacket::Connect { namespace, sid }) => {
            tracing::info!(%namespace, sid = sid.as_deref().unwrap_or_default(), "realtime channel connected");
            Flow::Connected
        }
        EnginePacket::Message(SocketPacket::ConnectError { message, .. }) => {
            return Err(SocketError::Refused(message));
        }
        EnginePacket::Message(SocketPacket::Disconnect { namespace }) => {
            tracing::info!(%namespace, "server closed the namespace");
            Flow::Closed
        }
        EnginePacket::Message(packet) => {
            match packet.event_payload(&config.update_event) {
                Some(payload) => on_update(payload.clone()),
                None => tracing::trace!(?packet, "ignoring socket packet"),
            }
            Flow::Continue
        }
    };
    Ok(flow)
}
