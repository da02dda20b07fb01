//! Socket.IO v4 text framing over an Engine.IO v4 WebSocket transport.
//!
//! Only the subset the realtime feed uses is supported: the open handshake,
//! heartbeats, namespace connect, and JSON events without binary attachments.
//!
//! ```text
//! 0{"sid":"…","pingInterval":25000,…}   engine open
//! 2 / 3                                 engine ping / pong
//! 40                                    socket connect to "/"
//! 42["sensor_update",{…}]               socket event
//! ```

use serde::Deserialize;
use serde_json::Value;

use crate::error::ProtocolError;

/// Query string selecting Engine.IO v4 over a bare WebSocket.
pub const TRANSPORT_QUERY: &str = "EIO=4&transport=websocket";

const DEFAULT_NAMESPACE: &str = "/";

/// Payload of the Engine.IO open packet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    pub sid: String,
    #[serde(default)]
    pub upgrades: Vec<String>,
    #[serde(default)]
    pub ping_interval: u64,
    #[serde(default)]
    pub ping_timeout: u64,
    #[serde(default)]
    pub max_payload: u64,
}

/// One Engine.IO packet.
#[derive(Debug, Clone, PartialEq)]
pub enum EnginePacket {
    Open(Handshake),
    Close,
    Ping,
    Pong,
    Message(SocketPacket),
    Upgrade,
    Noop,
}

/// One Socket.IO packet carried in an Engine.IO message.
#[derive(Debug, Clone, PartialEq)]
pub enum SocketPacket {
    Connect {
        namespace: String,
        sid: Option<String>,
    },
    Disconnect {
        namespace: String,
    },
    Event {
        namespace: String,
        ack_id: Option<u64>,
        name: String,
        args: Vec<Value>,
    },
    Ack {
        namespace: String,
        ack_id: Option<u64>,
        args: Vec<Value>,
    },
    ConnectError {
        namespace: String,
        message: String,
    },
}

impl SocketPacket {
    /// The first argument of `event` on the default namespace, if this is it.
    #[must_use]
    pub fn event_payload(&self, event: &str) -> Option<&Value> {
        match self {
            Self::Event {
                namespace,
                name,
                args,
                ..
            } if namespace == DEFAULT_NAMESPACE && name == event => {
                Some(args.first().unwrap_or(&Value::Null))
            }
            _ => None,
        }
    }
}

/// Decode one text frame.
///
/// # Errors
///
/// Returns [`ProtocolError`] for empty frames, unknown packet types, binary
/// packets, events without a name, and malformed JSON.
pub fn decode(frame: &str) -> Result<EnginePacket, ProtocolError> {
    let mut chars = frame.chars();
    let kind = chars.next().ok_or(ProtocolError::Empty)?;
    let rest = chars.as_str();
    match kind {
        '0' => serde_json::from_str(rest)
            .map(EnginePacket::Open)
            .map_err(ProtocolError::Json),
        '1' => Ok(EnginePacket::Close),
        '2' => Ok(EnginePacket::Ping),
        '3' => Ok(EnginePacket::Pong),
        '4' => decode_socket(rest).map(EnginePacket::Message),
        '5' => Ok(EnginePacket::Upgrade),
        '6' => Ok(EnginePacket::Noop),
        other => Err(ProtocolError::UnknownEnginePacket(other)),
    }
}

fn decode_socket(packet: &str) -> Result<SocketPacket, ProtocolError> {
    let mut chars = packet.chars();
    let kind = chars.next().ok_or(ProtocolError::Empty)?;
    let rest = chars.as_str();
    if matches!(kind, '5' | '6') {
        return Err(ProtocolError::Binary);
    }

    let (namespace, rest) = match rest.strip_prefix('/') {
        Some(_) => match rest.split_once(',') {
            Some((namespace, rest)) => (namespace.to_string(), rest),
            None => (rest.to_string(), ""),
        },
        None => (DEFAULT_NAMESPACE.to_string(), rest),
    };

    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    let (ack_id, payload) = rest.split_at(digits);
    let ack_id = ack_id.parse::<u64>().ok();
    let payload = if payload.is_empty() {
        None
    } else {
        Some(serde_json::from_str::<Value>(payload).map_err(ProtocolError::Json)?)
    };

    match kind {
        '0' => Ok(SocketPacket::Connect {
            namespace,
            sid: payload
                .as_ref()
                .and_then(|p| p.get("sid"))
                .and_then(Value::as_str)
                .map(str::to_string),
        }),
        '1' => Ok(SocketPacket::Disconnect { namespace }),
        '2' => {
            let Some(Value::Array(mut args)) = payload else {
                return Err(ProtocolError::MissingEventName);
            };
            let name = match args.first() {
                Some(Value::String(name)) => name.clone(),
                _ => return Err(ProtocolError::MissingEventName),
            };
            args.remove(0);
            Ok(SocketPacket::Event {
                namespace,
                ack_id,
                name,
                args,
            })
        }
        '3' => Ok(SocketPacket::Ack {
            namespace,
            ack_id,
            args: match payload {
                Some(Value::Array(args)) => args,
                Some(other) => vec![other],
                None => Vec::new(),
            },
        }),
        '4' => Ok(SocketPacket::ConnectError {
            namespace,
            message: match payload {
                Some(Value::Object(map)) => map
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                Some(Value::String(message)) => message,
                _ => String::new(),
            },
        }),
        other => Err(ProtocolError::UnknownSocketPacket(other)),
    }
}

/// Join the default namespace.
#[must_use]
pub fn encode_connect() -> String {
    "40".to_string()
}

/// Answer to an engine ping.
#[must_use]
pub fn encode_pong() -> String {
    "3".to_string()
}

/// Emit `name` on the default namespace, with an optional payload.
#[must_use]
pub fn encode_event(name: &str, payload: Option<&Value>) -> String {
    let mut args = vec![Value::String(name.to_string())];
    args.extend(payload.cloned());
    format!("42{}", Value::Array(args))
}
