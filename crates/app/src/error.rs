//! Error types of the application layer.

/// Failure of a backend call made through [`SensorApi`](crate::ports::SensorApi).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (offline, CORS, aborted, …).
    #[error("request failed: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}")]
    Status { status: u16 },

    /// The response body was not what the endpoint promises.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// The backend answered but reported the operation as failed.
    #[error("{0}")]
    Rejected(String),
}

/// Failure to load the dashboard configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse configuration")]
    Parse(#[source] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Validation(String),
}

/// A realtime frame that is not valid Engine.IO / Socket.IO text framing.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("empty frame")]
    Empty,

    #[error("unknown engine.io packet type {0:?}")]
    UnknownEnginePacket(char),

    #[error("unknown socket.io packet type {0:?}")]
    UnknownSocketPacket(char),

    #[error("binary socket.io packets are not supported")]
    Binary,

    #[error("socket.io event without a name")]
    MissingEventName,

    #[error("malformed JSON in frame")]
    Json(#[source] serde_json::Error),
}
