//! Dashboard configuration: TOML text with key/value overrides.
//!
//! The browser adapter embeds `dashboard.toml` and backs the override lookup
//! with `localStorage`. Every field has a default so the file may be empty.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::socket_io::TRANSPORT_QUERY;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub api: ApiConfig,
    pub realtime: RealtimeConfig,
    pub countdown: CountdownConfig,
    pub logging: LoggingConfig,
}

/// Backend REST settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Origin of the backend; empty means the page's own origin.
    pub base_url: String,
}

/// Realtime channel settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RealtimeConfig {
    /// Socket.IO endpoint path.
    pub path: String,
    /// Inbound event carrying sensor snapshots.
    pub update_event: String,
    /// Outbound event asking for the next snapshot.
    pub request_event: String,
    /// Delay before reconnecting a closed socket.
    pub reconnect_delay_ms: u64,
}

/// Delete grace period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CountdownConfig {
    /// Ticks before the delete request goes out.
    pub seconds: u8,
    /// Period of one tick.
    pub tick_ms: u64,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            path: "/socket.io/".to_string(),
            update_event: "sensor_update".to_string(),
            request_event: "sensor_update_request".to_string(),
            reconnect_delay_ms: 2000,
        }
    }
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            seconds: 5,
            tick_ms: 1000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl ApiConfig {
    /// URL of a backend endpoint, relative to the page when no base URL is
    /// configured.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }
}

impl CountdownConfig {
    #[must_use]
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

impl RealtimeConfig {
    #[must_use]
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }
}

impl DashboardConfig {
    /// Parse `text`, apply overrides from `lookup`, then validate.
    ///
    /// Recognised keys: `ENERGY_MONITOR_API`, `ENERGY_MONITOR_LOG`,
    /// `ENERGY_MONITOR_COUNTDOWN`.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or the result is invalid.
    pub fn load(text: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::from_toml(text)?;
        config.apply_overrides(lookup);
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(ConfigError::Parse)
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("ENERGY_MONITOR_API") {
            self.api.base_url = val;
        }
        if let Some(val) = lookup("ENERGY_MONITOR_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = lookup("ENERGY_MONITOR_COUNTDOWN") {
            if let Ok(seconds) = val.trim().parse() {
                self.countdown.seconds = seconds;
            }
        }
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for a zero countdown or tick period,
    /// or an empty event name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.countdown.seconds == 0 {
            return Err(ConfigError::Validation(
                "countdown.seconds must be non-zero".to_string(),
            ));
        }
        if self.countdown.tick_ms == 0 {
            return Err(ConfigError::Validation(
                "countdown.tick_ms must be non-zero".to_string(),
            ));
        }
        if self.realtime.update_event.is_empty() || self.realtime.request_event.is_empty() {
            return Err(ConfigError::Validation(
                "realtime event names must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// WebSocket URL of the realtime channel for a page served from `page_origin`.
    #[must_use]
    pub fn socket_url(&self, page_origin: &str) -> String {
        let origin = if self.api.base_url.is_empty() {
            page_origin
        } else {
            self.api.base_url.as_str()
        };
        let origin = origin.trim_end_matches('/');
        let origin = if let Some(rest) = origin.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = origin.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            origin.to_string()
        };
        let path = self.realtime.path.trim_start_matches('/');
        format!("{origin}/{path}?{TRANSPORT_QUERY}")
    }
}
