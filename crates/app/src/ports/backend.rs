//! Backend port: the REST endpoints the dashboard calls, and their bodies.
//!
//! | Method | Path | Body / reply |
//! |--------|------|--------------|
//! | GET | `/get_settings` | [`Settings`] |
//! | POST | `/update_settings` | [`SettingsUpdate`] |
//! | POST | `/update_sensor` | [`SensorUpdate`] |
//! | POST | `/add_sensor` | [`NewSensor`] → [`StatusReply`] |
//! | POST | `/delete_sensor` | [`DeleteSensor`] → [`StatusReply`] |
//! | GET | `/get_sensor_log?name=` | [`SensorLogReply`] |
//! | GET | `/get_log_file` | [`LogFileReply`] |
//! | GET | `/readme` | plain text |
//! | POST | `/restart` | no body, status only |

use std::future::Future;

use energy_monitor_domain::sensor::Reading;
use energy_monitor_domain::settings::Settings;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::ApiError;

/// Body of `POST /update_sensor`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensorUpdate {
    /// Name the sensor had when the edit form was opened.
    pub original_name: String,
    pub name: String,
    #[serde(rename = "type")]
    pub sensor_type: String,
    /// Raw form text; the backend does the numeric conversion.
    pub max_power: String,
    pub rating: String,
    /// Address parsed from hex text; `null` when the text was not hex.
    pub address: Option<i64>,
}

/// Body of `POST /add_sensor`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSensor {
    pub name: String,
    #[serde(rename = "type")]
    pub sensor_type: String,
    pub max_power: String,
    pub rating: String,
    /// Raw address text as typed.
    pub address: String,
}

/// Body of `POST /delete_sensor`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteSensor {
    pub name: String,
}

/// Body of `POST /update_settings`: every settings field, flattened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsUpdate {
    pub max_log: String,
    pub solar_interval: String,
    pub wind_interval: String,
    pub battery_interval: String,
    pub max_readings: String,
    pub mqtt_broker: String,
    pub mqtt_port: String,
    pub webserver_host: String,
    pub webserver_port: String,
    /// Sent as `1`/`0`.
    #[serde(serialize_with = "serialize_flag")]
    pub remote_gpio: bool,
    pub gpio_address: String,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_flag<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*value))
}

/// `{status, message}` reply of the add and delete endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StatusReply {
    pub status: String,
    pub message: Option<String>,
}

impl StatusReply {
    /// Turn anything but `status == "success"` into [`ApiError::Rejected`].
    ///
    /// # Errors
    ///
    /// Returns the backend's message, or `"Unknown error"` when it sent none.
    pub fn into_result(self) -> Result<(), ApiError> {
        if self.status == "success" {
            Ok(())
        } else {
            Err(ApiError::Rejected(
                self.message.unwrap_or_else(|| "Unknown error".to_string()),
            ))
        }
    }
}

/// Reply of `GET /get_sensor_log`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SensorLogReply {
    pub readings: Vec<Reading>,
}

/// One record of `GET /get_log_file`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogRecord {
    pub logs: String,
}

/// Reply of `GET /get_log_file`: `{logs: [{logs: "<line>"}, …]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogFileReply {
    pub logs: Vec<LogRecord>,
}

impl LogFileReply {
    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.logs.into_iter().map(|r| r.logs).collect()
    }
}

/// The backend REST API. Every call is fire-once: no retries.
pub trait SensorApi {
    fn get_settings(&self) -> impl Future<Output = Result<Settings, ApiError>>;

    fn update_settings(&self, update: SettingsUpdate)
    -> impl Future<Output = Result<(), ApiError>>;

    fn update_sensor(&self, update: SensorUpdate) -> impl Future<Output = Result<(), ApiError>>;

    /// # Errors
    ///
    /// [`ApiError::Rejected`] when the backend's status is not `success`.
    fn add_sensor(&self, sensor: NewSensor) -> impl Future<Output = Result<(), ApiError>>;

    /// # Errors
    ///
    /// [`ApiError::Rejected`] when the backend's status is not `success`.
    fn delete_sensor(&self, name: &str) -> impl Future<Output = Result<(), ApiError>>;

    /// Readings history of one sensor, oldest first.
    fn get_sensor_log(&self, name: &str) -> impl Future<Output = Result<Vec<Reading>, ApiError>>;

    /// Raw lines of the backend log file.
    fn get_log_file(&self) -> impl Future<Output = Result<Vec<String>, ApiError>>;

    /// The README as Markdown text.
    fn readme(&self) -> impl Future<Output = Result<String, ApiError>>;

    /// Ask the backend to restart. Resolves with the HTTP status of the
    /// restart call itself, whatever it is.
    fn restart(&self) -> impl Future<Output = Result<u16, ApiError>>;
}
