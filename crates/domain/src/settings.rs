//! Settings: the process-wide backend configuration, fetched and saved wholesale.

use serde::{Deserialize, Deserializer, Serialize};

use crate::scalar::Scalar;
use crate::sensor::SensorType;

/// Poll interval (seconds) per sensor type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollIntervals {
    #[serde(rename = "Solar")]
    pub solar: Option<Scalar>,
    #[serde(rename = "Wind")]
    pub wind: Option<Scalar>,
    #[serde(rename = "Battery")]
    pub battery: Option<Scalar>,
}

impl PollIntervals {
    #[must_use]
    pub fn get(&self, sensor_type: SensorType) -> Option<&Scalar> {
        match sensor_type {
            SensorType::Solar => self.solar.as_ref(),
            SensorType::Wind => self.wind.as_ref(),
            SensorType::Battery => self.battery.as_ref(),
            SensorType::Unknown => None,
        }
    }
}

/// Backend settings as returned by `GET /get_settings`.
///
/// Every field is optional: a missing key is shown as an empty form field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub poll_intervals: PollIntervals,
    /// Log file size limit.
    pub max_log: Option<Scalar>,
    /// Length of the per-sensor readings history.
    pub max_readings: Option<Scalar>,
    pub mqtt_broker: Option<Scalar>,
    pub mqtt_port: Option<Scalar>,
    pub webserver_host: Option<Scalar>,
    pub webserver_port: Option<Scalar>,
    /// Sensor IO goes through a remote GPIO controller; gates address editing.
    #[serde(deserialize_with = "deserialize_flag")]
    pub remote_gpio: Option<bool>,
    pub gpio_address: Option<Scalar>,
}

impl Settings {
    /// Whether remote GPIO mode is on. A missing flag means local hardware.
    #[must_use]
    pub fn is_remote_gpio(&self) -> bool {
        self.remote_gpio.unwrap_or(false)
    }
}

/// Accept `true`/`false`, `0`/`1` (and their string forms) or `null`.
fn deserialize_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        Scalar::Flag(b) => b,
        Scalar::Number(n) => (n - 1.0).abs() < f64::EPSILON,
        Scalar::Text(s) => s == "1" || s.eq_ignore_ascii_case("true"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_deserialize_backend_default_config() {
        let json = r#"{
            "poll_intervals": {"Wind": 7, "Solar": 5, "Battery": 10},
            "max_log": 5, "max_readings": 5,
            "mqtt_broker": "localhost", "mqtt_port": 1883,
            "webserver_host": "0.0.0.0", "webserver_port": 5000,
            "remote_gpio": 0, "gpio_address": "localhost"
        }"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.poll_intervals.wind, Some(Scalar::Number(7.0)));
        assert_eq!(
            settings.poll_intervals.get(SensorType::Battery),
            Some(&Scalar::Number(10.0))
        );
        assert_eq!(settings.remote_gpio, Some(false));
        assert_eq!(settings.gpio_address, Some(Scalar::from("localhost")));
    }

    #[test]
    fn should_accept_boolean_and_integer_remote_gpio() {
        let on: Settings = serde_json::from_str(r#"{"remote_gpio": 1}"#).unwrap();
        let also_on: Settings = serde_json::from_str(r#"{"remote_gpio": true}"#).unwrap();
        assert!(on.is_remote_gpio());
        assert!(also_on.is_remote_gpio());
    }

    #[test]
    fn should_default_missing_fields_to_none() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert!(!settings.is_remote_gpio());
    }
}
