//! Sensor: one INA219 power monitor attached to a solar panel, wind turbine
//! or battery, as reported by every realtime update.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::scalar::Scalar;

/// Kind of source a sensor measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SensorType {
    #[default]
    Solar,
    Wind,
    Battery,
    /// Any type string the dashboard does not know.
    #[serde(other)]
    Unknown,
}

impl SensorType {
    /// Types offered by the edit and add-sensor forms, in display order.
    pub const SELECTABLE: [Self; 3] = [Self::Solar, Self::Wind, Self::Battery];

    /// Wire name of the type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Solar => "Solar",
            Self::Wind => "Wind",
            Self::Battery => "Battery",
            Self::Unknown => "Unknown",
        }
    }

    /// CSS class used to colour the sensor name. Unknown types share the
    /// battery styling.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Solar => "type-Solar",
            Self::Wind => "type-Wind",
            Self::Battery | Self::Unknown => "type-Battery",
        }
    }

    /// Font Awesome icon for the card header.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Solar => "fa-solar-panel",
            Self::Wind => "fa-wind",
            Self::Battery => "fa-car-battery",
            Self::Unknown => "fa-question",
        }
    }

    #[must_use]
    pub fn is_battery(self) -> bool {
        matches!(self, Self::Battery)
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Charge direction reported for battery sensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryStatus {
    Charging,
    Discharging,
    Idle,
    Offline,
}

impl BatteryStatus {
    /// Map the backend's free-form `status` string; anything unrecognised is offline.
    #[must_use]
    pub fn from_status(status: Option<&str>) -> Self {
        match status {
            Some("charging") => Self::Charging,
            Some("discharging") => Self::Discharging,
            Some("idle") => Self::Idle,
            _ => Self::Offline,
        }
    }

    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Charging => "battery-charging",
            Self::Discharging => "battery-discharging",
            Self::Idle => "battery-idle",
            Self::Offline => "battery-offline",
        }
    }
}

/// A single (possibly averaged) measurement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reading {
    pub voltage: Option<Scalar>,
    pub current: Option<Scalar>,
    pub power: Option<Scalar>,
    /// Percentage of rated voltage (solar and wind only).
    pub output: Option<Scalar>,
    /// Estimated state of charge in percent (battery only).
    pub state_of_charge: Option<Scalar>,
    pub time_stamp: Option<String>,
}

/// Latest reading plus the bounded history kept by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorData {
    #[serde(flatten)]
    pub latest: Reading,
    /// Oldest first; the backend caps the length at `max_readings`.
    #[serde(default)]
    pub readings: Vec<Reading>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Configuration and live data of one sensor. Sensors are keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    #[serde(rename = "type", default)]
    pub sensor_type: SensorType,
    /// Voltage rating.
    #[serde(default)]
    pub rating: Option<Scalar>,
    #[serde(default)]
    pub max_power: Option<Scalar>,
    /// i2c address as an integer.
    #[serde(default)]
    pub address: Option<Scalar>,
    #[serde(default)]
    pub data: SensorData,
}

impl Sensor {
    #[must_use]
    pub fn battery_status(&self) -> BatteryStatus {
        BatteryStatus::from_status(self.data.status.as_deref())
    }
}

/// Fleet-wide totals optionally attached to an update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Totals {
    pub solar_total: f64,
    pub wind_total: f64,
    pub battery_soc_total: f64,
    pub battery_in_total: f64,
    pub battery_out_total: f64,
}

/// Key under which an update carries [`Totals`] instead of a sensor.
pub const TOTALS_KEY: &str = "totals";

/// Every sensor delivered by one `sensor_update` message, in server order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorSnapshot {
    pub sensors: Vec<(String, Sensor)>,
    pub totals: Option<Totals>,
}

impl SensorSnapshot {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Sensor> {
        self.sensors.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Sensor names in display order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sensors.iter().map(|(n, _)| n.as_str())
    }
}

impl FromIterator<(String, Sensor)> for SensorSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, Sensor)>>(iter: I) -> Self {
        Self {
            sensors: iter.into_iter().collect(),
            totals: None,
        }
    }
}

impl<'de> Deserialize<'de> for SensorSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SnapshotVisitor;

        impl<'de> Visitor<'de> for SnapshotVisitor {
            type Value = SensorSnapshot;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of sensor name to sensor state")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut snapshot = SensorSnapshot::default();
                while let Some(key) = map.next_key::<String>()? {
                    if key == TOTALS_KEY {
                        snapshot.totals = Some(map.next_value()?);
                    } else {
                        let sensor = map.next_value()?;
                        snapshot.sensors.push((key, sensor));
                    }
                }
                Ok(snapshot)
            }
        }

        deserializer.deserialize_map(SnapshotVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UPDATE: &str = r#"{
        "Roof": {
            "address": 64, "type": "Solar", "max_power": 100, "rating": 12,
            "data": {"voltage": 12.6, "current": 3.0, "power": 38.0, "output": 105.0,
                     "time_stamp": "10:00:00AM on January 01, 2024", "readings": []}
        },
        "Bank": {
            "address": 65, "type": "Battery", "max_power": "200", "rating": 12,
            "data": {"voltage": 12.2, "current": 1.0, "power": 12.0, "state_of_charge": 50,
                     "time_stamp": "10:00:01AM on January 01, 2024", "status": "charging",
                     "readings": [{"voltage": 12.1, "current": 1.0, "power": 12.0,
                                   "state_of_charge": 49, "time_stamp": "09:59:55AM"}]}
        },
        "totals": {"solar_total": 38.0, "wind_total": 0.0, "battery_soc_total": 50.0,
                   "battery_in_total": 12.0, "battery_out_total": 0.0}
    }"#;

    #[test]
    fn should_keep_server_order_when_deserializing_snapshot() {
        let snapshot: SensorSnapshot = serde_json::from_str(UPDATE).unwrap();
        let names: Vec<&str> = snapshot.names().collect();
        assert_eq!(names, vec!["Roof", "Bank"]);
    }

    #[test]
    fn should_split_totals_from_sensors() {
        let snapshot: SensorSnapshot = serde_json::from_str(UPDATE).unwrap();
        let totals = snapshot.totals.unwrap();
        assert!((totals.solar_total - 38.0).abs() < f64::EPSILON);
        assert!(!snapshot.contains(TOTALS_KEY));
    }

    #[test]
    fn should_parse_battery_specific_fields() {
        let snapshot: SensorSnapshot = serde_json::from_str(UPDATE).unwrap();
        let bank = snapshot.get("Bank").unwrap();
        assert_eq!(bank.sensor_type, SensorType::Battery);
        assert_eq!(bank.max_power, Some(Scalar::Text("200".to_string())));
        assert_eq!(bank.data.latest.state_of_charge, Some(Scalar::Number(50.0)));
        assert_eq!(bank.data.readings.len(), 1);
        assert_eq!(bank.battery_status(), BatteryStatus::Charging);
    }

    #[test]
    fn should_treat_empty_object_as_empty_snapshot() {
        let snapshot: SensorSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.is_empty());
        assert!(snapshot.totals.is_none());
    }

    #[test]
    fn should_accept_null_metrics() {
        let json = r#"{"Mast": {"type": "Wind", "data": {"voltage": null, "output": null,
                       "time_stamp": "Not Updated", "readings": []}}}"#;
        let snapshot: SensorSnapshot = serde_json::from_str(json).unwrap();
        let mast = snapshot.get("Mast").unwrap();
        assert_eq!(mast.data.latest.voltage, None);
        assert_eq!(mast.data.latest.time_stamp.as_deref(), Some("Not Updated"));
    }

    #[test]
    fn should_map_unknown_type_to_battery_styling() {
        let json = r#"{"New": {"type": "solar"}}"#;
        let snapshot: SensorSnapshot = serde_json::from_str(json).unwrap();
        let sensor = snapshot.get("New").unwrap();
        assert_eq!(sensor.sensor_type, SensorType::Unknown);
        assert_eq!(sensor.sensor_type.css_class(), "type-Battery");
    }

    #[test]
    fn should_treat_unrecognised_status_as_offline() {
        assert_eq!(BatteryStatus::from_status(Some("??")), BatteryStatus::Offline);
        assert_eq!(BatteryStatus::from_status(None).css_class(), "battery-offline");
    }
}
