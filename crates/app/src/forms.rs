//! Form field marshalling.
//!
//! Forms hold exactly the text the user sees. Nothing is validated here:
//! numeric and range checks are left to the backend, and address text that is
//! not hexadecimal is sent as `null`.

use energy_monitor_domain::address::{format_address, parse_hex_address};
use energy_monitor_domain::scalar::{Scalar, display_or};
use energy_monitor_domain::sensor::{Sensor, SensorType};
use energy_monitor_domain::settings::Settings;

use crate::ports::backend::{NewSensor, SensorUpdate, SettingsUpdate};

/// Fields of the per-card edit form and of the add-sensor form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorForm {
    pub name: String,
    pub sensor_type: String,
    pub max_power: String,
    pub rating: String,
    /// Hex text, e.g. `0x40`.
    pub address: String,
}

impl Default for SensorForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            sensor_type: SensorType::default().as_str().to_string(),
            max_power: String::new(),
            rating: String::new(),
            address: String::new(),
        }
    }
}

impl SensorForm {
    /// Pre-fill the edit form of `name`.
    #[must_use]
    pub fn for_sensor(name: &str, sensor: &Sensor) -> Self {
        Self {
            name: name.to_string(),
            sensor_type: sensor.sensor_type.as_str().to_string(),
            max_power: display_or(sensor.max_power.as_ref(), ""),
            rating: display_or(sensor.rating.as_ref(), ""),
            address: format_address(sensor.address.as_ref()),
        }
    }

    /// Build the `update_sensor` body for the sensor that was called
    /// `original_name` when the form opened.
    #[must_use]
    pub fn into_update(self, original_name: &str) -> SensorUpdate {
        let address = parse_hex_address(&self.address).ok();
        SensorUpdate {
            original_name: original_name.to_string(),
            name: self.name,
            sensor_type: self.sensor_type,
            max_power: self.max_power,
            rating: self.rating,
            address,
        }
    }

    #[must_use]
    pub fn into_new_sensor(self) -> NewSensor {
        NewSensor {
            name: self.name,
            sensor_type: self.sensor_type,
            max_power: self.max_power,
            rating: self.rating,
            address: self.address,
        }
    }
}

/// Fields of the settings panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsForm {
    pub solar_interval: String,
    pub wind_interval: String,
    pub battery_interval: String,
    pub max_log: String,
    pub max_readings: String,
    pub mqtt_broker: String,
    pub mqtt_port: String,
    pub webserver_host: String,
    pub webserver_port: String,
    pub remote_gpio: bool,
    pub gpio_address: String,
}

impl SettingsForm {
    /// The GPIO address input follows the remote-GPIO checkbox.
    #[must_use]
    pub fn gpio_address_enabled(&self) -> bool {
        self.remote_gpio
    }

    #[must_use]
    pub fn to_update(&self) -> SettingsUpdate {
        SettingsUpdate {
            max_log: self.max_log.clone(),
            solar_interval: self.solar_interval.clone(),
            wind_interval: self.wind_interval.clone(),
            battery_interval: self.battery_interval.clone(),
            max_readings: self.max_readings.clone(),
            mqtt_broker: self.mqtt_broker.clone(),
            mqtt_port: self.mqtt_port.clone(),
            webserver_host: self.webserver_host.clone(),
            webserver_port: self.webserver_port.clone(),
            remote_gpio: self.remote_gpio,
            gpio_address: self.gpio_address.clone(),
        }
    }
}

fn text(value: Option<&Scalar>) -> String {
    display_or(value, "")
}

impl From<&Settings> for SettingsForm {
    fn from(settings: &Settings) -> Self {
        Self {
            solar_interval: text(settings.poll_intervals.solar.as_ref()),
            wind_interval: text(settings.poll_intervals.wind.as_ref()),
            battery_interval: text(settings.poll_intervals.battery.as_ref()),
            max_log: text(settings.max_log.as_ref()),
            max_readings: text(settings.max_readings.as_ref()),
            mqtt_broker: text(settings.mqtt_broker.as_ref()),
            mqtt_port: text(settings.mqtt_port.as_ref()),
            webserver_host: text(settings.webserver_host.as_ref()),
            webserver_port: text(settings.webserver_port.as_ref()),
            remote_gpio: settings.is_remote_gpio(),
            gpio_address: text(settings.gpio_address.as_ref()),
        }
    }
}
