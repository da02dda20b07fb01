mod about_panel;
mod add_sensor_panel;
mod header;
mod loading;
mod log_file_panel;
mod overlay;
mod restart_panel;
mod sensor_card;
mod settings_panel;

pub use about_panel::AboutPanel;
pub use add_sensor_panel::AddSensorPanel;
pub use header::Header;
pub use loading::Loading;
pub use log_file_panel::LogFilePanel;
pub use overlay::OverlayFrame;
pub use restart_panel::RestartPanel;
pub use sensor_card::SensorGrid;
pub use settings_panel::SettingsPanel;
