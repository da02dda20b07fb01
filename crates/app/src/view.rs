//! View models: everything the page shows, as plain data.
//!
//! The controller builds these with the pure functions of
//! [`render`](crate::render) and hands them to the
//! [`Presenter`](crate::ports::Presenter). Two equal view models must produce
//! the same page.

use energy_monitor_domain::panel::Panel;
use energy_monitor_domain::sensor::SensorType;

use crate::forms::{SensorForm, SettingsForm};

/// Shown instead of cards when an update carries no sensors.
pub const NO_SENSORS_MESSAGE: &str = "No sensors found.";
pub const NO_READINGS_MESSAGE: &str = "No logs available.";
pub const NO_LOG_DATA_MESSAGE: &str = "No log data found.";
pub const LOGS_FAILED_MESSAGE: &str = "Failed to load logs.";
pub const README_FAILED_MESSAGE: &str = "Failed to load README.";
pub const SETTINGS_FAILED_MESSAGE: &str = "Failed to load settings.";
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete sensor.";

/// Header strip: GPIO mode badge and the add-sensor button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderView {
    pub remote_gpio: bool,
    /// Sensors can only be added through a remote GPIO controller.
    pub add_sensor_visible: bool,
}

/// Net battery flow badge of the header totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowBadge {
    Charging { watts: String },
    Discharging { watts: String },
    Idle,
}

/// Fleet totals shown in the header when an update carries them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalsView {
    pub solar: String,
    pub wind: String,
    pub soc: String,
    /// `battery-empty` … `battery-full`.
    pub soc_class: &'static str,
    pub flow: FlowBadge,
}

/// The sensor container.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub totals: Option<TotalsView>,
    pub body: SensorsBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SensorsBody {
    /// Empty-state message instead of cards.
    Empty,
    Cards(Vec<SensorCardView>),
}

/// One metric tile of the view panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricTile {
    /// Font Awesome icon name.
    pub icon: &'static str,
    /// Extra icon class (battery status colouring).
    pub icon_class: Option<&'static str>,
    /// CSS class of the value, also naming the metric.
    pub class: &'static str,
    pub text: String,
}

/// Initial contents of a card's edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditFormView {
    pub form: SensorForm,
    /// Address is only editable in remote-GPIO mode.
    pub address_enabled: bool,
}

/// One row of a per-sensor readings log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingRow {
    pub time_stamp: String,
    pub voltage: String,
    pub current: String,
    pub power: String,
    /// Output percentage, or state of charge when there is no output.
    pub fourth: String,
}

/// Per-sensor readings log, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SensorLogView {
    Empty,
    Rows(Vec<ReadingRow>),
    Failed,
}

/// One sensor card with every panel pre-rendered; `panel` picks the visible one.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorCardView {
    pub name: String,
    pub sensor_type: SensorType,
    pub type_class: &'static str,
    pub icon: &'static str,
    /// Type and voltage rating, e.g. `Solar · 12V`.
    pub badge: String,
    pub panel: Panel,
    pub tiles: Vec<MetricTile>,
    pub time_stamp: String,
    pub edit: EditFormView,
    pub log: SensorLogView,
}

impl SensorCardView {
    /// Log and edit icons are only offered while the live view is showing.
    #[must_use]
    pub fn shows_actions(&self) -> bool {
        matches!(self.panel, Panel::View)
    }

    /// Timestamp line, present only in the live view.
    #[must_use]
    pub fn timestamp_line(&self) -> Option<String> {
        self.shows_actions()
            .then(|| format!("Last Updated: {}", self.time_stamp))
    }

    /// A card whose countdown expired is hidden until the page reloads.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        matches!(self.panel, Panel::Deleted)
    }

    /// Seconds left on the undo countdown, if one is running.
    #[must_use]
    pub fn countdown(&self) -> Option<u8> {
        match self.panel {
            Panel::UndoCountdown { remaining } => Some(remaining),
            _ => None,
        }
    }
}

/// Modal panels laid over the sensor container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Settings,
    LogFile,
    About,
    Restart,
    AddSensor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsView {
    Loading,
    Form(SettingsForm),
    Unavailable,
}

/// Backend log file panel. Lines are escaped HTML fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFileView {
    Loading,
    Empty,
    Lines(Vec<String>),
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AboutView {
    Loading,
    /// README converted to HTML.
    Document { html: String },
    Failed,
}

/// Restart dialog: confirm, in progress, then the status of the restart call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestartView {
    Confirm,
    InProgress,
    Done,
    Failed { status: u16 },
    Error { message: String },
}

impl RestartView {
    #[must_use]
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Confirm => "Are you sure you want to restart the program?",
            Self::InProgress => "Restarting...",
            Self::Done => "Successfully Restarted",
            Self::Failed { .. } => "Failed To Restart",
            Self::Error { .. } => "Error restarting",
        }
    }

    #[must_use]
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::Failed { status } => Some(format!("HTTP {status}. Check logs for errors.")),
            Self::Error { message } => Some(message.clone()),
            _ => None,
        }
    }

    /// Confirm and cancel buttons are only offered before the request goes out.
    #[must_use]
    pub fn awaits_confirmation(&self) -> bool {
        matches!(self, Self::Confirm)
    }
}
