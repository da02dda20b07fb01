//! Presenter port: where view models end up.

use crate::view::{
    AboutView, DashboardView, HeaderView, LogFileView, Overlay, RestartView, SensorCardView,
    SettingsView,
};

/// Pushes view models to the page.
///
/// Implementations replace what they showed before with what they are given;
/// they keep no state of their own beyond that.
pub trait Presenter {
    fn show_header(&self, header: HeaderView);

    /// Replace the whole sensor container.
    fn show_sensors(&self, view: DashboardView);

    /// Replace one card, leaving the others (and their form inputs) alone.
    fn show_card(&self, card: SensorCardView);

    /// Open an overlay, or close the open one with `None`.
    fn show_overlay(&self, overlay: Option<Overlay>);

    fn show_settings(&self, view: SettingsView);

    fn show_log_file(&self, view: LogFileView);

    fn show_about(&self, view: AboutView);

    fn show_restart(&self, view: RestartView);

    /// Blocking alert dialog.
    fn alert(&self, message: &str);

    /// Reload the whole page.
    fn reload(&self);
}
