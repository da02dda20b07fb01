//! View controller: reacts to realtime updates and user input.
//!
//! The controller owns the UI session state and the last rendered snapshot.
//! Every operation updates that state first, pushes the affected view models
//! to the [`Presenter`], then awaits whatever backend call it makes. No
//! `RefCell` borrow is held across an `.await`, so operations may interleave
//! freely on the browser's event loop.

use std::cell::RefCell;

use energy_monitor_domain::panel::{Panel, PanelAction};
use energy_monitor_domain::sensor::SensorSnapshot;

use crate::config::CountdownConfig;
use crate::error::ApiError;
use crate::forms::{SensorForm, SettingsForm};
use crate::markdown::render_markdown;
use crate::ports::{CountdownScheduler, Presenter, SensorApi, UpdateChannel};
use crate::render::{render, render_card, render_header, render_log_file};
use crate::ui_state::{FetchedLog, UiState};
use crate::view::{
    AboutView, DELETE_FAILED_MESSAGE, LogFileView, Overlay, RestartView, SettingsView,
};

/// The dashboard's single view controller.
pub struct ViewController<A, C, S, P>
where
    S: CountdownScheduler,
{
    api: A,
    channel: C,
    scheduler: S,
    presenter: P,
    countdown: CountdownConfig,
    state: RefCell<UiState<S::Handle>>,
    snapshot: RefCell<Option<SensorSnapshot>>,
}

impl<A, C, S, P> ViewController<A, C, S, P>
where
    A: SensorApi,
    C: UpdateChannel,
    S: CountdownScheduler,
    P: Presenter,
{
    pub fn new(api: A, channel: C, scheduler: S, presenter: P, countdown: CountdownConfig) -> Self {
        Self {
            api,
            channel,
            scheduler,
            presenter,
            countdown,
            state: RefCell::new(UiState::default()),
            snapshot: RefCell::new(None),
        }
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.state.borrow().is_paused()
    }

    #[must_use]
    pub fn is_remote_gpio(&self) -> bool {
        self.state.borrow().is_remote_gpio()
    }

    #[must_use]
    pub fn panel(&self, name: &str) -> Panel {
        self.state.borrow().panel(name)
    }

    /// Number of countdown handles currently tracked.
    #[must_use]
    pub fn active_timers(&self) -> usize {
        self.state.borrow().active_timers()
    }

    /// Seed the remote-GPIO flag, draw the header and ask for the first update.
    #[tracing::instrument(skip(self))]
    pub async fn start(&self) {
        match self.api.get_settings().await {
            Ok(settings) => self.state.borrow_mut().set_remote_gpio(settings.is_remote_gpio()),
            Err(err) => tracing::warn!(error = %err, "failed to load settings at startup"),
        }
        self.show_header();
        self.channel.request_update();
    }

    /// Consume one `sensor_update`.
    ///
    /// A re-request is emitted for every update. While paused the update is
    /// dropped and nothing is re-rendered.
    pub fn handle_sensor_update(&self, snapshot: SensorSnapshot) {
        self.channel.request_update();
        let view = {
            let mut state = self.state.borrow_mut();
            if state.is_paused() {
                tracing::debug!(sensors = snapshot.sensors.len(), "update dropped while paused");
                return;
            }
            state.forget_missing(&snapshot);
            render(&snapshot, &state)
        };
        *self.snapshot.borrow_mut() = Some(snapshot);
        self.presenter.show_sensors(view);
    }

    pub fn enter_edit(&self, name: &str) {
        self.apply(name, PanelAction::Edit);
    }

    pub fn cancel_edit(&self, name: &str) {
        self.apply(name, PanelAction::CancelEdit);
    }

    /// Return the card to its view and send the edited fields.
    ///
    /// A successful update triggers a refresh; a failed one is only logged.
    #[tracing::instrument(skip(self, form))]
    pub async fn save_sensor(&self, name: &str, form: SensorForm) {
        if self.apply(name, PanelAction::Save).is_none() {
            return;
        }
        match self.api.update_sensor(form.into_update(name)).await {
            Ok(()) => self.channel.request_update(),
            Err(err) => tracing::warn!(error = %err, "sensor update failed"),
        }
    }

    pub fn show_delete_confirmation(&self, name: &str) {
        self.apply(name, PanelAction::RequestDelete);
    }

    pub fn cancel_delete(&self, name: &str) {
        self.apply(name, PanelAction::CancelDelete);
    }

    /// Confirm the delete and start the undo countdown.
    #[tracing::instrument(skip(self))]
    pub async fn start_countdown(&self, name: &str) {
        match self.apply(name, PanelAction::ConfirmDelete(self.countdown.seconds)) {
            Some(Panel::UndoCountdown { .. }) => {
                let handle = self.scheduler.start(name, self.countdown.tick());
                self.state.borrow_mut().arm_timer(name, handle);
            }
            Some(Panel::Deleted) => self.finalize_delete(name).await,
            _ => {}
        }
    }

    /// One countdown tick for `name`. Ticks without a running countdown are
    /// ignored.
    #[tracing::instrument(skip(self))]
    pub async fn tick(&self, name: &str) {
        if !self.state.borrow().has_timer(name) {
            tracing::debug!("stale countdown tick ignored");
            return;
        }
        match self.apply(name, PanelAction::Tick) {
            Some(Panel::Deleted) => {
                self.state.borrow_mut().disarm_timer(name);
                self.finalize_delete(name).await;
            }
            Some(_) => {}
            None => {
                self.state.borrow_mut().disarm_timer(name);
            }
        }
    }

    /// Cancel the countdown and return to the edit form.
    pub fn undo(&self, name: &str) {
        if self.apply(name, PanelAction::Undo).is_some() {
            self.state.borrow_mut().disarm_timer(name);
        }
    }

    /// Send the delete request for a card whose countdown expired.
    ///
    /// Success reloads the page; failure alerts and returns the card to its
    /// edit form.
    #[tracing::instrument(skip(self))]
    pub async fn finalize_delete(&self, name: &str) {
        if self.panel(name) != Panel::Deleted {
            tracing::warn!("delete requested without an expired countdown");
            return;
        }
        tracing::info!("deleting sensor");
        match self.api.delete_sensor(name).await {
            Ok(()) => {
                self.channel.request_update();
                self.presenter.reload();
            }
            Err(err) => {
                tracing::warn!(error = %err, "sensor delete failed");
                self.presenter.alert(DELETE_FAILED_MESSAGE);
                self.apply(name, PanelAction::DeleteFailed);
            }
        }
    }

    pub fn open_log(&self, name: &str) {
        self.apply(name, PanelAction::OpenLog);
    }

    pub fn close_log(&self, name: &str) {
        self.apply(name, PanelAction::CloseLog);
    }

    /// Fetch the readings history of `name` into its open log panel.
    #[tracing::instrument(skip(self))]
    pub async fn refresh_log(&self, name: &str) {
        let log = match self.api.get_sensor_log(name).await {
            Ok(readings) => FetchedLog::Readings(readings),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load sensor log");
                FetchedLog::Failed
            }
        };
        {
            let mut state = self.state.borrow_mut();
            if state.panel(name) != Panel::Log {
                tracing::debug!("log closed before refresh completed");
                return;
            }
            state.set_fetched_log(name, log);
        }
        self.refresh_card(name);
    }

    /// Open the settings panel and fill it from the backend.
    #[tracing::instrument(skip(self))]
    pub async fn open_settings(&self) {
        self.presenter.show_overlay(Some(Overlay::Settings));
        self.presenter.show_settings(SettingsView::Loading);
        let view = match self.settings().await {
            Ok(form) => SettingsView::Form(form),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load settings");
                SettingsView::Unavailable
            }
        };
        self.presenter.show_settings(view);
    }

    /// Current settings as form fields; missing fields are empty.
    ///
    /// # Errors
    ///
    /// Propagates the backend failure.
    pub async fn settings(&self) -> Result<SettingsForm, ApiError> {
        let settings = self.api.get_settings().await?;
        Ok(SettingsForm::from(&settings))
    }

    /// Save every settings field and adopt the submitted remote-GPIO mode.
    ///
    /// The panel closes and the cards follow the new mode whether or not the
    /// request succeeds; a failure is only logged.
    #[tracing::instrument(skip(self, form), fields(remote_gpio = form.remote_gpio))]
    pub async fn save_settings(&self, form: SettingsForm) {
        self.state.borrow_mut().set_remote_gpio(form.remote_gpio);
        self.show_header();
        self.refresh_all_cards();
        self.presenter.show_overlay(None);
        match self.api.update_settings(form.to_update()).await {
            Ok(()) => self.channel.request_update(),
            Err(err) => tracing::warn!(error = %err, "settings update failed"),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn open_log_file(&self) {
        self.presenter.show_overlay(Some(Overlay::LogFile));
        self.refresh_log_file().await;
    }

    #[tracing::instrument(skip(self))]
    pub async fn refresh_log_file(&self) {
        self.presenter.show_log_file(LogFileView::Loading);
        let view = match self.api.get_log_file().await {
            Ok(lines) => render_log_file(&lines),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load log file");
                LogFileView::Failed
            }
        };
        self.presenter.show_log_file(view);
    }

    #[tracing::instrument(skip(self))]
    pub async fn open_about(&self) {
        self.presenter.show_overlay(Some(Overlay::About));
        self.presenter.show_about(AboutView::Loading);
        let view = match self.api.readme().await {
            Ok(text) => AboutView::Document {
                html: render_markdown(&text),
            },
            Err(err) => {
                tracing::warn!(error = %err, "failed to load readme");
                AboutView::Failed
            }
        };
        self.presenter.show_about(view);
    }

    pub fn open_restart(&self) {
        self.presenter.show_overlay(Some(Overlay::Restart));
        self.presenter.show_restart(RestartView::Confirm);
    }

    /// Ask the backend to restart and report the status of that call.
    #[tracing::instrument(skip(self))]
    pub async fn confirm_restart(&self) {
        tracing::info!("restart requested");
        self.presenter.show_restart(RestartView::InProgress);
        let view = match self.api.restart().await {
            Ok(status) if (200..300).contains(&status) => RestartView::Done,
            Ok(status) => RestartView::Failed { status },
            Err(err) => RestartView::Error {
                message: err.to_string(),
            },
        };
        self.presenter.show_restart(view);
    }

    /// Sensors can only be added in remote-GPIO mode.
    pub fn open_add_sensor(&self) {
        if !self.is_remote_gpio() {
            tracing::warn!("add sensor is only available with remote GPIO");
            return;
        }
        self.presenter.show_overlay(Some(Overlay::AddSensor));
    }

    #[tracing::instrument(skip(self, form), fields(name = %form.name))]
    pub async fn save_new_sensor(&self, form: SensorForm) {
        match self.api.add_sensor(form.into_new_sensor()).await {
            Ok(()) => {
                self.presenter.show_overlay(None);
                self.channel.request_update();
            }
            Err(err) => {
                tracing::warn!(error = %err, "sensor add failed");
                self.presenter.alert(&format!("Failed to add sensor: {err}"));
            }
        }
    }

    pub fn close_overlay(&self) {
        self.presenter.show_overlay(None);
    }

    /// Apply a panel action and redraw the card. Rejected actions are logged
    /// and leave everything as it was.
    fn apply(&self, name: &str, action: PanelAction) -> Option<Panel> {
        let result = self.state.borrow_mut().transition(name, action);
        match result {
            Ok(panel) => {
                self.refresh_card(name);
                Some(panel)
            }
            Err(err) => {
                tracing::warn!(sensor = name, error = %err, "panel transition rejected");
                None
            }
        }
    }

    fn refresh_card(&self, name: &str) {
        let card = {
            let snapshot = self.snapshot.borrow();
            let state = self.state.borrow();
            snapshot
                .as_ref()
                .and_then(|snapshot| snapshot.get(name))
                .map(|sensor| render_card(name, sensor, &state))
        };
        if let Some(card) = card {
            self.presenter.show_card(card);
        }
    }

    /// Re-push every card except open edit forms, which follow the header's
    /// remote-GPIO flag for their address field and keep what was typed.
    fn refresh_all_cards(&self) {
        let cards: Vec<_> = {
            let snapshot = self.snapshot.borrow();
            let state = self.state.borrow();
            snapshot
                .iter()
                .flat_map(|snapshot| snapshot.sensors.iter())
                .filter(|(name, _)| state.panel(name) != Panel::Edit)
                .map(|(name, sensor)| render_card(name, sensor, &state))
                .collect()
        };
        for card in cards {
            self.presenter.show_card(card);
        }
    }

    fn show_header(&self) {
        let header = render_header(&self.state.borrow());
        self.presenter.show_header(header);
    }
}
