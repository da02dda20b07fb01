//! Presenter backed by Leptos signals.
//!
//! The controller pushes view models; components read them from the
//! [`DashboardSignals`] in context. Cards get one signal each, keyed by
//! sensor name, so replacing one card leaves the others' DOM (and any text
//! typed into their forms) untouched.

use energy_monitor_app::ports::Presenter;
use energy_monitor_app::view::{
    AboutView, DashboardView, HeaderView, LogFileView, Overlay, RestartView, SensorCardView,
    SensorsBody, SettingsView, TotalsView,
};
use leptos::prelude::*;

/// One card signal, keyed by sensor name.
pub type CardSignal = (String, RwSignal<SensorCardView>);

/// Every piece of page state the controller can change.
#[derive(Debug, Clone, Copy)]
pub struct DashboardSignals {
    pub header: RwSignal<HeaderView>,
    pub totals: RwSignal<Option<TotalsView>>,
    /// No sensors in the last update.
    pub empty: RwSignal<bool>,
    pub cards: RwSignal<Vec<CardSignal>>,
    pub overlay: RwSignal<Option<Overlay>>,
    pub settings: RwSignal<SettingsView>,
    pub log_file: RwSignal<LogFileView>,
    pub about: RwSignal<AboutView>,
    pub restart: RwSignal<RestartView>,
}

impl DashboardSignals {
    #[must_use]
    pub fn new() -> Self {
        Self {
            header: RwSignal::new(HeaderView::default()),
            totals: RwSignal::new(None),
            empty: RwSignal::new(false),
            cards: RwSignal::new(Vec::new()),
            overlay: RwSignal::new(None),
            settings: RwSignal::new(SettingsView::Loading),
            log_file: RwSignal::new(LogFileView::Loading),
            about: RwSignal::new(AboutView::Loading),
            restart: RwSignal::new(RestartView::Confirm),
        }
    }
}

impl Default for DashboardSignals {
    fn default() -> Self {
        Self::new()
    }
}

/// Access the dashboard signals from Leptos context.
///
/// Must be called below [`crate::App`].
#[must_use]
pub fn use_signals() -> DashboardSignals {
    expect_context::<DashboardSignals>()
}

#[derive(Debug, Clone, Copy)]
pub struct SignalPresenter {
    signals: DashboardSignals,
}

impl SignalPresenter {
    #[must_use]
    pub fn new(signals: DashboardSignals) -> Self {
        Self { signals }
    }

    fn card_signal(&self, name: &str) -> Option<RwSignal<SensorCardView>> {
        self.signals.cards.with_untracked(|cards| {
            cards
                .iter()
                .find(|(card, _)| card == name)
                .map(|(_, signal)| *signal)
        })
    }
}

impl Presenter for SignalPresenter {
    fn show_header(&self, header: HeaderView) {
        self.signals.header.set(header);
    }

    fn show_sensors(&self, view: DashboardView) {
        self.signals.totals.set(view.totals);
        let cards = match view.body {
            SensorsBody::Empty => Vec::new(),
            SensorsBody::Cards(cards) => cards,
        };
        self.signals.empty.set(cards.is_empty());

        let mut previous = self.signals.cards.get_untracked();
        let next: Vec<CardSignal> = cards
            .into_iter()
            .map(|card| match previous.iter().position(|(name, _)| *name == card.name) {
                Some(index) => {
                    let (name, signal) = previous.swap_remove(index);
                    if signal.with_untracked(|current| *current != card) {
                        signal.set(card);
                    }
                    (name, signal)
                }
                None => (card.name.clone(), RwSignal::new(card)),
            })
            .collect();
        self.signals.cards.set(next);

        // Only after the list stopped referencing them.
        for (_, stale) in previous {
            stale.dispose();
        }
    }

    fn show_card(&self, card: SensorCardView) {
        match self.card_signal(&card.name) {
            Some(signal) => signal.set(card),
            None => tracing::debug!(sensor = %card.name, "no card on the page to replace"),
        }
    }

    fn show_overlay(&self, overlay: Option<Overlay>) {
        self.signals.overlay.set(overlay);
    }

    fn show_settings(&self, view: SettingsView) {
        self.signals.settings.set(view);
    }

    fn show_log_file(&self, view: LogFileView) {
        self.signals.log_file.set(view);
    }

    fn show_about(&self, view: AboutView) {
        self.signals.about.set(view);
    }

    fn show_restart(&self, view: RestartView) {
        self.signals.restart.set(view);
    }

    fn alert(&self, message: &str) {
        let Some(window) = web_sys::window() else {
            tracing::warn!(%message, "no window to alert in");
            return;
        };
        if let Err(err) = window.alert_with_message(message) {
            tracing::warn!(?err, %message, "alert failed");
        }
    }

    fn reload(&self) {
        let reloaded = web_sys::window().map(|window| window.location().reload());
        if !matches!(reloaded, Some(Ok(()))) {
            tracing::error!("page reload failed");
        }
    }
}
