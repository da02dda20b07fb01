//! Browser front-end of the energy monitor: a Leptos CSR app wiring the
//! view controller to `fetch`, a Socket.IO WebSocket, browser intervals, and
//! signal-driven components.

use std::rc::Rc;

use energy_monitor_app::config::DashboardConfig;
use energy_monitor_app::controller::ViewController;
use energy_monitor_app::error::ConfigError;
use energy_monitor_app::ports::UpdateChannel;
use energy_monitor_domain::sensor::SensorSnapshot;
use futures::StreamExt;
use futures::channel::mpsc;
use leptos::prelude::*;
use leptos::task::spawn_local;

pub mod api;
mod components;
pub mod controller;
pub mod logging;
pub mod presenter;
pub mod scheduler;
pub mod socket;

use components::{
    AboutPanel, AddSensorPanel, Header, LogFilePanel, RestartPanel, SensorGrid, SettingsPanel,
};
use controller::ControllerHandle;
use presenter::{DashboardSignals, SignalPresenter};

const EMBEDDED_CONFIG: &str = include_str!("../dashboard.toml");

/// Load the embedded configuration with per-browser `localStorage` overrides.
///
/// # Errors
///
/// Returns an error when the result does not parse or validate.
pub fn load_config() -> Result<DashboardConfig, ConfigError> {
    DashboardConfig::load(EMBEDDED_CONFIG, stored_override)
}

fn stored_override(key: &str) -> Option<String> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(key).ok().flatten())
}

fn page_origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

/// Root application component.
#[component]
pub fn App(config: DashboardConfig) -> impl IntoView {
    let signals = DashboardSignals::new();
    let (tick_tx, mut tick_rx) = mpsc::unbounded::<String>();
    let (outbox_tx, outbox_rx) = mpsc::unbounded::<String>();

    let channel = socket::SocketChannel::new(outbox_tx, config.realtime.request_event.clone());
    let controller = Rc::new(ViewController::new(
        api::HttpSensorApi::new(config.api.clone()),
        channel.clone(),
        scheduler::IntervalScheduler::new(tick_tx),
        SignalPresenter::new(signals),
        config.countdown,
    ));
    let handle = ControllerHandle::new(Rc::clone(&controller));
    provide_context(signals);
    provide_context(handle);

    // Each tick runs on its own task so an expiring delete does not hold up
    // the countdowns of other cards.
    spawn_local(async move {
        while let Some(name) = tick_rx.next().await {
            handle.spawn(move |controller| async move { controller.tick(&name).await });
        }
    });

    let url = config.socket_url(&page_origin());
    tracing::info!(%url, api = %config.api.url("/"), "starting dashboard");
    let updating = Rc::clone(&controller);
    spawn_local(socket::run(
        url,
        config.realtime.clone(),
        outbox_rx,
        move |payload| match serde_json::from_value::<SensorSnapshot>(payload) {
            Ok(snapshot) => updating.handle_sensor_update(snapshot),
            Err(err) => {
                tracing::warn!(error = %err, "malformed sensor update");
                channel.request_update();
            }
        },
    ));

    handle.spawn(|controller| async move { controller.start().await });

    view! {
        <Header/>
        <main>
            <SensorGrid/>
        </main>
        <SettingsPanel/>
        <LogFilePanel/>
        <AboutPanel/>
        <RestartPanel/>
        <AddSensorPanel/>
    }
}
