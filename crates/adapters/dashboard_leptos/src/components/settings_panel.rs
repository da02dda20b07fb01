//! Settings overlay.

use energy_monitor_app::forms::SettingsForm;
use energy_monitor_app::view::{Overlay, SETTINGS_FAILED_MESSAGE, SettingsView};
use leptos::prelude::*;

use super::{Loading, OverlayFrame};
use crate::controller::use_controller;
use crate::presenter::use_signals;

#[component]
pub fn SettingsPanel() -> impl IntoView {
    let signals = use_signals();
    let ctl = use_controller();
    view! {
        <OverlayFrame kind=Overlay::Settings title="Settings">
            {move || match signals.settings.get() {
                SettingsView::Loading => view! { <Loading/> }.into_any(),
                SettingsView::Unavailable => view! {
                    <p class="error">{SETTINGS_FAILED_MESSAGE}</p>
                    <div class="overlay-buttons">
                        <button on:click=move |_| ctl.get().close_overlay()>"Close"</button>
                    </div>
                }
                .into_any(),
                SettingsView::Form(form) => view! { <SettingsFields form/> }.into_any(),
            }}
        </OverlayFrame>
    }
}

#[component]
fn SettingsFields(form: SettingsForm) -> impl IntoView {
    let ctl = use_controller();

    let solar_interval = RwSignal::new(form.solar_interval);
    let wind_interval = RwSignal::new(form.wind_interval);
    let battery_interval = RwSignal::new(form.battery_interval);
    let max_log = RwSignal::new(form.max_log);
    let max_readings = RwSignal::new(form.max_readings);
    let mqtt_broker = RwSignal::new(form.mqtt_broker);
    let mqtt_port = RwSignal::new(form.mqtt_port);
    let webserver_host = RwSignal::new(form.webserver_host);
    let webserver_port = RwSignal::new(form.webserver_port);
    let remote_gpio = RwSignal::new(form.remote_gpio);
    let gpio_address = RwSignal::new(form.gpio_address);

    let save = move |_| {
        let form = SettingsForm {
            solar_interval: solar_interval.get_untracked(),
            wind_interval: wind_interval.get_untracked(),
            battery_interval: battery_interval.get_untracked(),
            max_log: max_log.get_untracked(),
            max_readings: max_readings.get_untracked(),
            mqtt_broker: mqtt_broker.get_untracked(),
            mqtt_port: mqtt_port.get_untracked(),
            webserver_host: webserver_host.get_untracked(),
            webserver_port: webserver_port.get_untracked(),
            remote_gpio: remote_gpio.get_untracked(),
            gpio_address: gpio_address.get_untracked(),
        };
        ctl.spawn(move |c| async move { c.save_settings(form).await });
    };

    view! {
        <section class="settings-section">
            <h4>"Polling"</h4>
            <Field label="Solar Poll Interval (s):" kind="number" value=solar_interval/>
            <Field label="Wind Poll Interval (s):" kind="number" value=wind_interval/>
            <Field label="Battery Poll Interval (s):" kind="number" value=battery_interval/>
        </section>
        <section class="settings-section">
            <h4>"System"</h4>
            <Field label="Max Log Size (MB):" kind="number" value=max_log/>
            <Field label="Max Sensor Readings:" kind="number" value=max_readings/>
        </section>
        <section class="settings-section">
            <h4>"MQTT"</h4>
            <Field label="MQTT Broker Address:" kind="text" value=mqtt_broker/>
            <Field label="MQTT Broker Port:" kind="number" value=mqtt_port/>
        </section>
        <section class="settings-section">
            <h4>"Webserver"</h4>
            <Field label="Host Address:" kind="text" value=webserver_host/>
            <Field label="Port:" kind="text" value=webserver_port/>
        </section>
        <section class="settings-section">
            <h4>"GPIO"</h4>
            <label class="settings-entry">
                <span class="settings-label">"Remote GPIO:"</span>
                <input type="checkbox" bind:checked=remote_gpio/>
            </label>
            <label class="settings-entry">
                <span class="settings-label">"GPIO Address:"</span>
                <input
                    type="text"
                    bind:value=gpio_address
                    disabled=move || !remote_gpio.get()
                />
            </label>
        </section>
        <div class="overlay-buttons">
            <button class="restart-button" on:click=move |_| ctl.get().open_restart()>
                "Restart"
            </button>
            <button on:click=move |_| ctl.get().close_overlay()>"Cancel"</button>
            <button class="save-button" on:click=save>"Save"</button>
        </div>
    }
}

#[component]
fn Field(label: &'static str, kind: &'static str, value: RwSignal<String>) -> impl IntoView {
    view! {
        <label class="settings-entry">
            <span class="settings-label">{label}</span>
            <input type=kind bind:value=value/>
        </label>
    }
}
