//! Page header: GPIO mode badge, fleet totals, and the overlay buttons.

use energy_monitor_app::view::{FlowBadge, TotalsView};
use leptos::prelude::*;

use crate::controller::use_controller;
use crate::presenter::use_signals;

#[component]
pub fn Header() -> impl IntoView {
    let signals = use_signals();
    let ctl = use_controller();

    let gpio_badge = move || {
        if signals.header.get().remote_gpio {
            view! {
                <span class="gpio-badge gpio-remote" title="Remote GPIO">
                    <i class="fa-solid fa-wifi"></i>
                    " Remote GPIO"
                </span>
            }
            .into_any()
        } else {
            view! {
                <span class="gpio-badge gpio-local" title="Local GPIO">
                    <i class="fa-solid fa-microchip"></i>
                    " Local GPIO"
                </span>
            }
            .into_any()
        }
    };

    view! {
        <header class="dashboard-header">
            <h1>"Energy Monitor"</h1>
            {gpio_badge}
            {move || signals.totals.get().map(|totals| view! { <Totals totals/> })}
            <nav class="header-buttons">
                <Show when=move || signals.header.get().add_sensor_visible>
                    <button
                        class="icon-button"
                        title="Add sensor"
                        on:click=move |_| ctl.get().open_add_sensor()
                    >
                        <i class="fa-solid fa-plus"></i>
                    </button>
                </Show>
                <button
                    class="icon-button"
                    title="Log file"
                    on:click=move |_| ctl.spawn(|c| async move { c.open_log_file().await })
                >
                    <i class="fa-solid fa-file-lines"></i>
                </button>
                <button
                    class="icon-button"
                    title="Settings"
                    on:click=move |_| ctl.spawn(|c| async move { c.open_settings().await })
                >
                    <i class="fa-solid fa-gear"></i>
                </button>
                <button
                    class="icon-button"
                    title="About"
                    on:click=move |_| ctl.spawn(|c| async move { c.open_about().await })
                >
                    <i class="fa-solid fa-circle-info"></i>
                </button>
            </nav>
        </header>
    }
}

#[component]
fn Totals(totals: TotalsView) -> impl IntoView {
    let flow = match totals.flow {
        FlowBadge::Charging { watts } => view! {
            <span class="flow-badge flow-charging">
                <i class="fa-solid fa-arrow-down"></i>
                {format!(" Charging {watts}")}
            </span>
        }
        .into_any(),
        FlowBadge::Discharging { watts } => view! {
            <span class="flow-badge flow-discharging">
                <i class="fa-solid fa-arrow-up"></i>
                {format!(" Discharging {watts}")}
            </span>
        }
        .into_any(),
        FlowBadge::Idle => view! { <span class="flow-badge flow-idle">"Idle"</span> }.into_any(),
    };

    view! {
        <div class="totals">
            <span class="total-solar">
                <i class="fa-solid fa-solar-panel"></i>
                " "
                {totals.solar}
            </span>
            <span class="total-wind">
                <i class="fa-solid fa-wind"></i>
                " "
                {totals.wind}
            </span>
            <span class=format!("total-soc {}", totals.soc_class)>
                <i class="fa-solid fa-battery-half"></i>
                " "
                {totals.soc}
            </span>
            {flow}
        </div>
    }
}
