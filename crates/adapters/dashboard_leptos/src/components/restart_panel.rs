//! Restart confirmation overlay.

use energy_monitor_app::view::Overlay;
use leptos::prelude::*;

use super::OverlayFrame;
use crate::controller::use_controller;
use crate::presenter::use_signals;

#[component]
pub fn RestartPanel() -> impl IntoView {
    let signals = use_signals();
    let ctl = use_controller();

    let buttons = move || {
        if signals.restart.with(|r| r.awaits_confirmation()) {
            view! {
                <button on:click=move |_| ctl.get().close_overlay()>"Cancel"</button>
                <button
                    class="restart-button"
                    on:click=move |_| ctl.spawn(|c| async move { c.confirm_restart().await })
                >
                    "Restart"
                </button>
            }
            .into_any()
        } else {
            view! { <button on:click=move |_| ctl.get().close_overlay()>"Close"</button> }
                .into_any()
        }
    };

    view! {
        <OverlayFrame kind=Overlay::Restart title="Restart">
            <h5 class="restart-heading">{move || signals.restart.with(|r| r.heading())}</h5>
            <p class="restart-detail">{move || signals.restart.with(|r| r.detail())}</p>
            <div class="overlay-buttons">{buttons}</div>
        </OverlayFrame>
    }
}
