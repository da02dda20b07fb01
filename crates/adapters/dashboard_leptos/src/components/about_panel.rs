//! About overlay showing the rendered README.

use energy_monitor_app::view::{AboutView, Overlay, README_FAILED_MESSAGE};
use leptos::prelude::*;

use super::{Loading, OverlayFrame};
use crate::controller::use_controller;
use crate::presenter::use_signals;

#[component]
pub fn AboutPanel() -> impl IntoView {
    let signals = use_signals();
    let ctl = use_controller();
    view! {
        <OverlayFrame kind=Overlay::About title="About">
            {move || match signals.about.get() {
                AboutView::Loading => view! { <Loading/> }.into_any(),
                AboutView::Document { html } => {
                    view! { <div class="about-content" inner_html=html></div> }.into_any()
                }
                AboutView::Failed => view! { <p class="error">{README_FAILED_MESSAGE}</p> }.into_any(),
            }}
            <div class="overlay-buttons">
                <button on:click=move |_| ctl.get().close_overlay()>"Close"</button>
            </div>
        </OverlayFrame>
    }
}
