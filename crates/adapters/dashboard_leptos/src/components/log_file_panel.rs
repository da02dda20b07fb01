//! Backend log file overlay.

use energy_monitor_app::view::{LOGS_FAILED_MESSAGE, LogFileView, NO_LOG_DATA_MESSAGE, Overlay};
use leptos::prelude::*;

use super::{Loading, OverlayFrame};
use crate::controller::use_controller;
use crate::presenter::use_signals;

#[component]
pub fn LogFilePanel() -> impl IntoView {
    let signals = use_signals();
    let ctl = use_controller();

    // Lines arrive escaped and highlighted, so they go in as HTML.
    let lines = move || match signals.log_file.get() {
        LogFileView::Loading => view! { <Loading/> }.into_any(),
        LogFileView::Empty => view! { <p>{NO_LOG_DATA_MESSAGE}</p> }.into_any(),
        LogFileView::Failed => view! { <p class="error">{LOGS_FAILED_MESSAGE}</p> }.into_any(),
        LogFileView::Lines(lines) => lines
            .into_iter()
            .map(|line| view! { <div class="log-file-entry" inner_html=line></div> })
            .collect_view()
            .into_any(),
    };

    view! {
        <OverlayFrame kind=Overlay::LogFile title="Log File">
            <div class="log-file-content">{lines}</div>
            <div class="overlay-buttons">
                <button on:click=move |_| ctl.spawn(|c| async move { c.refresh_log_file().await })>
                    <i class="fa-solid fa-rotate-right"></i>
                    " Refresh"
                </button>
                <button on:click=move |_| ctl.get().close_overlay()>"Close"</button>
            </div>
        </OverlayFrame>
    }
}
