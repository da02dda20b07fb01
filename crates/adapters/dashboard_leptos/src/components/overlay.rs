//! Modal frame shared by the settings, log file, about, restart and
//! add-sensor panels.

use energy_monitor_app::view::Overlay;
use leptos::prelude::*;

use crate::presenter::use_signals;

/// Renders `children` in a modal card while `kind` is the open overlay.
#[component]
pub fn OverlayFrame(
    kind: Overlay,
    /// Heading of the card.
    title: &'static str,
    children: ChildrenFn,
) -> impl IntoView {
    let signals = use_signals();
    view! {
        <Show when=move || signals.overlay.get() == Some(kind)>
            <div class="overlay-container">
                <div class="overlay-card">
                    <h3 class="overlay-title">{title}</h3>
                    {children()}
                </div>
            </div>
        </Show>
    }
}
