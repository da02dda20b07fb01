//! Spinner shown while an overlay waits for the backend.

use leptos::prelude::*;

#[component]
pub fn Loading(
    /// Text shown next to the spinner.
    #[prop(default = "Loading...", into)]
    message: &'static str,
) -> impl IntoView {
    view! {
        <p class="loading">
            <i class="fa-solid fa-spinner fa-spin"></i>
            " "
            {message}
        </p>
    }
}
