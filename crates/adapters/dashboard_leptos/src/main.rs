use energy_monitor_app::config::DashboardConfig;
use energy_monitor_dashboard::{App, load_config, logging};
use leptos::prelude::*;

fn main() {
    let config = match load_config() {
        Ok(config) => {
            logging::install(&config.logging.filter);
            config
        }
        Err(err) => {
            let config = DashboardConfig::default();
            logging::install(&config.logging.filter);
            tracing::error!(error = %err, "invalid dashboard configuration, using defaults");
            config
        }
    };

    leptos::mount::mount_to_body(move || view! { <App config=config.clone()/> });
}
