//! Delete countdowns on `setInterval`.

use std::time::Duration;

use energy_monitor_app::ports::{CountdownScheduler, TimerHandle};
use futures::channel::mpsc::UnboundedSender;
use gloo_timers::callback::Interval;

/// Starts one browser interval per countdown. Each tick pushes the sensor
/// name onto a queue that the tick loop in [`crate::App`] drains in order.
#[derive(Debug, Clone)]
pub struct IntervalScheduler {
    ticks: UnboundedSender<String>,
}

impl IntervalScheduler {
    #[must_use]
    pub fn new(ticks: UnboundedSender<String>) -> Self {
        Self { ticks }
    }
}

/// Clears its interval when cancelled.
pub struct IntervalHandle(Interval);

impl TimerHandle for IntervalHandle {
    fn cancel(self) {
        drop(self.0);
    }
}

impl CountdownScheduler for IntervalScheduler {
    type Handle = IntervalHandle;

    fn start(&self, name: &str, period: Duration) -> IntervalHandle {
        let ticks = self.ticks.clone();
        let name = name.to_string();
        let millis = u32::try_from(period.as_millis()).unwrap_or(u32::MAX);
        IntervalHandle(Interval::new(millis, move || {
            if ticks.unbounded_send(name.clone()).is_err() {
                tracing::warn!(sensor = %name, "countdown tick dropped, tick loop is gone");
            }
        }))
    }
}
