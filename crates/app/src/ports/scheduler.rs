//! Countdown scheduler port: repeating ticks for the delete grace period.

use std::time::Duration;

/// A running repeating timer.
pub trait TimerHandle {
    /// Stop the timer. No tick is delivered after this returns.
    fn cancel(self);
}

/// Starts repeating timers that deliver a tick for a sensor name.
///
/// The adapter routes every tick back to
/// [`ViewController::tick`](crate::controller::ViewController::tick) with the
/// name the timer was started for.
pub trait CountdownScheduler {
    type Handle: TimerHandle;

    /// Start ticking every `period` for `name` until the handle is cancelled.
    fn start(&self, name: &str, period: Duration) -> Self::Handle;
}
