//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the view controller and the browser.
//! The controller runs on the browser's single event-loop thread, so none of
//! the returned futures are required to be `Send`.

pub mod backend;
pub mod channel;
pub mod presenter;
pub mod scheduler;

pub use backend::SensorApi;
pub use channel::UpdateChannel;
pub use presenter::Presenter;
pub use scheduler::{CountdownScheduler, TimerHandle};
