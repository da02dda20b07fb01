//! # energy-monitor-app
//!
//! Application layer: the dashboard's **view controller** and its **ports**.
//!
//! ## Responsibilities
//! - Define **port traits** the browser adapter implements:
//!   - `SensorApi`: the backend REST endpoints
//!   - `UpdateChannel`: outbound `sensor_update_request` on the realtime channel
//!   - `CountdownScheduler`: repeating one-second ticks for delete countdowns
//!   - `Presenter`: pushes view models to the page, alerts, reloads
//! - Own the **UI session state** (paused flag, card panels, countdown handles,
//!   cached remote-GPIO flag)
//! - Render snapshots into **view models** with pure functions
//! - Marshal form fields into backend requests
//! - Encode and decode the Socket.IO frames of the realtime channel
//! - Load the dashboard configuration
//!
//! ## Dependency rule
//! Depends on `energy-monitor-domain` only (plus serde/toml/markdown helpers).
//! Never touches browser APIs. Adapters depend on *this* crate, not the reverse.

pub mod config;
pub mod controller;
pub mod error;
pub mod forms;
pub mod markdown;
pub mod ports;
pub mod render;
pub mod socket_io;
pub mod ui_state;
pub mod view;
