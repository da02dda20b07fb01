//! # energy-monitor-domain
//!
//! Pure domain model for the energy monitor dashboard.
//!
//! ## Responsibilities
//! - Define **Sensors** (solar, wind and battery monitors) and their **Readings**
//! - Define the ordered **Snapshot** delivered by every realtime update
//! - Define **Settings** (poll intervals, log/readings limits, MQTT, webserver, GPIO)
//! - Parse backend **log lines** into level and message
//! - Format and parse **i2c addresses**
//! - Own the per-card **panel state machine** and reject invalid transitions
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or browser APIs.

pub mod error;

pub mod address;
pub mod escape;
pub mod log_line;
pub mod panel;
pub mod scalar;
pub mod sensor;
pub mod settings;
