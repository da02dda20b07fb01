//! UI session state owned by the view controller.

use std::collections::HashMap;

use energy_monitor_domain::error::TransitionError;
use energy_monitor_domain::panel::{Panel, PanelAction};
use energy_monitor_domain::sensor::{Reading, SensorSnapshot};

use crate::ports::TimerHandle;

/// Readings fetched by a per-sensor log refresh, shown instead of the
/// history carried by the last update.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchedLog {
    Readings(Vec<Reading>),
    Failed,
}

/// Session state: cached remote-GPIO mode, the visible panel of every card
/// and the running undo countdowns.
///
/// Cards not present in `panels` show [`Panel::View`]. Updates are paused
/// while any card shows a panel that suspends them.
#[derive(Debug)]
pub struct UiState<H> {
    remote_gpio: bool,
    panels: HashMap<String, Panel>,
    undo_timers: HashMap<String, H>,
    fetched_logs: HashMap<String, FetchedLog>,
}

impl<H> Default for UiState<H> {
    fn default() -> Self {
        Self {
            remote_gpio: false,
            panels: HashMap::new(),
            undo_timers: HashMap::new(),
            fetched_logs: HashMap::new(),
        }
    }
}

impl<H: TimerHandle> UiState<H> {
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.panels.values().any(|panel| panel.suspends_updates())
    }

    #[must_use]
    pub fn is_remote_gpio(&self) -> bool {
        self.remote_gpio
    }

    pub fn set_remote_gpio(&mut self, remote_gpio: bool) {
        self.remote_gpio = remote_gpio;
    }

    /// Visible panel of `name`.
    #[must_use]
    pub fn panel(&self, name: &str) -> Panel {
        self.panels.get(name).copied().unwrap_or_default()
    }

    /// Apply `action` to the card `name`.
    ///
    /// # Errors
    ///
    /// Returns the rejected transition; the panel is left unchanged.
    pub fn transition(&mut self, name: &str, action: PanelAction) -> Result<Panel, TransitionError> {
        let next = self.panel(name).apply(action)?;
        if next == Panel::View {
            self.panels.remove(name);
            self.fetched_logs.remove(name);
        } else {
            self.panels.insert(name.to_string(), next);
        }
        Ok(next)
    }

    /// Track the countdown of `name`, cancelling the one it replaces.
    pub fn arm_timer(&mut self, name: &str, handle: H) {
        if let Some(previous) = self.undo_timers.insert(name.to_string(), handle) {
            previous.cancel();
        }
    }

    /// Cancel and forget the countdown of `name`. Returns whether one was running.
    pub fn disarm_timer(&mut self, name: &str) -> bool {
        match self.undo_timers.remove(name) {
            Some(handle) => {
                handle.cancel();
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn has_timer(&self, name: &str) -> bool {
        self.undo_timers.contains_key(name)
    }

    #[must_use]
    pub fn active_timers(&self) -> usize {
        self.undo_timers.len()
    }

    pub fn set_fetched_log(&mut self, name: &str, log: FetchedLog) {
        self.fetched_logs.insert(name.to_string(), log);
    }

    #[must_use]
    pub fn fetched_log(&self, name: &str) -> Option<&FetchedLog> {
        self.fetched_logs.get(name)
    }

    /// Drop panel state of cards that the latest update no longer carries.
    /// Cards with a running countdown or an in-flight delete are kept.
    pub fn forget_missing(&mut self, snapshot: &SensorSnapshot) {
        self.panels.retain(|name, panel| {
            snapshot.contains(name)
                || matches!(panel, Panel::UndoCountdown { .. } | Panel::Deleted)
        });
        self.fetched_logs.retain(|name, _| snapshot.contains(name));
    }
}
