//! Panel: which face of a sensor card is showing.
//!
//! A card shows exactly one panel at a time. [`Panel::apply`] is the only way
//! to move between them; edges not in the table below are rejected.
//!
//! | From | Action | To |
//! |------|--------|----|
//! | View | `Edit` | Edit |
//! | View | `OpenLog` | Log |
//! | Edit | `CancelEdit`, `Save` | View |
//! | Edit | `RequestDelete` | `DeleteConfirm` |
//! | Log | `CloseLog` | View |
//! | `DeleteConfirm` | `CancelDelete` | Edit |
//! | `DeleteConfirm` | `ConfirmDelete(n)` | `UndoCountdown(n)` |
//! | `UndoCountdown(n)` | `Tick` | `UndoCountdown(n - 1)`, or Deleted at zero |
//! | `UndoCountdown` | `Undo` | Edit |
//! | Deleted | `DeleteFailed` | Edit |

use std::fmt;

use crate::error::TransitionError;

/// The visible face of a sensor card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    /// Live metrics, action icons and timestamp.
    #[default]
    View,
    Edit,
    /// Readings history.
    Log,
    DeleteConfirm,
    /// Grace period before the delete request goes out.
    UndoCountdown { remaining: u8 },
    /// Countdown expired; the card is hidden while the delete is in flight.
    Deleted,
}

/// Discriminant of [`Panel`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    View,
    Edit,
    Log,
    DeleteConfirm,
    UndoCountdown,
    Deleted,
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::Log => "log",
            Self::DeleteConfirm => "delete-confirm",
            Self::UndoCountdown => "undo-countdown",
            Self::Deleted => "deleted",
        })
    }
}

/// User or timer input that moves a card between panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    Edit,
    CancelEdit,
    Save,
    OpenLog,
    CloseLog,
    RequestDelete,
    CancelDelete,
    /// Start a countdown of the given number of seconds.
    ConfirmDelete(u8),
    Tick,
    Undo,
    DeleteFailed,
}

impl Panel {
    #[must_use]
    pub fn kind(self) -> PanelKind {
        match self {
            Self::View => PanelKind::View,
            Self::Edit => PanelKind::Edit,
            Self::Log => PanelKind::Log,
            Self::DeleteConfirm => PanelKind::DeleteConfirm,
            Self::UndoCountdown { .. } => PanelKind::UndoCountdown,
            Self::Deleted => PanelKind::Deleted,
        }
    }

    /// Compute the panel reached by `action`.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError`] when the current panel has no edge for
    /// `action`. The caller keeps the current panel in that case.
    pub fn apply(self, action: PanelAction) -> Result<Self, TransitionError> {
        use PanelAction as A;

        let next = match (self, action) {
            (Self::View, A::Edit)
            | (Self::DeleteConfirm, A::CancelDelete)
            | (Self::UndoCountdown { .. }, A::Undo)
            | (Self::Deleted, A::DeleteFailed) => Self::Edit,
            (Self::View, A::OpenLog) => Self::Log,
            (Self::Edit, A::CancelEdit | A::Save) | (Self::Log, A::CloseLog) => Self::View,
            (Self::Edit, A::RequestDelete) => Self::DeleteConfirm,
            (Self::DeleteConfirm, A::ConfirmDelete(seconds)) if seconds > 0 => {
                Self::UndoCountdown { remaining: seconds }
            }
            (Self::DeleteConfirm, A::ConfirmDelete(_)) => Self::Deleted,
            (Self::UndoCountdown { remaining }, A::Tick) => match remaining.saturating_sub(1) {
                0 => Self::Deleted,
                left => Self::UndoCountdown { remaining: left },
            },
            (from, action) => {
                return Err(TransitionError {
                    from: from.kind(),
                    action,
                });
            }
        };
        Ok(next)
    }

    /// Whether live updates should be suspended while this panel is showing.
    #[must_use]
    pub fn suspends_updates(self) -> bool {
        !matches!(self, Self::View)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(start: Panel, actions: &[PanelAction]) -> Result<Panel, TransitionError> {
        actions.iter().try_fold(start, |panel, &a| panel.apply(a))
    }

    #[test]
    fn should_enter_edit_from_view() {
        assert_eq!(Panel::View.apply(PanelAction::Edit), Ok(Panel::Edit));
    }

    #[test]
    fn should_return_to_view_when_edit_saved_or_cancelled() {
        assert_eq!(Panel::Edit.apply(PanelAction::Save), Ok(Panel::View));
        assert_eq!(Panel::Edit.apply(PanelAction::CancelEdit), Ok(Panel::View));
    }

    #[test]
    fn should_open_and_close_log_from_view() {
        assert_eq!(
            walk(Panel::View, &[PanelAction::OpenLog, PanelAction::CloseLog]),
            Ok(Panel::View)
        );
    }

    #[test]
    fn should_count_down_to_deleted() {
        let panel = walk(
            Panel::Edit,
            &[PanelAction::RequestDelete, PanelAction::ConfirmDelete(3)],
        )
        .unwrap();
        assert_eq!(panel, Panel::UndoCountdown { remaining: 3 });

        let panel = walk(panel, &[PanelAction::Tick, PanelAction::Tick]).unwrap();
        assert_eq!(panel, Panel::UndoCountdown { remaining: 1 });
        assert_eq!(panel.apply(PanelAction::Tick), Ok(Panel::Deleted));
    }

    #[test]
    fn should_return_to_edit_when_undo_during_countdown() {
        let panel = Panel::UndoCountdown { remaining: 4 };
        assert_eq!(panel.apply(PanelAction::Undo), Ok(Panel::Edit));
    }

    #[test]
    fn should_return_to_edit_when_delete_cancelled_or_failed() {
        assert_eq!(
            Panel::DeleteConfirm.apply(PanelAction::CancelDelete),
            Ok(Panel::Edit)
        );
        assert_eq!(Panel::Deleted.apply(PanelAction::DeleteFailed), Ok(Panel::Edit));
    }

    #[test]
    fn should_reject_delete_from_view() {
        let err = Panel::View.apply(PanelAction::RequestDelete).unwrap_err();
        assert_eq!(err.from, PanelKind::View);
        assert_eq!(err.action, PanelAction::RequestDelete);
    }

    #[test]
    fn should_reject_tick_outside_countdown() {
        assert!(Panel::Edit.apply(PanelAction::Tick).is_err());
        assert!(Panel::Deleted.apply(PanelAction::Tick).is_err());
    }

    #[test]
    fn should_reject_undo_after_countdown_expired() {
        assert!(Panel::Deleted.apply(PanelAction::Undo).is_err());
    }

    #[test]
    fn should_reject_opening_log_while_editing() {
        assert!(Panel::Edit.apply(PanelAction::OpenLog).is_err());
    }

    #[test]
    fn should_only_keep_updates_running_in_view() {
        assert!(!Panel::View.suspends_updates());
        assert!(Panel::Edit.suspends_updates());
        assert!(Panel::Log.suspends_updates());
    }
}
