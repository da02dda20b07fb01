//! Common error types used across the workspace.
//!
//! Each concern defines its own typed error; [`DomainError`] gathers them
//! through `#[from]` conversions so callers can propagate with `?`.

use crate::panel::{PanelAction, PanelKind};

/// Top-level domain error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("invalid panel transition")]
    Transition(#[from] TransitionError),

    #[error("invalid i2c address")]
    Address(#[from] AddressError),
}

/// A card was asked to move along an edge the panel state machine does not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot apply {action:?} while the {from} panel is visible")]
pub struct TransitionError {
    /// Panel that was visible when the action arrived.
    pub from: PanelKind,
    /// The rejected action.
    pub action: PanelAction,
}

/// Address text that does not start with any hexadecimal digit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{input:?} is not a hexadecimal address")]
pub struct AddressError {
    pub input: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_describe_rejected_transition() {
        let err = TransitionError {
            from: PanelKind::View,
            action: PanelAction::Undo,
        };
        assert_eq!(err.to_string(), "cannot apply Undo while the view panel is visible");
    }

    #[test]
    fn should_wrap_address_error_via_from() {
        let err: DomainError = AddressError {
            input: "zz".to_string(),
        }
        .into();
        assert!(matches!(err, DomainError::Address(_)));
    }
}
