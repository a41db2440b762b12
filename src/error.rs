//! Errors raised by the lemonade state machine.

use thiserror::Error;

/// Errors that can occur while advancing or restoring the machine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LemonadeError {
    /// The state is not one the machine knows how to advance from.
    ///
    /// Carries the offending state name, which may not name any variant
    /// when it comes from persisted data.
    #[error("Invalid lemonade state ({state})")]
    InvalidState { state: String },

    /// The lemon tree produced a size outside the configured range.
    #[error("Lemon size {size} is outside the allowed range {min}..={max}")]
    InvalidLemonSize { size: i32, min: i32, max: i32 },
}

impl LemonadeError {
    pub(crate) fn invalid_state(state: impl Into<String>) -> Self {
        Self::InvalidState {
            state: state.into(),
        }
    }
}
