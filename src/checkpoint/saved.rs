//! The flat record saved when the machine is put in the background.

use crate::core::LemonadeState;
use crate::error::LemonadeError;
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Counter value meaning "not squeezing".
pub const NO_LEMON: i32 = -1;

fn no_lemon() -> i32 {
    NO_LEMON
}

/// Saved machine fields, restored verbatim.
///
/// The state is kept as its raw name so that a corrupted record can still
/// be loaded and reported, rather than failing deep inside a decoder.
///
/// # Example
///
/// ```rust
/// use lemonade::checkpoint::SavedState;
/// use lemonade::core::LemonadeState;
///
/// let saved: SavedState = serde_json::from_str(r#"{ "LEMONADE_STATE": "DRINK" }"#).unwrap();
/// assert_eq!(saved.state(), Ok(LemonadeState::Drink));
/// assert_eq!(saved.lemon_size, -1);
/// assert_eq!(saved.squeeze_count, -1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedState {
    #[serde(rename = "LEMONADE_STATE")]
    pub lemonade_state: String,

    #[serde(rename = "LEMON_SIZE", default = "no_lemon")]
    pub lemon_size: i32,

    #[serde(rename = "SQUEEZE_COUNT", default = "no_lemon")]
    pub squeeze_count: i32,
}

impl SavedState {
    pub fn new(state: LemonadeState, lemon_size: i32, squeeze_count: i32) -> Self {
        Self {
            lemonade_state: state.name().to_string(),
            lemon_size,
            squeeze_count,
        }
    }

    /// Parse the saved state name.
    pub fn state(&self) -> Result<LemonadeState, LemonadeError> {
        self.lemonade_state.parse()
    }

    /// Report every inconsistency in the record.
    ///
    /// Restoring does not require a consistent record; this is for callers
    /// that want to inspect a record before trusting it.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<StateViolation>> {
        let state = match self.state() {
            Ok(state) => state,
            Err(_) => {
                return Validation::fail(StateViolation::UnknownState(
                    self.lemonade_state.clone(),
                ))
            }
        };

        let mut checks: Vec<Validation<(), NonEmptyVec<StateViolation>>> = Vec::new();

        if state == LemonadeState::Squeeze {
            checks.push(if self.lemon_size < 1 {
                Validation::fail(StateViolation::NothingToSqueeze(self.lemon_size))
            } else {
                Validation::success(())
            });
            checks.push(if self.squeeze_count < 0 {
                Validation::fail(StateViolation::NegativeSqueezeCount(self.squeeze_count))
            } else {
                Validation::success(())
            });
        } else {
            checks.push(if self.lemon_size != NO_LEMON {
                Validation::fail(StateViolation::StrayLemonSize {
                    state: state.name(),
                    value: self.lemon_size,
                })
            } else {
                Validation::success(())
            });
            checks.push(if self.squeeze_count != NO_LEMON {
                Validation::fail(StateViolation::StraySqueezeCount {
                    state: state.name(),
                    value: self.squeeze_count,
                })
            } else {
                Validation::success(())
            });
        }

        Validation::all_vec(checks).map(|_| ())
    }
}

/// A single inconsistency in a saved record.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StateViolation {
    #[error("Unknown lemonade state '{0}'")]
    UnknownState(String),

    #[error("SQUEEZE needs at least one squeeze left (lemon size {0})")]
    NothingToSqueeze(i32),

    #[error("SQUEEZE has a negative squeeze count ({0})")]
    NegativeSqueezeCount(i32),

    #[error("{state} should have no lemon size (got {value})")]
    StrayLemonSize { state: &'static str, value: i32 },

    #[error("{state} should have no squeeze count (got {value})")]
    StraySqueezeCount { state: &'static str, value: i32 },
}
