//! Machine configuration.
//!
//! Validation accumulates every violation instead of stopping at the first.

use crate::core::{MAX_LEMON_SIZE, MIN_LEMON_SIZE};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Settings for a [`LemonadeMachine`](crate::LemonadeMachine).
///
/// # Example
///
/// ```rust
/// use lemonade::LemonadeConfig;
///
/// let config = LemonadeConfig::from_json(r#"{ "max_lemon_size": 6 }"#).unwrap();
/// assert_eq!(config.lemon_sizes(), 2..=6);
/// assert!(config.record_history);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LemonadeConfig {
    /// Fewest squeezes a lemon may need
    pub min_lemon_size: i32,
    /// Most squeezes a lemon may need
    pub max_lemon_size: i32,
    /// Whether taps are recorded in the machine's history
    pub record_history: bool,
    /// Most taps kept in the history; older taps are dropped first
    pub max_history: usize,
}

/// Taps kept in the history unless configured otherwise.
pub const DEFAULT_MAX_HISTORY: usize = 1000;

impl Default for LemonadeConfig {
    fn default() -> Self {
        Self {
            min_lemon_size: MIN_LEMON_SIZE,
            max_lemon_size: MAX_LEMON_SIZE,
            record_history: true,
            max_history: DEFAULT_MAX_HISTORY,
        }
    }
}

/// A single configuration problem.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("min_lemon_size must be at least 1 (got {0})")]
    MinTooSmall(i32),

    #[error("max_lemon_size ({max}) is below min_lemon_size ({min})")]
    EmptyRange { min: i32, max: i32 },

    #[error("max_history must be at least 1 when record_history is on")]
    NoHistoryRoom,
}

/// Errors from loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config parse failed: {0}")]
    Parse(String),

    #[error("Invalid config: {}", format_violations(.0))]
    Invalid(Vec<ConfigViolation>),
}

fn format_violations(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl LemonadeConfig {
    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validated()
    }

    /// Inclusive range of lemon sizes.
    pub fn lemon_sizes(&self) -> RangeInclusive<i32> {
        self.min_lemon_size..=self.max_lemon_size
    }

    /// Check every rule, collecting all violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ConfigViolation>>> = Vec::new();

        checks.push(if self.min_lemon_size < 1 {
            Validation::fail(ConfigViolation::MinTooSmall(self.min_lemon_size))
        } else {
            Validation::success(())
        });

        checks.push(if self.max_lemon_size < self.min_lemon_size {
            Validation::fail(ConfigViolation::EmptyRange {
                min: self.min_lemon_size,
                max: self.max_lemon_size,
            })
        } else {
            Validation::success(())
        });

        checks.push(if self.record_history && self.max_history == 0 {
            Validation::fail(ConfigViolation::NoHistoryRoom)
        } else {
            Validation::success(())
        });

        Validation::all_vec(checks).map(|_| ())
    }

    /// Consume the config if it is valid.
    pub fn validated(self) -> Result<Self, ConfigError> {
        match self.validate() {
            Validation::Success(_) => Ok(self),
            Validation::Failure(errors) => {
                Err(ConfigError::Invalid(errors.iter().cloned().collect()))
            }
        }
    }
}
