//! Checkpoint and resume for the lemonade machine.
//!
//! A [`Checkpoint`] wraps the machine's flat [`SavedState`] in a versioned
//! envelope with its tap history. Checkpoints encode as JSON for
//! readability or bincode for compactness.

use crate::core::{LemonTree, TapHistory};
use crate::machine::LemonadeMachine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;
mod saved;

pub use error::CheckpointError;
pub use saved::{SavedState, StateViolation, NO_LEMON};

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable checkpoint of a lemonade machine.
/// Does NOT include the lemon tree or config.
///
/// # Example
///
/// ```rust
/// use lemonade::checkpoint::Checkpoint;
/// use lemonade::core::{FixedLemonTree, LemonadeState};
/// use lemonade::LemonadeMachine;
///
/// let mut machine = LemonadeMachine::new(FixedLemonTree::always(3));
/// machine.advance().unwrap();
///
/// let bytes = Checkpoint::capture(&machine).to_binary().unwrap();
///
/// let mut resumed = LemonadeMachine::new(FixedLemonTree::always(3));
/// Checkpoint::from_binary(&bytes).unwrap().resume(&mut resumed).unwrap();
/// assert_eq!(resumed.state(), LemonadeState::Squeeze);
/// assert_eq!(resumed.lemon_size(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// The machine's fields
    pub saved: SavedState,

    /// Taps made before the checkpoint
    pub history: TapHistory,
}

impl Checkpoint {
    /// Capture the machine's current fields and history.
    pub fn capture<T: LemonTree>(machine: &LemonadeMachine<T>) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            saved: machine.save(),
            history: machine.history().clone(),
        }
    }

    /// Restore the machine from this checkpoint, history included.
    pub fn resume<T: LemonTree>(
        &self,
        machine: &mut LemonadeMachine<T>,
    ) -> Result<(), CheckpointError> {
        machine.restore_with_history(&self.saved, self.history.clone())?;
        tracing::info!(id = %self.id, "resumed from checkpoint");
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()
    }

    fn check_version(self) -> Result<Self, CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(self)
    }
}
