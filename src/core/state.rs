//! The four lemonade states and what each one shows.
//!
//! States are plain values with pure methods. Rendering is left to the
//! caller; a [`Scene`] only names the text and image to show.

use crate::error::LemonadeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Position of the machine in the lemonade cycle.
///
/// The cycle is `Select -> Squeeze (repeated) -> Drink -> Restart -> Select`.
///
/// # Example
///
/// ```rust
/// use lemonade::core::LemonadeState;
///
/// let state: LemonadeState = "SQUEEZE".parse().unwrap();
/// assert_eq!(state, LemonadeState::Squeeze);
/// assert_eq!(state.name(), "SQUEEZE");
/// assert!("SPILL".parse::<LemonadeState>().is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LemonadeState {
    /// Pick a lemon from the tree.
    #[default]
    Select,
    /// Squeeze the picked lemon until it is juiced.
    Squeeze,
    /// Drink the lemonade.
    Drink,
    /// The glass is empty.
    Restart,
}

impl LemonadeState {
    /// All states in cycle order.
    pub const ALL: [LemonadeState; 4] = [Self::Select, Self::Squeeze, Self::Drink, Self::Restart];

    /// Stable name used for persistence and logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::Squeeze => "SQUEEZE",
            Self::Drink => "DRINK",
            Self::Restart => "RESTART",
        }
    }

    /// Text and image for this state.
    pub fn describe(&self) -> Scene {
        let (text, image) = match self {
            Self::Select => ("Click to select a lemon!", ImageId::LemonTree),
            Self::Squeeze => ("Click to juice the lemon!", ImageId::LemonSqueeze),
            Self::Drink => ("Click to drink your lemonade!", ImageId::LemonDrink),
            Self::Restart => ("Click to start again!", ImageId::LemonRestart),
        };
        Scene { text, image }
    }
}

impl fmt::Display for LemonadeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LemonadeState {
    type Err = LemonadeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.name() == s)
            .ok_or_else(|| LemonadeError::invalid_state(s))
    }
}

/// Describe a state given only its persisted name.
///
/// Fails with [`LemonadeError::InvalidState`] for names outside the cycle.
pub fn describe_named(name: &str) -> Result<Scene, LemonadeError> {
    Ok(name.parse::<LemonadeState>()?.describe())
}

/// Identifier of the picture shown for a state.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageId {
    LemonTree,
    LemonSqueeze,
    LemonDrink,
    LemonRestart,
}

impl ImageId {
    /// Resource name of the picture.
    ///
    /// ```rust
    /// use lemonade::core::ImageId;
    ///
    /// assert_eq!(ImageId::LemonSqueeze.as_str(), "lemon_squeeze");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LemonTree => "lemon_tree",
            Self::LemonSqueeze => "lemon_squeeze",
            Self::LemonDrink => "lemon_drink",
            Self::LemonRestart => "lemon_restart",
        }
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display text and image for one state.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Scene {
    pub text: &'static str,
    pub image: ImageId,
}
