//! Tap history tracking.
//!
//! Every successful tap is recorded as an immutable [`Tap`]. Recording
//! returns a new history and leaves the old one untouched.

use super::state::LemonadeState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single tap.
///
/// Counters are the values after the tap was applied.
///
/// # Example
///
/// ```rust
/// use lemonade::core::{LemonadeState, Tap};
/// use chrono::Utc;
///
/// let tap = Tap {
///     from: LemonadeState::Select,
///     to: LemonadeState::Squeeze,
///     lemon_size: 3,
///     squeeze_count: 0,
///     timestamp: Utc::now(),
/// };
/// assert!(tap.changed_state());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tap {
    /// State before the tap
    pub from: LemonadeState,
    /// State after the tap
    pub to: LemonadeState,
    /// Remaining squeezes after the tap
    pub lemon_size: i32,
    /// Squeezes so far after the tap
    pub squeeze_count: i32,
    /// When the tap happened
    pub timestamp: DateTime<Utc>,
}

impl Tap {
    /// Whether the tap moved the machine to a different state.
    pub fn changed_state(&self) -> bool {
        self.from != self.to
    }
}

/// Ordered history of taps.
///
/// # Example
///
/// ```rust
/// use lemonade::core::{LemonadeState, Tap, TapHistory};
/// use chrono::Utc;
///
/// let history = TapHistory::new().record(Tap {
///     from: LemonadeState::Drink,
///     to: LemonadeState::Restart,
///     lemon_size: -1,
///     squeeze_count: -1,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.path(), vec![&LemonadeState::Drink, &LemonadeState::Restart]);
/// assert_eq!(history.glasses_drunk(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TapHistory {
    taps: VecDeque<Tap>,
}

impl TapHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self {
            taps: VecDeque::new(),
        }
    }

    /// Record a tap, returning a new history.
    ///
    /// The original history is left untouched.
    pub fn record(&self, tap: Tap) -> Self {
        let mut taps = self.taps.clone();
        taps.push_back(tap);
        Self { taps }
    }

    /// Append in place, dropping the oldest taps beyond `max_len`.
    pub(crate) fn push_bounded(&mut self, tap: Tap, max_len: usize) {
        self.taps.push_back(tap);
        while self.taps.len() > max_len {
            self.taps.pop_front();
        }
    }

    /// States visited: the first tap's `from`, then every `to`.
    pub fn path(&self) -> Vec<&LemonadeState> {
        let mut path = Vec::with_capacity(self.taps.len() + 1);
        if let Some(first) = self.taps.front() {
            path.push(&first.from);
        }
        path.extend(self.taps.iter().map(|tap| &tap.to));
        path
    }

    /// Time between the first and last tap, `None` when empty.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.taps.front()?, self.taps.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Number of glasses finished, counted as `Drink -> Restart` taps.
    pub fn glasses_drunk(&self) -> usize {
        self.taps
            .iter()
            .filter(|tap| tap.from == LemonadeState::Drink && tap.to == LemonadeState::Restart)
            .count()
    }

    /// All recorded taps, oldest first.
    ///
    /// ```rust
    /// use lemonade::core::{LemonadeState, Tap, TapHistory};
    /// use chrono::Utc;
    ///
    /// let history = TapHistory::new().record(Tap {
    ///     from: LemonadeState::Restart,
    ///     to: LemonadeState::Select,
    ///     lemon_size: -1,
    ///     squeeze_count: -1,
    ///     timestamp: Utc::now(),
    /// });
    /// assert_eq!(history.taps()[0].to, LemonadeState::Select);
    /// ```
    pub fn taps(&self) -> &VecDeque<Tap> {
        &self.taps
    }

    /// Number of recorded taps.
    pub fn len(&self) -> usize {
        self.taps.len()
    }

    /// Whether no tap has been recorded.
    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }
}
