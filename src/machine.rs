//! The tap-driven lemonade machine.

use crate::checkpoint::{SavedState, NO_LEMON};
use crate::config::{ConfigError, LemonadeConfig};
use crate::core::{LemonTree, LemonadeState, RandomLemonTree, Scene, Tap, TapHistory};
use crate::error::LemonadeError;
use chrono::Utc;
use rand::rngs::StdRng;

/// Lemonade state machine.
///
/// Holds the current state, the squeezes left on the current lemon and the
/// squeezes made so far. Both counters are `-1` outside `Squeeze`.
///
/// # Example
///
/// ```rust
/// use lemonade::core::{FixedLemonTree, LemonadeState};
/// use lemonade::LemonadeMachine;
///
/// let mut machine = LemonadeMachine::new(FixedLemonTree::always(2));
///
/// assert_eq!(machine.advance().unwrap(), LemonadeState::Squeeze);
/// assert_eq!(machine.peek_squeeze_count(), Some(0));
/// machine.advance().unwrap();
/// assert_eq!(machine.advance().unwrap(), LemonadeState::Drink);
/// assert_eq!(machine.peek_squeeze_count(), None);
/// ```
pub struct LemonadeMachine<T: LemonTree> {
    state: LemonadeState,
    lemon_size: i32,
    squeeze_count: i32,
    tree: T,
    config: LemonadeConfig,
    history: TapHistory,
}

impl LemonadeMachine<RandomLemonTree<StdRng>> {
    /// Machine with an entropy-seeded tree and default settings.
    pub fn with_random_tree() -> Self {
        Self::new(RandomLemonTree::from_entropy())
    }

    /// Machine whose tree draws from the configured size range.
    pub fn from_config(config: LemonadeConfig, seed: Option<u64>) -> Result<Self, ConfigError> {
        let config = config.validated()?;
        let tree = match seed {
            Some(seed) => RandomLemonTree::seeded(seed),
            None => RandomLemonTree::from_entropy(),
        }
        .with_sizes(config.lemon_sizes());
        Ok(Self::with_config(tree, config))
    }
}

impl<T: LemonTree> LemonadeMachine<T> {
    /// Machine in `Select` with no lemon, using default settings.
    pub fn new(tree: T) -> Self {
        Self::with_config(tree, LemonadeConfig::default())
    }

    /// Machine in `Select` with no lemon.
    ///
    /// The config is trusted as given; picks outside its size range are
    /// rejected by [`advance`](Self::advance).
    pub fn with_config(tree: T, config: LemonadeConfig) -> Self {
        Self {
            state: LemonadeState::Select,
            lemon_size: NO_LEMON,
            squeeze_count: NO_LEMON,
            tree,
            config,
            history: TapHistory::new(),
        }
    }

    /// Current position in the cycle.
    pub fn state(&self) -> LemonadeState {
        self.state
    }

    /// Squeezes left on the current lemon, `-1` outside `Squeeze`.
    pub fn lemon_size(&self) -> i32 {
        self.lemon_size
    }

    /// Squeezes made on the current lemon, `-1` outside `Squeeze`.
    pub fn squeeze_count(&self) -> i32 {
        self.squeeze_count
    }

    /// Settings the machine was built with.
    pub fn config(&self) -> &LemonadeConfig {
        &self.config
    }

    /// Most recent taps, oldest first, at most `config().max_history` of them.
    pub fn history(&self) -> &TapHistory {
        &self.history
    }

    /// Text and image for the current state.
    pub fn scene(&self) -> Scene {
        self.state.describe()
    }

    /// Squeeze count, only while squeezing.
    pub fn peek_squeeze_count(&self) -> Option<i32> {
        (self.state == LemonadeState::Squeeze).then_some(self.squeeze_count)
    }

    /// Progress message shown while squeezing.
    pub fn squeeze_message(&self) -> Option<String> {
        self.peek_squeeze_count()
            .map(|count| format!("Squeeze count: {count}, keep tapping!"))
    }

    /// Apply one tap and return the new state.
    ///
    /// On error the machine is left unchanged.
    pub fn advance(&mut self) -> Result<LemonadeState, LemonadeError> {
        let from = self.state;
        let (state, lemon_size, squeeze_count) = match self.state {
            LemonadeState::Select => {
                let size = self.tree.pick();
                if !self.config.lemon_sizes().contains(&size) {
                    tracing::warn!(size, "lemon tree produced an out-of-range lemon");
                    return Err(LemonadeError::InvalidLemonSize {
                        size,
                        min: self.config.min_lemon_size,
                        max: self.config.max_lemon_size,
                    });
                }
                (LemonadeState::Squeeze, size, 0)
            }
            LemonadeState::Squeeze => {
                if self.lemon_size < 1 {
                    tracing::warn!(
                        lemon_size = self.lemon_size,
                        "cannot squeeze a lemon with no squeezes left"
                    );
                    return Err(LemonadeError::invalid_state(self.state.name()));
                }
                match self.lemon_size - 1 {
                    0 => (LemonadeState::Drink, NO_LEMON, NO_LEMON),
                    left => {
                        let Some(count) = self.squeeze_count.checked_add(1) else {
                            tracing::warn!(
                                squeeze_count = self.squeeze_count,
                                "squeeze count cannot grow any further"
                            );
                            return Err(LemonadeError::invalid_state(self.state.name()));
                        };
                        (LemonadeState::Squeeze, left, count)
                    }
                }
            }
            LemonadeState::Drink => (LemonadeState::Restart, self.lemon_size, self.squeeze_count),
            LemonadeState::Restart => (LemonadeState::Select, self.lemon_size, self.squeeze_count),
        };

        self.state = state;
        self.lemon_size = lemon_size;
        self.squeeze_count = squeeze_count;

        tracing::debug!(
            from = from.name(),
            to = state.name(),
            lemon_size,
            squeeze_count,
            "lemonade tap"
        );

        if self.config.record_history {
            self.history.push_bounded(
                Tap {
                    from,
                    to: state,
                    lemon_size,
                    squeeze_count,
                    timestamp: Utc::now(),
                },
                self.config.max_history,
            );
        }

        Ok(state)
    }

    /// Flat record of the machine's fields.
    pub fn save(&self) -> SavedState {
        SavedState::new(self.state, self.lemon_size, self.squeeze_count)
    }

    /// Restore fields verbatim from a saved record and clear the history.
    ///
    /// Fails only when the saved state name is unknown, leaving the machine
    /// unchanged.
    pub fn restore(&mut self, saved: &SavedState) -> Result<(), LemonadeError> {
        let state = saved.state()?;
        self.state = state;
        self.lemon_size = saved.lemon_size;
        self.squeeze_count = saved.squeeze_count;
        self.history = TapHistory::new();
        tracing::debug!(
            state = state.name(),
            lemon_size = saved.lemon_size,
            squeeze_count = saved.squeeze_count,
            "restored lemonade machine"
        );
        Ok(())
    }

    /// Restore and also replace the history.
    pub(crate) fn restore_with_history(
        &mut self,
        saved: &SavedState,
        history: TapHistory,
    ) -> Result<(), LemonadeError> {
        self.restore(saved)?;
        self.history = history;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FixedLemonTree, ImageId};

    fn machine(size: i32) -> LemonadeMachine<FixedLemonTree> {
        LemonadeMachine::new(FixedLemonTree::always(size))
    }

    fn snapshot<T: LemonTree>(m: &LemonadeMachine<T>) -> (LemonadeState, i32, i32) {
        (m.state(), m.lemon_size(), m.squeeze_count())
    }

    #[test]
    fn starts_in_select_without_lemon() {
        let m = machine(3);
        assert_eq!(snapshot(&m), (LemonadeState::Select, -1, -1));
        assert!(m.history().is_empty());
    }

    #[test]
    fn select_picks_a_lemon() {
        let mut m = machine(4);
        assert_eq!(m.advance(), Ok(LemonadeState::Squeeze));
        assert_eq!(snapshot(&m), (LemonadeState::Squeeze, 4, 0));
    }

    #[test]
    fn squeezing_a_three_lemon() {
        let mut m = machine(3);
        m.advance().unwrap();
        assert_eq!(snapshot(&m), (LemonadeState::Squeeze, 3, 0));
        m.advance().unwrap();
        assert_eq!(snapshot(&m), (LemonadeState::Squeeze, 2, 1));
        m.advance().unwrap();
        assert_eq!(snapshot(&m), (LemonadeState::Squeeze, 1, 2));
        m.advance().unwrap();
        assert_eq!(snapshot(&m), (LemonadeState::Drink, -1, -1));
    }

    #[test]
    fn drink_then_restart_then_select() {
        let mut m = machine(2);
        m.advance().unwrap();
        m.advance().unwrap();
        assert_eq!(m.advance(), Ok(LemonadeState::Drink));
        assert_eq!(m.advance(), Ok(LemonadeState::Restart));
        assert_eq!(snapshot(&m), (LemonadeState::Restart, -1, -1));
        assert_eq!(m.advance(), Ok(LemonadeState::Select));
        assert_eq!(snapshot(&m), (LemonadeState::Select, -1, -1));
    }

    #[test]
    fn peek_only_while_squeezing() {
        let mut m = machine(2);
        assert_eq!(m.peek_squeeze_count(), None);
        m.advance().unwrap();
        assert_eq!(m.peek_squeeze_count(), Some(0));
        m.advance().unwrap();
        assert_eq!(m.peek_squeeze_count(), Some(1));
        m.advance().unwrap();
        assert_eq!(m.peek_squeeze_count(), None);
    }

    #[test]
    fn squeeze_message_reports_count() {
        let mut m = machine(3);
        assert_eq!(m.squeeze_message(), None);
        m.advance().unwrap();
        m.advance().unwrap();
        assert_eq!(
            m.squeeze_message().as_deref(),
            Some("Squeeze count: 1, keep tapping!")
        );
    }

    #[test]
    fn scene_follows_state() {
        let mut m = machine(2);
        assert_eq!(m.scene().image, ImageId::LemonTree);
        m.advance().unwrap();
        assert_eq!(m.scene().image, ImageId::LemonSqueeze);
    }

    #[test]
    fn out_of_range_pick_is_rejected() {
        let mut m = machine(7);
        assert_eq!(
            m.advance(),
            Err(LemonadeError::InvalidLemonSize {
                size: 7,
                min: 2,
                max: 4
            })
        );
        assert_eq!(snapshot(&m), (LemonadeState::Select, -1, -1));
        assert!(m.history().is_empty());
    }

    #[test]
    fn squeeze_without_lemon_is_invalid() {
        let mut m = machine(2);
        m.restore(&SavedState::new(LemonadeState::Squeeze, -1, -1))
            .unwrap();
        assert_eq!(
            m.advance(),
            Err(LemonadeError::InvalidState {
                state: "SQUEEZE".to_string()
            })
        );
        assert_eq!(snapshot(&m), (LemonadeState::Squeeze, -1, -1));
    }

    #[test]
    fn save_and_restore_are_verbatim() {
        let mut m = machine(4);
        m.advance().unwrap();
        m.advance().unwrap();
        let saved = m.save();
        assert_eq!(saved, SavedState::new(LemonadeState::Squeeze, 3, 1));

        let mut other = machine(2);
        other.restore(&saved).unwrap();
        assert_eq!(snapshot(&other), (LemonadeState::Squeeze, 3, 1));
        assert!(other.history().is_empty());
    }

    #[test]
    fn restore_rejects_unknown_state() {
        let mut m = machine(2);
        m.advance().unwrap();
        let corrupt = SavedState {
            lemonade_state: "SPILL".to_string(),
            lemon_size: 1,
            squeeze_count: 1,
        };
        assert_eq!(
            m.restore(&corrupt),
            Err(LemonadeError::InvalidState {
                state: "SPILL".to_string()
            })
        );
        assert_eq!(snapshot(&m), (LemonadeState::Squeeze, 2, 0));
        assert_eq!(m.history().len(), 1);
    }

    #[test]
    fn history_records_full_cycle() {
        let mut m = machine(2);
        for _ in 0..5 {
            m.advance().unwrap();
        }
        assert_eq!(
            m.history().path(),
            vec![
                &LemonadeState::Select,
                &LemonadeState::Squeeze,
                &LemonadeState::Squeeze,
                &LemonadeState::Drink,
                &LemonadeState::Restart,
                &LemonadeState::Select,
            ]
        );
        assert_eq!(m.history().glasses_drunk(), 1);
    }

    #[test]
    fn squeeze_count_overflow_is_invalid() {
        let mut m = machine(2);
        m.restore(&SavedState::new(LemonadeState::Squeeze, 3, i32::MAX))
            .unwrap();
        assert_eq!(
            m.advance(),
            Err(LemonadeError::InvalidState {
                state: "SQUEEZE".to_string()
            })
        );
        assert_eq!(snapshot(&m), (LemonadeState::Squeeze, 3, i32::MAX));
        assert!(m.history().is_empty());
    }

    #[test]
    fn extreme_restored_counters_never_panic() {
        let extremes = [i32::MIN, -1, 0, 1, i32::MAX];
        for state in LemonadeState::ALL {
            for lemon_size in extremes {
                for squeeze_count in extremes {
                    let mut m = machine(2);
                    m.restore(&SavedState::new(state, lemon_size, squeeze_count))
                        .unwrap();
                    let _ = m.advance();
                }
            }
        }
    }

    #[test]
    fn last_squeeze_ignores_saturated_count() {
        let mut m = machine(2);
        m.restore(&SavedState::new(LemonadeState::Squeeze, 1, i32::MAX))
            .unwrap();
        assert_eq!(m.advance(), Ok(LemonadeState::Drink));
        assert_eq!(snapshot(&m), (LemonadeState::Drink, -1, -1));
    }

    #[test]
    fn history_is_capped_at_max_history() {
        let config = LemonadeConfig {
            max_history: 3,
            ..LemonadeConfig::default()
        };
        let mut m = LemonadeMachine::with_config(FixedLemonTree::always(2), config);
        for _ in 0..5 {
            m.advance().unwrap();
        }
        assert_eq!(m.config().max_history, 3);
        assert_eq!(
            m.history().path(),
            vec![
                &LemonadeState::Squeeze,
                &LemonadeState::Drink,
                &LemonadeState::Restart,
                &LemonadeState::Select,
            ]
        );
    }

    #[test]
    fn long_sessions_keep_history_bounded() {
        let mut m = machine(4);
        for _ in 0..20_000 {
            m.advance().unwrap();
        }
        assert_eq!(m.history().len(), m.config().max_history);
    }

    #[test]
    fn history_can_be_disabled() {
        let config = LemonadeConfig {
            record_history: false,
            ..LemonadeConfig::default()
        };
        let mut m = LemonadeMachine::with_config(FixedLemonTree::always(2), config);
        m.advance().unwrap();
        assert!(m.history().is_empty());
    }

    #[test]
    fn from_config_uses_configured_range() {
        let config = LemonadeConfig {
            min_lemon_size: 6,
            max_lemon_size: 6,
            ..LemonadeConfig::default()
        };
        let mut m = LemonadeMachine::from_config(config, Some(11)).unwrap();
        assert_eq!(m.config().lemon_sizes(), 6..=6);
        m.advance().unwrap();
        assert_eq!(m.lemon_size(), 6);
    }

    #[test]
    fn from_config_rejects_invalid_config() {
        let config = LemonadeConfig {
            min_lemon_size: 0,
            ..LemonadeConfig::default()
        };
        assert!(matches!(
            LemonadeMachine::from_config(config, None),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn random_machine_cycles() {
        let mut m = LemonadeMachine::with_random_tree();
        m.advance().unwrap();
        assert!((2..=4).contains(&m.lemon_size()));
    }
}
