//! Lemonade: a tap-driven lemonade state machine.
//!
//! Each tap moves the machine through a four-state cycle:
//! pick a lemon, squeeze it a random number of times, drink the lemonade,
//! then start again with an empty glass.
//!
//! # Core Concepts
//!
//! - **State**: one of `Select`, `Squeeze`, `Drink`, `Restart`
//! - **Lemon tree**: injected source of lemon sizes, seedable for tests
//! - **History**: immutable record of every tap
//! - **Checkpoint**: versioned save/restore of the machine's flat record
//!
//! # Example
//!
//! ```rust
//! use lemonade::core::{LemonadeState, RandomLemonTree};
//! use lemonade::LemonadeMachine;
//!
//! let mut machine = LemonadeMachine::new(RandomLemonTree::seeded(5));
//!
//! machine.advance().unwrap();
//! let size = machine.lemon_size();
//! assert!((2..=4).contains(&size));
//!
//! for _ in 0..size {
//!     machine.advance().unwrap();
//! }
//! assert_eq!(machine.state(), LemonadeState::Drink);
//! assert_eq!(machine.scene().text, "Click to drink your lemonade!");
//! ```

pub mod checkpoint;
pub mod config;
pub mod core;
pub mod error;
pub mod machine;

pub use config::LemonadeConfig;
pub use self::core::{LemonTree, LemonadeState};
pub use error::LemonadeError;
pub use machine::LemonadeMachine;
