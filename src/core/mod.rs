//! Core lemonade types.
//!
//! - States and the scene each one shows
//! - Lemon trees, the injected source of lemon sizes
//! - Immutable tap history
//!
//! Nothing in this module mutates shared state or performs I/O.

mod history;
mod state;
mod tree;

pub use history::{Tap, TapHistory};
pub use state::{describe_named, ImageId, LemonadeState, Scene};
pub use tree::{FixedLemonTree, LemonTree, RandomLemonTree, MAX_LEMON_SIZE, MIN_LEMON_SIZE};
