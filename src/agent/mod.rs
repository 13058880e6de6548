//! Tabular Q-learning controller
//!
//! The agent is optional. When disabled it never reads the game state and
//! never touches its table.

pub mod learner;
pub mod table;

pub use learner::{Agent, observe};
pub use table::{Action, QEntry, QTable, StateKey};
