//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - The scheduler's frame index is the only clock
//! - Seeded RNG only, injected by the caller
//! - Obstacles kept sorted by position
//! - No rendering or platform dependencies

pub mod collision;
pub mod kinematics;
pub mod obstacles;
pub mod scoring;
pub mod state;
pub mod tick;
pub mod view;

pub use collision::{Collision, collide_ground, in_pipe, in_pipe_gap};
pub use kinematics::translate;
pub use scoring::{Medal, derived_score};
pub use state::{GameState, LandTile, Mode, Pipe};
pub use tick::{StepError, TickInput, jump, tick};
