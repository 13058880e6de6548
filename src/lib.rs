//! Flappy QL - a side-scrolling pipe dodger with a learning pilot
//!
//! Core modules:
//! - `sim`: Deterministic frame simulation (kinematics, obstacles, collision, scoring, modes)
//! - `agent`: Tabular Q-learning controller that drives the same jump input as a player
//! - `game`: Owns state, agent and RNG streams; runs the ordered per-frame pipeline
//! - `tuning`: Data-driven physics and learning constants
//! - `platform`: Frame clock for native drivers
//! - `persistence`: Q-table export/import

pub mod agent;
pub mod game;
pub mod persistence;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use agent::{Action, Agent, QTable, StateKey};
pub use game::Game;
pub use tuning::{Tuning, TuningError};

/// Default game configuration constants
pub mod consts {
    /// Playfield dimensions
    pub const WIDTH: i32 = 288;
    pub const HEIGHT: i32 = 512;

    /// Horizontal scroll speed (pixels/frame, negative = leftward)
    pub const X_VEL: f64 = -4.0;
    /// Downward acceleration (pixels/frame²)
    pub const GRAVITY: f64 = 1.5;
    /// Vertical velocity right after a jump
    pub const JUMP_VEL: f64 = -14.0;
    /// Terminal fall velocity
    pub const MAX_FALL_VEL: f64 = 15.0;

    /// Bird hitbox. X is fixed; the world scrolls past it.
    pub const BIRD_X: i32 = 69;
    pub const BIRD_START_Y: f64 = 236.0;
    pub const BIRD_WIDTH: i32 = 25;
    pub const BIRD_HEIGHT: i32 = 15;
    /// Sprite is drawn offset from the hitbox
    pub const BIRD_RENDER_OFFSET_X: i32 = -11;
    pub const BIRD_RENDER_OFFSET_Y: i32 = -18;

    /// Idle bob while waiting to start
    pub const SINE_WAVE_AMPLITUDE: f64 = 15.0;
    pub const SINE_WAVE_PERIOD: f64 = 45.0;
    /// Frames per wing-flap sprite
    pub const SWING_PERIOD: u64 = 5;

    /// Pipes
    pub const PIPE_WIDTH: i32 = 48;
    pub const PIPE_HEIGHT: i32 = 320;
    pub const PIPE_SPACING: i32 = 172;
    pub const PIPE_GAP: i32 = 90;
    pub const PIPE_START_X: i32 = 360;
    /// Minimum distance between a gap and the ceiling/ground
    pub const PIPE_RANDOM_BOUNDARY: i32 = 50;
    pub const MIN_PIPES: usize = 3;

    /// Ground tiles
    pub const LAND_START_X: i32 = 0;
    pub const LAND_WIDTH: i32 = 288;
    pub const LAND_Y: i32 = 400;
    pub const MIN_LAND_TILES: usize = 2;

    /// Q-learning
    pub const QL_ALPHA: f64 = 0.6;
    pub const QL_GAMMA: f64 = 0.8;
    pub const QL_RESOLUTION: i32 = 15;
    pub const QL_ALIVE_REWARD: f64 = 1.0;
    pub const QL_DEAD_REWARD: f64 = -100.0;
    pub const QL_EPSILON: f64 = 0.0;
    pub const QL_EXPLORE_JUMP_RATE: f64 = 0.1;

    /// Frames the death screen must flash before a jump restarts
    pub const DEAD_FLASH_FRAMES: u32 = 5;

    /// Nominal scheduler rate
    pub const DEFAULT_FPS: u32 = 40;
}
