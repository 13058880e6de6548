//! Data-driven game balance
//!
//! Every physics, geometry and learning constant lives in [`Tuning`]. The
//! defaults mirror [`crate::consts`]; a JSON file may override any subset of
//! fields. A `Tuning` is fixed for the lifetime of a [`crate::Game`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Rejected or unreadable tuning
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("invalid tuning field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("malformed tuning json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
}

/// Full set of simulation and agent constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub width: i32,
    pub height: i32,

    // === Physics ===
    pub x_vel: f64,
    pub gravity: f64,
    pub jump_vel: f64,
    pub max_fall_vel: f64,

    // === Bird ===
    pub bird_x: i32,
    pub bird_start_y: f64,
    pub bird_width: i32,
    pub bird_height: i32,
    pub bird_render_offset_x: i32,
    pub bird_render_offset_y: i32,
    pub sine_wave_amplitude: f64,
    pub sine_wave_period: f64,
    pub swing_period: u64,

    // === Pipes ===
    pub pipe_width: i32,
    pub pipe_height: i32,
    pub pipe_spacing: i32,
    pub pipe_gap: i32,
    pub pipe_start_x: i32,
    pub pipe_random_boundary: i32,
    pub min_pipes: usize,

    // === Land ===
    pub land_start_x: i32,
    pub land_width: i32,
    pub land_y: i32,
    pub min_land_tiles: usize,

    // === Q-learning ===
    pub ql_alpha: f64,
    pub ql_gamma: f64,
    pub ql_resolution: i32,
    pub ql_alive_reward: f64,
    pub ql_dead_reward: f64,
    pub ql_epsilon: f64,
    pub ql_explore_jump_rate: f64,

    // === Death screen ===
    pub dead_flash_frames: u32,

    // === Scheduler ===
    pub default_fps: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,

            x_vel: X_VEL,
            gravity: GRAVITY,
            jump_vel: JUMP_VEL,
            max_fall_vel: MAX_FALL_VEL,

            bird_x: BIRD_X,
            bird_start_y: BIRD_START_Y,
            bird_width: BIRD_WIDTH,
            bird_height: BIRD_HEIGHT,
            bird_render_offset_x: BIRD_RENDER_OFFSET_X,
            bird_render_offset_y: BIRD_RENDER_OFFSET_Y,
            sine_wave_amplitude: SINE_WAVE_AMPLITUDE,
            sine_wave_period: SINE_WAVE_PERIOD,
            swing_period: SWING_PERIOD,

            pipe_width: PIPE_WIDTH,
            pipe_height: PIPE_HEIGHT,
            pipe_spacing: PIPE_SPACING,
            pipe_gap: PIPE_GAP,
            pipe_start_x: PIPE_START_X,
            pipe_random_boundary: PIPE_RANDOM_BOUNDARY,
            min_pipes: MIN_PIPES,

            land_start_x: LAND_START_X,
            land_width: LAND_WIDTH,
            land_y: LAND_Y,
            min_land_tiles: MIN_LAND_TILES,

            ql_alpha: QL_ALPHA,
            ql_gamma: QL_GAMMA,
            ql_resolution: QL_RESOLUTION,
            ql_alive_reward: QL_ALIVE_REWARD,
            ql_dead_reward: QL_DEAD_REWARD,
            ql_epsilon: QL_EPSILON,
            ql_explore_jump_rate: QL_EXPLORE_JUMP_RATE,

            dead_flash_frames: DEAD_FLASH_FRAMES,

            default_fps: DEFAULT_FPS,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Reject values that would make a frame transition non-total
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
            TuningError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if self.pipe_spacing <= 0 {
            return Err(invalid("pipe_spacing", "must be positive"));
        }
        if self.land_width <= 0 {
            return Err(invalid("land_width", "must be positive"));
        }
        if self.pipe_width <= 0 || self.bird_width <= 0 || self.bird_height <= 0 {
            return Err(invalid("pipe_width", "hitbox dimensions must be positive"));
        }
        if self.ql_resolution <= 0 {
            return Err(invalid("ql_resolution", "must be positive"));
        }
        if self.swing_period == 0 {
            return Err(invalid("swing_period", "must be non-zero"));
        }
        if self.sine_wave_period == 0.0 {
            return Err(invalid("sine_wave_period", "must be non-zero"));
        }
        let Some(gap_range) = self.gap_range_len() else {
            return Err(invalid(
                "pipe_random_boundary",
                format!("margin {} overflows the gap range", self.pipe_random_boundary),
            ));
        };
        if gap_range <= 0 {
            return Err(invalid(
                "pipe_gap",
                format!(
                    "gap {} with margin {} does not fit above land at {}",
                    self.pipe_gap, self.pipe_random_boundary, self.land_y
                ),
            ));
        }
        if self.land_y <= self.bird_height || self.land_y > self.height {
            return Err(invalid("land_y", "ground line must lie inside the playfield"));
        }
        if self.min_pipes == 0 || self.min_land_tiles == 0 {
            return Err(invalid("min_pipes", "rolling windows must hold at least one entry"));
        }
        for (field, value) in [
            ("ql_alpha", self.ql_alpha),
            ("ql_gamma", self.ql_gamma),
            ("ql_epsilon", self.ql_epsilon),
            ("ql_explore_jump_rate", self.ql_explore_jump_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(field, format!("{value} is outside [0, 1]")));
            }
        }
        if self.default_fps == 0 {
            return Err(invalid("default_fps", "must be non-zero"));
        }
        Ok(())
    }

    /// Number of distinct gap-top values a new pipe can draw.
    ///
    /// `None` if the margins push the range outside `i32`.
    pub fn gap_range_len(&self) -> Option<i32> {
        self.land_y
            .checked_sub(self.pipe_gap)?
            .checked_sub(self.pipe_random_boundary.checked_mul(2)?)
    }

    /// Lowest y the bird's top edge may reach (resting on the ground)
    pub fn bird_floor(&self) -> f64 {
        f64::from(self.land_y - self.bird_height)
    }

    /// Highest y the bird's top edge may reach (just above the ceiling)
    pub fn bird_ceiling(&self) -> f64 {
        -f64::from(self.bird_height)
    }
}
