//! Game state and core simulation types
//!
//! All state a renderer needs to draw a frame lives here. Nothing in this
//! module advances time; see [`super::tick`].

use serde::{Deserialize, Serialize};

use super::kinematics::translate;
use crate::tuning::Tuning;

/// Macro-state of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Bird bobs in place, waiting for the first jump
    #[default]
    Ready,
    /// Active run
    Playing,
    /// Crashed; the screen flashes until a jump restarts
    Dead,
}

/// A pipe pair: upper and lower segment around a vertical gap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipe {
    pub start_frame: u64,
    pub start_x: i32,
    /// Derived from `start_frame`/`start_x` every update
    pub cur_x: i32,
    /// Top edge of the gap, fixed at creation
    pub gap_top: i32,
}

impl Pipe {
    pub fn new(start_frame: u64, start_x: i32, gap_top: i32) -> Self {
        Self {
            start_frame,
            start_x,
            cur_x: start_x,
            gap_top,
        }
    }

    /// Recompute `cur_x` for the given frame
    pub fn scroll_to(&mut self, cur_frame: u64, tuning: &Tuning) {
        self.cur_x = translate(
            self.start_x,
            tuning.x_vel,
            cur_frame.saturating_sub(self.start_frame),
        );
    }

    /// Right edge of the pipe body
    #[inline]
    pub fn trailing_edge(&self, tuning: &Tuning) -> i32 {
        self.cur_x + tuning.pipe_width
    }
}

/// A ground tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandTile {
    pub start_frame: u64,
    pub start_x: i32,
    pub cur_x: i32,
}

impl LandTile {
    pub fn new(start_frame: u64, start_x: i32) -> Self {
        Self {
            start_frame,
            start_x,
            cur_x: start_x,
        }
    }

    pub fn scroll_to(&mut self, cur_frame: u64, tuning: &Tuning) {
        self.cur_x = translate(
            self.start_x,
            tuning.x_vel,
            cur_frame.saturating_sub(self.start_frame),
        );
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Current mode
    pub mode: Mode,
    /// Frame the current round started playing
    pub start_frame: u64,
    /// Frame of the most recent jump
    pub jump_frame: u64,
    /// Frame index supplied by the scheduler
    pub cur_frame: u64,
    /// Top edge of the bird hitbox
    pub bird_y: f64,
    /// Wing animation phase (0-2)
    pub bird_sprite: u8,
    /// Rounds finished this session
    pub round: u32,
    /// Score of the current round
    pub score: u32,
    /// Sum of all round scores this session
    pub total_score: u32,
    /// Best round score this session
    pub max_score: u32,
    /// Frames spent in `Dead`
    pub dead_flash: u32,
    /// Pipes sorted by ascending `cur_x`
    pub pipes: Vec<Pipe>,
    /// Ground tiles sorted by ascending `cur_x`
    pub land_tiles: Vec<LandTile>,
}

impl GameState {
    /// Fresh session state waiting in `Ready`
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            mode: Mode::Ready,
            start_frame: 0,
            jump_frame: 0,
            cur_frame: 0,
            bird_y: tuning.bird_start_y,
            bird_sprite: 0,
            round: 0,
            score: 0,
            total_score: 0,
            max_score: 0,
            dead_flash: 0,
            pipes: Vec::new(),
            land_tiles: Vec::new(),
        }
    }

    /// Start the next round in `Ready`, keeping session-wide counters.
    ///
    /// Obstacles are emptied; the next obstacle update refills them.
    pub fn reset_round(&mut self, tuning: &Tuning) {
        log::info!(
            "Round {} over: score {} (max {}, total {})",
            self.round,
            self.score,
            self.max_score,
            self.total_score
        );

        *self = Self {
            start_frame: self.cur_frame,
            cur_frame: self.cur_frame,
            round: self.round + 1,
            total_score: self.total_score,
            max_score: self.max_score,
            ..Self::new(tuning)
        };
    }

    /// Frames since the last jump
    #[inline]
    pub fn frames_since_jump(&self) -> u64 {
        self.cur_frame.saturating_sub(self.jump_frame)
    }

    /// Frames since the round started playing
    #[inline]
    pub fn frames_since_start(&self) -> u64 {
        self.cur_frame.saturating_sub(self.start_frame)
    }

    /// Nearest pipe whose trailing edge is still ahead of the bird
    pub fn next_pipe(&self, tuning: &Tuning) -> Option<&Pipe> {
        self.pipes
            .iter()
            .filter(|p| tuning.bird_x < p.trailing_edge(tuning))
            .min_by_key(|p| p.cur_x)
    }
}
