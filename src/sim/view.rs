//! Read-only helpers for renderers
//!
//! Pure functions of `&GameState` + `&Tuning`; nothing here mutates state.

use super::scoring::Medal;
use super::state::{GameState, Mode, Pipe};
use crate::tuning::Tuning;

/// Screen-space top edges of a pipe's two segments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipeSegments {
    pub x: i32,
    /// Top of the upper (downward-facing) segment
    pub upper_y: i32,
    /// Top of the lower (upward-facing) segment
    pub lower_y: i32,
    pub width: i32,
    pub height: i32,
}

pub fn pipe_segments(pipe: &Pipe, tuning: &Tuning) -> PipeSegments {
    PipeSegments {
        x: pipe.cur_x,
        upper_y: pipe.gap_top - tuning.pipe_height,
        lower_y: pipe.gap_top + tuning.pipe_gap,
        width: tuning.pipe_width,
        height: tuning.pipe_height,
    }
}

/// Where the bird sprite's top-left corner goes
pub fn bird_sprite_origin(state: &GameState, tuning: &Tuning) -> (i32, f64) {
    (
        tuning.bird_x + tuning.bird_render_offset_x,
        state.bird_y + f64::from(tuning.bird_render_offset_y),
    )
}

/// Opacity of the white death flash, fading out over the threshold
pub fn dead_flash_alpha(state: &GameState, tuning: &Tuning) -> Option<f32> {
    if state.mode != Mode::Dead || state.dead_flash >= tuning.dead_flash_frames {
        return None;
    }
    Some(1.0 - state.dead_flash as f32 / tuning.dead_flash_frames as f32)
}

/// Medal to show on the game-over panel
pub fn medal(state: &GameState) -> Option<Medal> {
    if state.mode != Mode::Dead {
        return None;
    }
    Medal::for_score(state.score)
}

/// Decimal digits of a score, most significant first
pub fn score_digits(score: u32) -> Vec<u8> {
    score
        .to_string()
        .bytes()
        .map(|b| b - b'0')
        .collect()
}
