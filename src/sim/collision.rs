//! Collision detection between the bird hitbox, pipes and the ground
//!
//! Checked once per `Playing` frame, after all motion, against the
//! uncorrected post-motion position.

use super::state::{GameState, Mode, Pipe};
use crate::tuning::Tuning;

/// What the bird hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// Index into `GameState::pipes`
    Pipe(usize),
    Ground,
}

/// Bird's horizontal span overlaps the pipe body
#[inline]
pub fn in_pipe(tuning: &Tuning, pipe: &Pipe) -> bool {
    tuning.bird_x + tuning.bird_width >= pipe.cur_x && tuning.bird_x < pipe.trailing_edge(tuning)
}

/// Bird's vertical span lies strictly inside the gap
#[inline]
pub fn in_pipe_gap(tuning: &Tuning, bird_y: f64, pipe: &Pipe) -> bool {
    f64::from(pipe.gap_top) < bird_y
        && f64::from(pipe.gap_top + tuning.pipe_gap) > bird_y + f64::from(tuning.bird_height)
}

/// Bird's lower edge reached the ground line
#[inline]
pub fn collide_ground(tuning: &Tuning, bird_y: f64) -> bool {
    bird_y + f64::from(tuning.bird_height) >= f64::from(tuning.land_y)
}

/// First collision for the current bird position, if any
pub fn detect(state: &GameState, tuning: &Tuning) -> Option<Collision> {
    if let Some(index) = state
        .pipes
        .iter()
        .position(|p| in_pipe(tuning, p) && !in_pipe_gap(tuning, state.bird_y, p))
    {
        return Some(Collision::Pipe(index));
    }
    collide_ground(tuning, state.bird_y).then_some(Collision::Ground)
}

/// Kill the bird on contact. Returns the collision that ended the round.
pub fn update_collision(state: &mut GameState, tuning: &Tuning) -> Option<Collision> {
    if state.mode != Mode::Playing {
        return None;
    }

    let hit = detect(state, tuning)?;
    log::debug!(
        "Bird died at frame {} (y={:.1}): {:?}",
        state.cur_frame,
        state.bird_y,
        hit
    );
    state.mode = Mode::Dead;
    Some(hit)
}
