//! Score derivation
//!
//! The score is derived from distance travelled since the round started, not
//! counted on pipe events. The stored score only ever advances by one.

use serde::{Deserialize, Serialize};

use super::state::{GameState, Mode};
use crate::tuning::Tuning;

/// Pipes crossed after `elapsed` frames of play
pub fn derived_score(tuning: &Tuning, elapsed: u64) -> u32 {
    let distance = elapsed as f64 * tuning.x_vel.abs()
        + f64::from(tuning.pipe_width + tuning.bird_width) * 0.5;
    let spacing = f64::from(tuning.pipe_spacing);
    let crossed = ((distance - f64::from(tuning.pipe_start_x) + spacing) / spacing).floor();
    crossed.max(0.0) as u32
}

/// Credit one point when the derived score is exactly one ahead.
///
/// Returns true when a point was awarded this frame.
pub fn update_score(state: &mut GameState, tuning: &Tuning) -> bool {
    if state.mode != Mode::Playing {
        return false;
    }

    let derived = derived_score(tuning, state.frames_since_start());
    if derived != state.score + 1 {
        return false;
    }

    state.score += 1;
    state.total_score += 1;
    state.max_score = state.max_score.max(state.score);
    true
}

/// End-of-round medal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Medal {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl Medal {
    /// Medal earned by a final score, if any
    pub fn for_score(score: u32) -> Option<Self> {
        match score {
            30.. => Some(Medal::Platinum),
            20.. => Some(Medal::Gold),
            10.. => Some(Medal::Silver),
            5.. => Some(Medal::Bronze),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Medal::Bronze => "Bronze",
            Medal::Silver => "Silver",
            Medal::Gold => "Gold",
            Medal::Platinum => "Platinum",
        }
    }
}
