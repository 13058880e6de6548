//! Per-frame simulation step
//!
//! Advances the world in a fixed order: land, bird, pipes, score, collision.
//! The agent runs after this (see [`crate::game::Game::step`]).

use rand::Rng;

use super::collision::update_collision;
use super::kinematics::{integrate_bird, ready_bob, wing_phase};
use super::obstacles::{update_land, update_pipes};
use super::scoring::update_score;
use super::state::{GameState, Mode};
use crate::tuning::Tuning;

/// Input commands for a single frame (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Frame index from the scheduler; must not go backwards
    pub frame: u64,
    /// A jump was requested since the previous frame
    pub jump: bool,
}

/// Precondition failures of [`tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StepError {
    #[error("frame index went backwards: {requested} < {current}")]
    NonMonotonicFrame { current: u64, requested: u64 },
}

/// The jump transition shared by player and agent input.
///
/// - `Ready`: start playing from the current frame
/// - `Playing`: restart the fall ramp from the jump impulse
/// - `Dead`: ignored until the flash threshold passes, then resets the
///   round and jumps again so one tap both dismisses and restarts
pub fn jump(state: &mut GameState, tuning: &Tuning) {
    match state.mode {
        Mode::Ready => {
            state.jump_frame = state.cur_frame;
            state.start_frame = state.cur_frame;
            state.mode = Mode::Playing;
            log::debug!("Round {} started at frame {}", state.round, state.cur_frame);
        }
        Mode::Playing => {
            state.jump_frame = state.cur_frame;
        }
        Mode::Dead if state.dead_flash > tuning.dead_flash_frames => {
            state.reset_round(tuning);
            jump(state, tuning);
        }
        Mode::Dead => {}
    }
}

/// Vertical motion plus sprite/flash animation
pub fn update_bird(state: &mut GameState, tuning: &Tuning) {
    if state.mode == Mode::Playing {
        state.bird_y = integrate_bird(tuning, state.bird_y, state.frames_since_jump());
    }
    animate(state, tuning);
}

fn animate(state: &mut GameState, tuning: &Tuning) {
    match state.mode {
        Mode::Ready => {
            state.bird_sprite = wing_phase(tuning, state.cur_frame);
            state.bird_y = ready_bob(tuning, state.cur_frame);
        }
        Mode::Playing => {
            state.bird_sprite = wing_phase(tuning, state.cur_frame);
        }
        Mode::Dead => {
            state.dead_flash = state.dead_flash.saturating_add(1);
        }
    }
}

/// Advance the game state to `input.frame`.
///
/// A pending jump is applied at the previous frame index, as if it arrived
/// between frames. Rejects a frame index lower than the current one without
/// touching the state.
pub fn tick<R: Rng + ?Sized>(
    state: &mut GameState,
    input: &TickInput,
    tuning: &Tuning,
    rng: &mut R,
) -> Result<(), StepError> {
    if input.frame < state.cur_frame {
        log::warn!(
            "Rejected frame {} (current frame is {})",
            input.frame,
            state.cur_frame
        );
        return Err(StepError::NonMonotonicFrame {
            current: state.cur_frame,
            requested: input.frame,
        });
    }

    if input.jump {
        jump(state, tuning);
    }

    state.cur_frame = input.frame;

    update_land(state, tuning);
    update_bird(state, tuning);
    update_pipes(state, tuning, rng);
    update_score(state, tuning);
    update_collision(state, tuning);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn run(state: &mut GameState, t: &Tuning, rng: &mut Pcg32, frames: std::ops::RangeInclusive<u64>) {
        for frame in frames {
            tick(state, &TickInput { frame, jump: false }, t, rng).unwrap();
        }
    }

    #[test]
    fn test_tick_ready_to_playing() {
        let t = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(12345);
        let mut state = GameState::new(&t);

        run(&mut state, &t, &mut rng, 0..=3);
        assert_eq!(state.mode, Mode::Ready);
        assert!(state.pipes.is_empty());
        assert_eq!(state.land_tiles.len(), 2);

        tick(&mut state, &TickInput { frame: 4, jump: true }, &t, &mut rng).unwrap();
        assert_eq!(state.mode, Mode::Playing);
        assert_eq!(state.start_frame, 3);
        assert_eq!(state.jump_frame, 3);
        assert_eq!(state.pipes.len(), 3);
    }

    #[test]
    fn test_bob_while_ready() {
        let t = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut state = GameState::new(&t);
        run(&mut state, &t, &mut rng, 0..=11);
        assert!(state.bird_y > t.bird_start_y);
        assert_eq!(state.bird_sprite, 2);
    }

    #[test]
    fn test_jump_restarts_fall_ramp() {
        let t = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut state = GameState::new(&t);
        tick(&mut state, &TickInput { frame: 0, jump: true }, &t, &mut rng).unwrap();
        run(&mut state, &t, &mut rng, 1..=5);
        let y = state.bird_y;

        tick(&mut state, &TickInput { frame: 6, jump: true }, &t, &mut rng).unwrap();
        assert_eq!(state.jump_frame, 5);
        assert_eq!(state.mode, Mode::Playing);
        assert_eq!(state.bird_y, y + (t.jump_vel + t.gravity));
    }

    #[test]
    fn test_dead_ignores_early_jump() {
        let t = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut state = GameState::new(&t);
        tick(&mut state, &TickInput { frame: 0, jump: true }, &t, &mut rng).unwrap();
        state.mode = Mode::Dead;
        let y = state.bird_y;

        for frame in 1..=5 {
            tick(&mut state, &TickInput { frame, jump: true }, &t, &mut rng).unwrap();
            assert_eq!(state.mode, Mode::Dead);
            assert_eq!(state.bird_y, y);
            assert_eq!(state.dead_flash, frame as u32);
        }

        // dead_flash is 5, not yet past the threshold
        tick(&mut state, &TickInput { frame: 6, jump: true }, &t, &mut rng).unwrap();
        assert_eq!(state.mode, Mode::Dead);
        assert_eq!(state.dead_flash, 6);

        tick(&mut state, &TickInput { frame: 7, jump: true }, &t, &mut rng).unwrap();
        assert_eq!(state.mode, Mode::Playing);
        assert_eq!(state.round, 1);
        assert_eq!(state.start_frame, 6);
        assert_eq!(state.pipes.len(), 3);
        assert_eq!(state.land_tiles.len(), 2);
    }

    #[test]
    fn test_long_death_still_restarts() {
        let t = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut state = GameState::new(&t);
        tick(&mut state, &TickInput { frame: 0, jump: true }, &t, &mut rng).unwrap();
        state.mode = Mode::Dead;
        state.dead_flash = u32::MAX;

        tick(&mut state, &TickInput { frame: 1, jump: false }, &t, &mut rng).unwrap();
        assert_eq!(state.dead_flash, u32::MAX);

        tick(&mut state, &TickInput { frame: 2, jump: true }, &t, &mut rng).unwrap();
        assert_eq!(state.mode, Mode::Playing);
        assert_eq!(state.round, 1);
    }

    #[test]
    fn test_backwards_frame_rejected_without_mutation() {
        let t = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut state = GameState::new(&t);
        run(&mut state, &t, &mut rng, 0..=10);
        let before = state.clone();

        let err = tick(&mut state, &TickInput { frame: 9, jump: true }, &t, &mut rng).unwrap_err();
        assert_eq!(
            err,
            StepError::NonMonotonicFrame {
                current: 10,
                requested: 9
            }
        );
        assert_eq!(state, before);

        // Repeating the same frame is allowed
        assert!(tick(&mut state, &TickInput { frame: 10, jump: false }, &t, &mut rng).is_ok());
    }

    #[test]
    fn test_determinism() {
        let t = Tuning::default();
        let mut rng1 = Pcg32::seed_from_u64(99999);
        let mut rng2 = Pcg32::seed_from_u64(99999);
        let mut state1 = GameState::new(&t);
        let mut state2 = GameState::new(&t);

        for frame in 0..300 {
            let input = TickInput {
                frame,
                jump: frame % 9 == 0,
            };
            tick(&mut state1, &input, &t, &mut rng1).unwrap();
            tick(&mut state2, &input, &t, &mut rng2).unwrap();
        }

        assert_eq!(state1, state2);
    }
}
