//! Frame-based motion
//!
//! Horizontal scroll is a closed-form function of elapsed frames. Vertical
//! bird motion is integrated one frame at a time from a velocity ramp that
//! restarts on every jump.

use crate::tuning::Tuning;

/// Position after `elapsed` frames at constant velocity, floored to a pixel
#[inline]
pub fn translate(start: i32, vel: f64, elapsed: u64) -> i32 {
    (f64::from(start) + vel * elapsed as f64).floor() as i32
}

/// Vertical velocity `frames_since_jump` frames after the last jump
#[inline]
pub fn fall_velocity(tuning: &Tuning, frames_since_jump: u64) -> f64 {
    (tuning.jump_vel + tuning.gravity * frames_since_jump as f64).min(tuning.max_fall_vel)
}

/// Advance the bird one frame and clamp it between ceiling and ground
pub fn integrate_bird(tuning: &Tuning, bird_y: f64, frames_since_jump: u64) -> f64 {
    let new_y = bird_y + fall_velocity(tuning, frames_since_jump);
    new_y.min(tuning.bird_floor()).max(tuning.bird_ceiling())
}

/// Idle sinusoidal bob around the start height
pub fn ready_bob(tuning: &Tuning, frame: u64) -> f64 {
    let phase = frame as f64 * std::f64::consts::TAU / tuning.sine_wave_period;
    tuning.bird_start_y + tuning.sine_wave_amplitude * phase.sin()
}

/// Wing-flap sprite index in {0, 1, 2}
#[inline]
pub fn wing_phase(tuning: &Tuning, frame: u64) -> u8 {
    ((frame / tuning.swing_period) % 3) as u8
}
