//! Frame scheduling and FPS measurement

use std::time::{Duration, Instant};

use crate::tuning::Tuning;

/// Hands out frame indices and measures real-world frame rate.
///
/// FPS is for display only and never feeds back into the simulation.
#[derive(Debug, Clone)]
pub struct FrameClock {
    frame_count: u64,
    /// Speed-up multiplier for training (1.0 = nominal rate)
    time_scale: f64,
    default_fps: u32,
    last_time: Option<Instant>,
    fps: u32,
}

impl FrameClock {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            frame_count: 0,
            time_scale: 1.0,
            default_fps: tuning.default_fps,
            last_time: None,
            fps: 0,
        }
    }

    /// Non-positive scales fall back to 1.0
    pub fn set_time_scale(&mut self, scale: f64) {
        self.time_scale = if scale > 0.0 { scale } else { 1.0 };
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Next frame index; starts at 0 and never repeats
    pub fn next_frame(&mut self) -> u64 {
        let frame = self.frame_count;
        self.frame_count += 1;
        frame
    }

    /// Frames handed out so far
    pub fn frames(&self) -> u64 {
        self.frame_count
    }

    /// Delay between ticks at the current time scale
    pub fn frame_interval(&self) -> Duration {
        let nanos = 1e9 / f64::from(self.default_fps) / self.time_scale;
        Duration::from_nanos(nanos.round() as u64)
    }

    /// Record a tick at `now` and update the measured FPS
    pub fn record_tick(&mut self, now: Instant) {
        if let Some(last) = self.last_time {
            let elapsed_us = now.duration_since(last).as_micros();
            if elapsed_us > 0 {
                self.fps = (1_000_000 / elapsed_us) as u32;
            }
        }
        self.last_time = Some(now);
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}
