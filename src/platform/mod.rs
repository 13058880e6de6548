//! Platform abstraction layer
//!
//! Native drivers need a frame scheduler; the simulation itself only ever
//! sees the frame index it produces.

pub mod time;

pub use time::FrameClock;
