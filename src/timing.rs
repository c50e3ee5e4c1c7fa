//! Timing constants for the simulator.
//!
//! These use `std::time::Duration`, which the `no_std` core cannot, so they
//! live here rather than in the common crate.

use std::time::Duration;

/// The clock ticks once per whole second.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Default frame rate. High enough to show the intro sweep smoothly.
pub const DEFAULT_FPS: u32 = 30;

/// Time between frames at `fps` (clamped to at least 1 FPS).
pub fn frame_interval(fps: u32) -> Duration { Duration::from_secs(1) / fps.max(1) }

/// Millisecond timestamp used on the event timeline.
pub fn as_millis(elapsed: Duration) -> u64 { u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX) }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_interval() {
        assert_eq!(frame_interval(50), Duration::from_millis(20));
        assert_eq!(frame_interval(0), TICK_INTERVAL, "zero fps is clamped to one frame per second");
    }
}
