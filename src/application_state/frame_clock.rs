//! # Frame Clock
//!
//! Paces the event loop to a target frame rate. Nothing in the sandbox blocks
//! on a swapchain, so without a deadline `about_to_wait` would run as fast as
//! the CPU allows.

use std::time::Duration;

use web_time::Instant;

/// Frame rate used when the configured one is not a positive finite number.
pub const FALLBACK_FRAME_RATE: f32 = 60.0;

pub struct FrameClock {
    interval: Duration,
    last_frame: Instant,
}

impl FrameClock {
    pub fn new(frame_rate: f32, now: Instant) -> Self {
        let frame_rate = if frame_rate.is_finite() && frame_rate > 0.0 {
            frame_rate
        } else {
            log::warn!("invalid frame rate {}, using {}", frame_rate, FALLBACK_FRAME_RATE);
            FALLBACK_FRAME_RATE
        };
        Self {
            interval: Duration::from_secs_f64(1.0 / f64::from(frame_rate)),
            last_frame: now,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// When the next frame should run.
    pub fn next_frame(&self) -> Instant {
        self.last_frame + self.interval
    }

    /// Starts a frame if one is due.
    ///
    /// # Returns
    /// The time since the previous frame, or `None` if it is too early.
    pub fn tick(&mut self, now: Instant) -> Option<Duration> {
        if now < self.next_frame() {
            return None;
        }
        let delta = now - self.last_frame;
        self.last_frame = now;
        Some(delta)
    }
}
