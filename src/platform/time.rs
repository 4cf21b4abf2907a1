//! Frame pacing
//!
//! The host calls [`FrameScheduler::wait_for_next_frame`] before every tick.
//! A display-synced host would block on vsync here; the native runner sleeps
//! to a fixed deadline instead.

use std::time::{Duration, Instant};

use crate::consts::FRAME_RATE;

/// Number of frame timestamps kept for the FPS estimate
const FPS_WINDOW: usize = 60;

pub trait FrameScheduler {
    /// Block until the next frame is due
    fn wait_for_next_frame(&mut self);
}

/// Sleeps so frames start at most once per interval
#[derive(Debug, Clone)]
pub struct FixedIntervalScheduler {
    interval: Duration,
    /// Start time of the next frame
    deadline: Option<Instant>,
    // FPS tracking
    frame_times: [Option<Instant>; FPS_WINDOW],
    frame_index: usize,
}

impl Default for FixedIntervalScheduler {
    fn default() -> Self {
        Self::new(FRAME_RATE)
    }
}

impl FixedIntervalScheduler {
    pub fn new(frames_per_second: u32) -> Self {
        Self {
            interval: Duration::from_secs_f64(1.0 / frames_per_second.max(1) as f64),
            deadline: None,
            frame_times: [None; FPS_WINDOW],
            frame_index: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Measured frame rate over the last [`FPS_WINDOW`] frames
    pub fn fps(&self) -> Option<f64> {
        let newest = self.frame_times[(self.frame_index + FPS_WINDOW - 1) % FPS_WINDOW]?;
        // Oldest sample is the next slot once the ring has filled
        let (oldest, count) = match self.frame_times[self.frame_index] {
            Some(oldest) => (oldest, FPS_WINDOW),
            None => (self.frame_times[0]?, self.frame_index),
        };
        let elapsed = newest.duration_since(oldest).as_secs_f64();
        if count < 2 || elapsed <= 0.0 {
            return None;
        }
        Some((count - 1) as f64 / elapsed)
    }
}

impl FrameScheduler for FixedIntervalScheduler {
    fn wait_for_next_frame(&mut self) {
        if let Some(deadline) = self.deadline {
            let now = Instant::now();
            if deadline > now {
                std::thread::sleep(deadline - now);
            }
        }

        let now = Instant::now();
        // After a stall, start counting again from now rather than bursting
        self.deadline = Some(match self.deadline {
            Some(deadline) if deadline + self.interval > now => deadline + self.interval,
            _ => now + self.interval,
        });

        self.frame_times[self.frame_index] = Some(now);
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;
    }
}

/// Runs frames back to back
#[derive(Debug, Clone, Copy, Default)]
pub struct Unpaced;

impl FrameScheduler for Unpaced {
    fn wait_for_next_frame(&mut self) {}
}
