//! Platform abstraction layer
//!
//! Host-facing seams around the simulation:
//! - Input intents and input sources
//! - Frame pacing
//! - Effects (audio/UI) notification
//! - The session runner that ties them together

pub mod input;
pub mod session;
pub mod time;

pub use input::{Autopilot, InputSource, InputState, Intent};
pub use session::{Session, SessionSummary};
pub use time::{FixedIntervalScheduler, FrameScheduler, Unpaced};

use crate::sim::GameEvent;

/// Receives gameplay events after each frame (sound, UI)
pub trait EffectsBus {
    fn notify(&mut self, event: &GameEvent);
}

/// Collects events for later inspection
impl EffectsBus for Vec<GameEvent> {
    fn notify(&mut self, event: &GameEvent) {
        self.push(*event);
    }
}
