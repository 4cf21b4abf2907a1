//! Held-intent input state
//!
//! The host maps key events to intents and flips them on key down/up; the
//! simulation only reads the current state once per ship advance.

use serde::{Deserialize, Serialize};

/// Player intents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    Left,
    Right,
    Up,
    Down,
    Fire,
}

/// Which intents are currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

impl InputState {
    pub fn set(&mut self, intent: Intent, held: bool) {
        match intent {
            Intent::Left => self.left = held,
            Intent::Right => self.right = held,
            Intent::Up => self.up = held,
            Intent::Down => self.down = held,
            Intent::Fire => self.fire = held,
        }
    }

    pub fn is_held(&self, intent: Intent) -> bool {
        match intent {
            Intent::Left => self.left,
            Intent::Right => self.right,
            Intent::Up => self.up,
            Intent::Down => self.down,
            Intent::Fire => self.fire,
        }
    }

    pub fn any_direction(&self) -> bool {
        self.left || self.right || self.up || self.down
    }
}

/// Supplies the input state for each frame
pub trait InputSource {
    fn poll(&mut self, frame: u64) -> InputState;
}

/// Input that never changes
impl InputSource for InputState {
    fn poll(&mut self, _frame: u64) -> InputState {
        *self
    }
}

/// Demo pilot: sweeps across the screen while holding fire
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Frames spent moving in one direction before turning around
    pub sweep_frames: u64,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self { sweep_frames: 90 }
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, frame: u64) -> InputState {
        let sweep = self.sweep_frames.max(1);
        let going_left = (frame / sweep) % 2 == 0;
        InputState {
            left: going_left,
            right: !going_left,
            fire: true,
            ..Default::default()
        }
    }
}
