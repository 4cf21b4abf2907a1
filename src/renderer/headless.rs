//! Headless renderer
//!
//! Counts draw traffic without touching a real surface. Optionally records
//! every call so tests can inspect what a frame drew.

use glam::Vec2;

use super::Renderer;
use crate::assets::Sprite;
use crate::sim::Rect;

/// One recorded renderer call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCall {
    Sprite { sprite: Sprite, pos: Vec2 },
    Clear(Rect),
}

#[derive(Debug, Clone)]
pub struct HeadlessRenderer {
    supported: bool,
    recording: bool,
    calls: Vec<DrawCall>,
    pub sprites_drawn: u64,
    pub regions_cleared: u64,
}

impl Default for HeadlessRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self {
            supported: true,
            recording: false,
            calls: Vec::new(),
            sprites_drawn: 0,
            regions_cleared: 0,
        }
    }

    /// Keep every call until [`take_calls`](Self::take_calls)
    pub fn recording() -> Self {
        Self {
            recording: true,
            ..Self::new()
        }
    }

    /// A renderer that reports no drawing context
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::new()
        }
    }

    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    /// Recorded sprite draws of one kind
    pub fn drawn(&self, sprite: Sprite) -> impl Iterator<Item = Vec2> + '_ {
        self.calls.iter().filter_map(move |call| match call {
            DrawCall::Sprite { sprite: s, pos } if *s == sprite => Some(*pos),
            _ => None,
        })
    }
}

impl Renderer for HeadlessRenderer {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn draw_sprite(&mut self, sprite: Sprite, pos: Vec2) {
        self.sprites_drawn += 1;
        if self.recording {
            self.calls.push(DrawCall::Sprite { sprite, pos });
        }
    }

    fn clear_region(&mut self, region: Rect) {
        self.regions_cleared += 1;
        if self.recording {
            self.calls.push(DrawCall::Clear(region));
        }
    }
}
