//! Rendering seam
//!
//! Entities issue draw and clear calls while they advance. The host provides
//! the actual 2D surface; the core never reads anything back.

pub mod headless;

pub use headless::{DrawCall, HeadlessRenderer};

use glam::Vec2;

use crate::assets::Sprite;
use crate::sim::Rect;

/// A 2D drawing surface
pub trait Renderer {
    /// Whether the host could provide a drawing context at all
    fn is_supported(&self) -> bool {
        true
    }

    /// Blit `sprite` with its top-left corner at `pos`
    fn draw_sprite(&mut self, sprite: Sprite, pos: Vec2);

    /// Erase a screen region
    fn clear_region(&mut self, region: Rect);
}
