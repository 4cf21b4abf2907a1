//! Vertically scrolling backdrop
//!
//! Two copies of the background image are stacked; panning both by one
//! pixel a frame and wrapping at the canvas height gives an endless scroll.

use glam::Vec2;

use crate::assets::Sprite;
use crate::consts::BACKGROUND_SCROLL_SPEED;
use crate::renderer::Renderer;

#[derive(Debug, Clone)]
pub struct Background {
    pub offset: f32,
    pub speed: f32,
    canvas_height: f32,
}

impl Background {
    pub fn new(canvas_height: f32) -> Self {
        Self {
            offset: 0.0,
            speed: BACKGROUND_SCROLL_SPEED,
            canvas_height,
        }
    }

    pub fn reset(&mut self) {
        self.offset = 0.0;
    }

    pub fn advance(&mut self, renderer: &mut dyn Renderer) {
        self.offset += self.speed;
        renderer.draw_sprite(Sprite::Background, Vec2::new(0.0, self.offset));
        renderer.draw_sprite(
            Sprite::Background,
            Vec2::new(0.0, self.offset - self.canvas_height),
        );
        if self.offset >= self.canvas_height {
            self.offset = 0.0;
        }
    }
}
