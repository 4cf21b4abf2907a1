//! Projectiles fired by the ship and by enemies

use glam::Vec2;

use super::entity::{Body, Entity, Poolable, Step, Tag};
use crate::assets::Sprite;
use crate::renderer::Renderer;

/// Who fired the bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletKind {
    /// Travels up, hits enemies
    Player,
    /// Travels down, hits the ship
    Enemy,
}

impl BulletKind {
    pub fn tag(self) -> Tag {
        match self {
            BulletKind::Player => Tag::Bullet,
            BulletKind::Enemy => Tag::EnemyBullet,
        }
    }

    pub fn sprite(self) -> Sprite {
        match self {
            BulletKind::Player => Sprite::Bullet,
            BulletKind::Enemy => Sprite::EnemyBullet,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Bullet {
    pub body: Body,
    /// Pixels per frame; positive moves up the screen
    pub speed: f32,
    pub kind: BulletKind,
}

impl Bullet {
    pub fn new(kind: BulletKind, size: Vec2) -> Self {
        Self {
            body: Body::new(kind.tag(), size),
            speed: 0.0,
            kind,
        }
    }

    /// Move one frame. Expires when hit or once off the far edge.
    pub fn advance(&mut self, canvas_height: f32, renderer: &mut dyn Renderer) -> Step {
        renderer.clear_region(self.body.rect().inflate(1.0));
        self.body.pos.y -= self.speed;

        if self.body.colliding {
            return Step::Expire;
        }

        let off_screen = match self.kind {
            BulletKind::Player => self.body.pos.y <= -self.body.size.y,
            BulletKind::Enemy => self.body.pos.y >= canvas_height,
        };
        if off_screen {
            return Step::Expire;
        }

        renderer.draw_sprite(self.kind.sprite(), self.body.pos);
        Step::Keep
    }
}

impl Entity for Bullet {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

impl Poolable for Bullet {
    fn spawn(&mut self, pos: Vec2, speed: f32) {
        self.body.revive(pos);
        self.speed = speed;
    }

    fn clear(&mut self) {
        self.body.clear();
        self.speed = 0.0;
    }
}
