//! Shared entity data and capability traits
//!
//! Ships, bullets and enemies all embed a [`Body`]: position, size, lifecycle
//! flags and collision tags. Pooled variants additionally implement
//! [`Poolable`] so a [`Pool`](super::pool::Pool) can spawn and recycle them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Collision role of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    Ship,
    Bullet,
    Enemy,
    EnemyBullet,
}

impl Tag {
    /// The tag an entity with this tag reacts to
    pub fn target(self) -> Tag {
        match self {
            Tag::Ship => Tag::EnemyBullet,
            Tag::EnemyBullet => Tag::Ship,
            Tag::Bullet => Tag::Enemy,
            Tag::Enemy => Tag::Bullet,
        }
    }
}

/// Outcome of one per-frame advance step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Entity stays alive
    Keep,
    /// Entity is done and must be returned to its pool
    Expire,
}

/// Position, size and lifecycle state shared by every entity
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    /// Fixed after construction
    pub size: Vec2,
    pub alive: bool,
    pub colliding: bool,
    /// This entity's own tag
    pub tag: Tag,
    /// Tag of the entities this one reacts to
    pub collides_with: Tag,
}

impl Body {
    /// A dead body at the origin
    pub fn new(tag: Tag, size: Vec2) -> Self {
        Self {
            pos: Vec2::ZERO,
            size,
            alive: false,
            colliding: false,
            tag,
            collides_with: tag.target(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Bring the body to life at `pos`
    pub fn revive(&mut self, pos: Vec2) {
        self.pos = pos;
        self.alive = true;
        self.colliding = false;
    }

    /// Zero the position and drop every lifecycle flag
    pub fn clear(&mut self) {
        self.pos = Vec2::ZERO;
        self.alive = false;
        self.colliding = false;
    }
}

/// Anything with a [`Body`]
pub trait Entity {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    #[inline]
    fn is_alive(&self) -> bool {
        self.body().alive
    }

    #[inline]
    fn is_colliding(&self) -> bool {
        self.body().colliding
    }

    fn rect(&self) -> Rect {
        self.body().rect()
    }
}

/// An entity that lives in a fixed-capacity pool
pub trait Poolable: Entity {
    /// Set live values and mark alive
    fn spawn(&mut self, pos: Vec2, speed: f32);
    /// Zero every field and mark dead
    fn clear(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_targets_are_mutual() {
        for tag in [Tag::Ship, Tag::Bullet, Tag::Enemy, Tag::EnemyBullet] {
            assert_ne!(tag.target(), tag);
            assert_eq!(tag.target().target(), tag);
        }
    }

    #[test]
    fn test_body_lifecycle() {
        let mut body = Body::new(Tag::Enemy, Vec2::new(30.0, 20.0));
        assert!(!body.alive);
        assert_eq!(body.collides_with, Tag::Bullet);

        body.revive(Vec2::new(5.0, 6.0));
        assert!(body.alive);
        assert_eq!(body.rect(), Rect::new(5.0, 6.0, 30.0, 20.0));

        body.colliding = true;
        body.clear();
        assert!(!body.alive);
        assert!(!body.colliding);
        assert_eq!(body.pos, Vec2::ZERO);
        // Size survives recycling
        assert_eq!(body.size, Vec2::new(30.0, 20.0));
    }
}
