//! Collision detection
//!
//! Broad phase comes from the quadtree; the narrow phase is a tag match plus
//! a strict AABB overlap. Every positive test yields a [`Contact`] and both
//! sides of a contact get flagged, even though the tag test is directional.

use super::entity::{Body, Tag};
use super::quadtree::{Bounded, QuadTree, QuadTreeResult};
use super::rect::Rect;

/// Which entity a collider stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityHandle {
    Ship,
    PlayerBullet(usize),
    Enemy(usize),
    EnemyBullet(usize),
}

/// Snapshot of an entity's collision state, stored in the quadtree
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub handle: EntityHandle,
    pub rect: Rect,
    pub tag: Tag,
    pub collides_with: Tag,
}

impl Collider {
    pub fn from_body(handle: EntityHandle, body: &Body) -> Self {
        Self {
            handle,
            rect: body.rect(),
            tag: body.tag,
            collides_with: body.collides_with,
        }
    }
}

impl Bounded for Collider {
    fn bounds(&self) -> Rect {
        self.rect
    }
}

/// A positive narrow-phase test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    /// The entity whose tag test passed
    pub subject: EntityHandle,
    pub other: EntityHandle,
}

/// `subject` reacts to `other` and their boxes overlap
#[inline]
pub fn narrow_phase(subject: &Collider, other: &Collider) -> bool {
    subject.collides_with == other.tag && subject.rect.overlaps(&other.rect)
}

/// Pairs every collider with its broad-phase candidates.
///
/// Scratch buffers are kept between frames so a steady-state pass does not
/// allocate.
#[derive(Debug, Clone, Default)]
pub struct CollisionResolver {
    subjects: Vec<Collider>,
    candidates: Vec<Collider>,
    contacts: Vec<Contact>,
}

impl CollisionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one full pass over `tree` and return this frame's contacts.
    ///
    /// Repeated pairs are not deduplicated; marking is idempotent.
    pub fn resolve(&mut self, tree: &QuadTree<Collider>) -> QuadTreeResult<&[Contact]> {
        self.subjects.clear();
        self.contacts.clear();
        tree.collect_all(&mut self.subjects);

        for subject in &self.subjects {
            self.candidates.clear();
            tree.query(&subject.rect, &mut self.candidates)?;
            for other in &self.candidates {
                if narrow_phase(subject, other) {
                    self.contacts.push(Contact {
                        subject: subject.handle,
                        other: other.handle,
                    });
                }
            }
        }

        Ok(&self.contacts)
    }
}
