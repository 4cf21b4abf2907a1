//! Fixed-capacity entity pool
//!
//! A pool owns exactly `capacity` entities for the whole session. Alive
//! entities always occupy the prefix `items[..alive]`, so per-frame iteration
//! touches only the live ones. Spawning takes the first dead slot; expiring
//! swaps the entity with the last live one and shrinks the prefix.

use glam::Vec2;

use super::entity::{Poolable, Step};

#[derive(Debug, Clone)]
pub struct Pool<T: Poolable> {
    items: Vec<T>,
    /// Length of the alive prefix
    alive: usize,
}

impl<T: Poolable> Pool<T> {
    /// Allocate `capacity` dead entities from `factory`
    pub fn new(capacity: usize, mut factory: impl FnMut() -> T) -> Self {
        let mut items = Vec::with_capacity(capacity);
        for _ in 0..capacity {
            let mut item = factory();
            item.clear();
            items.push(item);
        }
        Self { items, alive: 0 }
    }

    /// Total number of slots, alive or dead
    #[inline]
    pub fn capacity(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn alive_count(&self) -> usize {
        self.alive
    }

    /// True when no dead slot is left
    #[inline]
    pub fn is_saturated(&self) -> bool {
        self.alive == self.items.len()
    }

    /// The alive prefix
    pub fn alive(&self) -> &[T] {
        &self.items[..self.alive]
    }

    pub fn alive_mut(&mut self) -> &mut [T] {
        &mut self.items[..self.alive]
    }

    /// Every slot, alive prefix first
    pub fn slots(&self) -> &[T] {
        &self.items
    }

    /// Spawn one entity. Returns `false` (and does nothing) when saturated.
    pub fn acquire(&mut self, pos: Vec2, speed: f32) -> bool {
        if self.is_saturated() {
            log::trace!("pool saturated ({} slots), acquire ignored", self.items.len());
            return false;
        }
        self.items[self.alive].spawn(pos, speed);
        self.alive += 1;
        true
    }

    /// Spawn two entities or neither
    pub fn acquire_two(&mut self, a: (Vec2, f32), b: (Vec2, f32)) -> bool {
        if self.items.len() - self.alive < 2 {
            log::trace!("pool cannot fit a pair, acquire_two ignored");
            return false;
        }
        self.acquire(a.0, a.1);
        self.acquire(b.0, b.1);
        true
    }

    /// Run `step` on every alive entity in prefix order, recycling the ones
    /// that report [`Step::Expire`].
    pub fn advance_all(&mut self, mut step: impl FnMut(&mut T) -> Step) {
        let mut i = 0;
        while i < self.alive {
            match step(&mut self.items[i]) {
                Step::Keep => i += 1,
                Step::Expire => {
                    self.items[i].clear();
                    self.alive -= 1;
                    // The last live entity moves into slot i and is visited next
                    self.items.swap(i, self.alive);
                }
            }
        }
    }

    /// Clear every entity
    pub fn reset(&mut self) {
        for item in &mut self.items {
            item.clear();
        }
        self.alive = 0;
    }

    /// Check the alive-prefix invariant against the entities' own flags
    pub fn is_partitioned(&self) -> bool {
        self.items[..self.alive].iter().all(|e| e.is_alive())
            && self.items[self.alive..].iter().all(|e| !e.is_alive())
    }
}
