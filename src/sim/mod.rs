//! Frame simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - One fixed step per frame
//! - Seeded RNG only
//! - Stable iteration order (pool prefix order)
//! - Drawing only through the `Renderer` seam

pub mod background;
pub mod bullet;
pub mod collision;
pub mod enemy;
pub mod entity;
pub mod pool;
pub mod quadtree;
pub mod rect;
pub mod ship;
pub mod state;
pub mod tick;

pub use background::Background;
pub use bullet::{Bullet, BulletKind};
pub use collision::{Collider, CollisionResolver, Contact, EntityHandle, narrow_phase};
pub use enemy::Enemy;
pub use entity::{Body, Entity, Poolable, Step, Tag};
pub use pool::Pool;
pub use quadtree::{MAX_LEVELS, MAX_OBJECTS, QuadTree, QuadTreeError};
pub use rect::Rect;
pub use ship::Ship;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{FrameOutcome, spawn_wave, tick};
