//! Asset identifiers and the readiness gate
//!
//! The host decodes images and audio; the core only needs sprite dimensions
//! and a single "everything loaded" signal before the first frame runs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Image assets drawn by the core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sprite {
    Background,
    Ship,
    Bullet,
    Enemy,
    EnemyBullet,
}

impl Sprite {
    pub const ALL: [Sprite; 5] = [
        Sprite::Background,
        Sprite::Ship,
        Sprite::Bullet,
        Sprite::Enemy,
        Sprite::EnemyBullet,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Looping music tracks that must be buffered before the game starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Track {
    Background,
    GameOver,
}

impl Track {
    pub const ALL: [Track; 2] = [Track::Background, Track::GameOver];
}

/// Pixel dimensions of every sprite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteSizes {
    pub background: Vec2,
    pub ship: Vec2,
    pub bullet: Vec2,
    pub enemy: Vec2,
    pub enemy_bullet: Vec2,
}

impl Default for SpriteSizes {
    fn default() -> Self {
        Self {
            background: Vec2::new(600.0, 360.0),
            ship: Vec2::new(39.0, 37.0),
            bullet: Vec2::new(6.0, 11.0),
            enemy: Vec2::new(37.0, 38.0),
            enemy_bullet: Vec2::new(8.0, 8.0),
        }
    }
}

/// Finite with a strictly positive width and height
pub fn is_usable_size(size: Vec2) -> bool {
    size.is_finite() && size.x > 0.0 && size.y > 0.0
}

impl SpriteSizes {
    /// First sprite whose size cannot be drawn or collided
    pub fn find_unusable(&self) -> Option<(Sprite, Vec2)> {
        Sprite::ALL
            .into_iter()
            .map(|sprite| (sprite, self.get(sprite)))
            .find(|(_, size)| !is_usable_size(*size))
    }

    pub fn get(&self, sprite: Sprite) -> Vec2 {
        match sprite {
            Sprite::Background => self.background,
            Sprite::Ship => self.ship,
            Sprite::Bullet => self.bullet,
            Sprite::Enemy => self.enemy,
            Sprite::EnemyBullet => self.enemy_bullet,
        }
    }
}

/// Read-only view of loaded assets
pub trait AssetStore {
    /// True once every image and track has loaded
    fn is_ready(&self) -> bool;
    /// Dimensions of a loaded sprite
    fn sprite_size(&self, sprite: Sprite) -> Vec2;
}

/// Preload tracker: the host reports each asset as it finishes loading
#[derive(Debug, Clone, Default)]
pub struct AssetCache {
    sizes: [Option<Vec2>; 5],
    tracks: [bool; 2],
}

impl AssetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache with every asset already available (headless hosts, tests)
    pub fn preloaded(sizes: SpriteSizes) -> Self {
        let mut cache = Self::new();
        for sprite in Sprite::ALL {
            cache.image_loaded(sprite, sizes.get(sprite));
        }
        for track in Track::ALL {
            cache.track_loaded(track);
        }
        cache
    }

    pub fn image_loaded(&mut self, sprite: Sprite, size: Vec2) {
        self.sizes[sprite.index()] = Some(size);
        self.log_progress();
    }

    pub fn track_loaded(&mut self, track: Track) {
        self.tracks[track as usize] = true;
        self.log_progress();
    }

    /// Number of assets still outstanding
    pub fn pending(&self) -> usize {
        self.sizes.iter().filter(|s| s.is_none()).count()
            + self.tracks.iter().filter(|t| !**t).count()
    }

    fn log_progress(&self) {
        let pending = self.pending();
        if pending == 0 {
            log::info!("All assets loaded");
        } else {
            log::debug!("Asset loaded, {} pending", pending);
        }
    }
}

impl AssetStore for AssetCache {
    fn is_ready(&self) -> bool {
        self.pending() == 0
    }

    fn sprite_size(&self, sprite: Sprite) -> Vec2 {
        self.sizes[sprite.index()].unwrap_or(Vec2::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_only_after_everything_loads() {
        let mut cache = AssetCache::new();
        assert!(!cache.is_ready());
        assert_eq!(cache.pending(), 7);

        for sprite in Sprite::ALL {
            cache.image_loaded(sprite, Vec2::new(10.0, 10.0));
        }
        // Images alone are not enough
        assert!(!cache.is_ready());

        cache.track_loaded(Track::Background);
        assert!(!cache.is_ready());
        cache.track_loaded(Track::GameOver);
        assert!(cache.is_ready());
    }

    #[test]
    fn test_preloaded_sizes() {
        let sizes = SpriteSizes::default();
        let cache = AssetCache::preloaded(sizes);
        assert!(cache.is_ready());
        assert_eq!(cache.sprite_size(Sprite::Ship), sizes.ship);
        assert_eq!(cache.sprite_size(Sprite::EnemyBullet), sizes.enemy_bullet);
    }

    #[test]
    fn test_unusable_sizes() {
        assert_eq!(SpriteSizes::default().find_unusable(), None);
        assert!(!is_usable_size(Vec2::new(0.0, 10.0)));
        assert!(!is_usable_size(Vec2::new(f32::NAN, 10.0)));

        let sizes = SpriteSizes {
            enemy: Vec2::new(-5.0, 10.0),
            ..Default::default()
        };
        assert_eq!(sizes.find_unusable(), Some((Sprite::Enemy, Vec2::new(-5.0, 10.0))));
    }
}
