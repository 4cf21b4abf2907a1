//! Game settings
//!
//! Data-driven tuning loaded from a JSON file. Missing fields fall back to
//! the defaults in [`crate::consts`], so a settings file only needs the values
//! it changes.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::assets::SpriteSizes;
use crate::consts::*;
use crate::error::{SimError, SimResult};

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Simulation ===
    /// RNG seed; the same seed and inputs replay the same game
    pub seed: u64,
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Pools ===
    pub bullet_capacity: usize,
    pub enemy_capacity: usize,
    pub enemy_bullet_capacity: usize,

    // === Ship ===
    /// Pixels per frame
    pub ship_speed: f32,
    /// Frames between volleys
    pub ship_fire_rate: u32,
    pub ship_bullet_speed: f32,

    // === Enemies ===
    /// Descent speed of a fresh wave
    pub enemy_speed: f32,
    pub enemy_bullet_speed: f32,
    /// Per-enemy, per-frame chance to fire (0.0 - 1.0)
    pub enemy_fire_chance: f64,

    // === Audio ===
    pub laser_channels: usize,
    /// Laser volume (0.0 - 1.0)
    pub laser_volume: f32,
    pub explosion_channels: usize,
    /// Explosion volume (0.0 - 1.0)
    pub explosion_volume: f32,
    /// Background loop volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Game-over loop volume (0.0 - 1.0)
    pub game_over_volume: f32,
    pub muted: bool,

    // === Assets ===
    /// Sprite sizes used when no decoder reports real dimensions
    pub sprites: SpriteSizes,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            bullet_capacity: BULLET_CAPACITY,
            enemy_capacity: ENEMY_CAPACITY,
            enemy_bullet_capacity: ENEMY_BULLET_CAPACITY,

            ship_speed: SHIP_SPEED,
            ship_fire_rate: SHIP_FIRE_RATE,
            ship_bullet_speed: SHIP_BULLET_SPEED,

            enemy_speed: ENEMY_SPEED,
            enemy_bullet_speed: ENEMY_BULLET_SPEED,
            enemy_fire_chance: ENEMY_FIRE_CHANCE,

            // Audio
            laser_channels: 10,
            laser_volume: 0.12,
            explosion_channels: 20,
            explosion_volume: 0.1,
            music_volume: 0.25,
            game_over_volume: 0.25,
            muted: false,

            sprites: SpriteSizes::default(),
        }
    }
}

impl Settings {
    /// Playfield size
    pub fn canvas(&self) -> Vec2 {
        Vec2::new(self.canvas_width, self.canvas_height)
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> SimResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> SimResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> SimResult<()> {
        fn invalid(msg: String) -> SimResult<()> {
            Err(SimError::InvalidSettings(msg))
        }

        let canvas = self.canvas();
        if !canvas.is_finite() || canvas.x <= 0.0 || canvas.y <= 0.0 {
            return invalid(format!("canvas must be positive, got {}x{}", canvas.x, canvas.y));
        }
        // A volley needs two free slots
        if self.bullet_capacity < 2 {
            return invalid(format!(
                "bullet_capacity must be at least 2, got {}",
                self.bullet_capacity
            ));
        }
        if self.enemy_capacity < WAVE_SIZE {
            return invalid(format!(
                "enemy_capacity must hold a full wave of {WAVE_SIZE}, got {}",
                self.enemy_capacity
            ));
        }
        if !(0.0..=1.0).contains(&self.enemy_fire_chance) {
            return invalid(format!(
                "enemy_fire_chance must be within 0..=1, got {}",
                self.enemy_fire_chance
            ));
        }
        for (name, speed) in [
            ("ship_speed", self.ship_speed),
            ("ship_bullet_speed", self.ship_bullet_speed),
            ("enemy_speed", self.enemy_speed),
            ("enemy_bullet_speed", self.enemy_bullet_speed),
        ] {
            if !speed.is_finite() {
                return invalid(format!("{name} must be finite, got {speed}"));
            }
        }
        for (name, volume) in [
            ("laser_volume", self.laser_volume),
            ("explosion_volume", self.explosion_volume),
            ("music_volume", self.music_volume),
            ("game_over_volume", self.game_over_volume),
        ] {
            if !(0.0..=1.0).contains(&volume) {
                return invalid(format!("{name} must be within 0..=1, got {volume}"));
            }
        }
        if self.laser_channels == 0 || self.explosion_channels == 0 {
            return invalid("sound pools need at least one channel".to_string());
        }
        if let Some((sprite, size)) = self.sprites.find_unusable() {
            return invalid(format!("{sprite:?} sprite must have a positive size, got {size}"));
        }
        Ok(())
    }
}
