//! Sky Raid - A vertical scrolling arcade shooter core
//!
//! Core modules:
//! - `sim`: Frame simulation (pools, quadtree, collisions, game state)
//! - `renderer`: Drawing seam and a headless renderer
//! - `platform`: Input, frame pacing and the session runner
//! - `assets`: Sprite ids and preload tracking
//! - `audio`: Round-robin sound pools driven by game events
//! - `settings`: Data-driven configuration

pub mod assets;
pub mod audio;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Target frame rate of the host loop
    pub const FRAME_RATE: u32 = 60;

    /// Default playfield dimensions
    pub const CANVAS_WIDTH: f32 = 600.0;
    pub const CANVAS_HEIGHT: f32 = 360.0;

    /// Enemy patrol band extends this far either side of the spawn column
    pub const ENEMY_PATROL_HALF_WIDTH: f32 = 90.0;
    /// Pixels an enemy drops before it starts patrolling
    pub const ENEMY_DESCENT_DEPTH: f32 = 140.0;
    /// Horizontal speed once patrolling
    pub const ENEMY_PATROL_SPEED: f32 = 1.5;
    /// One-off upward hop at the end of the descent
    pub const ENEMY_DESCENT_HOP: f32 = 5.0;
    pub const ENEMY_POINTS: u64 = 10;
    /// Descent speed of a fresh wave
    pub const ENEMY_SPEED: f32 = 2.0;
    pub const ENEMY_BULLET_SPEED: f32 = 2.5;
    /// Per-enemy, per-frame chance to fire
    pub const ENEMY_FIRE_CHANCE: f64 = 0.01;

    /// Wave layout
    pub const WAVE_SIZE: usize = 18;
    pub const WAVE_COLUMNS: usize = 6;
    pub const WAVE_ORIGIN_X: f32 = 100.0;
    /// Gap between columns, added to the enemy width
    pub const WAVE_COLUMN_GAP: f32 = 25.0;
    /// Row step in enemy heights (rows stack upward, off screen)
    pub const WAVE_ROW_SPACING: f32 = 1.5;

    /// Ship defaults
    pub const SHIP_SPEED: f32 = 3.0;
    /// Frames between volleys
    pub const SHIP_FIRE_RATE: u32 = 15;
    pub const SHIP_BULLET_SPEED: f32 = 3.0;
    /// Horizontal offset of each wing gun from the ship's center
    pub const SHIP_GUN_SPREAD: f32 = 13.5;

    pub const BACKGROUND_SCROLL_SPEED: f32 = 1.0;

    /// Pool capacities
    pub const BULLET_CAPACITY: usize = 30;
    pub const ENEMY_CAPACITY: usize = 30;
    pub const ENEMY_BULLET_CAPACITY: usize = 50;
}
