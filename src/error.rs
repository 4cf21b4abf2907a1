//! Crate-level error type

use glam::Vec2;
use thiserror::Error;

use crate::assets::Sprite;
use crate::sim::quadtree::QuadTreeError;

pub type SimResult<T> = Result<T, SimError>;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("spatial index: {0}")]
    Spatial(#[from] QuadTreeError),

    #[error("assets are still loading")]
    AssetsNotReady,

    #[error("rendering surface is not supported")]
    UnsupportedSurface,

    #[error("sprite {sprite:?} has unusable size {size}")]
    InvalidSprite { sprite: Sprite, size: Vec2 },

    #[error("session has not been started")]
    NotStarted,

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("failed to read settings: {0}")]
    SettingsIo(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    SettingsParse(#[from] serde_json::Error),
}
