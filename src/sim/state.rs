//! Game state and core simulation types
//!
//! Everything a frame reads or writes lives in [`GameState`], which is passed
//! explicitly to [`tick`](super::tick::tick). Two states built from the same
//! settings replay identically given the same inputs.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::background::Background;
use super::bullet::{Bullet, BulletKind};
use super::collision::{Collider, CollisionResolver, EntityHandle};
use super::enemy::Enemy;
use super::entity::Entity;
use super::pool::Pool;
use super::quadtree::{QuadTree, QuadTreeResult};
use super::rect::Rect;
use super::ship::Ship;
use super::tick::spawn_wave;
use crate::assets::{AssetStore, Sprite, is_usable_size};
use crate::error::{SimError, SimResult};
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Frames are running
    Playing,
    /// The ship was destroyed; no further frames run until restart
    GameOver,
}

/// Gameplay events for audio/UI (drained each frame)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A session started or restarted
    SessionStarted,
    /// The ship fired a volley
    ShipFired,
    /// An enemy was shot down at this position
    EnemyDestroyed { pos: Vec2 },
    /// A fresh wave entered the screen
    WaveSpawned { wave: u32 },
    ShipDestroyed,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub score: u64,
    /// Waves spawned so far (1 after the first wave)
    pub wave: u32,
    /// Frames simulated
    pub frame: u64,
    pub phase: GamePhase,
    pub ship: Ship,
    pub bullets: Pool<Bullet>,
    pub enemies: Pool<Enemy>,
    pub enemy_bullets: Pool<Bullet>,
    pub background: Background,
    /// Rebuilt every frame from the live entities
    pub quadtree: QuadTree<Collider>,
    pub resolver: CollisionResolver,
    /// Events not yet drained by the host
    pub events: Vec<GameEvent>,
    /// Playfield size
    pub canvas: Vec2,
    /// Enemy sprite size, used for wave layout
    pub enemy_size: Vec2,
}

impl GameState {
    /// Build pools, ship and spatial index, then spawn the first wave
    pub fn new(settings: Settings, assets: &dyn AssetStore) -> SimResult<Self> {
        settings.validate()?;
        // Hosts report decoded sizes, which may disagree with the settings
        for sprite in Sprite::ALL {
            let size = assets.sprite_size(sprite);
            if !is_usable_size(size) {
                return Err(SimError::InvalidSprite { sprite, size });
            }
        }

        let canvas = settings.canvas();
        let ship_size = assets.sprite_size(Sprite::Ship);
        let bullet_size = assets.sprite_size(Sprite::Bullet);
        let enemy_size = assets.sprite_size(Sprite::Enemy);
        let enemy_bullet_size = assets.sprite_size(Sprite::EnemyBullet);

        let ship = Ship::new(
            Ship::start_position(canvas, ship_size),
            ship_size,
            settings.ship_speed,
            settings.ship_fire_rate,
            settings.ship_bullet_speed,
        );

        let mut state = Self {
            seed: settings.seed,
            rng: Pcg32::seed_from_u64(settings.seed),
            score: 0,
            wave: 0,
            frame: 0,
            phase: GamePhase::Playing,
            ship,
            bullets: Pool::new(settings.bullet_capacity, || {
                Bullet::new(BulletKind::Player, bullet_size)
            }),
            enemies: Pool::new(settings.enemy_capacity, || Enemy::new(enemy_size)),
            enemy_bullets: Pool::new(settings.enemy_bullet_capacity, || {
                Bullet::new(BulletKind::Enemy, enemy_bullet_size)
            }),
            background: Background::new(canvas.y),
            quadtree: QuadTree::new(Rect::from_pos_size(Vec2::ZERO, canvas))?,
            resolver: CollisionResolver::new(),
            events: Vec::new(),
            canvas,
            enemy_size,
            settings,
        };

        spawn_wave(&mut state);
        Ok(state)
    }

    /// Return to the exact state [`GameState::new`] produces
    pub fn restart(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.score = 0;
        self.wave = 0;
        self.frame = 0;
        self.phase = GamePhase::Playing;

        self.bullets.reset();
        self.enemies.reset();
        self.enemy_bullets.reset();
        self.background.reset();
        self.ship.arm();
        self.quadtree.clear();
        self.events.clear();

        spawn_wave(self);
        log::info!("Game restarted (seed {})", self.seed);
    }

    /// Clear the quadtree and insert every live entity
    pub fn rebuild_index(&mut self) -> QuadTreeResult<()> {
        self.quadtree.clear();

        if self.ship.is_alive() {
            self.quadtree
                .insert(Collider::from_body(EntityHandle::Ship, &self.ship.body))?;
        }
        for (i, bullet) in self.bullets.alive().iter().enumerate() {
            self.quadtree
                .insert(Collider::from_body(EntityHandle::PlayerBullet(i), &bullet.body))?;
        }
        for (i, enemy) in self.enemies.alive().iter().enumerate() {
            self.quadtree
                .insert(Collider::from_body(EntityHandle::Enemy(i), &enemy.body))?;
        }
        for (i, bullet) in self.enemy_bullets.alive().iter().enumerate() {
            self.quadtree
                .insert(Collider::from_body(EntityHandle::EnemyBullet(i), &bullet.body))?;
        }

        Ok(())
    }

    /// Run the narrow phase over the current index and flag both sides of
    /// every contact. Returns the number of contacts.
    pub fn resolve_collisions(&mut self) -> QuadTreeResult<usize> {
        let Self {
            quadtree,
            resolver,
            ship,
            bullets,
            enemies,
            enemy_bullets,
            ..
        } = self;

        let contacts = resolver.resolve(quadtree)?;
        for contact in contacts {
            for handle in [contact.subject, contact.other] {
                let body = match handle {
                    EntityHandle::Ship => Some(ship.body_mut()),
                    EntityHandle::PlayerBullet(i) => {
                        bullets.alive_mut().get_mut(i).map(Entity::body_mut)
                    }
                    EntityHandle::Enemy(i) => enemies.alive_mut().get_mut(i).map(Entity::body_mut),
                    EntityHandle::EnemyBullet(i) => {
                        enemy_bullets.alive_mut().get_mut(i).map(Entity::body_mut)
                    }
                };
                if let Some(body) = body {
                    body.colliding = true;
                }
            }
        }

        Ok(contacts.len())
    }

    /// Take every event emitted since the last drain
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
