//! Enemy ships
//!
//! An enemy descends from its spawn point until it has dropped
//! [`ENEMY_DESCENT_DEPTH`] pixels, then patrols left and right inside a band
//! around its spawn column. Each frame it may fire down at the ship.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::bullet::Bullet;
use super::entity::{Body, Entity, Poolable, Step, Tag};
use super::pool::Pool;
use super::rect::Rect;
use super::state::GameEvent;
use crate::assets::Sprite;
use crate::consts::*;
use crate::renderer::Renderer;

/// Everything an enemy touches besides itself during one advance
pub struct EnemyContext<'a> {
    pub enemy_bullets: &'a mut Pool<Bullet>,
    pub rng: &'a mut Pcg32,
    pub score: &'a mut u64,
    pub events: &'a mut Vec<GameEvent>,
    pub renderer: &'a mut dyn Renderer,
    /// Per-frame probability of firing
    pub fire_chance: f64,
    /// Downward speed of fired bullets
    pub bullet_speed: f32,
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub body: Body,
    pub speed: f32,
    pub velocity: Vec2,
    left_edge: f32,
    right_edge: f32,
    bottom_edge: f32,
}

impl Enemy {
    pub fn new(size: Vec2) -> Self {
        Self {
            body: Body::new(Tag::Enemy, size),
            speed: 0.0,
            velocity: Vec2::ZERO,
            left_edge: 0.0,
            right_edge: 0.0,
            bottom_edge: 0.0,
        }
    }

    /// Horizontal patrol band `(left, right)`
    pub fn patrol_band(&self) -> (f32, f32) {
        (self.left_edge, self.right_edge)
    }

    /// Y coordinate at which descent stops
    pub fn descent_threshold(&self) -> f32 {
        self.bottom_edge
    }

    /// Still moving straight down
    pub fn is_descending(&self) -> bool {
        self.velocity.y != 0.0
    }

    pub fn advance(&mut self, ctx: &mut EnemyContext<'_>) -> Step {
        let body = &mut self.body;
        ctx.renderer.clear_region(Rect::new(
            body.pos.x - 1.0,
            body.pos.y,
            body.size.x + 1.0,
            body.size.y,
        ));
        body.pos += self.velocity;

        if body.pos.x <= self.left_edge {
            self.velocity.x = self.speed;
        } else if body.pos.x >= self.right_edge + body.size.x {
            self.velocity.x = -self.speed;
        } else if body.pos.y >= self.bottom_edge {
            // Reached the bottom of the descent: slow down, hop up once, patrol
            self.speed = ENEMY_PATROL_SPEED;
            self.velocity.y = 0.0;
            body.pos.y -= ENEMY_DESCENT_HOP;
            self.velocity.x = -self.speed;
        }

        if body.colliding {
            *ctx.score += ENEMY_POINTS;
            ctx.events.push(GameEvent::EnemyDestroyed { pos: body.pos });
            return Step::Expire;
        }

        ctx.renderer.draw_sprite(Sprite::Enemy, body.pos);

        if ctx.rng.random_bool(ctx.fire_chance) {
            let muzzle = Vec2::new(body.pos.x + body.size.x / 2.0, body.pos.y + body.size.y);
            ctx.enemy_bullets.acquire(muzzle, -ctx.bullet_speed);
        }

        Step::Keep
    }
}

impl Entity for Enemy {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

impl Poolable for Enemy {
    fn spawn(&mut self, pos: Vec2, speed: f32) {
        self.body.revive(pos);
        self.speed = speed;
        self.velocity = Vec2::new(0.0, speed);
        self.left_edge = pos.x - ENEMY_PATROL_HALF_WIDTH;
        self.right_edge = pos.x + ENEMY_PATROL_HALF_WIDTH;
        self.bottom_edge = pos.y + ENEMY_DESCENT_DEPTH;
    }

    fn clear(&mut self) {
        self.body.clear();
        self.speed = 0.0;
        self.velocity = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::HeadlessRenderer;
    use crate::sim::bullet::BulletKind;
    use rand::SeedableRng;

    const SIZE: Vec2 = Vec2::new(37.0, 38.0);

    struct Harness {
        bullets: Pool<Bullet>,
        rng: Pcg32,
        score: u64,
        events: Vec<GameEvent>,
        renderer: HeadlessRenderer,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                bullets: Pool::new(50, || Bullet::new(BulletKind::Enemy, Vec2::new(8.0, 8.0))),
                rng: Pcg32::seed_from_u64(7),
                score: 0,
                events: Vec::new(),
                renderer: HeadlessRenderer::recording(),
            }
        }

        fn step(&mut self, enemy: &mut Enemy, fire_chance: f64) -> Step {
            let mut ctx = EnemyContext {
                enemy_bullets: &mut self.bullets,
                rng: &mut self.rng,
                score: &mut self.score,
                events: &mut self.events,
                renderer: &mut self.renderer,
                fire_chance,
                bullet_speed: ENEMY_BULLET_SPEED,
            };
            enemy.advance(&mut ctx)
        }
    }

    #[test]
    fn test_spawn_sets_band_and_threshold() {
        let mut enemy = Enemy::new(SIZE);
        enemy.spawn(Vec2::new(100.0, -38.0), 2.0);
        assert_eq!(enemy.patrol_band(), (10.0, 190.0));
        assert_eq!(enemy.descent_threshold(), 102.0);
        assert_eq!(enemy.velocity, Vec2::new(0.0, 2.0));
        assert!(enemy.is_descending());
    }

    #[test]
    fn test_descends_then_patrols() {
        let mut h = Harness::new();
        let mut enemy = Enemy::new(SIZE);
        enemy.spawn(Vec2::new(100.0, 0.0), 2.0);

        // 70 frames of 2px reach the 140px threshold
        for _ in 0..69 {
            assert_eq!(h.step(&mut enemy, 0.0), Step::Keep);
            assert!(enemy.is_descending());
        }
        h.step(&mut enemy, 0.0);
        assert!(!enemy.is_descending());
        assert_eq!(enemy.speed, ENEMY_PATROL_SPEED);
        assert_eq!(enemy.velocity.x, -ENEMY_PATROL_SPEED);
        assert_eq!(enemy.body.pos.y, 140.0 - ENEMY_DESCENT_HOP);

        // The hop happens once; y stays put while patrolling
        for _ in 0..200 {
            h.step(&mut enemy, 0.0);
            assert_eq!(enemy.body.pos.y, 140.0 - ENEMY_DESCENT_HOP);
        }
    }

    #[test]
    fn test_patrol_reverses_at_band_edges() {
        let mut h = Harness::new();
        let mut enemy = Enemy::new(SIZE);
        enemy.spawn(Vec2::new(100.0, 0.0), 2.0);
        let (left, right) = enemy.patrol_band();

        let mut min_x = f32::MAX;
        let mut max_x = f32::MIN;
        for _ in 0..2000 {
            h.step(&mut enemy, 0.0);
            min_x = min_x.min(enemy.body.pos.x);
            max_x = max_x.max(enemy.body.pos.x);
        }
        assert!(min_x >= left - ENEMY_PATROL_SPEED);
        assert!(max_x <= right + SIZE.x + ENEMY_PATROL_SPEED);
        // It actually travelled both ways
        assert!(min_x <= left);
        assert!(max_x >= right + SIZE.x);
    }

    #[test]
    fn test_colliding_enemy_scores_and_expires() {
        let mut h = Harness::new();
        let mut enemy = Enemy::new(SIZE);
        enemy.spawn(Vec2::new(100.0, 50.0), 2.0);
        enemy.body.colliding = true;

        assert_eq!(h.step(&mut enemy, 1.0), Step::Expire);
        assert_eq!(h.score, ENEMY_POINTS);
        assert!(matches!(h.events[..], [GameEvent::EnemyDestroyed { .. }]));
        // Dying enemies never fire
        assert_eq!(h.bullets.alive_count(), 0);
        assert_eq!(h.renderer.drawn(Sprite::Enemy).count(), 0);
    }

    #[test]
    fn test_fires_from_muzzle() {
        let mut h = Harness::new();
        let mut enemy = Enemy::new(SIZE);
        enemy.spawn(Vec2::new(100.0, 50.0), 2.0);

        h.step(&mut enemy, 1.0);
        assert_eq!(h.bullets.alive_count(), 1);
        let bullet = &h.bullets.alive()[0];
        assert_eq!(bullet.body.pos, Vec2::new(100.0 + SIZE.x / 2.0, 52.0 + SIZE.y));
        assert_eq!(bullet.speed, -ENEMY_BULLET_SPEED);
    }

    #[test]
    fn test_never_fires_at_zero_chance() {
        let mut h = Harness::new();
        let mut enemy = Enemy::new(SIZE);
        enemy.spawn(Vec2::new(100.0, 50.0), 2.0);
        for _ in 0..500 {
            h.step(&mut enemy, 0.0);
        }
        assert_eq!(h.bullets.alive_count(), 0);
    }

    #[test]
    fn test_default_chance_fires_about_one_percent() {
        let mut h = Harness::new();
        let mut enemy = Enemy::new(SIZE);
        enemy.spawn(Vec2::new(100.0, 50.0), 2.0);

        let frames = 20_000;
        let mut shots = 0;
        for _ in 0..frames {
            h.step(&mut enemy, ENEMY_FIRE_CHANCE);
            shots += h.bullets.alive_count();
            h.bullets.reset();
        }
        // Expected 200, standard deviation about 14
        assert!((140..=260).contains(&shots), "{shots} shots in {frames} frames");
    }
}
