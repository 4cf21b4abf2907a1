//! The player ship
//!
//! A single persistent entity steered by held intents. Movement is one axis
//! per frame with priority left, right, up, down, and the ship is confined to
//! the lower quarter of the screen. Firing spawns a bullet pair from the two
//! wing guns once the cooldown has elapsed.

use glam::Vec2;

use super::bullet::Bullet;
use super::entity::{Body, Entity, Tag};
use super::pool::Pool;
use super::state::GameEvent;
use crate::assets::Sprite;
use crate::consts::*;
use crate::platform::{InputState, Intent};
use crate::renderer::Renderer;

/// Everything the ship touches besides itself during one advance
pub struct ShipContext<'a> {
    pub bullets: &'a mut Pool<Bullet>,
    pub events: &'a mut Vec<GameEvent>,
    pub renderer: &'a mut dyn Renderer,
    /// Playfield size
    pub canvas: Vec2,
}

#[derive(Debug, Clone)]
pub struct Ship {
    pub body: Body,
    /// Pixels per frame
    pub speed: f32,
    /// Upward speed of fired bullets
    pub bullet_speed: f32,
    /// Frames between shots
    pub fire_rate: u32,
    /// Frames since the last shot
    counter: u32,
    start: Vec2,
}

impl Ship {
    /// Build a live ship at `start`
    pub fn new(start: Vec2, size: Vec2, speed: f32, fire_rate: u32, bullet_speed: f32) -> Self {
        let mut ship = Self {
            body: Body::new(Tag::Ship, size),
            speed,
            bullet_speed,
            fire_rate,
            counter: 0,
            start,
        };
        ship.arm();
        ship
    }

    /// Spawn position for a ship of `size` on a `canvas`-sized playfield
    pub fn start_position(canvas: Vec2, size: Vec2) -> Vec2 {
        Vec2::new(canvas.x / 2.0 - size.x, canvas.y / 4.0 * 3.0 + size.y * 2.0)
    }

    /// Return to the start position, alive, with the cooldown reset
    pub fn arm(&mut self) {
        self.body.revive(self.start);
        self.counter = 0;
    }

    /// Where the two bullets of a volley spawn
    pub fn gun_positions(&self) -> (Vec2, Vec2) {
        let center_x = self.body.pos.x + self.body.size.x / 2.0;
        let y = self.body.pos.y;
        (
            Vec2::new(center_x - SHIP_GUN_SPREAD, y),
            Vec2::new(center_x + SHIP_GUN_SPREAD, y),
        )
    }

    pub fn advance(&mut self, input: &InputState, ctx: &mut ShipContext<'_>) {
        self.counter = self.counter.saturating_add(1);

        if input.any_direction() {
            ctx.renderer.clear_region(self.body.rect());
            self.steer(input, ctx.canvas);
        }

        if self.body.colliding {
            self.body.alive = false;
            ctx.events.push(GameEvent::ShipDestroyed);
            log::info!("Ship destroyed at ({:.0}, {:.0})", self.body.pos.x, self.body.pos.y);
            return;
        }

        ctx.renderer.draw_sprite(Sprite::Ship, self.body.pos);

        if input.is_held(Intent::Fire) && self.counter >= self.fire_rate {
            self.fire(ctx);
            self.counter = 0;
        }
    }

    fn steer(&mut self, input: &InputState, canvas: Vec2) {
        let pos = &mut self.body.pos;
        let size = self.body.size;

        if input.is_held(Intent::Left) {
            pos.x = (pos.x - self.speed).max(0.0);
        } else if input.is_held(Intent::Right) {
            pos.x = (pos.x + self.speed).min(canvas.x - size.x);
        } else if input.is_held(Intent::Up) {
            pos.y = (pos.y - self.speed).max(canvas.y / 4.0 * 3.0);
        } else if input.is_held(Intent::Down) {
            pos.y = (pos.y + self.speed).min(canvas.y - size.y);
        }
    }

    fn fire(&mut self, ctx: &mut ShipContext<'_>) {
        let (left, right) = self.gun_positions();
        ctx.bullets
            .acquire_two((left, self.bullet_speed), (right, self.bullet_speed));
        ctx.events.push(GameEvent::ShipFired);
    }
}

impl Entity for Ship {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::HeadlessRenderer;
    use crate::sim::bullet::BulletKind;

    const CANVAS: Vec2 = Vec2::new(600.0, 360.0);
    const SIZE: Vec2 = Vec2::new(39.0, 37.0);

    struct Harness {
        bullets: Pool<Bullet>,
        events: Vec<GameEvent>,
        renderer: HeadlessRenderer,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                bullets: Pool::new(30, || Bullet::new(BulletKind::Player, Vec2::new(6.0, 11.0))),
                events: Vec::new(),
                renderer: HeadlessRenderer::recording(),
            }
        }

        fn step(&mut self, ship: &mut Ship, input: &InputState) {
            let mut ctx = ShipContext {
                bullets: &mut self.bullets,
                events: &mut self.events,
                renderer: &mut self.renderer,
                canvas: CANVAS,
            };
            ship.advance(input, &mut ctx);
        }
    }

    fn ship_at(pos: Vec2) -> Ship {
        Ship::new(pos, SIZE, 3.0, 15, 3.0)
    }

    fn held(intents: &[Intent]) -> InputState {
        let mut input = InputState::default();
        for intent in intents {
            input.set(*intent, true);
        }
        input
    }

    #[test]
    fn test_left_clamps_at_zero() {
        let mut h = Harness::new();
        let mut ship = ship_at(Vec2::new(50.0, 300.0));
        let input = held(&[Intent::Left]);

        for _ in 0..20 {
            h.step(&mut ship, &input);
            assert!(ship.body.pos.x >= 0.0);
        }
        assert_eq!(ship.body.pos.x, 0.0);
    }

    #[test]
    fn test_right_and_vertical_clamps() {
        let mut h = Harness::new();
        let mut ship = ship_at(Vec2::new(550.0, 300.0));

        for _ in 0..50 {
            h.step(&mut ship, &held(&[Intent::Right]));
        }
        assert_eq!(ship.body.pos.x, CANVAS.x - SIZE.x);

        for _ in 0..50 {
            h.step(&mut ship, &held(&[Intent::Up]));
        }
        assert_eq!(ship.body.pos.y, 270.0);

        for _ in 0..50 {
            h.step(&mut ship, &held(&[Intent::Down]));
        }
        assert_eq!(ship.body.pos.y, CANVAS.y - SIZE.y);
    }

    #[test]
    fn test_one_axis_per_frame() {
        let mut h = Harness::new();
        let mut ship = ship_at(Vec2::new(100.0, 300.0));
        h.step(&mut ship, &held(&[Intent::Left, Intent::Up]));
        // Left wins over up
        assert_eq!(ship.body.pos, Vec2::new(97.0, 300.0));
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut h = Harness::new();
        let mut ship = ship_at(Vec2::new(100.0, 300.0));
        let input = held(&[Intent::Fire]);

        // Counter reaches the fire rate on the 15th frame
        for _ in 0..14 {
            h.step(&mut ship, &input);
        }
        assert_eq!(h.bullets.alive_count(), 0);
        h.step(&mut ship, &input);
        assert_eq!(h.bullets.alive_count(), 2);
        assert_eq!(h.events, vec![GameEvent::ShipFired]);

        // Next volley 15 frames later
        for _ in 0..14 {
            h.step(&mut ship, &input);
        }
        assert_eq!(h.bullets.alive_count(), 2);
        h.step(&mut ship, &input);
        assert_eq!(h.bullets.alive_count(), 4);
    }

    #[test]
    fn test_guns_are_symmetric() {
        let ship = ship_at(Vec2::new(100.0, 300.0));
        let (left, right) = ship.gun_positions();
        assert_eq!(left, Vec2::new(106.0, 300.0));
        assert_eq!(right, Vec2::new(133.0, 300.0));
        let center = ship.body.pos.x + SIZE.x / 2.0;
        assert_eq!(center - left.x, right.x - center);
    }

    #[test]
    fn test_collision_is_terminal() {
        let mut h = Harness::new();
        let mut ship = ship_at(Vec2::new(100.0, 300.0));
        ship.body.colliding = true;

        h.step(&mut ship, &held(&[Intent::Fire]));
        assert!(!ship.body.alive);
        assert_eq!(h.events, vec![GameEvent::ShipDestroyed]);
        assert_eq!(h.renderer.drawn(Sprite::Ship).count(), 0);

        ship.arm();
        assert!(ship.body.alive);
        assert!(!ship.body.colliding);
        assert_eq!(ship.body.pos, Vec2::new(100.0, 300.0));
    }

    #[test]
    fn test_start_position() {
        assert_eq!(Ship::start_position(CANVAS, SIZE), Vec2::new(261.0, 344.0));
    }
}
