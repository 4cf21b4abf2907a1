//! Per-frame simulation tick
//!
//! One call advances the game by exactly one frame: rebuild the broad phase,
//! flag collisions, top up the enemy wave, then move everything in a fixed
//! order (background, ship, player bullets, enemies, enemy bullets).

use glam::Vec2;

use super::enemy::EnemyContext;
use super::entity::Entity;
use super::ship::ShipContext;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::error::SimResult;
use crate::platform::InputState;
use crate::renderer::Renderer;

/// What the host should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Schedule the next frame
    Continue,
    /// The ship is gone; stop scheduling frames
    GameOver,
}

/// Advance the game state by one frame
pub fn tick(
    state: &mut GameState,
    input: &InputState,
    renderer: &mut dyn Renderer,
) -> SimResult<FrameOutcome> {
    if state.phase == GamePhase::GameOver {
        return Ok(FrameOutcome::GameOver);
    }

    // Broad and narrow phase on last frame's positions
    if let Err(err) = state.rebuild_index() {
        state.quadtree.clear();
        return Err(err.into());
    }
    state.resolve_collisions()?;
    state.frame += 1;

    if state.enemies.alive_count() == 0 {
        spawn_wave(state);
    }

    let was_alive = state.ship.is_alive();
    if was_alive {
        advance_entities(state, input, renderer);
    }

    if !state.ship.is_alive() {
        if !was_alive {
            state.events.push(GameEvent::ShipDestroyed);
        }
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over on frame {}: score {}, wave {}",
            state.frame,
            state.score,
            state.wave
        );
        return Ok(FrameOutcome::GameOver);
    }

    Ok(FrameOutcome::Continue)
}

fn advance_entities(state: &mut GameState, input: &InputState, renderer: &mut dyn Renderer) {
    let GameState {
        settings,
        rng,
        score,
        ship,
        bullets,
        enemies,
        enemy_bullets,
        background,
        events,
        canvas,
        ..
    } = state;
    let canvas_height = canvas.y;

    background.advance(renderer);

    ship.advance(
        input,
        &mut ShipContext {
            bullets: &mut *bullets,
            events: &mut *events,
            renderer: &mut *renderer,
            canvas: *canvas,
        },
    );

    bullets.advance_all(|bullet| bullet.advance(canvas_height, &mut *renderer));

    let mut ctx = EnemyContext {
        enemy_bullets: &mut *enemy_bullets,
        rng,
        score,
        events,
        renderer: &mut *renderer,
        fire_chance: settings.enemy_fire_chance,
        bullet_speed: settings.enemy_bullet_speed,
    };
    enemies.advance_all(|enemy| enemy.advance(&mut ctx));

    enemy_bullets.advance_all(|bullet| bullet.advance(canvas_height, &mut *renderer));
}

/// Spawn a full wave: three rows of six, the lowest row just above the screen
pub fn spawn_wave(state: &mut GameState) {
    let size = state.enemy_size;
    let column_step = size.x + WAVE_COLUMN_GAP;
    let row_step = -size.y * WAVE_ROW_SPACING;
    let speed = state.settings.enemy_speed;

    let mut x = WAVE_ORIGIN_X;
    let mut y = -size.y;
    for i in 1..=WAVE_SIZE {
        state.enemies.acquire(Vec2::new(x, y), speed);
        x += column_step;
        if i % WAVE_COLUMNS == 0 {
            x = WAVE_ORIGIN_X;
            y += row_step;
        }
    }

    state.wave += 1;
    state.events.push(GameEvent::WaveSpawned { wave: state.wave });
    log::debug!(
        "Wave {} spawned ({} enemies alive)",
        state.wave,
        state.enemies.alive_count()
    );
}
