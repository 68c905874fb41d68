//! Per-frame simulation tick
//!
//! One call per rendered frame with the (already clamped) frame delta.
//! Order inside a play frame: input, entity updates, spawning, collisions,
//! compaction, countdown, phase transitions.

use glam::Vec2;

use super::autopilot;
use super::collision::resolve_collisions;
use super::fsm::{self, Trigger};
use super::rng::RandomSource;
use super::spawn::run_spawns;
use super::state::{Bullet, EnemyKind, GameMode, GamePhase, GameState, PowerupKind};

/// Input sampled for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement axes from the keyboard, each in [-1, 1]
    pub move_axis: Vec2,
    /// Pointer position in field coordinates
    pub pointer: Vec2,
    /// Left click this frame (fires during play)
    pub shoot: bool,
    /// Mode picked on the main menu this frame
    pub start: Option<GameMode>,
    /// Dismiss the end screen
    pub continue_pressed: bool,
    /// Idle/demo mode - the autopilot plays
    pub idle_mode: bool,
}

/// Things that happened during a tick, for sound and logging
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    ShotFired,
    EnemySpawned(EnemyKind),
    PowerupSpawned(PowerupKind),
    PlayerHit {
        kind: EnemyKind,
        damage: i32,
        health: i32,
    },
    PowerupCollected(PowerupKind),
    EnemyKilled {
        kind: EnemyKind,
        kills: u32,
    },
    PhaseChanged {
        from: GamePhase,
        to: GamePhase,
    },
}

/// Advance the game by one frame
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    dt: f32,
    rng: &mut impl RandomSource,
) -> Vec<GameEvent> {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    let mut events = Vec::new();
    state.time_ticks += 1;

    match state.phase {
        GamePhase::MainMenu => {
            if let Some(mode) = input.start {
                fsm::fire(state, Trigger::start(mode), &mut events);
            }
        }
        GamePhase::PlayingClassic | GamePhase::PlayingTimeTrial => {
            if input.idle_mode {
                let input = autopilot::drive(state, input);
                play_frame(state, &input, dt, rng, &mut events);
            } else {
                play_frame(state, input, dt, rng, &mut events);
            }
        }
        GamePhase::GameOver | GamePhase::Victory | GamePhase::TimeTrialResults => {
            if input.continue_pressed {
                fsm::fire(state, Trigger::Continue, &mut events);
            }
        }
    }

    events
}

fn play_frame(
    state: &mut GameState,
    input: &TickInput,
    dt: f32,
    rng: &mut impl RandomSource,
    events: &mut Vec<GameEvent>,
) {
    if input.shoot {
        if let Some(bullet) = Bullet::aimed(state.player.center(), input.pointer) {
            state.bullets.push(bullet);
            events.push(GameEvent::ShotFired);
        }
    }

    // Player
    state.player.apply_movement(input.move_axis, dt);
    state.player.update(dt);
    state.player.rotate_towards(input.pointer);

    // Everything else chases or drifts
    for bullet in state.bullets.iter_mut() {
        bullet.update(dt);
    }
    let player_center = state.player.center();
    for enemy in state.enemies.iter_mut() {
        enemy.update(dt, player_center);
    }
    for powerup in state.powerups.iter_mut() {
        powerup.update(dt);
    }

    run_spawns(state, dt, rng, events);
    resolve_collisions(state, events);
    state.compact();

    if state.phase == GamePhase::PlayingTimeTrial {
        state.session.time_remaining -= dt;
    }

    if let Some(trigger) = fsm::evaluate(state) {
        fsm::fire(state, trigger, events);
    }
}
