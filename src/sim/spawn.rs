//! Spawn scheduling for enemies and powerups
//!
//! Two repeating timers. Each accumulates frame time and fires when it
//! reaches its delay; the delay is subtracted so no time is lost to drift.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use super::state::{Enemy, EnemyKind, GameMode, GameState, Powerup, PowerupKind};
use super::tick::GameEvent;
use crate::consts::*;

/// A repeating countdown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimer {
    pub elapsed: f32,
    pub delay: f32,
}

impl SpawnTimer {
    pub fn new(delay: f32) -> Self {
        Self {
            elapsed: 0.0,
            delay,
        }
    }

    /// Advance by `dt`. Returns true (and consumes one delay) if the timer
    /// fires. While `allowed` is false the timer holds at the delay so it
    /// fires as soon as spawning is allowed again, without a backlog.
    pub fn advance(&mut self, dt: f32, allowed: bool) -> bool {
        self.elapsed += dt;
        if self.elapsed < self.delay {
            return false;
        }
        if !allowed {
            self.elapsed = self.delay;
            return false;
        }
        self.elapsed -= self.delay;
        // One spawn per frame at most
        if self.elapsed >= self.delay {
            self.elapsed = 0.0;
        }
        true
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

/// Field edge an enemy walks in from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    pub fn from_index(i: u32) -> Self {
        Self::ALL[(i as usize) % Self::ALL.len()]
    }
}

/// Enemy and powerup spawn timers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnScheduler {
    pub enemy_timer: SpawnTimer,
    pub powerup_timer: SpawnTimer,
}

impl Default for SpawnScheduler {
    fn default() -> Self {
        Self {
            enemy_timer: SpawnTimer::new(ENEMY_SPAWN_DELAY),
            powerup_timer: SpawnTimer::new(POWERUP_SPAWN_DELAY),
        }
    }
}

impl SpawnScheduler {
    pub fn reset(&mut self) {
        self.enemy_timer.reset();
        self.powerup_timer.reset();
    }
}

/// Classic mode stops spawning once the live horde plus the dead reach the
/// kill target; time trial never stops.
pub fn enemy_spawn_allowed(mode: GameMode, live_enemies: usize, kills: u32) -> bool {
    match mode {
        GameMode::Classic => (live_enemies as u32 + kills) < CLASSIC_TOTAL_ENEMIES,
        GameMode::TimeTrial => true,
    }
}

/// Pick an enemy kind by the profile spawn weights
pub fn roll_enemy_kind(rng: &mut impl RandomSource) -> EnemyKind {
    let total: u32 = EnemyKind::ALL.iter().map(|k| k.profile().spawn_weight).sum();
    let mut roll = rng.range_u32(0, total - 1);
    for kind in EnemyKind::ALL {
        let weight = kind.profile().spawn_weight;
        if roll < weight {
            return kind;
        }
        roll -= weight;
    }
    EnemyKind::Walker
}

/// Random point on the field perimeter
pub fn roll_edge_position(rng: &mut impl RandomSource) -> Vec2 {
    match Edge::from_index(rng.range_u32(0, 3)) {
        Edge::Top => Vec2::new(rng.range_f32(0.0, FIELD_WIDTH), 0.0),
        Edge::Right => Vec2::new(FIELD_WIDTH, rng.range_f32(0.0, FIELD_HEIGHT)),
        Edge::Bottom => Vec2::new(rng.range_f32(0.0, FIELD_WIDTH), FIELD_HEIGHT),
        Edge::Left => Vec2::new(0.0, rng.range_f32(0.0, FIELD_HEIGHT)),
    }
}

pub fn spawn_enemy(rng: &mut impl RandomSource) -> Enemy {
    let pos = roll_edge_position(rng);
    let kind = roll_enemy_kind(rng);
    let profile = kind.profile();
    let speed = rng.range_f32(profile.min_speed, profile.max_speed);
    Enemy::new(pos, kind, speed)
}

pub fn spawn_powerup(rng: &mut impl RandomSource) -> Powerup {
    let x = rng.range_f32(POWERUP_SPAWN_MARGIN, FIELD_WIDTH - POWERUP_SPAWN_MARGIN);
    let y = rng.range_f32(POWERUP_SPAWN_MARGIN, FIELD_HEIGHT - POWERUP_SPAWN_MARGIN);
    let kind = PowerupKind::ALL[rng.range_u32(0, 1) as usize];
    Powerup::new(Vec2::new(x, y), kind)
}

/// Run both spawn timers for one frame
pub fn run_spawns(
    state: &mut GameState,
    dt: f32,
    rng: &mut impl RandomSource,
    events: &mut Vec<GameEvent>,
) {
    let Some(mode) = state.phase.mode() else {
        return;
    };

    let allowed = enemy_spawn_allowed(
        mode,
        state.enemies.active_count(),
        state.session.kills(mode),
    );
    if state.spawner.enemy_timer.advance(dt, allowed) {
        let enemy = spawn_enemy(rng);
        log::debug!(
            "Spawned {} at ({:.0}, {:.0}) speed {:.1}",
            enemy.kind.name(),
            enemy.pos.x,
            enemy.pos.y,
            enemy.speed
        );
        events.push(GameEvent::EnemySpawned(enemy.kind));
        state.enemies.push(enemy);
    }

    if state.spawner.powerup_timer.advance(dt, true) {
        let powerup = spawn_powerup(rng);
        log::debug!(
            "Spawned {} powerup at ({:.0}, {:.0})",
            powerup.kind.name(),
            powerup.pos.x,
            powerup.pos.y
        );
        events.push(GameEvent::PowerupSpawned(powerup.kind));
        state.powerups.push(powerup);
    }
}
