//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Randomness only through an explicitly passed `RandomSource`
//! - Time only through the `dt` handed to `tick`
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod fsm;
pub mod pool;
pub mod rng;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, resolve_collisions};
pub use fsm::{TRANSITIONS, Trigger, next_phase};
pub use pool::{Entity, EntityPool};
pub use rng::{GameRng, RandomSource};
pub use spawn::{SpawnScheduler, SpawnTimer, enemy_spawn_allowed};
pub use state::{
    Bullet, Enemy, EnemyKind, EnemyProfile, GameMode, GamePhase, GameState, Player, Powerup,
    PowerupEffect, PowerupKind, SessionStats, time_trial_xp,
};
pub use tick::{GameEvent, TickInput, tick};
