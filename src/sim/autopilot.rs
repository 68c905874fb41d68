//! Idle/demo mode AI
//!
//! Produces inputs for a play frame: aim at the closest enemy, fire on a
//! fixed cadence, back away from anything too close, otherwise wander toward
//! the nearest powerup.

use glam::Vec2;

use super::state::GameState;
use super::tick::TickInput;
use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};

/// Fire once every this many ticks
const FIRE_INTERVAL_TICKS: u64 = 10;
/// Enemies closer than this make the autopilot retreat
const DANGER_RADIUS: f32 = 160.0;

/// Replace the movement, aim and fire parts of `input`
pub fn drive(state: &GameState, input: &TickInput) -> TickInput {
    let mut out = input.clone();
    let me = state.player.center();

    let nearest_enemy = state
        .enemies
        .active()
        .map(|e| e.center())
        .min_by(|a, b| {
            a.distance_squared(me)
                .partial_cmp(&b.distance_squared(me))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    match nearest_enemy {
        Some(target) => {
            out.pointer = target;
            out.shoot = state.time_ticks % FIRE_INTERVAL_TICKS == 0;
        }
        None => {
            out.pointer = me + Vec2::X * 100.0;
            out.shoot = false;
        }
    }

    out.move_axis = match nearest_enemy {
        Some(enemy) if enemy.distance(me) < DANGER_RADIUS => retreat(me, enemy),
        _ => state
            .powerups
            .active()
            .map(|p| p.pos)
            .min_by(|a, b| {
                a.distance_squared(me)
                    .partial_cmp(&b.distance_squared(me))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|p| (p - me).normalize_or_zero())
            .unwrap_or(Vec2::ZERO),
    };

    out
}

/// Away from the threat, bent toward the field centre so the player does
/// not pin itself in a corner
fn retreat(me: Vec2, threat: Vec2) -> Vec2 {
    let away = (me - threat).normalize_or_zero();
    let to_center = (Vec2::new(FIELD_WIDTH, FIELD_HEIGHT) * 0.5 - me).normalize_or_zero();
    (away + to_center * 0.5).normalize_or_zero()
}
