//! Collision detection and resolution
//!
//! Everything collides as an axis-aligned box. Pairs are brute-forced every
//! frame; entity counts stay in the tens.

use glam::Vec2;

use super::state::{Enemy, GameState};
use super::tick::GameEvent;

/// Axis-aligned bounding box (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn from_center(center: Vec2, half_extent: f32) -> Self {
        Self {
            min: center - Vec2::splat(half_extent),
            size: Vec2::splat(half_extent * 2.0),
        }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict overlap; boxes that only share an edge do not intersect
    pub fn intersects(&self, other: &Aabb) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x
            && other.min.x < a_max.x
            && self.min.y < b_max.y
            && other.min.y < a_max.y
    }

    /// Point containment, inclusive of the top-left edge
    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.max();
        point.x >= self.min.x && point.x < max.x && point.y >= self.min.y && point.y < max.y
    }
}

/// Enemies touching the player deal damage once and are consumed
pub fn resolve_enemy_player(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let player_box = state.player.bounds();
    for enemy in state.enemies.iter_mut() {
        if enemy.active && enemy.bounds().intersects(&player_box) {
            state.player.take_damage(enemy.damage);
            enemy.active = false;
            events.push(GameEvent::PlayerHit {
                kind: enemy.kind,
                damage: enemy.damage,
                health: state.player.health,
            });
        }
    }
}

/// Powerups touching the player apply their effect and are consumed
pub fn resolve_powerup_player(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let player_box = state.player.bounds();
    for powerup in state.powerups.iter_mut() {
        if powerup.active && powerup.bounds().intersects(&player_box) {
            powerup.kind.effect().apply(&mut state.player);
            powerup.active = false;
            events.push(GameEvent::PowerupCollected(powerup.kind));
        }
    }
}

/// Bullets kill the first live enemy they overlap
///
/// Both flags are checked before every comparison, so a bullet kills at most
/// one enemy and an enemy dies to at most one bullet per frame.
pub fn resolve_bullet_enemy(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let Some(mode) = state.phase.mode() else {
        return;
    };

    let enemies = state.enemies.as_mut_slice();
    for bullet in state.bullets.iter_mut() {
        if !bullet.active {
            continue;
        }
        let bullet_box = bullet.bounds();
        if let Some(enemy) = first_hit(enemies, &bullet_box) {
            bullet.active = false;
            enemy.active = false;
            let kills = state.session.register_kill(mode);
            events.push(GameEvent::EnemyKilled {
                kind: enemy.kind,
                kills,
            });
        }
    }
}

fn first_hit<'a>(enemies: &'a mut [Enemy], bullet_box: &Aabb) -> Option<&'a mut Enemy> {
    enemies
        .iter_mut()
        .find(|e| e.active && e.bounds().intersects(bullet_box))
}

/// Run all collision passes in gameplay order
pub fn resolve_collisions(state: &mut GameState, events: &mut Vec<GameEvent>) {
    resolve_enemy_player(state, events);
    resolve_powerup_player(state, events);
    resolve_bullet_enemy(state, events);
}
