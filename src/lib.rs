//! Hunt the Zombies - a top-down arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, state machine)
//! - `ui`: Menu buttons and HUD text
//! - `audio`: Sound effect identifiers and the playback seam
//! - `platform`: Host abstraction (clock, input, presentation) and the headless host
//! - `settings`: Runtime settings loaded from JSON

pub mod audio;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod ui;

pub use settings::{DemoMode, Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Play-field dimensions
    pub const FIELD_WIDTH: f32 = 1600.0;
    pub const FIELD_HEIGHT: f32 = 900.0;

    /// Upper bound on a single frame delta (seconds) after a stall
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Player defaults
    pub const PLAYER_SPAWN_X: f32 = 800.0;
    pub const PLAYER_SPAWN_Y: f32 = 450.0;
    pub const PLAYER_SIZE: f32 = 20.0; // 50px sprite at 0.4 scale
    pub const PLAYER_MAX_HEALTH: i32 = 100;
    pub const PLAYER_BASE_SPEED: f32 = 300.0;
    /// Aim rotation is suppressed when the pointer is this close to the player
    pub const AIM_DEAD_ZONE: f32 = 30.0;

    /// Speed boost
    pub const SPEED_BOOST_MULTIPLIER: f32 = 1.5;
    pub const SPEED_BOOST_DURATION: f32 = 5.0;

    /// Bullets
    pub const BULLET_SPEED: f32 = 600.0;
    pub const BULLET_RADIUS: f32 = 4.0;

    /// Enemies
    pub const ENEMY_SIZE: f32 = 10.0; // 40px sprite at 0.25 scale
    pub const ENEMY_SPAWN_DELAY: f32 = 1.5;

    /// Powerups
    pub const POWERUP_SIZE: f32 = 3.6; // 30px sprite at 0.12 scale
    pub const POWERUP_SPAWN_DELAY: f32 = 7.0;
    pub const POWERUP_LIFETIME: f32 = 10.0;
    pub const POWERUP_HEAL_AMOUNT: i32 = 20;
    /// Powerups appear at least this far inside the field edges
    pub const POWERUP_SPAWN_MARGIN: f32 = 100.0;

    /// Classic mode kill target
    pub const CLASSIC_TOTAL_ENEMIES: u32 = 30;

    /// Time trial
    pub const TIME_TRIAL_DURATION: f32 = 60.0;
    pub const XP_PER_KILL: u32 = 10;
    pub const XP_PER_SECOND: u32 = 5;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// Unit vector in the direction of `v`, or zero for a zero-length vector
#[inline]
pub fn normalize(v: Vec2) -> Vec2 {
    v.normalize_or_zero()
}

/// Angle of `v` in degrees (screen coordinates, y down)
#[inline]
pub fn angle_degrees(v: Vec2) -> f32 {
    v.y.atan2(v.x).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        assert!((distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)) - 5.0).abs() < 1e-6);
        assert_eq!(distance(Vec2::new(7.0, 7.0), Vec2::new(7.0, 7.0)), 0.0);
    }

    #[test]
    fn test_normalize_zero_stays_zero() {
        assert_eq!(normalize(Vec2::ZERO), Vec2::ZERO);
        let n = normalize(Vec2::new(10.0, 0.0));
        assert!((n.x - 1.0).abs() < 1e-6 && n.y.abs() < 1e-6);
    }

    #[test]
    fn test_angle_degrees() {
        assert!((angle_degrees(Vec2::new(0.0, 1.0)) - 90.0).abs() < 1e-4);
        assert!((angle_degrees(Vec2::new(-1.0, 0.0)).abs() - 180.0).abs() < 1e-4);
    }
}
