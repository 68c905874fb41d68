//! Game state and core simulation types
//!
//! Everything a session needs to replay deterministically lives here; the
//! random stream is owned by the caller and passed into `tick`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::pool::{Entity, EntityPool};
use super::spawn::SpawnScheduler;
use crate::consts::*;
use crate::{angle_degrees, distance};

/// Which of the two play modes a session runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Kill a fixed number of enemies
    Classic,
    /// Kill as many as possible before the clock runs out
    TimeTrial,
}

impl GameMode {
    /// Phase entered when a session of this mode starts
    pub fn playing_phase(self) -> GamePhase {
        match self {
            GameMode::Classic => GamePhase::PlayingClassic,
            GameMode::TimeTrial => GamePhase::PlayingTimeTrial,
        }
    }
}

/// Top-level phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    PlayingClassic,
    PlayingTimeTrial,
    /// Player died
    GameOver,
    /// Classic kill target reached
    Victory,
    /// Time trial clock ran out
    TimeTrialResults,
}

impl GamePhase {
    /// Mode being played, if this is a play phase
    pub fn mode(self) -> Option<GameMode> {
        match self {
            GamePhase::PlayingClassic => Some(GameMode::Classic),
            GamePhase::PlayingTimeTrial => Some(GameMode::TimeTrial),
            _ => None,
        }
    }

    pub fn is_playing(self) -> bool {
        self.mode().is_some()
    }

    /// Game over, victory and results screens
    pub fn is_end_screen(self) -> bool {
        matches!(
            self,
            GamePhase::GameOver | GamePhase::Victory | GamePhase::TimeTrialResults
        )
    }
}

/// The player's sprite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner of the sprite
    pub pos: Vec2,
    pub size: Vec2,
    pub health: i32,
    pub max_health: i32,
    pub base_speed: f32,
    pub speed: f32,
    pub has_speed_boost: bool,
    /// Seconds of boost left
    pub speed_boost_timer: f32,
    /// Facing, in degrees
    pub rotation: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y)
    }
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::splat(PLAYER_SIZE),
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            base_speed: PLAYER_BASE_SPEED,
            speed: PLAYER_BASE_SPEED,
            has_speed_boost: false,
            speed_boost_timer: 0.0,
            rotation: 0.0,
        }
    }

    /// Start-of-session reset. Rotation is kept; it is purely visual.
    pub fn reset(&mut self, x: f32, y: f32) {
        self.pos = Vec2::new(x, y);
        self.health = self.max_health;
        self.speed = self.base_speed;
        self.speed_boost_timer = 0.0;
        self.has_speed_boost = false;
    }

    /// Tick down the speed boost
    pub fn update(&mut self, dt: f32) {
        if self.has_speed_boost {
            self.speed_boost_timer -= dt;
            if self.speed_boost_timer <= 0.0 {
                self.has_speed_boost = false;
                self.speed = self.base_speed;
            }
        }
    }

    /// Move along `axis` and clamp to the field
    ///
    /// The axis is normalized first so diagonal movement is not faster.
    pub fn apply_movement(&mut self, axis: Vec2, dt: f32) {
        let dir = axis.normalize_or_zero();
        self.pos += dir * self.speed * dt;
        self.clamp_to_field();
    }

    pub fn clamp_to_field(&mut self) {
        self.pos.x = self.pos.x.clamp(0.0, FIELD_WIDTH - self.size.x);
        self.pos.y = self.pos.y.clamp(0.0, FIELD_HEIGHT - self.size.y);
    }

    /// Face `target` unless it sits inside the dead zone
    pub fn rotate_towards(&mut self, target: Vec2) {
        let center = self.center();
        if distance(target, center) > AIM_DEAD_ZONE {
            self.rotation = angle_degrees(target - center);
        }
    }

    pub fn take_damage(&mut self, damage: i32) {
        self.health = self.health.saturating_sub(damage).max(0);
    }

    pub fn heal(&mut self, amount: i32) {
        self.health = self.health.saturating_add(amount).min(self.max_health);
    }

    /// Boost speed; re-triggering restarts the timer rather than extending it
    pub fn apply_speed_boost(&mut self) {
        self.has_speed_boost = true;
        self.speed = self.base_speed * SPEED_BOOST_MULTIPLIER;
        self.speed_boost_timer = SPEED_BOOST_DURATION;
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn health_fraction(&self) -> f32 {
        self.health as f32 / self.max_health as f32
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// A projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    /// Centre of the projectile
    pub pos: Vec2,
    pub vel: Vec2,
    pub active: bool,
}

impl Bullet {
    /// Fire from `origin` along `direction` (expected to be a unit vector)
    pub fn new(origin: Vec2, direction: Vec2) -> Self {
        Self {
            pos: origin,
            vel: direction * BULLET_SPEED,
            active: true,
        }
    }

    /// Bullet from `origin` heading for `target`; `None` when they coincide
    pub fn aimed(origin: Vec2, target: Vec2) -> Option<Self> {
        let dir = (target - origin).normalize_or_zero();
        if dir == Vec2::ZERO {
            return None;
        }
        Some(Self::new(origin, dir))
    }

    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.pos += self.vel * dt;
        if self.pos.x < 0.0
            || self.pos.x > FIELD_WIDTH
            || self.pos.y < 0.0
            || self.pos.y > FIELD_HEIGHT
        {
            self.active = false;
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, BULLET_RADIUS)
    }
}

impl Entity for Bullet {
    fn is_active(&self) -> bool {
        self.active
    }
}

/// Per-kind enemy constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyProfile {
    pub min_speed: f32,
    pub max_speed: f32,
    pub damage: i32,
    /// Relative spawn weight (out of the sum over all kinds)
    pub spawn_weight: u32,
}

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Slow, light hitter
    Walker,
    /// Fast, heavy hitter
    Brute,
}

const WALKER: EnemyProfile = EnemyProfile {
    min_speed: 80.0,
    max_speed: 120.0,
    damage: 15,
    spawn_weight: 60,
};

const BRUTE: EnemyProfile = EnemyProfile {
    min_speed: 120.0,
    max_speed: 180.0,
    damage: 30,
    spawn_weight: 40,
};

impl EnemyKind {
    pub const ALL: [EnemyKind; 2] = [EnemyKind::Walker, EnemyKind::Brute];

    pub fn profile(self) -> &'static EnemyProfile {
        match self {
            EnemyKind::Walker => &WALKER,
            EnemyKind::Brute => &BRUTE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EnemyKind::Walker => "walker",
            EnemyKind::Brute => "brute",
        }
    }
}

/// A chasing enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    /// Top-left corner of the sprite
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub kind: EnemyKind,
    pub damage: i32,
    pub active: bool,
}

impl Enemy {
    pub fn new(pos: Vec2, kind: EnemyKind, speed: f32) -> Self {
        Self {
            pos,
            size: Vec2::splat(ENEMY_SIZE),
            speed,
            kind,
            damage: kind.profile().damage,
            active: true,
        }
    }

    /// Step straight toward the player's centre
    pub fn update(&mut self, dt: f32, player_center: Vec2) {
        if !self.active {
            return;
        }
        let to_player = player_center - self.center();
        let dist = to_player.length();
        if dist > 0.0 {
            self.pos += to_player / dist * self.speed * dt;
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

impl Entity for Enemy {
    fn is_active(&self) -> bool {
        self.active
    }
}

/// What a powerup does on pickup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerupEffect {
    Heal(i32),
    SpeedBoost,
}

impl PowerupEffect {
    pub fn apply(self, player: &mut Player) {
        match self {
            PowerupEffect::Heal(amount) => player.heal(amount),
            PowerupEffect::SpeedBoost => player.apply_speed_boost(),
        }
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerupKind {
    HealthBoost,
    SpeedBoost,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 2] = [PowerupKind::HealthBoost, PowerupKind::SpeedBoost];

    pub fn effect(self) -> PowerupEffect {
        match self {
            PowerupKind::HealthBoost => PowerupEffect::Heal(POWERUP_HEAL_AMOUNT),
            PowerupKind::SpeedBoost => PowerupEffect::SpeedBoost,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PowerupKind::HealthBoost => "health",
            PowerupKind::SpeedBoost => "speed",
        }
    }
}

/// A timed pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    /// Top-left corner of the sprite
    pub pos: Vec2,
    pub kind: PowerupKind,
    pub active: bool,
    /// Seconds until it disappears
    pub lifetime: f32,
}

impl Powerup {
    pub fn new(pos: Vec2, kind: PowerupKind) -> Self {
        Self {
            pos,
            kind,
            active: true,
            lifetime: POWERUP_LIFETIME,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.lifetime -= dt;
        if self.lifetime <= 0.0 {
            self.active = false;
        }
    }

    /// Render scale; pulses with remaining lifetime, no gameplay effect
    pub fn pulse_scale(&self) -> f32 {
        let pulse = (self.lifetime * 5.0).sin() * 0.02 + 1.0;
        0.12 * pulse
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(POWERUP_SIZE))
    }
}

impl Entity for Powerup {
    fn is_active(&self) -> bool {
        self.active
    }
}

/// Per-session counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    pub classic_kills: u32,
    pub time_trial_kills: u32,
    /// Countdown for time trial (seconds)
    pub time_remaining: f32,
    /// Filled in once when the time trial ends
    pub xp_earned: u32,
    pub results_message: String,
}

impl Default for SessionStats {
    fn default() -> Self {
        Self {
            classic_kills: 0,
            time_trial_kills: 0,
            time_remaining: TIME_TRIAL_DURATION,
            xp_earned: 0,
            results_message: String::new(),
        }
    }
}

impl SessionStats {
    /// Count a kill for `mode`, returning the new total
    pub fn register_kill(&mut self, mode: GameMode) -> u32 {
        let counter = match mode {
            GameMode::Classic => &mut self.classic_kills,
            GameMode::TimeTrial => &mut self.time_trial_kills,
        };
        *counter += 1;
        *counter
    }

    pub fn kills(&self, mode: GameMode) -> u32 {
        match mode {
            GameMode::Classic => self.classic_kills,
            GameMode::TimeTrial => self.time_trial_kills,
        }
    }

    /// Settle the time trial: XP and the results screen text
    pub fn finish_time_trial(&mut self) {
        self.xp_earned = time_trial_xp(self.time_trial_kills, TIME_TRIAL_DURATION);
        self.results_message = format!(
            "TIME'S UP!\n\nKills: {}\nXP Earned: {}",
            self.time_trial_kills, self.xp_earned
        );
    }
}

/// XP for a finished time trial
pub fn time_trial_xp(kills: u32, duration_secs: f32) -> u32 {
    kills * XP_PER_KILL + duration_secs as u32 * XP_PER_SECOND
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub player: Player,
    pub bullets: EntityPool<Bullet>,
    pub enemies: EntityPool<Enemy>,
    pub powerups: EntityPool<Powerup>,
    pub session: SessionStats,
    pub spawner: SpawnScheduler,
    /// Frames simulated since startup
    pub time_ticks: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Fresh state sitting on the main menu
    pub fn new() -> Self {
        Self {
            phase: GamePhase::MainMenu,
            player: Player::default(),
            bullets: EntityPool::new(),
            enemies: EntityPool::with_capacity(50),
            powerups: EntityPool::with_capacity(10),
            session: SessionStats::default(),
            spawner: SpawnScheduler::default(),
            time_ticks: 0,
        }
    }

    /// Wipe everything session-scoped
    pub fn reset_session(&mut self) {
        self.player.reset(PLAYER_SPAWN_X, PLAYER_SPAWN_Y);
        self.bullets.clear();
        self.enemies.clear();
        self.powerups.clear();
        self.session = SessionStats::default();
        self.spawner.reset();
    }

    /// Drop entities deactivated this tick
    pub fn compact(&mut self) {
        self.bullets.compact();
        self.enemies.compact();
        self.powerups.compact();
    }
}
