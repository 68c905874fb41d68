//! Platform abstraction layer
//!
//! The host side of the game: a clock, an input source and a presenter feed
//! `Game`, which turns raw input into `TickInput`s, runs the simulation and
//! hands the results to rendering and audio.

pub mod headless;

use glam::Vec2;

use crate::audio::{AudioManager, AudioSink};
use crate::settings::Settings;
use crate::sim::{EnemyKind, GamePhase, GameRng, GameState, PowerupKind, TickInput, tick};
use crate::ui::{Hud, MainMenu, MenuAction, end_screen_text};

pub use headless::{FixedClock, LogPresenter, ScriptedInput};

/// Seconds since the previous frame
pub trait FrameClock {
    fn elapsed(&mut self) -> f32;
}

/// Wall-clock frame timer
pub struct SystemClock {
    last: std::time::Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            last: std::time::Instant::now(),
        }
    }
}

impl FrameClock for SystemClock {
    fn elapsed(&mut self) -> f32 {
        let now = std::time::Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt
    }
}

/// Raw input for one frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// WASD as axes, each in [-1, 1]
    pub move_axis: Vec2,
    pub pointer: Vec2,
    /// Left button went down this frame
    pub click: bool,
    /// Space went down this frame
    pub continue_pressed: bool,
    /// Window closed
    pub close_requested: bool,
}

pub trait InputSource {
    fn poll(&mut self) -> FrameInput;
}

/// What a visual entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Player,
    Bullet,
    Enemy(EnemyKind),
    Powerup(PowerupKind),
}

/// One draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub pos: Vec2,
    /// Degrees
    pub rotation: f32,
    pub scale: f32,
}

/// Rendering backend
pub trait Presenter {
    fn begin_frame(&mut self) {}
    fn draw(&mut self, sprite: &Sprite);
    fn draw_menu(&mut self, menu: &MainMenu);
    fn draw_hud(&mut self, hud: &Hud);
    fn draw_end_screen(&mut self, text: &str);
    fn end_frame(&mut self) {}
}

/// Limit a frame delta after a stall; negative or NaN deltas become zero
pub fn clamp_frame_dt(dt: f32, max_dt: f32) -> f32 {
    if !dt.is_finite() {
        return 0.0;
    }
    dt.clamp(0.0, max_dt)
}

/// Whether the host loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Quit,
}

/// Game instance holding all state
pub struct Game<P: Presenter, S: AudioSink> {
    pub state: GameState,
    pub menu: MainMenu,
    rng: GameRng,
    presenter: P,
    audio: AudioManager<S>,
    max_frame_dt: f32,
    /// Autopilot plays the sessions
    pub idle_mode: bool,
}

impl<P: Presenter, S: AudioSink> Game<P, S> {
    pub fn new(settings: &Settings, presenter: P, sink: S) -> Self {
        let rng = match settings.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        log::info!("Game seed: {}", rng.seed());

        let mut audio = AudioManager::new(sink);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);

        Self {
            state: GameState::new(),
            menu: MainMenu::default(),
            rng,
            presenter,
            audio,
            max_frame_dt: settings.max_frame_dt,
            idle_mode: false,
        }
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn audio(&self) -> &AudioManager<S> {
        &self.audio
    }

    /// Map raw input to simulation input for the current phase
    fn tick_input(&mut self, input: &FrameInput) -> Result<TickInput, FrameOutcome> {
        let mut out = TickInput {
            move_axis: input.move_axis,
            pointer: input.pointer,
            idle_mode: self.idle_mode,
            ..Default::default()
        };

        match self.state.phase {
            GamePhase::MainMenu => match self.menu.update(input.pointer, input.click) {
                Some(MenuAction::Start(mode)) => out.start = Some(mode),
                Some(MenuAction::Exit) => return Err(FrameOutcome::Quit),
                None => {}
            },
            GamePhase::PlayingClassic | GamePhase::PlayingTimeTrial => out.shoot = input.click,
            GamePhase::GameOver | GamePhase::Victory | GamePhase::TimeTrialResults => {
                out.continue_pressed = input.continue_pressed;
            }
        }

        Ok(out)
    }

    /// Run one frame: input, simulation, sound, render
    pub fn frame(&mut self, input: &FrameInput, raw_dt: f32) -> FrameOutcome {
        if input.close_requested {
            return FrameOutcome::Quit;
        }
        let tick_input = match self.tick_input(input) {
            Ok(tick_input) => tick_input,
            Err(outcome) => {
                log::info!("Exit selected");
                return outcome;
            }
        };

        let dt = clamp_frame_dt(raw_dt, self.max_frame_dt);
        let events = tick(&mut self.state, &tick_input, dt, &mut self.rng);
        self.audio.play_events(&events);
        self.render();

        FrameOutcome::Continue
    }

    /// Drive frames until the player quits or closes the window
    ///
    /// `max_frames` caps the run. With `idle_mode` on, the run also stops
    /// once the autopilot's session reaches an end screen. Returns the number
    /// of frames played.
    pub fn run(
        &mut self,
        clock: &mut impl FrameClock,
        input: &mut impl InputSource,
        max_frames: Option<u32>,
    ) -> u32 {
        let mut frames = 0;
        while max_frames.is_none_or(|max| frames < max) {
            let frame_input = input.poll();
            let dt = clock.elapsed();
            if self.frame(&frame_input, dt) == FrameOutcome::Quit {
                break;
            }
            frames += 1;
            if self.idle_mode && self.state.phase.is_end_screen() {
                log::info!("Autopilot session over after {} frames", frames);
                break;
            }
        }
        frames
    }

    fn render(&mut self) {
        let state = &self.state;
        let presenter = &mut self.presenter;
        presenter.begin_frame();

        match state.phase {
            GamePhase::MainMenu => presenter.draw_menu(&self.menu),
            GamePhase::PlayingClassic | GamePhase::PlayingTimeTrial => {
                for sprite in sprites(state) {
                    presenter.draw(&sprite);
                }
                presenter.draw_hud(&Hud::from_state(state));
            }
            GamePhase::GameOver | GamePhase::Victory | GamePhase::TimeTrialResults => {
                if let Some(text) = end_screen_text(state) {
                    presenter.draw_end_screen(text);
                }
            }
        }

        presenter.end_frame();
    }
}

/// Draw list for every live entity, player first
pub fn sprites(state: &GameState) -> Vec<Sprite> {
    let mut out = Vec::with_capacity(
        1 + state.bullets.len() + state.enemies.len() + state.powerups.len(),
    );
    out.push(Sprite {
        kind: SpriteKind::Player,
        pos: state.player.pos,
        rotation: state.player.rotation,
        scale: 0.4,
    });
    out.extend(state.bullets.active().map(|b| Sprite {
        kind: SpriteKind::Bullet,
        pos: b.pos,
        rotation: 0.0,
        scale: 1.0,
    }));
    out.extend(state.enemies.active().map(|e| Sprite {
        kind: SpriteKind::Enemy(e.kind),
        pos: e.pos,
        rotation: 0.0,
        scale: 0.25,
    }));
    out.extend(state.powerups.active().map(|p| Sprite {
        kind: SpriteKind::Powerup(p.kind),
        pos: p.pos,
        rotation: 0.0,
        scale: p.pulse_scale(),
    }));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::LogSink;
    use crate::sim::{Enemy, GameMode};

    fn game() -> Game<LogPresenter, LogSink> {
        let settings = Settings {
            seed: Some(7),
            ..Default::default()
        };
        Game::new(&settings, LogPresenter::default(), LogSink::default())
    }

    fn click_at(pointer: Vec2) -> FrameInput {
        FrameInput {
            pointer,
            click: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_clamp_frame_dt() {
        assert_eq!(clamp_frame_dt(0.016, 0.1), 0.016);
        assert_eq!(clamp_frame_dt(2.5, 0.1), 0.1);
        assert_eq!(clamp_frame_dt(-1.0, 0.1), 0.0);
        assert_eq!(clamp_frame_dt(f32::INFINITY, 0.1), 0.0);
    }

    #[test]
    fn test_menu_click_starts_mode() {
        let mut g = game();
        let outcome = g.frame(&click_at(Vec2::new(800.0, 490.0)), 0.016);
        assert_eq!(outcome, FrameOutcome::Continue);
        assert_eq!(g.state.phase, GameMode::TimeTrial.playing_phase());
    }

    #[test]
    fn test_exit_button_quits() {
        let mut g = game();
        assert_eq!(
            g.frame(&click_at(Vec2::new(800.0, 590.0)), 0.016),
            FrameOutcome::Quit
        );
        assert_eq!(g.state.phase, GamePhase::MainMenu);
    }

    #[test]
    fn test_stall_is_clamped() {
        let mut g = game();
        g.frame(&click_at(Vec2::new(800.0, 490.0)), 0.016);
        // A five second stall only costs max_frame_dt of countdown
        g.frame(&FrameInput::default(), 5.0);
        assert!((g.state.session.time_remaining - 59.9).abs() < 1e-4);
    }

    #[test]
    fn test_click_in_play_shoots_with_sound() {
        let mut g = game();
        g.frame(&click_at(Vec2::new(800.0, 380.0)), 0.016);
        assert_eq!(g.state.phase, GamePhase::PlayingClassic);

        g.frame(&click_at(Vec2::new(100.0, 100.0)), 0.016);
        assert_eq!(g.state.bullets.len(), 1);
        assert_eq!(g.audio().sink().played, 1);
    }

    #[test]
    fn test_sprites_cover_live_entities() {
        let mut state = GameState::new();
        state.phase = GamePhase::PlayingClassic;
        state
            .enemies
            .push(Enemy::new(Vec2::new(10.0, 10.0), EnemyKind::Walker, 90.0));
        let mut dead = Enemy::new(Vec2::new(20.0, 20.0), EnemyKind::Brute, 130.0);
        dead.active = false;
        state.enemies.push(dead);

        let list = sprites(&state);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].kind, SpriteKind::Player);
        assert_eq!(list[1].kind, SpriteKind::Enemy(EnemyKind::Walker));
    }

    #[test]
    fn test_system_clock_elapsed_is_finite() {
        let mut clock = SystemClock::default();
        let dt = clock.elapsed();
        assert!(dt.is_finite());
        assert!(dt >= 0.0);
    }

    #[test]
    fn test_run_returns_on_close() {
        let mut g = game();
        let mut input = ScriptedInput::default();
        input.push(click_at(Vec2::new(800.0, 380.0)));
        input.push(FrameInput::default());
        input.push(FrameInput {
            close_requested: true,
            ..Default::default()
        });

        let frames = g.run(&mut FixedClock::from_fps(60.0), &mut input, None);
        assert_eq!(frames, 2);
        assert_eq!(g.state.phase, GamePhase::PlayingClassic);
        assert!(input.is_drained());
    }

    #[test]
    fn test_run_stops_at_frame_budget() {
        let mut g = game();
        let mut input = ScriptedInput::new([click_at(Vec2::new(800.0, 490.0))]);
        let frames = g.run(&mut FixedClock::from_fps(60.0), &mut input, Some(30));
        assert_eq!(frames, 30);
        assert_eq!(g.state.phase, GamePhase::PlayingTimeTrial);
        assert_eq!(g.presenter().frames, 30);
    }

    #[test]
    fn test_idle_run_stops_at_end_screen() {
        let mut g = game();
        g.idle_mode = true;
        let mut input = ScriptedInput::new([click_at(Vec2::new(800.0, 490.0))]);
        let frames = g.run(&mut FixedClock::from_fps(60.0), &mut input, Some(60 * 120));
        assert!(frames < 60 * 120);
        assert!(g.state.phase.is_end_screen());
    }

    #[test]
    fn test_close_quits() {
        let mut g = game();
        let input = FrameInput {
            close_requested: true,
            ..Default::default()
        };
        assert_eq!(g.frame(&input, 0.016), FrameOutcome::Quit);
    }
}
