//! Hunt the Zombies entry point
//!
//! Runs a headless demo session: the autopilot picks the configured mode on
//! the main menu and plays until the session ends or the frame budget runs
//! out.
//!
//! Usage: `hunt-the-zombies [settings.json] [classic|time_trial]`

use std::path::PathBuf;

use hunt_the_zombies::{DemoMode, Settings};
use hunt_the_zombies::audio::LogSink;
use hunt_the_zombies::platform::{FixedClock, FrameInput, Game, LogPresenter, ScriptedInput};
use hunt_the_zombies::sim::{GameMode, GamePhase};

fn main() {
    env_logger::init();
    log::info!("Hunt the Zombies (headless) starting...");

    let path = std::env::args().nth(1).map(PathBuf::from);
    let mut settings = Settings::load_or_default(path.as_deref());
    if let Some(arg) = std::env::args().nth(2) {
        match DemoMode::from_str(&arg) {
            Some(mode) => settings.demo_mode = mode,
            None => log::warn!(
                "Unknown demo mode '{}', using {}",
                arg,
                settings.demo_mode.as_str()
            ),
        }
    }

    let mut game = Game::new(&settings, LogPresenter::default(), LogSink::default());
    game.idle_mode = true;

    let mode = settings.demo_mode.game_mode();
    let button = match mode {
        GameMode::Classic => &game.menu.classic,
        GameMode::TimeTrial => &game.menu.time_trial,
    };
    let mut input = ScriptedInput::default();
    input.push(FrameInput {
        pointer: button.rect.center(),
        click: true,
        ..Default::default()
    });
    let mut clock = FixedClock::from_fps(settings.demo_fps);

    let frames = game.run(&mut clock, &mut input, Some(settings.demo_frames));

    report(&game, frames);
}

fn report(game: &Game<LogPresenter, LogSink>, frames: u32) {
    let state = &game.state;
    let outcome = match state.phase {
        GamePhase::Victory => "victory".to_string(),
        GamePhase::GameOver => "defeat".to_string(),
        GamePhase::TimeTrialResults => format!("time up, {} XP", state.session.xp_earned),
        phase => format!("stopped in {:?}", phase),
    };
    let center = state.player.center();

    println!("seed:     {}", game.seed());
    println!("frames:   {}", frames);
    println!("outcome:  {}", outcome);
    println!(
        "kills:    {} classic / {} time trial",
        state.session.classic_kills, state.session.time_trial_kills
    );
    println!("health:   {}/{}", state.player.health, state.player.max_health);
    println!("player:   ({:.0}, {:.0})", center.x, center.y);
    println!("sprites:  {} drawn", game.presenter().sprites_drawn);
    let audio = game.audio();
    let muted = if audio.is_muted() { " (muted)" } else { "" };
    println!("sfx:      {} played{}", audio.sink().played, muted);
}
