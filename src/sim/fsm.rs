//! Phase state machine
//!
//! Transitions are data: a `(from, trigger, to)` table. `fire` looks the pair
//! up, switches phase and runs the on-enter action for the target phase.
//! Pairs not in the table are rejected and leave the state alone.

use serde::{Deserialize, Serialize};

use super::state::{GameMode, GamePhase, GameState};
use super::tick::GameEvent;
use crate::consts::CLASSIC_TOTAL_ENEMIES;

/// Something that can move the game between phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trigger {
    StartClassic,
    StartTimeTrial,
    /// Health reached zero
    PlayerDefeated,
    /// Classic kill target met
    KillTargetReached,
    /// Time trial clock hit zero
    CountdownExpired,
    /// Dismiss an end screen
    Continue,
}

impl Trigger {
    pub fn start(mode: GameMode) -> Self {
        match mode {
            GameMode::Classic => Trigger::StartClassic,
            GameMode::TimeTrial => Trigger::StartTimeTrial,
        }
    }
}

use GamePhase::*;
use Trigger::*;

/// Every legal transition
pub const TRANSITIONS: &[(GamePhase, Trigger, GamePhase)] = &[
    (MainMenu, StartClassic, PlayingClassic),
    (MainMenu, StartTimeTrial, PlayingTimeTrial),
    (PlayingClassic, PlayerDefeated, GameOver),
    (PlayingTimeTrial, PlayerDefeated, GameOver),
    (PlayingClassic, KillTargetReached, Victory),
    (PlayingTimeTrial, CountdownExpired, TimeTrialResults),
    (GameOver, Continue, MainMenu),
    (Victory, Continue, MainMenu),
    (TimeTrialResults, Continue, MainMenu),
];

/// Target phase for `trigger` in `from`, if the table allows it
pub fn next_phase(from: GamePhase, trigger: Trigger) -> Option<GamePhase> {
    TRANSITIONS
        .iter()
        .find(|(f, t, _)| *f == from && *t == trigger)
        .map(|(_, _, to)| *to)
}

/// Apply `trigger` to the state. Returns the new phase, or `None` if the
/// transition is not allowed from the current phase.
pub fn fire(
    state: &mut GameState,
    trigger: Trigger,
    events: &mut Vec<GameEvent>,
) -> Option<GamePhase> {
    let from = state.phase;
    let Some(to) = next_phase(from, trigger) else {
        log::warn!("Ignored {:?} in {:?}", trigger, from);
        return None;
    };

    state.phase = to;
    on_enter(state, from, to);
    log::info!("{:?} -> {:?} ({:?})", from, to, trigger);
    events.push(GameEvent::PhaseChanged { from, to });
    Some(to)
}

fn on_enter(state: &mut GameState, from: GamePhase, to: GamePhase) {
    match to {
        PlayingClassic | PlayingTimeTrial => state.reset_session(),
        TimeTrialResults => {
            state.session.finish_time_trial();
            log::info!(
                "Time trial over: {} kills, {} XP",
                state.session.time_trial_kills,
                state.session.xp_earned
            );
        }
        Victory => log::info!("Classic cleared: {} kills", state.session.classic_kills),
        GameOver => {
            let kills = from.mode().map_or(0, |m| state.session.kills(m));
            log::info!("Player defeated with {} kills", kills);
        }
        MainMenu => {}
    }
}

/// End-of-frame checks, in priority order: death first, then the mode's win
/// or timeout condition.
pub fn evaluate(state: &GameState) -> Option<Trigger> {
    let mode = state.phase.mode()?;
    if state.player.is_dead() {
        return Some(PlayerDefeated);
    }
    match mode {
        GameMode::Classic if state.session.classic_kills >= CLASSIC_TOTAL_ENEMIES => {
            Some(KillTargetReached)
        }
        GameMode::TimeTrial if state.session.time_remaining <= 0.0 => Some(CountdownExpired),
        _ => None,
    }
}
