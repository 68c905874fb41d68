//! Menu buttons and HUD text
//!
//! Layout and hit-testing only. Drawing the rectangles and strings is left
//! to the presenter.

use glam::Vec2;

use crate::consts::CLASSIC_TOTAL_ENEMIES;
use crate::sim::{Aabb, GameMode, GamePhase, GameState};

/// Prompt shown under every end screen
pub const CONTINUE_PROMPT: &str = "Press SPACE to return to menu";
pub const TITLE: &str = "HUNT THE ZOMBIES";

/// A clickable rectangle with a label
#[derive(Debug, Clone)]
pub struct Button {
    pub rect: Aabb,
    pub label: &'static str,
    pub hovered: bool,
}

impl Button {
    pub fn new(x: f32, y: f32, width: f32, height: f32, label: &'static str) -> Self {
        Self {
            rect: Aabb::new(Vec2::new(x, y), Vec2::new(width, height)),
            label,
            hovered: false,
        }
    }

    /// Refresh hover state from the pointer
    pub fn update_hover(&mut self, pointer: Vec2) {
        self.hovered = self.rect.contains(pointer);
    }

    /// Clicked this frame: hovered and the button went down
    pub fn is_clicked(&self, click: bool) -> bool {
        self.hovered && click
    }
}

/// What the main menu asks the host to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Start(GameMode),
    Exit,
}

/// The three-button main menu
#[derive(Debug, Clone)]
pub struct MainMenu {
    pub classic: Button,
    pub time_trial: Button,
    pub exit: Button,
}

impl Default for MainMenu {
    fn default() -> Self {
        Self {
            classic: Button::new(600.0, 350.0, 400.0, 80.0, "CLASSIC MODE"),
            time_trial: Button::new(600.0, 450.0, 400.0, 80.0, "TIME TRIAL"),
            exit: Button::new(600.0, 550.0, 400.0, 80.0, "EXIT"),
        }
    }
}

impl MainMenu {
    pub fn buttons(&self) -> [&Button; 3] {
        [&self.classic, &self.time_trial, &self.exit]
    }

    /// Update hover for every button and report a click, if any
    pub fn update(&mut self, pointer: Vec2, click: bool) -> Option<MenuAction> {
        self.classic.update_hover(pointer);
        self.time_trial.update_hover(pointer);
        self.exit.update_hover(pointer);

        if self.classic.is_clicked(click) {
            Some(MenuAction::Start(GameMode::Classic))
        } else if self.time_trial.is_clicked(click) {
            Some(MenuAction::Start(GameMode::TimeTrial))
        } else if self.exit.is_clicked(click) {
            Some(MenuAction::Exit)
        } else {
            None
        }
    }
}

/// Strings and bars for the in-game overlay
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    /// 0.0 - 1.0
    pub health_fraction: f32,
    pub kills: String,
    /// Only during time trial
    pub timer: Option<String>,
    /// Empty when no boost is running
    pub speed_boost: String,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        let kills = match state.phase {
            GamePhase::PlayingClassic => {
                format!("Kills: {}/{}", state.session.classic_kills, CLASSIC_TOTAL_ENEMIES)
            }
            _ => format!("Kills: {}", state.session.time_trial_kills),
        };
        let timer = (state.phase == GamePhase::PlayingTimeTrial)
            .then(|| format!("Time: {:.1}", state.session.time_remaining));
        let speed_boost = if state.player.has_speed_boost {
            format!("Speed Boost: {:.1}s", state.player.speed_boost_timer)
        } else {
            String::new()
        };

        Self {
            health_fraction: state.player.health_fraction(),
            kills,
            timer,
            speed_boost,
        }
    }
}

/// Headline for an end screen
pub fn end_screen_text(state: &GameState) -> Option<&str> {
    match state.phase {
        GamePhase::GameOver => Some("YOU LOSE!"),
        GamePhase::Victory => Some("VICTORY!"),
        GamePhase::TimeTrialResults => Some(state.session.results_message.as_str()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hover_follows_pointer() {
        let mut menu = MainMenu::default();
        menu.update(Vec2::new(800.0, 380.0), false);
        assert!(menu.classic.hovered);
        assert!(!menu.time_trial.hovered);

        menu.update(Vec2::new(10.0, 10.0), false);
        assert!(menu.buttons().iter().all(|b| !b.hovered));
    }

    #[test]
    fn test_click_picks_button() {
        let mut menu = MainMenu::default();
        assert_eq!(
            menu.update(Vec2::new(800.0, 490.0), true),
            Some(MenuAction::Start(GameMode::TimeTrial))
        );
        assert_eq!(menu.update(Vec2::new(800.0, 590.0), true), Some(MenuAction::Exit));
        // Click outside any button
        assert_eq!(menu.update(Vec2::new(100.0, 590.0), true), None);
        // Hover without click
        assert_eq!(menu.update(Vec2::new(800.0, 380.0), false), None);
    }

    #[test]
    fn test_hud_classic() {
        let mut state = GameState::new();
        state.phase = GamePhase::PlayingClassic;
        state.session.classic_kills = 7;
        state.player.take_damage(25);

        let hud = Hud::from_state(&state);
        assert_eq!(hud.kills, "Kills: 7/30");
        assert_eq!(hud.timer, None);
        assert_eq!(hud.speed_boost, "");
        assert!((hud.health_fraction - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_hud_time_trial_with_boost() {
        let mut state = GameState::new();
        state.phase = GamePhase::PlayingTimeTrial;
        state.session.time_trial_kills = 12;
        state.session.time_remaining = 42.26;
        state.player.apply_speed_boost();

        let hud = Hud::from_state(&state);
        assert_eq!(hud.kills, "Kills: 12");
        assert_eq!(hud.timer.as_deref(), Some("Time: 42.3"));
        assert_eq!(hud.speed_boost, "Speed Boost: 5.0s");
    }

    #[test]
    fn test_end_screen_text() {
        let mut state = GameState::new();
        assert_eq!(end_screen_text(&state), None);
        state.phase = GamePhase::Victory;
        assert_eq!(end_screen_text(&state), Some("VICTORY!"));
    }
}
