//! Headless host pieces for the demo binary and tests

use std::collections::VecDeque;

use super::{FrameClock, FrameInput, InputSource, Presenter, Sprite};
use crate::ui::{Hud, MainMenu};

/// Clock that always reports the same step
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub step: f32,
}

impl FixedClock {
    pub fn from_fps(fps: f32) -> Self {
        Self { step: 1.0 / fps }
    }
}

impl FrameClock for FixedClock {
    fn elapsed(&mut self) -> f32 {
        self.step
    }
}

/// Plays back queued frames, then idles with the pointer parked
#[derive(Debug, Default)]
pub struct ScriptedInput {
    queue: VecDeque<FrameInput>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = FrameInput>) -> Self {
        Self {
            queue: frames.into_iter().collect(),
        }
    }

    pub fn push(&mut self, frame: FrameInput) {
        self.queue.push_back(frame);
    }

    pub fn is_drained(&self) -> bool {
        self.queue.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> FrameInput {
        self.queue.pop_front().unwrap_or_default()
    }
}

/// Presenter that counts draw calls and traces them
#[derive(Debug, Default)]
pub struct LogPresenter {
    pub frames: u64,
    pub sprites_drawn: u64,
    pub last_hud: Option<Hud>,
    pub last_end_screen: Option<String>,
}

impl Presenter for LogPresenter {
    fn draw(&mut self, sprite: &Sprite) {
        self.sprites_drawn += 1;
        log::trace!(
            "draw {:?} at ({:.0}, {:.0}) rot {:.0} scale {:.2}",
            sprite.kind,
            sprite.pos.x,
            sprite.pos.y,
            sprite.rotation,
            sprite.scale
        );
    }

    fn draw_menu(&mut self, menu: &MainMenu) {
        for button in menu.buttons() {
            if button.hovered {
                log::trace!("menu hover: {}", button.label);
            }
        }
    }

    fn draw_hud(&mut self, hud: &Hud) {
        self.last_hud = Some(hud.clone());
    }

    fn draw_end_screen(&mut self, text: &str) {
        if self.last_end_screen.as_deref() != Some(text) {
            log::debug!("end screen: {}", text.replace('\n', " "));
            self.last_end_screen = Some(text.to_string());
        }
    }

    fn end_frame(&mut self) {
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_scripted_input_drains_then_defaults() {
        let mut input = ScriptedInput::new([FrameInput {
            click: true,
            pointer: Vec2::new(1.0, 2.0),
            ..Default::default()
        }]);
        assert!(input.poll().click);
        assert!(input.is_drained());
        let idle = input.poll();
        assert!(!idle.click);
        assert_eq!(idle.pointer, Vec2::ZERO);
    }

    #[test]
    fn test_fixed_clock() {
        let mut clock = FixedClock::from_fps(50.0);
        assert!((clock.elapsed() - 0.02).abs() < 1e-6);
    }
}
