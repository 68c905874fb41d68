//! Sound effects
//!
//! The simulation never plays audio itself. Ticks return `GameEvent`s and the
//! host maps them to `SoundEffect`s and hands those to an `AudioSink`.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Bullet fired
    Shot,
    /// Bullet hit an enemy
    Hit,
}

impl SoundEffect {
    pub fn name(self) -> &'static str {
        match self {
            SoundEffect::Shot => "shot",
            SoundEffect::Hit => "hit",
        }
    }
}

impl GameEvent {
    /// Sound this event should trigger, if any
    pub fn sound(&self) -> Option<SoundEffect> {
        match self {
            GameEvent::ShotFired => Some(SoundEffect::Shot),
            GameEvent::EnemyKilled { .. } => Some(SoundEffect::Hit),
            _ => None,
        }
    }
}

/// Something that can actually make noise
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Volume and mute handling in front of a sink
pub struct AudioManager<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let volume = self.master_volume * self.sfx_volume;
        if self.muted || volume <= 0.0 {
            return;
        }
        self.sink.play(effect, volume);
    }

    /// Play whatever the frame's events call for
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(GameEvent::sound) {
            self.play(effect);
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

/// Sink that only logs; used by the headless host
#[derive(Debug, Default)]
pub struct LogSink {
    pub played: u64,
}

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        self.played += 1;
        log::trace!("sfx {} at {:.2}", effect.name(), volume);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{EnemyKind, PowerupKind};

    #[derive(Default)]
    struct Recorder(Vec<SoundEffect>);

    impl AudioSink for Recorder {
        fn play(&mut self, effect: SoundEffect, _volume: f32) {
            self.0.push(effect);
        }
    }

    #[test]
    fn test_event_sounds() {
        assert_eq!(GameEvent::ShotFired.sound(), Some(SoundEffect::Shot));
        assert_eq!(
            GameEvent::EnemyKilled {
                kind: EnemyKind::Walker,
                kills: 1
            }
            .sound(),
            Some(SoundEffect::Hit)
        );
        assert_eq!(GameEvent::PowerupCollected(PowerupKind::SpeedBoost).sound(), None);
    }

    #[test]
    fn test_play_events_in_order() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.play_events(&[
            GameEvent::ShotFired,
            GameEvent::EnemySpawned(EnemyKind::Brute),
            GameEvent::EnemyKilled {
                kind: EnemyKind::Brute,
                kills: 3,
            },
        ]);
        assert_eq!(audio.sink().0, vec![SoundEffect::Shot, SoundEffect::Hit]);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.set_muted(true);
        assert!(audio.is_muted());
        audio.play(SoundEffect::Shot);
        audio.set_muted(false);
        assert!(!audio.is_muted());
        audio.set_sfx_volume(0.0);
        audio.play(SoundEffect::Hit);
        assert!(audio.sink().0.is_empty());
    }
}
