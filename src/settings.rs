//! Runtime settings
//!
//! Loaded from an optional JSON file. Gameplay balance is fixed in
//! `consts`; settings only cover how the host runs the game.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_FRAME_DT;
use crate::sim::GameMode;

/// Which mode the headless demo plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DemoMode {
    #[default]
    Classic,
    TimeTrial,
}

impl DemoMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DemoMode::Classic => "classic",
            DemoMode::TimeTrial => "time_trial",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(DemoMode::Classic),
            "time_trial" | "timetrial" | "tt" => Some(DemoMode::TimeTrial),
            _ => None,
        }
    }

    pub fn game_mode(&self) -> GameMode {
        match self {
            DemoMode::Classic => GameMode::Classic,
            DemoMode::TimeTrial => GameMode::TimeTrial,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed; `None` seeds from system entropy
    pub seed: Option<u64>,
    /// Longest frame delta handed to the simulation (seconds)
    pub max_frame_dt: f32,

    // === Demo ===
    pub demo_mode: DemoMode,
    /// Frames the headless demo runs before giving up
    pub demo_frames: u32,
    /// Simulated frame rate for the headless demo
    pub demo_fps: f32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            max_frame_dt: MAX_FRAME_DT,

            demo_mode: DemoMode::Classic,
            demo_frames: 60 * 180,
            demo_fps: 60.0,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

/// Why settings could not be loaded
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "could not read settings: {}", e),
            SettingsError::Parse(e) => write!(f, "malformed settings JSON: {}", e),
            SettingsError::Invalid { field, reason } => {
                write!(f, "invalid setting '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

impl Settings {
    /// Parse and validate settings JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `path`, falling back to defaults (with a warning) on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.max_frame_dt.is_finite() && self.max_frame_dt > 0.0) {
            return Err(SettingsError::Invalid {
                field: "max_frame_dt",
                reason: "must be a positive number of seconds",
            });
        }
        if !(self.demo_fps.is_finite() && self.demo_fps > 0.0) {
            return Err(SettingsError::Invalid {
                field: "demo_fps",
                reason: "must be positive",
            });
        }
        for (field, value) in [
            ("master_volume", self.master_volume),
            ("sfx_volume", self.sfx_volume),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SettingsError::Invalid {
                    field,
                    reason: "must be between 0.0 and 1.0",
                });
            }
        }
        Ok(())
    }
}
