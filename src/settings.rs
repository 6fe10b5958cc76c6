//! Game settings and preferences
//!
//! Loaded from an optional JSON file at startup. Missing fields fall back to
//! the defaults, which reproduce the classic 640x480 table.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;
use crate::consts::*;
use crate::input::KeyBindings;

/// Startup configuration for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Ball ===
    /// Side length of the square ball
    pub ball_size: f32,
    /// Units per tick; fixed for the whole session
    pub ball_speed: f32,
    /// Initial heading (radians)
    pub ball_start_angle: f32,

    // === Paddles ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Units per tick while a key is held
    pub paddle_speed: f32,
    /// Margin the paddle hit-box shrinks by before testing the ball
    pub paddle_deflate: f32,

    // === Loop ===
    /// Ticks per second
    pub tick_rate: u32,
    /// RNG seed for serve angles
    pub seed: u64,

    // === Input ===
    pub keys: KeyBindings,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            ball_size: BALL_SIZE,
            ball_speed: BALL_SPEED,
            ball_start_angle: BALL_START_ANGLE,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            paddle_deflate: PADDLE_DEFLATE,

            tick_rate: TICK_RATE,
            seed: 0,

            keys: KeyBindings::default(),

            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 0.5,
            muted: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            what: "settings",
            message: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
            what: "settings",
            message: e.to_string(),
        })
    }

    /// Reject values no session can run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;

        if !positive(self.arena_width) || !positive(self.arena_height) {
            return Err(ConfigError::ArenaTooSmall {
                width: self.arena_width,
                height: self.arena_height,
            });
        }
        if !positive(self.ball_size) {
            return Err(ConfigError::NonPositiveSize {
                what: "ball",
                width: self.ball_size,
                height: self.ball_size,
            });
        }
        if !positive(self.ball_speed) {
            return Err(ConfigError::NonPositiveSpeed {
                what: "ball",
                speed: self.ball_speed,
            });
        }
        if !self.ball_start_angle.is_finite() {
            return Err(ConfigError::NonFiniteAngle {
                angle: self.ball_start_angle,
            });
        }
        if !positive(self.paddle_width) || !positive(self.paddle_height) {
            return Err(ConfigError::NonPositiveSize {
                what: "paddle",
                width: self.paddle_width,
                height: self.paddle_height,
            });
        }
        if !positive(self.paddle_speed) {
            return Err(ConfigError::NonPositiveSpeed {
                what: "paddle",
                speed: self.paddle_speed,
            });
        }
        if self.tick_rate == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        for (what, volume) in [
            ("master", self.master_volume),
            ("sfx", self.sfx_volume),
            ("music", self.music_volume),
        ] {
            if !(0.0..=1.0).contains(&volume) {
                return Err(ConfigError::VolumeOutOfRange { what, volume });
            }
        }
        Ok(())
    }

    /// Seconds per tick
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    /// Effective sound-effect gain (respects mute)
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Effective music gain (respects mute)
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.arena_width, 640.0);
        assert_eq!(settings.arena_height, 480.0);
        assert_eq!(settings.ball_speed, 10.0);
        assert_eq!(settings.paddle_speed, 10.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 42, "arena_width": 800.0 }"#).unwrap();
        assert_eq!(settings.seed, 42);
        assert_eq!(settings.arena_width, 800.0);
        assert_eq!(settings.arena_height, ARENA_HEIGHT);
        assert_eq!(settings.keys.left_up, Key::A);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            seed: 7,
            muted: true,
            ..Settings::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_to_json_never_yields_empty_document() {
        // A non-finite field still serializes (as null) but must not round-trip
        let settings = Settings {
            ball_speed: f32::NAN,
            ..Settings::default()
        };
        let json = settings.to_json().unwrap();
        assert!(!json.is_empty());
        assert!(matches!(
            Settings::from_json(&json),
            Err(ConfigError::Parse { .. })
        ));

        let err = ConfigError::Serialize {
            what: "settings",
            message: "boom".into(),
        };
        assert_eq!(err.to_string(), "failed to serialize settings: boom");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = Settings {
            ball_speed: -1.0,
            ..Settings::default()
        };
        assert!(matches!(
            bad.validate(),
            Err(ConfigError::NonPositiveSpeed { what: "ball", .. })
        ));

        let bad = Settings {
            tick_rate: 0,
            ..Settings::default()
        };
        assert_eq!(bad.validate(), Err(ConfigError::ZeroTickRate));

        let bad = Settings {
            sfx_volume: 1.5,
            ..Settings::default()
        };
        assert!(matches!(
            bad.validate(),
            Err(ConfigError::VolumeOutOfRange { what: "sfx", .. })
        ));

        assert!(matches!(
            Settings::from_json(r#"{ "arena_width": 0.0 }"#),
            Err(ConfigError::ArenaTooSmall { .. })
        ));
        assert!(matches!(
            Settings::from_json("not json"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_effective_volumes() {
        let mut settings = Settings {
            master_volume: 0.5,
            sfx_volume: 0.8,
            music_volume: 0.5,
            ..Settings::default()
        };
        assert!((settings.effective_sfx_volume() - 0.4).abs() < 1e-6);
        assert!((settings.effective_music_volume() - 0.25).abs() < 1e-6);
        settings.muted = true;
        assert_eq!(settings.effective_sfx_volume(), 0.0);
        assert_eq!(settings.effective_music_volume(), 0.0);
    }
}
