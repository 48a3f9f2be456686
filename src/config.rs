//! Game balance and play-area configuration
//!
//! Stored as JSON. Missing fields fall back to the defaults in [`crate::consts`].

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tuning for one game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Play area ===
    pub width: f32,
    pub height: f32,

    /// Seed for spawn sampling and particles
    pub seed: u64,

    // === Paddle ===
    pub paddle_size: Vec2,
    /// Units per second
    pub paddle_speed: f32,
    /// Multiplier on the horizontal redirect after a paddle hit
    pub paddle_strength: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub initial_ball_velocity: Vec2,

    // === Power-ups ===
    /// 1-in-N chance per destroyed brick for speed, sticky, pass-through, grow
    pub positive_spawn_chance: u32,
    /// 1-in-N chance per destroyed brick for confuse and chaos
    pub negative_spawn_chance: u32,
    pub power_up_size: Vec2,
    pub power_up_velocity: Vec2,
    pub speed_multiplier: f32,
    pub grow_amount: f32,

    // === Effects ===
    /// Seconds of shake after a solid brick hit
    pub shake_duration: f32,
    pub max_particles: usize,
    pub particles_per_frame: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: PLAY_WIDTH,
            height: PLAY_HEIGHT,
            seed: 0,

            paddle_size: PADDLE_SIZE,
            paddle_speed: PADDLE_SPEED,
            paddle_strength: PADDLE_STRENGTH,

            ball_radius: BALL_RADIUS,
            initial_ball_velocity: INITIAL_BALL_VELOCITY,

            positive_spawn_chance: POSITIVE_SPAWN_CHANCE,
            negative_spawn_chance: NEGATIVE_SPAWN_CHANCE,
            power_up_size: POWER_UP_SIZE,
            power_up_velocity: POWER_UP_VELOCITY,
            speed_multiplier: SPEED_MULTIPLIER,
            grow_amount: GROW_AMOUNT,

            shake_duration: SHAKE_DURATION,
            max_particles: MAX_PARTICLES,
            particles_per_frame: PARTICLES_PER_FRAME,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from `path`, or use defaults if it is missing or broken
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("Using default config ({}): {}", path.display(), err);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if !(self.width > 0.0 && self.height > 0.0) {
            return invalid("play area must have positive width and height");
        }
        if !(self.ball_radius > 0.0) {
            return invalid("ball radius must be positive");
        }
        if self.paddle_size.min_element() < 0.0 || self.power_up_size.min_element() < 0.0 {
            return invalid("sizes must not be negative");
        }
        if self.paddle_size.x > self.width {
            return invalid("paddle is wider than the play area");
        }
        if self.positive_spawn_chance == 0 || self.negative_spawn_chance == 0 {
            return invalid("spawn chance denominators must be at least 1");
        }
        if self.shake_duration < 0.0 || self.paddle_speed < 0.0 {
            return invalid("durations and speeds must not be negative");
        }
        let finite = [self.initial_ball_velocity, self.power_up_velocity]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return invalid("velocities must be finite");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.positive_spawn_chance, 5);
        assert_eq!(config.negative_spawn_chance, 15);
        assert_eq!(config.shake_duration, 0.05);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "seed": 99, "width": 1024.0 }"#).unwrap();
        assert_eq!(config.seed, 99);
        assert_eq!(config.width, 1024.0);
        assert_eq!(config.height, PLAY_HEIGHT);
        assert_eq!(config.initial_ball_velocity, INITIAL_BALL_VELOCITY);
    }

    #[test]
    fn test_json_round_trip() {
        let config = GameConfig {
            seed: 7,
            grow_amount: 25.0,
            ..GameConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(GameConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(GameConfig::from_json("{ seed: "), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_rejects_invalid_values() {
        for json in [
            r#"{ "ball_radius": 0.0 }"#,
            r#"{ "width": -5.0 }"#,
            r#"{ "positive_spawn_chance": 0 }"#,
            r#"{ "paddle_size": [900.0, 20.0] }"#,
        ] {
            assert!(
                matches!(GameConfig::from_json(json), Err(ConfigError::Invalid(_))),
                "{json}"
            );
        }
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("breakout-core-config-{}.json", std::process::id()));
        let config = GameConfig {
            seed: 1234,
            ..GameConfig::default()
        };
        config.save(&path).unwrap();
        let loaded = GameConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = GameConfig::load_or_default("/nonexistent/breakout-core.json");
        assert_eq!(config, GameConfig::default());
    }
}
