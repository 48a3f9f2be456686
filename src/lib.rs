//! Breakout Core - simulation core of a 2D breakout arcade game
//!
//! Core modules:
//! - `sim`: Fixed-timestep simulation (entities, collisions, power-ups, game state)
//! - `config`: Data-driven game balance, loaded from JSON

pub mod config;
pub mod sim;

pub use config::{ConfigError, GameConfig};

use glam::{Vec2, Vec3};

/// Game configuration constants (defaults for [`GameConfig`])
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Play area dimensions
    pub const PLAY_WIDTH: f32 = 800.0;
    pub const PLAY_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_SIZE: Vec2 = Vec2::new(100.0, 20.0);
    pub const PADDLE_SPEED: f32 = 500.0;
    /// Horizontal redirect strength applied on paddle contact
    pub const PADDLE_STRENGTH: f32 = 2.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.5;
    pub const INITIAL_BALL_VELOCITY: Vec2 = Vec2::new(100.0, -350.0);

    /// Power-up spawn denominators (1-in-N per destroyed brick, per kind)
    pub const POSITIVE_SPAWN_CHANCE: u32 = 5;
    pub const NEGATIVE_SPAWN_CHANCE: u32 = 15;
    pub const POWER_UP_SIZE: Vec2 = Vec2::new(60.0, 20.0);
    pub const POWER_UP_VELOCITY: Vec2 = Vec2::new(0.0, 150.0);
    /// Ball velocity multiplier for the speed power-up
    pub const SPEED_MULTIPLIER: f32 = 1.2;
    /// Paddle width gained from the grow power-up
    pub const GROW_AMOUNT: f32 = 50.0;

    /// Screen shake after hitting a solid brick (seconds)
    pub const SHAKE_DURATION: f32 = 0.05;

    /// Particle trail
    pub const MAX_PARTICLES: usize = 500;
    pub const PARTICLES_PER_FRAME: usize = 2;
}

/// Untinted sprite colour
pub const WHITE: Vec3 = Vec3::ONE;

/// Center of an axis-aligned box given its top-left corner and size
#[inline]
pub fn box_center(pos: Vec2, size: Vec2) -> Vec2 {
    pos + size * 0.5
}
