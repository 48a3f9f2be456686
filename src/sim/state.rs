//! Game state owned by the frame loop
//!
//! Everything the simulation mutates lives in [`GameState`] and is passed by
//! reference into the collision and power-up code.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Ball, GameObject, TextureSet};
use super::level::{Level, LevelError, TileGrid};
use super::particles::ParticleEmitter;
use super::powerup::{PowerUp, RandomSampler, SpawnSampler};
use super::tick::FrameInput;
use crate::{GameConfig, WHITE};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Playing the current level
    Active,
    /// Level cleared, waiting for the player to continue
    Win,
}

/// Post-processing flags toggled by the simulation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostEffects {
    pub shake: bool,
    pub confuse: bool,
    pub chaos: bool,
}

/// Complete game state
pub struct GameState {
    pub config: GameConfig,
    pub textures: TextureSet,
    pub phase: GamePhase,
    /// Index into `levels`
    pub level: usize,
    /// Only `levels[level]` takes part in the simulation
    pub levels: Vec<Level>,
    pub paddle: GameObject,
    pub ball: Ball,
    /// Falling pickups and running effects
    pub power_ups: Vec<PowerUp>,
    pub particles: ParticleEmitter,
    pub effects: PostEffects,
    /// Seconds of screen shake left
    pub shake_time: f32,
    /// Simulated seconds since start
    pub time: f32,
    /// Power-up spawn decisions
    pub sampler: Box<dyn SpawnSampler>,
    /// Visual-only randomness (particles)
    pub rng: Pcg32,
    /// Keys held last frame, for one-shot keys
    pub last_input: FrameInput,
}

impl GameState {
    /// Build a state from validated level grids
    pub fn new(
        config: GameConfig,
        grids: Vec<TileGrid>,
        textures: TextureSet,
        sampler: Box<dyn SpawnSampler>,
    ) -> Result<Self, LevelError> {
        if grids.is_empty() {
            return Err(LevelError::NoLevels);
        }

        let area = Vec2::new(config.width, config.height / 2.0);
        let levels: Vec<Level> = grids
            .into_iter()
            .map(|grid| Level::from_grid(grid, area, &textures))
            .collect();

        let paddle_pos = paddle_start(&config);
        let paddle = GameObject::new(paddle_pos, config.paddle_size, textures.paddle);
        let ball = Ball::new(
            ball_start(&config, paddle_pos, config.paddle_size),
            config.ball_radius,
            config.initial_ball_velocity,
            textures.ball,
        );
        let particles = ParticleEmitter::new(config.max_particles, config.particles_per_frame);
        let rng = Pcg32::seed_from_u64(config.seed);

        log::info!(
            "Game initialized: {} levels, {}x{} play area, seed {}",
            levels.len(),
            config.width,
            config.height,
            config.seed
        );

        Ok(Self {
            config,
            textures,
            phase: GamePhase::Active,
            level: 0,
            levels,
            paddle,
            ball,
            power_ups: Vec::new(),
            particles,
            effects: PostEffects::default(),
            shake_time: 0.0,
            time: 0.0,
            sampler,
            rng,
            last_input: FrameInput::default(),
        })
    }

    /// State with a [`RandomSampler`] seeded from the config
    pub fn seeded(config: GameConfig, grids: Vec<TileGrid>) -> Result<Self, LevelError> {
        let sampler = Box::new(RandomSampler::new(config.seed));
        Self::new(config, grids, TextureSet::default(), sampler)
    }

    pub fn current_level(&self) -> &Level {
        &self.levels[self.level]
    }

    pub fn bricks(&self) -> &[GameObject] {
        &self.levels[self.level].bricks
    }

    /// Rebuild the current level's bricks from its grid
    pub fn reset_level(&mut self) {
        log::info!("Resetting level {}", self.level + 1);
        let textures = &self.textures;
        self.levels[self.level].reload(textures);
    }

    /// Paddle, ball and every running modifier back to their start values
    pub fn reset_player(&mut self) {
        let pos = paddle_start(&self.config);
        self.paddle.size = self.config.paddle_size;
        self.paddle.pos = pos;
        self.paddle.color = WHITE;

        self.ball.reset(
            ball_start(&self.config, pos, self.config.paddle_size),
            self.config.initial_ball_velocity,
        );
        self.ball.body.color = WHITE;

        self.effects.confuse = false;
        self.effects.chaos = false;
        self.power_ups.clear();
        self.particles.clear();
    }

    /// Switch to another level and start it fresh
    pub fn select_level(&mut self, index: usize) -> Result<(), LevelError> {
        if index >= self.levels.len() {
            return Err(LevelError::OutOfRange {
                index,
                count: self.levels.len(),
            });
        }
        log::info!("Switching to level {}", index + 1);
        self.level = index;
        self.phase = GamePhase::Active;
        self.reset_level();
        self.reset_player();
        Ok(())
    }

    /// Start the screen shake timer
    pub fn shake(&mut self) {
        self.shake_time = self.config.shake_duration;
        self.effects.shake = true;
    }
}

/// Paddle start: centered on the bottom edge
fn paddle_start(config: &GameConfig) -> Vec2 {
    Vec2::new(
        config.width / 2.0 - config.paddle_size.x / 2.0,
        config.height - config.paddle_size.y,
    )
}

/// Ball start: resting on top of the paddle, centered
fn ball_start(config: &GameConfig, paddle_pos: Vec2, paddle_size: Vec2) -> Vec2 {
    paddle_pos
        + Vec2::new(
            paddle_size.x / 2.0 - config.ball_radius,
            -config.ball_radius * 2.0,
        )
}
