//! Power-ups: spawn sampling, timers, stacking-aware expiry
//!
//! A pickup is created when a brick breaks, falls until the paddle catches
//! it or it leaves the play area, and once caught keeps ticking its timer
//! until the effect expires. Effects of the same kind stack: the effect is
//! reverted only when the last running instance of that kind runs out.

use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::{GameObject, TextureHandle, TextureSet};
use super::state::GameState;
use crate::WHITE;

/// Paddle tint while sticky is running
pub const STICKY_TINT: Vec3 = Vec3::new(1.0, 0.5, 1.0);
/// Ball tint while pass-through is running
pub const PASS_THROUGH_TINT: Vec3 = Vec3::new(1.0, 0.5, 0.5);

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    Speed,
    Sticky,
    PassThrough,
    Grow,
    Confuse,
    Chaos,
}

impl PowerUpKind {
    /// Spawn trial order
    pub const ALL: [PowerUpKind; 6] = [
        PowerUpKind::Speed,
        PowerUpKind::Sticky,
        PowerUpKind::PassThrough,
        PowerUpKind::Grow,
        PowerUpKind::Confuse,
        PowerUpKind::Chaos,
    ];

    /// Effect duration in seconds (0 = instantaneous)
    pub fn duration(self) -> f32 {
        match self {
            PowerUpKind::Speed | PowerUpKind::Grow => 0.0,
            PowerUpKind::Sticky => 20.0,
            PowerUpKind::PassThrough => 10.0,
            PowerUpKind::Confuse | PowerUpKind::Chaos => 15.0,
        }
    }

    /// Confuse and chaos hurt the player
    pub fn is_negative(self) -> bool {
        matches!(self, PowerUpKind::Confuse | PowerUpKind::Chaos)
    }

    pub fn color(self) -> Vec3 {
        match self {
            PowerUpKind::Speed => Vec3::new(0.5, 0.5, 1.0),
            PowerUpKind::Sticky => Vec3::new(1.0, 0.5, 1.0),
            PowerUpKind::PassThrough => Vec3::new(0.5, 1.0, 0.5),
            PowerUpKind::Grow => Vec3::new(1.0, 0.6, 0.4),
            PowerUpKind::Confuse => Vec3::new(1.0, 0.3, 0.3),
            PowerUpKind::Chaos => Vec3::new(0.9, 0.25, 0.25),
        }
    }

    pub fn texture(self, textures: &TextureSet) -> TextureHandle {
        match self {
            PowerUpKind::Speed => textures.powerup_speed,
            PowerUpKind::Sticky => textures.powerup_sticky,
            PowerUpKind::PassThrough => textures.powerup_pass_through,
            PowerUpKind::Grow => textures.powerup_grow,
            PowerUpKind::Confuse => textures.powerup_confuse,
            PowerUpKind::Chaos => textures.powerup_chaos,
        }
    }
}

/// A falling pickup / running effect
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub body: GameObject,
    pub kind: PowerUpKind,
    /// Seconds left on the effect once activated
    pub duration: f32,
    /// Effect is running
    pub activated: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, pos: Vec2, size: Vec2, vel: Vec2, textures: &TextureSet) -> Self {
        Self {
            body: GameObject::new(pos, size, kind.texture(textures))
                .with_color(kind.color())
                .with_velocity(vel),
            kind,
            duration: kind.duration(),
            activated: false,
        }
    }

    /// Fell off-screen, or its effect has fully expired
    pub fn is_spent(&self) -> bool {
        self.body.destroyed && !self.activated
    }
}

/// Source of spawn decisions
pub trait SpawnSampler {
    /// One Bernoulli trial with probability `1 / one_in`
    fn should_spawn(&mut self, one_in: u32) -> bool;
}

/// Seeded PCG sampler
#[derive(Debug, Clone)]
pub struct RandomSampler {
    rng: Pcg32,
}

impl RandomSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl SpawnSampler for RandomSampler {
    fn should_spawn(&mut self, one_in: u32) -> bool {
        one_in > 0 && self.rng.random_range(0..one_in) == 0
    }
}

/// Never spawns anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverSpawn;

impl SpawnSampler for NeverSpawn {
    fn should_spawn(&mut self, _one_in: u32) -> bool {
        false
    }
}

/// Every trial succeeds
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysSpawn;

impl SpawnSampler for AlwaysSpawn {
    fn should_spawn(&mut self, _one_in: u32) -> bool {
        true
    }
}

/// Roll every power-up kind once for a brick destroyed at `pos`
pub fn spawn_power_ups(state: &mut GameState, pos: Vec2) {
    for kind in PowerUpKind::ALL {
        let one_in = if kind.is_negative() {
            state.config.negative_spawn_chance
        } else {
            state.config.positive_spawn_chance
        };
        if state.sampler.should_spawn(one_in) {
            log::debug!("Spawned {:?} power-up at ({:.1}, {:.1})", kind, pos.x, pos.y);
            let power_up = PowerUp::new(
                kind,
                pos,
                state.config.power_up_size,
                state.config.power_up_velocity,
                &state.textures,
            );
            state.power_ups.push(power_up);
        }
    }
}

/// Apply the effect of a power-up that was just caught
pub fn activate(state: &mut GameState, kind: PowerUpKind) {
    log::debug!("Activated {:?}", kind);
    match kind {
        PowerUpKind::Speed => {
            state.ball.body.vel *= state.config.speed_multiplier;
        }
        PowerUpKind::Sticky => {
            state.ball.sticky = true;
            state.paddle.color = STICKY_TINT;
        }
        PowerUpKind::PassThrough => {
            state.ball.pass_through = true;
            state.ball.body.color = PASS_THROUGH_TINT;
        }
        PowerUpKind::Grow => {
            state.paddle.size.x += state.config.grow_amount;
        }
        PowerUpKind::Confuse => {
            // Suppressed while chaos is on
            if !state.effects.chaos {
                state.effects.confuse = true;
            }
        }
        PowerUpKind::Chaos => {
            if !state.effects.confuse {
                state.effects.chaos = true;
            }
        }
    }
}

/// Undo the effect of `kind` after its last instance expired
fn revert(state: &mut GameState, kind: PowerUpKind) {
    log::debug!("Expired {:?}", kind);
    match kind {
        PowerUpKind::Speed | PowerUpKind::Grow => {}
        PowerUpKind::Sticky => {
            state.ball.sticky = false;
            state.paddle.color = WHITE;
        }
        PowerUpKind::PassThrough => {
            state.ball.pass_through = false;
            state.ball.body.color = WHITE;
        }
        PowerUpKind::Confuse => state.effects.confuse = false,
        PowerUpKind::Chaos => state.effects.chaos = false,
    }
}

/// True if any running power-up has the given kind
pub fn is_other_active(power_ups: &[PowerUp], kind: PowerUpKind) -> bool {
    power_ups.iter().any(|p| p.activated && p.kind == kind)
}

/// Move pickups, cull the ones that fell out, tick running effects and drop
/// spent entries
pub fn advance_power_ups(state: &mut GameState, dt: f32) {
    let play_height = state.config.height;

    for idx in 0..state.power_ups.len() {
        let power_up = &mut state.power_ups[idx];

        if !power_up.body.destroyed {
            power_up.body.pos += power_up.body.vel * dt;
            if power_up.body.pos.y >= play_height {
                power_up.body.destroyed = true;
            }
        }

        if !power_up.activated {
            continue;
        }
        power_up.duration -= dt;
        if power_up.duration > 0.0 {
            continue;
        }
        power_up.activated = false;
        let kind = power_up.kind;

        if !is_other_active(&state.power_ups, kind) {
            revert(state, kind);
        }
    }

    state.power_ups.retain(|p| !p.is_spent());
}
