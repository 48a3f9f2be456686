//! Fixed timestep frame: input, then update
//!
//! Update order within a frame is fixed: move ball, resolve collisions,
//! out-of-bounds reset, win check, particles, power-up timers, shake timer.

use super::powerup::advance_power_ups;
use super::resolve::do_collisions;
use super::state::{GamePhase, GameState};

/// Keys the core reads each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Launch,
    Reset,
    Level1,
    Level2,
    Level3,
    Level4,
    Level5,
}

impl Key {
    pub const COUNT: usize = 9;

    pub const LEVELS: [Key; 5] = [Key::Level1, Key::Level2, Key::Level3, Key::Level4, Key::Level5];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Key-pressed table for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    keys: [bool; Key::COUNT],
}

impl FrameInput {
    pub fn with(mut self, key: Key) -> Self {
        self.set(key, true);
        self
    }

    pub fn set(&mut self, key: Key, pressed: bool) {
        self.keys[key.index()] = pressed;
    }

    #[inline]
    pub fn is_pressed(&self, key: Key) -> bool {
        self.keys[key.index()]
    }
}

/// Apply one frame of input
///
/// Movement and launch act while held; reset and level keys fire once per press.
pub fn process_input(state: &mut GameState, input: &FrameInput, dt: f32) {
    let last = state.last_input;
    let just_pressed = |key: Key| input.is_pressed(key) && !last.is_pressed(key);

    for (index, key) in Key::LEVELS.into_iter().enumerate() {
        if just_pressed(key) {
            if let Err(err) = state.select_level(index) {
                log::debug!("Ignoring level select: {}", err);
            }
        }
    }

    if just_pressed(Key::Reset) {
        state.reset_level();
        state.reset_player();
        state.phase = GamePhase::Active;
    }

    match state.phase {
        GamePhase::Active => {
            let step = state.config.paddle_speed * dt;
            let max_x = state.config.width - state.paddle.size.x;

            if input.is_pressed(Key::Left) && state.paddle.pos.x >= 0.0 {
                state.paddle.pos.x -= step;
                if state.ball.stuck {
                    state.ball.body.pos.x -= step;
                }
            }
            if input.is_pressed(Key::Right) && state.paddle.pos.x <= max_x {
                state.paddle.pos.x += step;
                if state.ball.stuck {
                    state.ball.body.pos.x += step;
                }
            }
            if input.is_pressed(Key::Launch) {
                state.ball.stuck = false;
            }
        }
        GamePhase::Win => {
            if just_pressed(Key::Launch) {
                state.effects.chaos = false;
                state.phase = GamePhase::Active;
            }
        }
    }

    state.last_input = *input;
}

/// Advance the simulation by one fixed timestep
pub fn update(state: &mut GameState, dt: f32) {
    state.time += dt;

    state.ball.advance(dt, state.config.width);
    do_collisions(state);

    if state.ball.body.pos.y >= state.config.height {
        log::info!("Ball lost, restarting level {}", state.level + 1);
        state.reset_level();
        state.reset_player();
    }

    if state.phase == GamePhase::Active && state.current_level().is_completed() {
        log::info!("Level {} cleared", state.level + 1);
        state.reset_level();
        state.reset_player();
        state.effects.chaos = true;
        state.phase = GamePhase::Win;
    }

    state.particles.update(dt, &state.ball, &mut state.rng);
    advance_power_ups(state, dt);

    if state.shake_time > 0.0 {
        state.shake_time -= dt;
        if state.shake_time <= 0.0 {
            state.effects.shake = false;
        }
    }
}

/// Input followed by update
pub fn tick(state: &mut GameState, input: &FrameInput, dt: f32) {
    process_input(state, input, dt);
    update(state, dt);
}
