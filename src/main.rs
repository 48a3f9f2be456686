//! Breakout Core headless runner
//!
//! Plays a scripted session at a fixed timestep: launch, then keep the
//! paddle under the ball. Pass a JSON config path as the first argument.
//! Set `RUST_LOG=debug` to see power-up events and the final frame.

use breakout_core::GameConfig;
use breakout_core::consts::SIM_DT;
use breakout_core::sim::{BuiltinLevels, FrameInput, GamePhase, GameState, Key, LevelLoader, render, tick};

/// Upper bound on simulated frames (two minutes at 60 Hz)
const MAX_FRAMES: u32 = 60 * 120;

/// Follow the ball with the paddle, launching whenever it is stuck
fn autopilot(state: &GameState) -> FrameInput {
    let mut input = FrameInput::default();
    if state.phase == GamePhase::Win || state.ball.stuck {
        return input.with(Key::Launch);
    }

    let target = state.ball.center().x;
    let paddle_center = state.paddle.center().x;
    let dead_zone = state.paddle.size.x * 0.25;
    if target < paddle_center - dead_zone {
        input.set(Key::Left, true);
    } else if target > paddle_center + dead_zone {
        input.set(Key::Right, true);
    }
    input
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    log::info!("Breakout Core (headless) starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    let grids = BuiltinLevels.load_levels()?;
    let mut state = GameState::seeded(config, grids)?;

    let mut frames = 0;
    let mut wins = 0;
    while frames < MAX_FRAMES {
        let input = autopilot(&state);
        let phase = state.phase;
        tick(&mut state, &input, SIM_DT);
        if phase == GamePhase::Active && state.phase == GamePhase::Win {
            wins += 1;
        }
        frames += 1;
    }

    let bricks = state.bricks();
    let destroyed = bricks.iter().filter(|b| b.destroyed).count();
    log::info!(
        "Ran {} frames ({:.1}s): level {}, {}/{} bricks down, {} power-ups live, {} levels cleared",
        frames,
        state.time,
        state.level + 1,
        destroyed,
        bricks.len(),
        state.power_ups.len(),
        wins
    );

    if log::log_enabled!(log::Level::Debug) {
        let frame = render(&state);
        log::debug!("Final frame: {}", serde_json::to_string(&frame)?);
    }

    Ok(())
}
