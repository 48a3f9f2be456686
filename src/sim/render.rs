//! Render snapshot
//!
//! The core draws nothing; it hands the renderer an ordered sprite list plus
//! the post-processing flags.

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

use super::entity::{GameObject, TextureHandle};
use super::state::{GameState, PostEffects};

/// One textured quad
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub texture: TextureHandle,
    pub pos: Vec2,
    pub size: Vec2,
    /// Degrees
    pub rotation: f32,
    pub color: Vec4,
}

impl From<&GameObject> for Sprite {
    fn from(obj: &GameObject) -> Self {
        Self {
            texture: obj.texture,
            pos: obj.pos,
            size: obj.size,
            rotation: obj.rotation,
            color: obj.color.extend(1.0),
        }
    }
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    /// Back to front
    pub sprites: Vec<Sprite>,
    pub effects: PostEffects,
    /// Drives shader animation
    pub time: f32,
}

/// Snapshot the drawable state: background, bricks, paddle, particles,
/// pickups, ball
pub fn render(state: &GameState) -> Frame {
    let mut sprites = Vec::new();

    sprites.push(Sprite {
        texture: state.textures.background,
        pos: Vec2::ZERO,
        size: Vec2::new(state.config.width, state.config.height),
        rotation: 0.0,
        color: Vec4::ONE,
    });

    sprites.extend(state.bricks().iter().filter(|b| !b.destroyed).map(Sprite::from));
    sprites.push(Sprite::from(&state.paddle));

    let particle_size = Vec2::splat(state.ball.radius);
    sprites.extend(state.particles.iter_alive().map(|p| Sprite {
        texture: state.textures.particle,
        pos: p.pos,
        size: particle_size,
        rotation: 0.0,
        color: p.color,
    }));

    sprites.extend(
        state
            .power_ups
            .iter()
            .filter(|p| !p.body.destroyed)
            .map(|p| Sprite::from(&p.body)),
    );
    sprites.push(Sprite::from(&state.ball.body));

    Frame {
        sprites,
        effects: state.effects,
        time: state.time,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameConfig;
    use crate::sim::entity::TextureSet;
    use crate::sim::level::TileGrid;
    use crate::sim::powerup::{NeverSpawn, PowerUp, PowerUpKind};

    fn test_state() -> GameState {
        let grid = TileGrid::new(vec![vec![2, 1, 2]]).unwrap();
        GameState::new(GameConfig::default(), vec![grid], TextureSet::default(), Box::new(NeverSpawn))
            .unwrap()
    }

    #[test]
    fn test_draw_order_and_culling() {
        let mut state = test_state();
        state.levels[0].bricks[0].destroyed = true;
        let textures = state.textures.clone();
        state
            .power_ups
            .push(PowerUp::new(PowerUpKind::Grow, Vec2::new(5.0, 5.0), Vec2::ONE, Vec2::ZERO, &textures));
        let mut caught = PowerUp::new(PowerUpKind::Chaos, Vec2::ZERO, Vec2::ONE, Vec2::ZERO, &textures);
        caught.body.destroyed = true;
        caught.activated = true;
        state.power_ups.push(caught);

        let frame = render(&state);
        let order: Vec<TextureHandle> = frame.sprites.iter().map(|s| s.texture).collect();
        assert_eq!(
            order,
            vec![
                textures.background,
                textures.block_solid,
                textures.block,
                textures.paddle,
                textures.powerup_grow,
                textures.ball,
            ]
        );
    }

    #[test]
    fn test_frame_carries_effects() {
        let mut state = test_state();
        state.effects.confuse = true;
        state.time = 3.5;
        let frame = render(&state);
        assert!(frame.effects.confuse);
        assert!(!frame.effects.chaos);
        assert_eq!(frame.time, 3.5);
    }

    #[test]
    fn test_frame_serializes() {
        let frame = render(&test_state());
        let json = serde_json::to_string(&frame).unwrap();
        assert!(json.contains("\"sprites\""));
    }
}
