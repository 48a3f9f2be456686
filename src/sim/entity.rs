//! Entity model: rectangular game objects and the ball
//!
//! Paddle, bricks and power-up pickups are plain [`GameObject`]s. The ball
//! owns a `GameObject` body plus its circle-specific state instead of
//! extending it.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::{WHITE, box_center};

/// Opaque reference to a texture owned by the asset layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextureHandle(pub u32);

/// Texture handles the core hands out to the entities it creates
#[derive(Debug, Clone)]
pub struct TextureSet {
    pub background: TextureHandle,
    pub ball: TextureHandle,
    pub paddle: TextureHandle,
    pub block_solid: TextureHandle,
    pub block: TextureHandle,
    pub particle: TextureHandle,
    pub powerup_speed: TextureHandle,
    pub powerup_sticky: TextureHandle,
    pub powerup_pass_through: TextureHandle,
    pub powerup_grow: TextureHandle,
    pub powerup_confuse: TextureHandle,
    pub powerup_chaos: TextureHandle,
}

impl Default for TextureSet {
    /// Sequential handles, for headless runs and tests
    fn default() -> Self {
        Self {
            background: TextureHandle(0),
            ball: TextureHandle(1),
            paddle: TextureHandle(2),
            block_solid: TextureHandle(3),
            block: TextureHandle(4),
            particle: TextureHandle(5),
            powerup_speed: TextureHandle(6),
            powerup_sticky: TextureHandle(7),
            powerup_pass_through: TextureHandle(8),
            powerup_grow: TextureHandle(9),
            powerup_confuse: TextureHandle(10),
            powerup_chaos: TextureHandle(11),
        }
    }
}

/// An axis-aligned rectangular entity
#[derive(Debug, Clone)]
pub struct GameObject {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Units per second
    pub vel: Vec2,
    pub color: Vec3,
    /// Degrees
    pub rotation: f32,
    /// Indestructible brick
    pub solid: bool,
    /// Excluded from collisions and rendering
    pub destroyed: bool,
    pub texture: TextureHandle,
}

impl GameObject {
    pub fn new(pos: Vec2, size: Vec2, texture: TextureHandle) -> Self {
        Self {
            pos,
            size: size.max(Vec2::ZERO),
            vel: Vec2::ZERO,
            color: WHITE,
            rotation: 0.0,
            solid: false,
            destroyed: false,
            texture,
        }
    }

    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn center(&self) -> Vec2 {
        box_center(self.pos, self.size)
    }

    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }
}

/// The ball: a rectangular body with circle state on top
#[derive(Debug, Clone)]
pub struct Ball {
    /// Bounding box of the circle (size = 2 * radius)
    pub body: GameObject,
    pub radius: f32,
    /// Follows the paddle and ignores velocity
    pub stuck: bool,
    /// Next paddle contact re-engages `stuck`
    pub sticky: bool,
    /// Does not bounce off non-solid bricks
    pub pass_through: bool,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32, vel: Vec2, texture: TextureHandle) -> Self {
        debug_assert!(radius > 0.0, "ball radius must be positive");
        Self {
            body: GameObject::new(pos, Vec2::splat(radius * 2.0), texture).with_velocity(vel),
            radius,
            stuck: true,
            sticky: false,
            pass_through: false,
        }
    }

    /// Center of the circle
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.body.pos + Vec2::splat(self.radius)
    }

    /// Integrate one step and bounce off the left, right and top walls.
    ///
    /// The bottom edge is open; falling through it is handled by the caller.
    pub fn advance(&mut self, dt: f32, play_width: f32) {
        if self.stuck {
            return;
        }

        let body = &mut self.body;
        body.pos += body.vel * dt;

        if body.pos.x <= 0.0 {
            body.vel.x = -body.vel.x;
            body.pos.x = 0.0;
        } else if body.pos.x + body.size.x >= play_width {
            body.vel.x = -body.vel.x;
            body.pos.x = play_width - body.size.x;
        }
        if body.pos.y <= 0.0 {
            body.vel.y = -body.vel.y;
            body.pos.y = 0.0;
        }
    }

    /// Put the ball back on the paddle with the given launch velocity
    pub fn reset(&mut self, pos: Vec2, vel: Vec2) {
        self.body.pos = pos;
        self.body.vel = vel;
        self.stuck = true;
        self.sticky = false;
        self.pass_through = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn free_ball(pos: Vec2, vel: Vec2) -> Ball {
        let mut ball = Ball::new(pos, 10.0, vel, TextureHandle::default());
        ball.stuck = false;
        ball
    }

    #[test]
    fn test_ball_center_offsets_by_radius() {
        let ball = Ball::new(Vec2::new(100.0, 50.0), 10.0, Vec2::ZERO, TextureHandle(1));
        assert_eq!(ball.center(), Vec2::new(110.0, 60.0));
        assert_eq!(ball.body.size, Vec2::splat(20.0));
    }

    #[test]
    fn test_stuck_ball_ignores_velocity() {
        let mut ball = Ball::new(Vec2::new(100.0, 100.0), 10.0, Vec2::new(50.0, -50.0), TextureHandle(1));
        assert!(ball.stuck);
        ball.advance(1.0, 800.0);
        assert_eq!(ball.body.pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_free_ball_integrates() {
        let mut ball = free_ball(Vec2::new(100.0, 100.0), Vec2::new(50.0, -50.0));
        ball.advance(0.5, 800.0);
        assert_eq!(ball.body.pos, Vec2::new(125.0, 75.0));
    }

    #[test]
    fn test_left_wall_bounce() {
        let mut ball = free_ball(Vec2::new(2.0, 100.0), Vec2::new(-100.0, 0.0));
        ball.advance(0.1, 800.0);
        assert_eq!(ball.body.pos.x, 0.0);
        assert_eq!(ball.body.vel.x, 100.0);
    }

    #[test]
    fn test_right_wall_bounce() {
        let mut ball = free_ball(Vec2::new(775.0, 100.0), Vec2::new(100.0, 0.0));
        ball.advance(0.1, 800.0);
        assert_eq!(ball.body.pos.x, 780.0);
        assert_eq!(ball.body.vel.x, -100.0);
    }

    #[test]
    fn test_top_wall_bounce() {
        let mut ball = free_ball(Vec2::new(100.0, 3.0), Vec2::new(0.0, -100.0));
        ball.advance(0.1, 800.0);
        assert_eq!(ball.body.pos.y, 0.0);
        assert_eq!(ball.body.vel.y, 100.0);
    }

    #[test]
    fn test_reset_clears_modifiers() {
        let mut ball = free_ball(Vec2::new(1.0, 1.0), Vec2::ONE);
        ball.sticky = true;
        ball.pass_through = true;
        ball.reset(Vec2::new(10.0, 20.0), Vec2::new(100.0, -350.0));
        assert!(ball.stuck);
        assert!(!ball.sticky);
        assert!(!ball.pass_through);
        assert_eq!(ball.body.vel, Vec2::new(100.0, -350.0));
    }
}
