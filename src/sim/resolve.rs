//! Collision response: brick bounces, paddle redirect, pickups
//!
//! Consumes the pure queries from `collision` and mutates the game state.

use glam::Vec2;

use super::collision::{Contact, Direction, circle_rect_collision, rect_overlap};
use super::entity::{Ball, GameObject};
use super::powerup::{activate, spawn_power_ups};
use super::state::GameState;

/// Resolve every collision for this frame: bricks, then pickups, then paddle
pub fn do_collisions(state: &mut GameState) {
    resolve_bricks(state);
    resolve_pickups(state);
    resolve_paddle(state);
}

fn resolve_bricks(state: &mut GameState) {
    let level = state.level;

    for idx in 0..state.levels[level].bricks.len() {
        let brick = &state.levels[level].bricks[idx];
        if brick.destroyed {
            continue;
        }
        // The ball may have been pushed by an earlier brick this frame
        let Some(contact) = circle_rect_collision(state.ball.center(), state.ball.radius, brick)
        else {
            continue;
        };
        let solid = brick.solid;
        let brick_pos = brick.pos;

        if solid {
            state.shake();
        } else {
            state.levels[level].bricks[idx].destroyed = true;
            spawn_power_ups(state, brick_pos);
            if state.ball.pass_through {
                continue;
            }
        }

        bounce(&mut state.ball, &contact);
    }
}

/// Reflect the ball off the hit side and push it out of the box
pub fn bounce(ball: &mut Ball, contact: &Contact) {
    let depth = contact.depth(ball.radius);
    let body = &mut ball.body;

    match contact.direction {
        Direction::Left => {
            body.vel.x = -body.vel.x;
            body.pos.x -= depth;
        }
        Direction::Right => {
            body.vel.x = -body.vel.x;
            body.pos.x += depth;
        }
        Direction::Up => {
            body.vel.y = -body.vel.y;
            body.pos.y -= depth;
        }
        Direction::Down => {
            body.vel.y = -body.vel.y;
            body.pos.y += depth;
        }
    }
}

fn resolve_pickups(state: &mut GameState) {
    for idx in 0..state.power_ups.len() {
        let power_up = &state.power_ups[idx];
        if power_up.body.destroyed || !rect_overlap(&state.paddle, &power_up.body) {
            continue;
        }
        let kind = power_up.kind;
        activate(state, kind);

        let power_up = &mut state.power_ups[idx];
        power_up.body.destroyed = true;
        power_up.activated = true;
    }
}

fn resolve_paddle(state: &mut GameState) {
    if state.ball.stuck || !rect_overlap(&state.ball.body, &state.paddle) {
        return;
    }

    state.ball.body.vel = paddle_redirect(
        state.ball.center().x,
        &state.paddle,
        state.ball.body.vel,
        state.config.initial_ball_velocity,
        state.config.paddle_strength,
    );
    state.ball.stuck = state.ball.sticky;
}

/// New ball velocity after a paddle hit.
///
/// The horizontal component follows how far from the paddle center the ball
/// landed; the vertical component always points up. Speed is preserved.
pub fn paddle_redirect(
    ball_center_x: f32,
    paddle: &GameObject,
    old_vel: Vec2,
    initial_vel: Vec2,
    strength: f32,
) -> Vec2 {
    let half_width = paddle.size.x / 2.0;
    let offset = ball_center_x - (paddle.pos.x + half_width);
    let percentage = if half_width > 0.0 { offset / half_width } else { 0.0 };

    // Floor keeps a ball arriving with no vertical speed moving up
    let up = old_vel.y.abs().max(f32::EPSILON);
    let redirected = Vec2::new(initial_vel.x * percentage * strength, -up);
    redirected.try_normalize().unwrap_or(Vec2::NEG_Y) * old_vel.length()
}
