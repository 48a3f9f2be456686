//! Collision detection for axis-aligned boxes and the ball
//!
//! Pure queries only; response lives in `resolve`. Coordinates are screen
//! space: origin top-left, +y pointing down.

use glam::Vec2;

use super::entity::GameObject;

/// Side of a box the ball touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Classification order; earlier entries win ties
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    /// Screen-space unit vector pointing away from the box through this side
    pub fn compass(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
        }
    }

    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Closest compass direction to `v` by dot product.
    ///
    /// Only a strictly greater score replaces the current best, so ties go to
    /// the earlier entry of [`Direction::ALL`]. A zero-length vector has no
    /// direction and maps to `Up`.
    pub fn classify(v: Vec2) -> Direction {
        let Some(n) = v.try_normalize() else {
            return Direction::Up;
        };

        let mut best = Direction::Up;
        let mut best_score = n.dot(best.compass());
        for dir in Direction::ALL.into_iter().skip(1) {
            let score = n.dot(dir.compass());
            if score > best_score {
                best_score = score;
                best = dir;
            }
        }
        best
    }
}

/// A ball/box contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Side of the box that was hit
    pub direction: Direction,
    /// Offset from the closest point on the box to the ball center
    pub penetration: Vec2,
}

impl Contact {
    /// Overlap depth along the axis of `direction`
    pub fn depth(&self, radius: f32) -> f32 {
        let along = if self.direction.is_horizontal() {
            self.penetration.x
        } else {
            self.penetration.y
        };
        radius - along.abs()
    }
}

/// AABB overlap test. Touching edges count as overlap.
pub fn rect_overlap(a: &GameObject, b: &GameObject) -> bool {
    let overlap_x = a.pos.x + a.size.x >= b.pos.x && b.pos.x + b.size.x >= a.pos.x;
    let overlap_y = a.pos.y + a.size.y >= b.pos.y && b.pos.y + b.size.y >= a.pos.y;
    overlap_x && overlap_y
}

/// Check a circle against a box
///
/// Clamps the center-to-center offset into the box half extents to find the
/// closest point on the box; the circle hits when that point lies within
/// `radius` of its center.
pub fn circle_rect_collision(center: Vec2, radius: f32, rect: &GameObject) -> Option<Contact> {
    let half = rect.half_extents();
    let rect_center = rect.center();

    let offset = center - rect_center;
    let clamped = offset.clamp(-half, half);
    let closest = rect_center + clamped;

    let penetration = center - closest;
    if penetration.length() <= radius {
        Some(Contact {
            direction: Direction::classify(penetration),
            penetration,
        })
    } else {
        None
    }
}
