//! Levels: validated tile grids and the bricks laid out from them
//!
//! Tile codes:
//! - `0`: empty
//! - `1`: solid (indestructible) brick
//! - `2..=5`: coloured destructible brick

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entity::{GameObject, TextureSet};

/// Highest tile code a grid may contain
pub const MAX_TILE_CODE: u8 = 5;

/// Problems with level data, reported before it reaches the simulation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    #[error("no levels supplied")]
    NoLevels,
    #[error("tile grid is empty")]
    EmptyGrid,
    #[error("row {row} has {found} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown tile code {code} at row {row}, column {col}")]
    UnknownTile { row: usize, col: usize, code: u8 },
    #[error("level index {index} out of range ({count} levels)")]
    OutOfRange { index: usize, count: usize },
}

/// Rectangular grid of tile codes
///
/// Serialized as a bare array of rows. Deserializing runs the same checks as
/// [`TileGrid::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct TileGrid {
    rows: Vec<Vec<u8>>,
}

impl TileGrid {
    pub fn new(rows: Vec<Vec<u8>>) -> Result<Self, LevelError> {
        let expected = rows.first().map(Vec::len).unwrap_or(0);
        if expected == 0 {
            return Err(LevelError::EmptyGrid);
        }
        for (row, tiles) in rows.iter().enumerate() {
            if tiles.len() != expected {
                return Err(LevelError::RaggedRow {
                    row,
                    expected,
                    found: tiles.len(),
                });
            }
            if let Some((col, &code)) = tiles.iter().enumerate().find(|(_, c)| **c > MAX_TILE_CODE) {
                return Err(LevelError::UnknownTile { row, col, code });
            }
        }
        Ok(Self { rows })
    }

    pub fn columns(&self) -> usize {
        self.rows[0].len()
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }
}

impl TryFrom<Vec<Vec<u8>>> for TileGrid {
    type Error = LevelError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}

impl From<TileGrid> for Vec<Vec<u8>> {
    fn from(grid: TileGrid) -> Self {
        grid.rows
    }
}

/// Brick colour for a destructible tile code
fn tile_color(code: u8) -> Vec3 {
    match code {
        1 => Vec3::new(0.8, 0.8, 0.7),
        2 => Vec3::new(0.2, 0.6, 1.0),
        3 => Vec3::new(0.0, 0.7, 0.0),
        4 => Vec3::new(0.8, 0.8, 0.4),
        5 => Vec3::new(1.0, 0.5, 0.0),
        _ => crate::WHITE,
    }
}

/// One level: its source grid and the bricks built from it
#[derive(Debug, Clone)]
pub struct Level {
    grid: TileGrid,
    /// Area the grid is stretched over (top of the play field)
    area: Vec2,
    /// Bricks in row-major order
    pub bricks: Vec<GameObject>,
}

impl Level {
    pub fn from_grid(grid: TileGrid, area: Vec2, textures: &TextureSet) -> Self {
        let mut level = Self {
            grid,
            area,
            bricks: Vec::new(),
        };
        level.reload(textures);
        level
    }

    /// Rebuild every brick from the grid
    pub fn reload(&mut self, textures: &TextureSet) {
        let unit = Vec2::new(
            self.area.x / self.grid.columns() as f32,
            self.area.y / self.grid.rows() as f32,
        );

        self.bricks.clear();
        for (y, row) in self.grid.rows.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                if code == 0 {
                    continue;
                }
                let pos = Vec2::new(unit.x * x as f32, unit.y * y as f32);
                let texture = if code == 1 {
                    textures.block_solid
                } else {
                    textures.block
                };
                let mut brick = GameObject::new(pos, unit, texture).with_color(tile_color(code));
                brick.solid = code == 1;
                self.bricks.push(brick);
            }
        }
    }

    /// Every destructible brick is gone
    pub fn is_completed(&self) -> bool {
        self.bricks.iter().all(|b| b.solid || b.destroyed)
    }
}

/// Supplies level data to the game
pub trait LevelLoader {
    fn load_levels(&self) -> Result<Vec<TileGrid>, LevelError>;
}

/// Four in-memory layouts for headless runs
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinLevels;

const STANDARD: &[&[u8]] = &[
    &[5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5],
    &[5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5],
    &[4, 4, 4, 4, 4, 0, 0, 0, 0, 0, 4, 4, 4, 4, 4],
    &[4, 1, 4, 1, 4, 0, 0, 1, 0, 0, 4, 1, 4, 1, 4],
    &[3, 3, 3, 3, 3, 0, 0, 0, 0, 0, 3, 3, 3, 3, 3],
    &[3, 3, 1, 3, 3, 3, 3, 3, 3, 3, 3, 3, 1, 3, 3],
    &[2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2],
    &[2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2],
];

const GAPS: &[&[u8]] = &[
    &[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    &[1, 0, 5, 5, 0, 5, 5, 0, 5, 5, 0, 0, 1],
    &[1, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 1],
    &[1, 0, 3, 3, 0, 3, 3, 0, 3, 3, 0, 0, 1],
    &[1, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 1],
    &[1, 0, 2, 2, 0, 2, 2, 0, 2, 2, 0, 0, 1],
    &[1, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 1],
    &[1, 0, 4, 4, 0, 4, 4, 0, 4, 4, 0, 0, 1],
];

const SPACE_INVADER: &[&[u8]] = &[
    &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    &[0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 2, 0, 0],
    &[0, 0, 0, 2, 0, 0, 0, 0, 0, 2, 0, 0, 0],
    &[0, 0, 0, 5, 5, 5, 5, 5, 5, 5, 0, 0, 0],
    &[0, 0, 5, 5, 0, 5, 5, 5, 0, 5, 5, 0, 0],
    &[0, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 0],
    &[0, 3, 0, 1, 1, 1, 1, 1, 1, 1, 0, 3, 0],
    &[0, 3, 0, 3, 0, 0, 0, 0, 0, 3, 0, 3, 0],
    &[0, 0, 0, 0, 4, 4, 0, 4, 4, 0, 0, 0, 0],
];

const BOUNCE_GALORE: &[&[u8]] = &[
    &[1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1],
    &[2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2],
    &[2, 1, 3, 1, 4, 1, 5, 1, 4, 1, 3, 1, 2],
    &[2, 3, 3, 4, 4, 5, 5, 5, 4, 4, 3, 3, 2],
    &[2, 1, 3, 1, 4, 1, 5, 1, 4, 1, 3, 1, 2],
    &[2, 2, 3, 3, 4, 4, 5, 4, 4, 3, 3, 2, 2],
];

impl LevelLoader for BuiltinLevels {
    fn load_levels(&self) -> Result<Vec<TileGrid>, LevelError> {
        [STANDARD, GAPS, SPACE_INVADER, BOUNCE_GALORE]
            .into_iter()
            .map(|rows| TileGrid::new(rows.iter().map(|r| r.to_vec()).collect()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_rejects_empty() {
        assert_eq!(TileGrid::new(vec![]), Err(LevelError::EmptyGrid));
        assert_eq!(TileGrid::new(vec![vec![]]), Err(LevelError::EmptyGrid));
    }

    #[test]
    fn test_grid_rejects_ragged_rows() {
        let err = TileGrid::new(vec![vec![1, 2, 3], vec![1, 2]]).unwrap_err();
        assert_eq!(
            err,
            LevelError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_grid_rejects_unknown_tile() {
        let err = TileGrid::new(vec![vec![1, 9]]).unwrap_err();
        assert_eq!(err, LevelError::UnknownTile { row: 0, col: 1, code: 9 });
    }

    #[test]
    fn test_json_grid_is_validated() {
        let grid: TileGrid = serde_json::from_str("[[1, 0, 2], [3, 4, 5]]").unwrap();
        assert_eq!((grid.rows(), grid.columns()), (2, 3));
        assert_eq!(serde_json::to_string(&grid).unwrap(), "[[1,0,2],[3,4,5]]");

        for json in [r#"{"rows":[]}"#, "[]", "[[]]", "[[9,2]]", "[[1,2],[1]]"] {
            assert!(serde_json::from_str::<TileGrid>(json).is_err(), "{json}");
        }
    }

    #[test]
    fn test_layout_positions_and_flags() {
        let grid = TileGrid::new(vec![vec![1, 0, 2, 3], vec![0, 4, 5, 0]]).unwrap();
        let level = Level::from_grid(grid, Vec2::new(400.0, 100.0), &TextureSet::default());

        assert_eq!(level.bricks.len(), 5);
        // Row-major insertion order
        let first = &level.bricks[0];
        assert_eq!(first.pos, Vec2::ZERO);
        assert_eq!(first.size, Vec2::new(100.0, 50.0));
        assert!(first.solid);
        assert_eq!(first.texture, TextureSet::default().block_solid);

        let fourth = &level.bricks[3];
        assert_eq!(fourth.pos, Vec2::new(100.0, 50.0));
        assert!(!fourth.solid);
        assert_eq!(fourth.color, Vec3::new(0.8, 0.8, 0.4));
    }

    #[test]
    fn test_completed_ignores_solid_bricks() {
        let grid = TileGrid::new(vec![vec![1, 2, 2]]).unwrap();
        let mut level = Level::from_grid(grid, Vec2::new(300.0, 50.0), &TextureSet::default());
        assert!(!level.is_completed());

        for brick in level.bricks.iter_mut().filter(|b| !b.solid) {
            brick.destroyed = true;
        }
        assert!(level.is_completed());
    }

    #[test]
    fn test_reload_restores_bricks() {
        let grid = TileGrid::new(vec![vec![2, 2]]).unwrap();
        let textures = TextureSet::default();
        let mut level = Level::from_grid(grid, Vec2::new(100.0, 20.0), &textures);
        level.bricks[0].destroyed = true;
        level.reload(&textures);
        assert!(level.bricks.iter().all(|b| !b.destroyed));
    }

    #[test]
    fn test_builtin_levels_are_valid() {
        let levels = BuiltinLevels.load_levels().unwrap();
        assert_eq!(levels.len(), 4);
        assert!(levels.iter().all(|g| g.rows() > 0 && g.columns() > 0));
    }
}
