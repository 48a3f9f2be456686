//! Fixed-timestep simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Fixed timestep only
//! - Injected, seedable randomness only
//! - Stable iteration order (insertion order of level data)

pub mod collision;
pub mod entity;
pub mod level;
pub mod particles;
pub mod powerup;
pub mod render;
pub mod resolve;
pub mod state;
pub mod tick;

pub use collision::{Contact, Direction, circle_rect_collision, rect_overlap};
pub use entity::{Ball, GameObject, TextureHandle, TextureSet};
pub use level::{BuiltinLevels, Level, LevelError, LevelLoader, TileGrid};
pub use particles::{Particle, ParticleEmitter};
pub use powerup::{AlwaysSpawn, NeverSpawn, PowerUp, PowerUpKind, RandomSampler, SpawnSampler};
pub use render::{Frame, Sprite, render};
pub use state::{GamePhase, GameState, PostEffects};
pub use tick::{FrameInput, Key, process_input, tick, update};
