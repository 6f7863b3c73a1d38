//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected random source only
//! - Stable iteration order (spawn order for balls, arena order for bricks)
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod flow;
pub mod levels;
pub mod rect;
pub mod rng;
pub mod state;
pub mod tick;
pub mod timers;

pub use collision::WallContact;
pub use levels::{BrickGrid, LevelCatalog, LevelConfig};
pub use rect::Rect;
pub use rng::{RandomSource, ScriptedRng, SeededRng};
pub use state::{
    ActiveEffects, Ball, Brick, GameEvent, GamePhase, GameState, LaserShot, Paddle,
    PaddleDirection, Pickup, PowerupKind,
};
pub use tick::{TickInput, tick};
pub use timers::{TimedAction, Timers};
