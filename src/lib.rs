//! Brickout - a 30 level Breakout/Arkanoid arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (levels, entities, collisions, power-ups, flow)
//! - `present`: Presentation adapter contract and event dispatch
//! - `game`: Driver owning state, RNG and pending input
//! - `settings`: Data-driven game balance and rule choices

pub mod game;
pub mod present;
pub mod settings;
pub mod sim;

pub use game::{FixedStepper, Game};
pub use present::{LogPresenter, Presenter};
pub use settings::{ReactivationPolicy, Settings};

/// Game configuration constants
pub mod consts {
    /// Logical simulation rate
    pub const TICKS_PER_SECOND: u64 = 60;
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions (logical units)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    /// Gap between the paddle and the floor
    pub const PADDLE_FLOOR_GAP: f32 = 10.0;
    /// Width multiplier while the wide effect is active
    pub const WIDE_FACTOR: f32 = 1.5;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;

    /// Brick grid layout
    pub const BRICK_ROWS: usize = 5;
    pub const BRICK_COLS: usize = 8;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 2.0;
    /// Distance from the ceiling to the first brick row
    pub const BRICK_TOP_OFFSET: f32 = 50.0;
    /// Points awarded per destroyed brick
    pub const BRICK_SCORE: u32 = 10;

    /// Pickup defaults
    pub const PICKUP_SIZE: f32 = 20.0;
    pub const PICKUP_FALL_SPEED: f32 = 2.0;

    /// Laser shot defaults
    pub const LASER_WIDTH: f32 = 4.0;
    pub const LASER_HEIGHT: f32 = 10.0;
    pub const LASER_SPEED: f32 = 7.0;

    /// Timed effect duration (10 seconds at 60 Hz)
    pub const EFFECT_DURATION_TICKS: u64 = 10 * TICKS_PER_SECOND;
    /// Level banner pause (2 seconds at 60 Hz)
    pub const TRANSITION_TICKS: u64 = 2 * TICKS_PER_SECOND;

    /// Number of levels in a full run
    pub const LEVEL_COUNT: u32 = 30;
    pub const STARTING_LIVES: u32 = 3;
}

/// Width of a single brick so that `BRICK_COLS` bricks and their padding span the playfield
#[inline]
pub fn brick_width() -> f32 {
    use consts::*;
    (PLAYFIELD_WIDTH - (BRICK_COLS as f32 + 1.0) * BRICK_PADDING) / BRICK_COLS as f32
}

/// Top edge of the paddle (fixed for the whole run)
#[inline]
pub fn paddle_top() -> f32 {
    use consts::*;
    PLAYFIELD_HEIGHT - PADDLE_HEIGHT - PADDLE_FLOOR_GAP
}
