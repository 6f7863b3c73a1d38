//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`GameState`]. The presentation
//! layer and input handlers never touch it directly.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::levels::{LevelCatalog, LevelConfig};
use super::rect::Rect;
use super::rng::RandomSource;
use super::timers::Timers;
use crate::consts::*;
use crate::settings::Settings;
use crate::{brick_width, paddle_top};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// "Level N" banner between levels; simulation suspended
    LevelTransition,
    /// Player paused; simulation and logical clock suspended
    Paused,
    /// Lives exhausted (terminal)
    GameOver,
    /// All levels cleared (terminal)
    Won,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Won)
    }
}

/// Player movement intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaddleDirection {
    Left,
    #[default]
    Still,
    Right,
}

impl PaddleDirection {
    /// Map any signed axis value onto -1 / 0 / 1
    pub fn from_axis(axis: i32) -> Self {
        match axis.signum() {
            -1 => PaddleDirection::Left,
            1 => PaddleDirection::Right,
            _ => PaddleDirection::Still,
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            PaddleDirection::Left => -1.0,
            PaddleDirection::Still => 0.0,
            PaddleDirection::Right => 1.0,
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
    /// Width outside of the wide effect; restored verbatim on expiry
    pub base_width: f32,
    /// Units per tick
    pub speed: f32,
    pub direction: PaddleDirection,
}

impl Paddle {
    /// Paddle centred horizontally, resting just above the floor
    pub fn new(speed: f32) -> Self {
        Self {
            rect: Rect::new(
                PLAYFIELD_WIDTH / 2.0 - PADDLE_WIDTH / 2.0,
                paddle_top(),
                PADDLE_WIDTH,
                PADDLE_HEIGHT,
            ),
            base_width: PADDLE_WIDTH,
            speed,
            direction: PaddleDirection::Still,
        }
    }

    /// Move by one tick of intent, then clamp to the playfield
    pub fn step(&mut self) {
        self.rect.pos.x += self.speed * self.direction.sign();
        self.clamp();
    }

    /// Keep `x` within `[0, PLAYFIELD_WIDTH - width]`
    pub fn clamp(&mut self) {
        let max_x = (PLAYFIELD_WIDTH - self.rect.width()).max(0.0);
        self.rect.pos.x = self.rect.pos.x.clamp(0.0, max_x);
    }

    pub fn set_width(&mut self, width: f32) {
        self.rect.size.x = width;
        self.clamp();
    }

    pub fn center_x(&self) -> f32 {
        self.rect.left() + self.rect.width() / 2.0
    }

    /// Where a freshly served ball appears: centred, resting on the paddle
    pub fn serve_point(&self) -> Vec2 {
        Vec2::new(self.center_x(), self.rect.top() - BALL_RADIUS)
    }
}

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    /// Units per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(id: u32, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id,
            pos,
            vel,
            radius: BALL_RADIUS,
        }
    }

    /// Place on the paddle, heading up at `speed` with a random horizontal sign
    pub fn serve(&mut self, paddle: &Paddle, speed: f32, rng: &mut impl RandomSource) {
        self.pos = paddle.serve_point();
        self.vel = Vec2::new(speed * rng.sign(), -speed);
    }
}

/// A brick entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub id: u32,
    pub rect: Rect,
    /// Hits remaining
    pub strength: u8,
    /// False once destroyed; never reactivates within a level
    pub active: bool,
}

impl Brick {
    /// Apply one hit. Returns true if this hit destroyed the brick.
    pub fn hit(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.strength = self.strength.saturating_sub(1);
        if self.strength == 0 {
            self.active = false;
            return true;
        }
        false
    }

    /// Destroy outright (laser). Returns true if the brick was active.
    pub fn destroy(&mut self) -> bool {
        let was_active = self.active;
        self.strength = 0;
        self.active = false;
        was_active
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerupKind {
    /// Fire lasers from the paddle
    Laser,
    /// Paddle width x1.5
    Wide,
    /// Duplicate every ball
    Multi,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 3] = [PowerupKind::Laser, PowerupKind::Wide, PowerupKind::Multi];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerupKind::Laser => "laser",
            PowerupKind::Wide => "wide",
            PowerupKind::Multi => "multi",
        }
    }
}

/// A falling pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub kind: PowerupKind,
    pub rect: Rect,
}

/// A laser shot travelling upward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaserShot {
    pub id: u32,
    pub rect: Rect,
}

/// Active power-up effects, stored as the tick each one expires at
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub laser: Option<u64>,
    pub wide: Option<u64>,
    pub multi: Option<u64>,
}

impl ActiveEffects {
    pub fn expiry(&self, kind: PowerupKind) -> Option<u64> {
        match kind {
            PowerupKind::Laser => self.laser,
            PowerupKind::Wide => self.wide,
            PowerupKind::Multi => self.multi,
        }
    }

    pub fn expiry_mut(&mut self, kind: PowerupKind) -> &mut Option<u64> {
        match kind {
            PowerupKind::Laser => &mut self.laser,
            PowerupKind::Wide => &mut self.wide,
            PowerupKind::Multi => &mut self.multi,
        }
    }

    pub fn is_active(&self, kind: PowerupKind) -> bool {
        self.expiry(kind).is_some()
    }

    /// Kinds currently in force
    pub fn active_kinds(&self) -> Vec<PowerupKind> {
        PowerupKind::ALL
            .into_iter()
            .filter(|&k| self.is_active(k))
            .collect()
    }
}

/// Something observable that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged(u32),
    LivesChanged(u32),
    /// A ball crossed the floor and was re-served
    BallLost,
    BrickDestroyed { id: u32 },
    PickupSpawned(PowerupKind),
    PickupCollected(PowerupKind),
    EffectChanged { kind: PowerupKind, active: bool },
    LaserFired,
    LevelCleared(u32),
    /// Level set up; banner shown for the transition pause
    LevelStarted(u32),
    /// Transition pause over, simulation running again
    LevelResumed(u32),
    Paused,
    Resumed,
    GameOver { score: u32 },
    Won { score: u32 },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub settings: Settings,
    pub catalog: LevelCatalog,
    /// Current level (1-based)
    pub level: u32,
    pub lives: u32,
    pub score: u32,
    /// Logical clock; does not advance while paused or after the run ends
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub paddle: Paddle,
    /// Balls in spawn order; the first one survives multi-ball expiry
    pub balls: Vec<Ball>,
    /// Brick arena for the current level (inactive slots stay in place)
    pub bricks: Vec<Brick>,
    pub pickups: Vec<Pickup>,
    pub lasers: Vec<LaserShot>,
    pub effects: ActiveEffects,
    /// Deferred actions on the logical clock
    pub timers: Timers,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new run: generate the catalog and set up the starting level
    pub fn new(settings: Settings, rng: &mut impl RandomSource) -> Self {
        let catalog = LevelCatalog::generate(rng);
        let start_level = settings.start_level.clamp(1, LEVEL_COUNT);
        let paddle = Paddle::new(catalog.config(start_level).paddle_speed);
        let mut state = Self {
            lives: settings.starting_lives,
            settings,
            catalog,
            level: start_level,
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            paddle,
            balls: Vec::new(),
            bricks: Vec::new(),
            pickups: Vec::new(),
            lasers: Vec::new(),
            effects: ActiveEffects::default(),
            timers: Timers::default(),
            next_id: 1,
        };
        state.reset_level_entities(rng);
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn level_config(&self) -> &LevelConfig {
        self.catalog.config(self.level)
    }

    /// One served ball, level paddle speed, no pickups or shots, fresh bricks
    pub fn reset_level_entities(&mut self, rng: &mut impl RandomSource) {
        let (ball_speed, paddle_speed) = {
            let config = self.level_config();
            (config.ball_speed, config.paddle_speed)
        };
        self.paddle.speed = paddle_speed;
        self.paddle.clamp();

        self.balls.clear();
        let id = self.next_entity_id();
        let mut ball = Ball::new(id, Vec2::ZERO, Vec2::ZERO);
        ball.serve(&self.paddle, ball_speed, rng);
        self.balls.push(ball);

        self.pickups.clear();
        self.lasers.clear();
        self.build_bricks();
    }

    /// Lay out bricks from the current level's grid
    pub fn build_bricks(&mut self) {
        let grid = self.level_config().brick_grid;
        let width = brick_width();
        self.bricks.clear();
        for (row, cells) in grid.iter().enumerate() {
            for (col, &strength) in cells.iter().enumerate() {
                if strength == 0 {
                    continue;
                }
                let x = col as f32 * (width + BRICK_PADDING) + BRICK_PADDING;
                let y = row as f32 * (BRICK_HEIGHT + BRICK_PADDING)
                    + BRICK_PADDING
                    + BRICK_TOP_OFFSET;
                let id = self.next_entity_id();
                self.bricks.push(Brick {
                    id,
                    rect: Rect::new(x, y, width, BRICK_HEIGHT),
                    strength,
                    active: true,
                });
            }
        }
    }

    pub fn active_brick_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.active).count()
    }

    /// Award points for one destroyed brick
    pub fn award_brick(&mut self, events: &mut Vec<GameEvent>, id: u32) {
        self.score += BRICK_SCORE;
        events.push(GameEvent::BrickDestroyed { id });
        events.push(GameEvent::ScoreChanged(self.score));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::SeededRng;

    #[test]
    fn test_new_state() {
        let state = GameState::new(Settings::default(), &mut SeededRng::new(1));
        assert_eq!(state.level, 1);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.bricks.len(), state.level_config().brick_count());
        assert!(state.bricks.iter().all(|b| b.active));
    }

    #[test]
    fn test_brick_layout() {
        let state = GameState::new(Settings::default(), &mut SeededRng::new(1));
        let first = &state.bricks[0];
        assert_eq!(first.rect.left(), BRICK_PADDING);
        assert_eq!(first.rect.top(), BRICK_PADDING + BRICK_TOP_OFFSET);
        // Eight columns plus padding fill the playfield width
        let last_in_row = &state.bricks[BRICK_COLS - 1];
        assert!((last_in_row.rect.right() + BRICK_PADDING - PLAYFIELD_WIDTH).abs() < 1e-3);
    }

    #[test]
    fn test_served_ball_rests_on_paddle() {
        let state = GameState::new(Settings::default(), &mut SeededRng::new(5));
        let ball = &state.balls[0];
        assert_eq!(ball.pos.x, state.paddle.center_x());
        assert_eq!(ball.pos.y, state.paddle.rect.top() - BALL_RADIUS);
        assert_eq!(ball.vel.y, -state.level_config().ball_speed);
        assert_eq!(ball.vel.x.abs(), state.level_config().ball_speed);
    }

    #[test]
    fn test_paddle_clamps() {
        let mut paddle = Paddle::new(8.0);
        paddle.direction = PaddleDirection::Left;
        for _ in 0..200 {
            paddle.step();
        }
        assert_eq!(paddle.rect.left(), 0.0);
        paddle.direction = PaddleDirection::Right;
        for _ in 0..200 {
            paddle.step();
        }
        assert_eq!(paddle.rect.right(), PLAYFIELD_WIDTH);
    }

    #[test]
    fn test_brick_hits() {
        let mut brick = Brick {
            id: 1,
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            strength: 3,
            active: true,
        };
        assert!(!brick.hit());
        assert!(!brick.hit());
        assert!(brick.hit());
        assert!(!brick.active);
        // Dead bricks stay dead
        assert!(!brick.hit());
        assert!(!brick.active);
        assert!(!brick.destroy());
    }

    #[test]
    fn test_direction_from_axis() {
        assert_eq!(PaddleDirection::from_axis(-5), PaddleDirection::Left);
        assert_eq!(PaddleDirection::from_axis(0), PaddleDirection::Still);
        assert_eq!(PaddleDirection::from_axis(1), PaddleDirection::Right);
    }
}
