//! Presentation adapter contract
//!
//! The simulation never calls a presenter itself. [`dispatch`] turns the
//! events a tick produced into presenter notifications, and the driver hands
//! over a read-only [`Frame`] once per step for drawing.

use crate::sim::state::{
    Ball, Brick, GameEvent, GamePhase, GameState, LaserShot, Paddle, Pickup, PowerupKind,
};

/// Read-only view of everything a renderer needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub phase: GamePhase,
    pub level: u32,
    pub score: u32,
    pub lives: u32,
    pub paddle: &'a Paddle,
    pub balls: &'a [Ball],
    pub bricks: &'a [Brick],
    pub pickups: &'a [Pickup],
    pub lasers: &'a [LaserShot],
}

impl<'a> Frame<'a> {
    pub fn from_state(state: &'a GameState) -> Self {
        Self {
            phase: state.phase,
            level: state.level,
            score: state.score,
            lives: state.lives,
            paddle: &state.paddle,
            balls: &state.balls,
            bricks: &state.bricks,
            pickups: &state.pickups,
            lasers: &state.lasers,
        }
    }

    /// Bricks still standing
    pub fn active_bricks(&self) -> impl Iterator<Item = &'a Brick> {
        self.bricks.iter().filter(|b| b.active)
    }
}

/// Receives notifications from the game. Every method is fire-and-forget.
pub trait Presenter {
    fn render(&mut self, frame: &Frame<'_>);
    fn update_score(&mut self, score: u32);
    fn update_lives(&mut self, lives: u32);
    fn set_powerup_indicator(&mut self, kind: PowerupKind, on: bool);
    fn show_banner(&mut self, text: &str);
    fn show_terminal_screen(&mut self, title: &str, subtitle: Option<&str>, final_score: u32);
}

/// Banner shown while a level starts
pub fn level_banner(level: u32) -> String {
    format!("Level {level}!")
}

/// Forward tick events to a presenter
pub fn dispatch(presenter: &mut dyn Presenter, events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::ScoreChanged(score) => presenter.update_score(*score),
            GameEvent::LivesChanged(lives) => presenter.update_lives(*lives),
            GameEvent::EffectChanged { kind, active } => {
                presenter.set_powerup_indicator(*kind, *active)
            }
            GameEvent::LevelStarted(level) => presenter.show_banner(&level_banner(*level)),
            GameEvent::GameOver { score } => {
                presenter.show_terminal_screen("Game Over!", None, *score)
            }
            GameEvent::Won { score } => presenter.show_terminal_screen(
                "Congratulations!",
                Some("You Beat All Levels!"),
                *score,
            ),
            _ => {}
        }
    }
}

/// Discards everything (headless runs, benchmarks)
#[derive(Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn render(&mut self, _frame: &Frame<'_>) {}
    fn update_score(&mut self, _score: u32) {}
    fn update_lives(&mut self, _lives: u32) {}
    fn set_powerup_indicator(&mut self, _kind: PowerupKind, _on: bool) {}
    fn show_banner(&mut self, _text: &str) {}
    fn show_terminal_screen(&mut self, _title: &str, _subtitle: Option<&str>, _final_score: u32) {}
}

/// Writes notifications to the log; used by the headless binary
#[derive(Debug, Default)]
pub struct LogPresenter {
    frames: u64,
}

impl LogPresenter {
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Presenter for LogPresenter {
    fn render(&mut self, frame: &Frame<'_>) {
        self.frames += 1;
        log::trace!(
            "frame {}: {:?} level {} balls {} bricks {}",
            self.frames,
            frame.phase,
            frame.level,
            frame.balls.len(),
            frame.active_bricks().count()
        );
    }

    fn update_score(&mut self, score: u32) {
        log::debug!("Score: {score}");
    }

    fn update_lives(&mut self, lives: u32) {
        log::info!("Lives: {lives}");
    }

    fn set_powerup_indicator(&mut self, kind: PowerupKind, on: bool) {
        log::debug!("Power-up {}: {}", kind.as_str(), if on { "on" } else { "off" });
    }

    fn show_banner(&mut self, text: &str) {
        log::info!("{text}");
    }

    fn show_terminal_screen(&mut self, title: &str, subtitle: Option<&str>, final_score: u32) {
        match subtitle {
            Some(sub) => log::info!("{title} {sub} Final Score: {final_score}"),
            None => log::info!("{title} Final Score: {final_score}"),
        }
    }
}
