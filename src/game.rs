//! Game driver
//!
//! Owns the [`GameState`], the random source and the pending input. Input
//! handlers only record intent here; the next tick consumes it.

use crate::consts::*;
use crate::present::{Frame, Presenter, dispatch, level_banner};
use crate::settings::Settings;
use crate::sim::rng::{RandomSource, SeededRng};
use crate::sim::state::{GameEvent, GameState, PaddleDirection, PowerupKind};
use crate::sim::tick::{TickInput, tick};

/// A running game
#[derive(Debug)]
pub struct Game<R: RandomSource = SeededRng> {
    state: GameState,
    rng: R,
    /// Held direction persists; fire and pause are one-shot
    input: TickInput,
    /// Demo mode: the paddle follows the ball by itself
    autopilot: bool,
}

impl Game<SeededRng> {
    /// New game seeded from `settings.seed`
    pub fn new(settings: Settings) -> Self {
        let rng = SeededRng::new(settings.seed);
        Self::with_rng(settings, rng)
    }
}

impl<R: RandomSource> Game<R> {
    pub fn with_rng(settings: Settings, mut rng: R) -> Self {
        for warning in settings.validate() {
            log::warn!("Settings: {warning}");
        }
        let state = GameState::new(settings, &mut rng);
        log::info!(
            "Game initialized with seed: {} (level {}, lives {})",
            state.settings.seed,
            state.level,
            state.lives
        );
        Self {
            state,
            rng,
            input: TickInput::default(),
            autopilot: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.phase.is_terminal()
    }

    /// Record held movement: negative = left, 0 = stop, positive = right
    pub fn set_paddle_direction(&mut self, axis: i32) {
        if self.is_over() {
            return;
        }
        self.input.direction = PaddleDirection::from_axis(axis);
    }

    /// Request a laser shot on the next tick
    pub fn fire_laser(&mut self) {
        if self.is_over() {
            return;
        }
        self.input.fire = true;
    }

    /// Request a pause toggle on the next tick
    pub fn toggle_pause(&mut self) {
        if self.is_over() {
            return;
        }
        self.input.pause = !self.input.pause;
    }

    pub fn set_autopilot(&mut self, on: bool) {
        if self.autopilot != on {
            log::info!("Autopilot: {on}");
        }
        self.autopilot = on;
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    /// Advance one fixed tick, consuming pending one-shot input
    pub fn tick(&mut self) -> Vec<GameEvent> {
        if self.autopilot {
            self.input.direction = autopilot_direction(&self.state);
            if self.state.effects.is_active(PowerupKind::Laser) {
                self.input.fire = true;
            }
        }

        let input = self.input;
        let events = tick(&mut self.state, &input, &mut self.rng);

        // Clear one-shot inputs after processing
        self.input.fire = false;
        self.input.pause = false;
        events
    }

    /// Tick, notify the presenter and hand it a frame
    pub fn step(&mut self, presenter: &mut dyn Presenter) -> Vec<GameEvent> {
        let events = self.tick();
        dispatch(presenter, &events);
        presenter.render(&Frame::from_state(&self.state));
        events
    }

    /// Initial notifications: score, lives, level banner and the first frame
    pub fn start(&mut self, presenter: &mut dyn Presenter) {
        presenter.update_score(self.state.score);
        presenter.update_lives(self.state.lives);
        for kind in PowerupKind::ALL {
            presenter.set_powerup_indicator(kind, self.state.effects.is_active(kind));
        }
        presenter.show_banner(&level_banner(self.state.level));
        presenter.render(&Frame::from_state(&self.state));
    }

    /// Step up to `ticks` times, stopping early when the run ends.
    /// Returns the number of ticks taken.
    pub fn run(&mut self, ticks: u64, presenter: &mut dyn Presenter) -> u64 {
        let mut taken = 0;
        while taken < ticks && !self.is_over() {
            self.step(presenter);
            taken += 1;
        }
        taken
    }
}

/// Demo-mode steering: chase the lowest descending ball, or a falling pickup
/// when every ball is heading away
fn autopilot_direction(state: &GameState) -> PaddleDirection {
    let paddle_x = state.paddle.center_x();

    let threat = state
        .balls
        .iter()
        .filter(|b| b.vel.y > 0.0)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    let target_x = match threat {
        Some(ball) => {
            // Lead the target by a few ticks of horizontal travel
            let ticks_to_paddle = ((state.paddle.rect.top() - ball.pos.y) / ball.vel.y).max(0.0);
            let lead = ticks_to_paddle.min(15.0);
            (ball.pos.x + ball.vel.x * lead).clamp(0.0, PLAYFIELD_WIDTH)
        }
        None => state
            .pickups
            .iter()
            .max_by(|a, b| a.rect.top().total_cmp(&b.rect.top()))
            .map(|p| p.rect.center().x)
            .or_else(|| state.balls.first().map(|b| b.pos.x))
            .unwrap_or(paddle_x),
    };

    let dead_zone = state.paddle.speed.max(1.0);
    if target_x < paddle_x - dead_zone {
        PaddleDirection::Left
    } else if target_x > paddle_x + dead_zone {
        PaddleDirection::Right
    } else {
        PaddleDirection::Still
    }
}

/// Turns variable frame deltas into fixed 60 Hz ticks
#[derive(Debug, Clone, Default)]
pub struct FixedStepper {
    accumulator: f32,
}

impl FixedStepper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run as many ticks as `frame_dt` seconds cover (at most `MAX_SUBSTEPS`).
    /// Returns the number of ticks run.
    pub fn advance<R: RandomSource>(
        &mut self,
        game: &mut Game<R>,
        frame_dt: f32,
        presenter: &mut dyn Presenter,
    ) -> u32 {
        // Clamp long frames (tab switch, debugger) so the game does not jump
        let dt = frame_dt.clamp(0.0, 0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            game.step(presenter);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    /// Leftover time not yet simulated
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::present::NullPresenter;
    use crate::sim::state::GamePhase;
    use glam::Vec2;

    #[test]
    fn test_same_seed_same_game() {
        let mut a = Game::new(Settings::with_seed(42));
        let mut b = Game::new(Settings::with_seed(42));
        a.set_autopilot(true);
        b.set_autopilot(true);
        a.run(2_000, &mut NullPresenter);
        b.run(2_000, &mut NullPresenter);
        assert_eq!(a.state().score, b.state().score);
        assert_eq!(a.state().time_ticks, b.state().time_ticks);
        assert_eq!(a.state().balls, b.state().balls);
    }

    #[test]
    fn test_direction_is_held() {
        let mut game = Game::new(Settings::default());
        let x0 = game.state().paddle.rect.left();
        game.set_paddle_direction(-1);
        game.tick();
        game.tick();
        let speed = game.state().paddle.speed;
        assert_eq!(game.state().paddle.rect.left(), x0 - 2.0 * speed);

        game.set_paddle_direction(0);
        game.tick();
        assert_eq!(game.state().paddle.rect.left(), x0 - 2.0 * speed);
    }

    #[test]
    fn test_fire_is_one_shot() {
        let mut game = Game::new(Settings::default());
        let mut events = Vec::new();
        let state = game.state_mut();
        crate::sim::effects::activate(
            state,
            PowerupKind::Laser,
            &mut SeededRng::new(1),
            &mut events,
        );
        game.fire_laser();
        game.tick();
        game.tick();
        assert_eq!(game.state().lasers.len(), 1);
    }

    #[test]
    fn test_pause_toggle() {
        let mut game = Game::new(Settings::default());
        game.toggle_pause();
        let events = game.tick();
        assert_eq!(events, vec![GameEvent::Paused]);
        assert_eq!(game.state().phase, GamePhase::Paused);

        // A double toggle before the next tick cancels out
        game.toggle_pause();
        game.toggle_pause();
        game.tick();
        assert_eq!(game.state().phase, GamePhase::Paused);

        game.toggle_pause();
        game.tick();
        assert_eq!(game.state().phase, GamePhase::Playing);
    }

    #[test]
    fn test_input_ignored_after_game_over() {
        let mut game = Game::new(Settings {
            starting_lives: 1,
            ..Settings::default()
        });
        let state = game.state_mut();
        state.balls[0].pos = Vec2::new(30.0, PLAYFIELD_HEIGHT - 5.0);
        state.balls[0].vel = Vec2::new(0.0, 5.0);
        game.tick();
        assert!(game.is_over());

        let x = game.state().paddle.rect.left();
        game.set_paddle_direction(1);
        game.fire_laser();
        game.toggle_pause();
        assert!(game.tick().is_empty());
        assert_eq!(game.state().paddle.rect.left(), x);
        assert_eq!(game.state().phase, GamePhase::GameOver);
        assert_eq!(game.run(100, &mut NullPresenter), 0);
    }

    #[test]
    fn test_autopilot_tracks_descending_ball() {
        let mut game = Game::new(Settings::default());
        let state = game.state_mut();
        state.balls[0].pos = Vec2::new(700.0, 300.0);
        state.balls[0].vel = Vec2::new(0.0, 4.0);
        assert_eq!(autopilot_direction(game.state()), PaddleDirection::Right);

        let state = game.state_mut();
        state.balls[0].pos = Vec2::new(50.0, 300.0);
        assert_eq!(autopilot_direction(game.state()), PaddleDirection::Left);

        let state = game.state_mut();
        let center = state.paddle.center_x();
        state.balls[0].pos = Vec2::new(center, 300.0);
        assert_eq!(autopilot_direction(game.state()), PaddleDirection::Still);
    }

    #[test]
    fn test_stepper_accumulates() {
        let mut game = Game::new(Settings::default());
        let mut stepper = FixedStepper::new();
        // Half a tick: nothing yet
        assert_eq!(stepper.advance(&mut game, SIM_DT * 0.5, &mut NullPresenter), 0);
        assert_eq!(stepper.advance(&mut game, SIM_DT * 0.6, &mut NullPresenter), 1);
        assert_eq!(game.state().time_ticks, 1);

        // A long stall is clamped
        let ran = stepper.advance(&mut game, 5.0, &mut NullPresenter);
        assert!(ran >= 5 && ran <= MAX_SUBSTEPS, "ran {ran}");
    }
}
