//! Level and game flow
//!
//! `Playing(n) -> LevelTransition(n+1) -> Playing(n+1) ... -> Won`, with
//! `GameOver` reachable from play when the last life is lost. Terminal phases
//! cancel every pending timer and are never left.

use super::effects;
use super::rng::RandomSource;
use super::state::{GameEvent, GamePhase, GameState};
use super::timers::TimedAction;
use crate::consts::LEVEL_COUNT;

/// Current level has no active bricks: move to the next one or finish the run
pub fn advance_level(
    state: &mut GameState,
    rng: &mut impl RandomSource,
    events: &mut Vec<GameEvent>,
) {
    events.push(GameEvent::LevelCleared(state.level));
    if state.level >= LEVEL_COUNT {
        finish(state, GamePhase::Won, events);
        return;
    }

    state.level += 1;
    enter_level(state, rng, events);
    state.phase = GamePhase::LevelTransition;
    let due = state.time_ticks + state.settings.transition_ticks;
    state.timers.schedule(due, TimedAction::EndTransition);

    log::info!(
        "Level {} (score {}, lives {})",
        state.level,
        state.score,
        state.lives
    );
    events.push(GameEvent::LevelStarted(state.level));
}

/// Set up the current level's entities and drop the previous level's timers
pub fn enter_level(
    state: &mut GameState,
    rng: &mut impl RandomSource,
    events: &mut Vec<GameEvent>,
) {
    state.timers.cancel_all();
    if state.settings.clear_effects_on_level_change {
        effects::clear_all(state, events);
    } else {
        // Surviving effects keep their deadlines on the new epoch
        for kind in state.effects.active_kinds() {
            if let Some(due) = state.effects.expiry(kind) {
                state.timers.schedule(due, TimedAction::ExpireEffect(kind));
            }
        }
    }
    state.reset_level_entities(rng);
}

/// The level banner has been up long enough
pub fn end_transition(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.phase != GamePhase::LevelTransition {
        return;
    }
    state.phase = GamePhase::Playing;
    log::debug!("Level {} resumed at tick {}", state.level, state.time_ticks);
    events.push(GameEvent::LevelResumed(state.level));
}

/// A ball crossed the floor. Returns true if that was the last life.
pub fn lose_life(
    state: &mut GameState,
    ball_index: usize,
    rng: &mut impl RandomSource,
    events: &mut Vec<GameEvent>,
) -> bool {
    state.lives = state.lives.saturating_sub(1);
    events.push(GameEvent::LivesChanged(state.lives));
    events.push(GameEvent::BallLost);

    if state.lives == 0 {
        finish(state, GamePhase::GameOver, events);
        return true;
    }

    log::debug!("Ball lost, {} lives left", state.lives);
    let speed = state.level_config().ball_speed;
    if let Some(ball) = state.balls.get_mut(ball_index) {
        ball.serve(&state.paddle, speed, rng);
    }
    false
}

/// Enter a terminal phase
pub fn finish(state: &mut GameState, phase: GamePhase, events: &mut Vec<GameEvent>) {
    debug_assert!(phase.is_terminal());
    state.phase = phase;
    state.timers.cancel_all();
    let score = state.score;
    match phase {
        GamePhase::Won => {
            log::info!("All {LEVEL_COUNT} levels cleared, final score {score}");
            events.push(GameEvent::Won { score });
        }
        _ => {
            log::info!("Game over on level {}, final score {score}", state.level);
            events.push(GameEvent::GameOver { score });
        }
    }
}

/// Playing <-> Paused. Other phases ignore the request.
pub fn toggle_pause(state: &mut GameState, events: &mut Vec<GameEvent>) {
    match state.phase {
        GamePhase::Playing => {
            state.phase = GamePhase::Paused;
            events.push(GameEvent::Paused);
        }
        GamePhase::Paused => {
            state.phase = GamePhase::Playing;
            events.push(GameEvent::Resumed);
        }
        _ => {}
    }
}
