//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;

use super::collision::{
    WallContact, ball_paddle_contact, ball_rect_overlap, ball_wall_contacts, bounce_off_wall,
    pickup_paddle_contact,
};
use super::effects;
use super::flow;
use super::rect::Rect;
use super::rng::RandomSource;
use super::state::{GameEvent, GamePhase, GameState, PaddleDirection, Pickup, PowerupKind};
use super::timers::TimedAction;
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held paddle movement
    pub direction: PaddleDirection,
    /// Fire a laser shot (ignored unless the laser effect is on)
    pub fire: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game state by one fixed timestep
///
/// Returns the events produced, in the order they happened.
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    rng: &mut impl RandomSource,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Terminal phases never change again
    if state.phase.is_terminal() {
        return events;
    }

    if input.pause {
        flow::toggle_pause(state, &mut events);
    }
    if state.phase == GamePhase::Paused {
        return events;
    }

    // Logical clock and deferred work
    state.time_ticks += 1;
    for action in state.timers.drain_due(state.time_ticks) {
        match action {
            TimedAction::ExpireEffect(kind) => effects::expire(state, kind, &mut events),
            TimedAction::EndTransition => flow::end_transition(state, &mut events),
        }
    }

    // Level banner still up
    if state.phase != GamePhase::Playing {
        return events;
    }

    // Update paddle position
    state.paddle.direction = input.direction;
    state.paddle.step();

    if step_balls(state, rng, &mut events) {
        return events;
    }

    if input.fire {
        effects::fire_laser(state, &mut events);
    }
    effects::step_lasers(state, &mut events);

    // Level complete: advance exactly once, the new level starts behind the banner
    if state.active_brick_count() == 0 {
        flow::advance_level(state, rng, &mut events);
        return events;
    }

    step_pickups(state, rng, &mut events);
    events
}

/// Move every ball and resolve walls, paddle and bricks.
/// Returns true if the run ended (last life lost).
fn step_balls(
    state: &mut GameState,
    rng: &mut impl RandomSource,
    events: &mut Vec<GameEvent>,
) -> bool {
    let jitter = state.settings.paddle_jitter;
    let single_hit = state.settings.single_brick_hit_per_ball;
    let powerup_chance = state.level_config().powerup_chance;

    // Pickups spawned by destroyed bricks (brick centre), added after the sweep
    let mut pickups_to_spawn: Vec<Vec2> = Vec::new();

    for i in 0..state.balls.len() {
        let ball = &mut state.balls[i];
        ball.pos += ball.vel;

        let mut hit_floor = false;
        for wall in ball_wall_contacts(ball.pos, ball.radius) {
            match wall {
                WallContact::Floor => hit_floor = true,
                _ => ball.vel = bounce_off_wall(ball.vel, wall),
            }
        }
        if hit_floor {
            if flow::lose_life(state, i, rng, events) {
                return true;
            }
            continue;
        }

        // Paddle: always send the ball back up, with a little horizontal jitter
        let ball = &mut state.balls[i];
        if ball_paddle_contact(ball.pos, ball.radius, &state.paddle.rect) {
            ball.vel.y = -ball.vel.y.abs();
            if jitter > 0.0 {
                ball.vel.x += rng.range(-jitter, jitter);
            }
        }

        // Bricks in arena order
        for brick in state.bricks.iter_mut() {
            if !brick.active || !ball_rect_overlap(ball.pos, ball.radius, &brick.rect) {
                continue;
            }
            ball.vel.y = -ball.vel.y;
            if brick.hit() {
                log::trace!("ball {} destroyed brick {}", ball.id, brick.id);
                state.score += BRICK_SCORE;
                events.push(GameEvent::BrickDestroyed { id: brick.id });
                events.push(GameEvent::ScoreChanged(state.score));
                if rng.chance(powerup_chance) {
                    pickups_to_spawn.push(brick.rect.center());
                }
            }
            if single_hit {
                break;
            }
        }
    }

    for center in pickups_to_spawn {
        let kind = PowerupKind::ALL[rng.pick(PowerupKind::ALL.len())];
        let id = state.next_entity_id();
        state.pickups.push(Pickup {
            id,
            kind,
            rect: Rect::centered(center, Vec2::splat(PICKUP_SIZE)),
        });
        log::debug!("{} pickup dropped", kind.as_str());
        events.push(GameEvent::PickupSpawned(kind));
    }
    false
}

/// Let pickups fall; the paddle collects them, the floor swallows them
fn step_pickups(
    state: &mut GameState,
    rng: &mut impl RandomSource,
    events: &mut Vec<GameEvent>,
) {
    let fall = state.settings.pickup_fall_speed;
    let paddle = state.paddle.rect;

    let mut collected: Vec<PowerupKind> = Vec::new();
    state.pickups.retain_mut(|pickup| {
        pickup.rect.pos.y += fall;
        if pickup_paddle_contact(&pickup.rect, &paddle) {
            collected.push(pickup.kind);
            false
        } else {
            pickup.rect.top() <= PLAYFIELD_HEIGHT
        }
    });

    for kind in collected {
        events.push(GameEvent::PickupCollected(kind));
        effects::activate(state, kind, rng, events);
    }
}
