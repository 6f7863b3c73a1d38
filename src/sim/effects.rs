//! Timed power-up effects and laser fire
//!
//! Each effect stores its expiry tick in [`ActiveEffects`] and schedules an
//! [`TimedAction::ExpireEffect`] on the logical clock. An expiry whose tick no
//! longer matches the stored deadline (the effect was refreshed) is ignored.

use super::collision::laser_brick_contact;
use super::rect::Rect;
use super::rng::RandomSource;
use super::state::{GameEvent, GameState, LaserShot, PowerupKind};
use super::timers::TimedAction;
use crate::consts::{LASER_HEIGHT, LASER_WIDTH, WIDE_FACTOR};
use crate::settings::ReactivationPolicy;

/// Turn an effect on (pickup collected)
pub fn activate(
    state: &mut GameState,
    kind: PowerupKind,
    rng: &mut impl RandomSource,
    events: &mut Vec<GameEvent>,
) {
    let deadline = state.time_ticks + state.settings.effect_duration_ticks;

    if state.effects.is_active(kind) {
        // Effects never stack; only the deadline may move
        match state.settings.reactivation {
            ReactivationPolicy::Refresh => {
                *state.effects.expiry_mut(kind) = Some(deadline);
                state
                    .timers
                    .schedule(deadline, TimedAction::ExpireEffect(kind));
                log::debug!("{} refreshed until tick {deadline}", kind.as_str());
            }
            ReactivationPolicy::Ignore => {
                log::debug!("{} already active, pickup ignored", kind.as_str());
            }
        }
        return;
    }

    *state.effects.expiry_mut(kind) = Some(deadline);
    state
        .timers
        .schedule(deadline, TimedAction::ExpireEffect(kind));

    match kind {
        PowerupKind::Laser => {}
        PowerupKind::Wide => {
            let width = state.paddle.base_width * WIDE_FACTOR;
            state.paddle.set_width(width);
        }
        PowerupKind::Multi => {
            let originals = state.balls.clone();
            for ball in originals {
                let id = state.next_entity_id();
                let mut clone = ball;
                clone.id = id;
                clone.vel.x *= rng.sign();
                state.balls.push(clone);
            }
        }
    }

    log::debug!(
        "{} active until tick {deadline} ({} balls)",
        kind.as_str(),
        state.balls.len()
    );
    events.push(GameEvent::EffectChanged { kind, active: true });
}

/// Handle a scheduled expiry; stale entries (refreshed effects) are ignored
pub fn expire(state: &mut GameState, kind: PowerupKind, events: &mut Vec<GameEvent>) {
    match state.effects.expiry(kind) {
        Some(deadline) if deadline <= state.time_ticks => deactivate(state, kind, events),
        _ => {}
    }
}

/// Switch every active effect off immediately
pub fn clear_all(state: &mut GameState, events: &mut Vec<GameEvent>) {
    for kind in state.effects.active_kinds() {
        deactivate(state, kind, events);
    }
}

/// Undo an effect unconditionally
fn deactivate(state: &mut GameState, kind: PowerupKind, events: &mut Vec<GameEvent>) {
    *state.effects.expiry_mut(kind) = None;
    match kind {
        // Shots already in flight keep going
        PowerupKind::Laser => {}
        PowerupKind::Wide => {
            let width = state.paddle.base_width;
            state.paddle.set_width(width);
        }
        PowerupKind::Multi => state.balls.truncate(1),
    }
    log::debug!("{} expired", kind.as_str());
    events.push(GameEvent::EffectChanged {
        kind,
        active: false,
    });
}

/// Fire a laser shot from the paddle centre. No-op unless the laser effect is on.
pub fn fire_laser(state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    if !state.effects.is_active(PowerupKind::Laser) {
        return false;
    }
    let id = state.next_entity_id();
    let rect = Rect::new(
        state.paddle.center_x(),
        state.paddle.rect.top() - LASER_HEIGHT,
        LASER_WIDTH,
        LASER_HEIGHT,
    );
    state.lasers.push(LaserShot { id, rect });
    events.push(GameEvent::LaserFired);
    true
}

/// Move every shot up; a shot touching an active brick destroys it and is spent
pub fn step_lasers(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.lasers.is_empty() {
        return;
    }
    let speed = state.settings.laser_speed;
    let bricks = &mut state.bricks;
    let mut destroyed = Vec::new();

    state.lasers.retain_mut(|shot| {
        shot.rect.pos.y -= speed;
        if let Some(brick) = bricks
            .iter_mut()
            .find(|b| b.active && laser_brick_contact(&shot.rect, &b.rect))
        {
            brick.destroy();
            destroyed.push(brick.id);
            return false;
        }
        shot.rect.top() >= 0.0
    });

    for id in destroyed {
        log::trace!("laser destroyed brick {id}");
        state.award_brick(events, id);
    }
}
