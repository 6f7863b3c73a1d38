//! Deferred actions on the logical clock
//!
//! Effect expiry and the end of the level banner are scheduled here instead of
//! on wall-clock timers, so pausing or fast-forwarding never drifts. Each
//! entry carries the epoch it was scheduled in; [`Timers::cancel_all`] bumps
//! the epoch, which invalidates everything still pending.

use serde::{Deserialize, Serialize};

use super::state::PowerupKind;

/// Work to run when a deadline is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimedAction {
    /// Turn a timed power-up off (stale if the effect was refreshed)
    ExpireEffect(PowerupKind),
    /// Leave the level banner and resume play
    EndTransition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Deferred {
    due: u64,
    /// Insertion order, breaks ties between equal deadlines
    seq: u64,
    epoch: u32,
    action: TimedAction,
}

/// Logical-clock scheduler with epoch-based cancellation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timers {
    queue: Vec<Deferred>,
    epoch: u32,
    next_seq: u64,
}

impl Timers {
    /// Schedule `action` to run at tick `due`
    pub fn schedule(&mut self, due: u64, action: TimedAction) {
        let entry = Deferred {
            due,
            seq: self.next_seq,
            epoch: self.epoch,
            action,
        };
        self.next_seq += 1;
        // Keep sorted by (due, seq) so draining is a prefix split
        let at = self
            .queue
            .partition_point(|d| (d.due, d.seq) <= (entry.due, entry.seq));
        self.queue.insert(at, entry);
    }

    /// Invalidate every pending entry
    pub fn cancel_all(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.queue.clear();
    }

    /// Remove and return actions due at or before `now`, in deadline order.
    /// Entries from a cancelled epoch are dropped.
    pub fn drain_due(&mut self, now: u64) -> Vec<TimedAction> {
        let split = self.queue.partition_point(|d| d.due <= now);
        let epoch = self.epoch;
        self.queue
            .drain(..split)
            .filter(|d| d.epoch == epoch)
            .map(|d| d.action)
            .collect()
    }

    /// Number of live entries
    pub fn pending(&self) -> usize {
        self.queue.iter().filter(|d| d.epoch == self.epoch).count()
    }

    /// Current cancellation epoch
    pub fn epoch(&self) -> u32 {
        self.epoch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drains_in_deadline_order() {
        let mut timers = Timers::default();
        timers.schedule(10, TimedAction::EndTransition);
        timers.schedule(5, TimedAction::ExpireEffect(PowerupKind::Wide));
        timers.schedule(5, TimedAction::ExpireEffect(PowerupKind::Laser));

        assert!(timers.drain_due(4).is_empty());
        assert_eq!(
            timers.drain_due(5),
            vec![
                TimedAction::ExpireEffect(PowerupKind::Wide),
                TimedAction::ExpireEffect(PowerupKind::Laser),
            ]
        );
        assert_eq!(timers.pending(), 1);
        assert_eq!(timers.drain_due(100), vec![TimedAction::EndTransition]);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_cancel_all() {
        let mut timers = Timers::default();
        timers.schedule(3, TimedAction::ExpireEffect(PowerupKind::Multi));
        let before = timers.epoch();
        timers.cancel_all();
        assert_ne!(timers.epoch(), before);
        assert!(timers.drain_due(10).is_empty());

        // New entries after cancellation still fire
        timers.schedule(12, TimedAction::EndTransition);
        assert_eq!(timers.drain_due(12), vec![TimedAction::EndTransition]);
    }
}
