//! Tick-aligned delayed actions
//!
//! Fire-and-forget: nothing is ever cancelled. Actions that should not run
//! after the game ends check the game state when they fire.

use serde::{Deserialize, Serialize};

use super::spawner::ForceBomb;

/// Deferred work the scene performs when its time comes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ScheduledAction {
    /// Run the sequencer
    Advance,
    /// Launch one object
    Spawn(ForceBomb),
    /// The swipe sound has finished playing
    SwipeSoundDone,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Entry {
    fire_at: f64,
    seq: u64,
    action: ScheduledAction,
}

/// Pending actions ordered by fire time, then by insertion
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    entries: Vec<Entry>,
    next_seq: u64,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action` to fire `delay` seconds after `now`
    pub fn after(&mut self, now: f64, delay: f32, action: ScheduledAction) {
        let entry = Entry {
            fire_at: now + delay.max(0.0) as f64,
            seq: self.next_seq,
            action,
        };
        self.next_seq += 1;
        self.entries.push(entry);
    }

    /// Remove and return every action due at `now`, in firing order
    pub fn take_due(&mut self, now: f64) -> Vec<ScheduledAction> {
        let mut due: Vec<Entry> = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].fire_at <= now {
                due.push(self.entries.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by(|a, b| a.fire_at.total_cmp(&b.fire_at).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|e| e.action).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count of pending entries matching `action`
    pub fn count(&self, action: ScheduledAction) -> usize {
        self.entries.iter().filter(|e| e.action == action).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_time_then_insertion_order() {
        let mut schedule = Schedule::new();
        schedule.after(0.0, 0.5, ScheduledAction::Advance);
        schedule.after(0.0, 0.2, ScheduledAction::Spawn(ForceBomb::Random));
        schedule.after(0.0, 0.2, ScheduledAction::Spawn(ForceBomb::Always));
        schedule.after(0.0, 2.0, ScheduledAction::SwipeSoundDone);

        assert!(schedule.take_due(0.1).is_empty());
        assert_eq!(
            schedule.take_due(1.0),
            vec![
                ScheduledAction::Spawn(ForceBomb::Random),
                ScheduledAction::Spawn(ForceBomb::Always),
                ScheduledAction::Advance,
            ]
        );
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.take_due(2.0), vec![ScheduledAction::SwipeSoundDone]);
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_zero_delay_fires_on_next_check() {
        let mut schedule = Schedule::new();
        schedule.after(3.0, 0.0, ScheduledAction::Advance);
        assert_eq!(schedule.count(ScheduledAction::Advance), 1);
        assert_eq!(schedule.take_due(3.0), vec![ScheduledAction::Advance]);
    }
}
