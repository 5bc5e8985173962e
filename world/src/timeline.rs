//! Effects that resolve a fixed delay after they are scheduled.

use std::time::Duration;

use daily_dungeon_core::{BossAbility, EnemyId};

/// Pending effect waiting for its delay to run out.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Deferred {
    /// Follow-up hit from a shadow step.
    ShadowStrike {
        target: EnemyId,
        base_damage: f32,
    },
    /// Wind-up of a boss ability landing around the boss.
    BossStrike {
        boss: EnemyId,
        ability: BossAbility,
        radius: f32,
        damage: u32,
    },
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    due: Duration,
    sequence: u64,
    effect: Deferred,
}

/// Simulation-time queue of deferred effects.
#[derive(Clone, Debug, Default)]
pub(crate) struct Timeline {
    now: Duration,
    next_sequence: u64,
    entries: Vec<Entry>,
}

impl Timeline {
    pub(crate) fn schedule(&mut self, delay: Duration, effect: Deferred) {
        self.entries.push(Entry {
            due: self.now + delay,
            sequence: self.next_sequence,
            effect,
        });
        self.next_sequence += 1;
    }

    /// Advances the clock and drains every effect that came due, oldest first.
    /// Effects scheduled at the same instant resolve in scheduling order.
    pub(crate) fn advance(&mut self, dt: Duration, due: &mut Vec<Deferred>) {
        self.now += dt;
        let now = self.now;
        let mut ready: Vec<Entry> = Vec::new();
        self.entries.retain(|entry| {
            if entry.due <= now {
                ready.push(*entry);
                false
            } else {
                true
            }
        });
        ready.sort_by_key(|entry| (entry.due, entry.sequence));
        due.extend(ready.into_iter().map(|entry| entry.effect));
    }
}
