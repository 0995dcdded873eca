//! Deadline bookkeeping for the session worker.
//!
//! The worker is a single task, so timers are not spawned tasks that must be
//! aborted; they are entries on this board, and the worker's select loop
//! sleeps until the earliest one. Cancelling a timer is removing its entry,
//! which is synchronous and cannot race a firing.
//!
//! Attack entries additionally carry the roster generation they were armed
//! under. The generation is bumped whenever the roster they were aimed at
//! stops existing (new encounter, stage clear, game over), and a due entry
//! from an older generation fires into nothing.

use std::time::Duration;

use tokio::time::Instant;

use game_core::EnemyId;

/// What a due timer asks the worker to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TimerKind {
    /// One enemy's wind-up elapsed; resolve its attack.
    EnemyAttack(EnemyId),
    /// One second of poison elapsed.
    PoisonTick,
    /// The clear delay elapsed; collect the EXP award.
    ClearAward,
    /// The settle delay elapsed; show the next queued notification.
    NotifyAdvance,
}

#[derive(Debug)]
struct TimerEntry {
    kind: TimerKind,
    at: Instant,
    generation: u64,
}

/// All outstanding deadlines, unordered; the set stays tiny (one entry per
/// living enemy plus at most three singletons).
#[derive(Debug, Default)]
pub(crate) struct TimerBoard {
    entries: Vec<TimerEntry>,
    generation: u64,
}

impl TimerBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidates every already-armed attack entry.
    pub fn bump_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Arms `kind` to fire after `delay`, stamped with the current
    /// generation.
    pub fn arm(&mut self, kind: TimerKind, delay: Duration) {
        self.entries.push(TimerEntry {
            kind,
            at: Instant::now() + delay,
            generation: self.generation,
        });
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.entries.iter().any(|e| e.kind == kind)
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        self.entries.retain(|e| e.kind != kind);
    }

    /// Drops the attack entries and the poison ticker, keeping any pending
    /// award or notification delay.
    pub fn cancel_battle(&mut self) {
        self.entries
            .retain(|e| !matches!(e.kind, TimerKind::EnemyAttack(_) | TimerKind::PoisonTick));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The earliest outstanding deadline, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|e| e.at).min()
    }

    /// Removes and returns the earliest due entry.
    ///
    /// Attack entries armed under an older roster generation are discarded
    /// instead of returned.
    pub fn pop_due(&mut self, now: Instant) -> Option<TimerKind> {
        loop {
            let index = self
                .entries
                .iter()
                .enumerate()
                .filter(|(_, e)| e.at <= now)
                .min_by_key(|(_, e)| e.at)
                .map(|(i, _)| i)?;
            let entry = self.entries.swap_remove(index);
            if matches!(entry.kind, TimerKind::EnemyAttack(_))
                && entry.generation != self.generation
            {
                continue;
            }
            return Some(entry.kind);
        }
    }
}
