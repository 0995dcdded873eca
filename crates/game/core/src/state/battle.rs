//! Bookkeeping for the encounter in progress.
//!
//! Tracks the current target, combo/wrong-attempt counters, the live
//! question, the armed skill, and the FIFO of deferred skill impacts whose
//! damage waits for the render layer's impact callback.

use arrayvec::ArrayVec;
use core::fmt;

use crate::config::GameConfig;
use crate::question::Question;
use crate::skill::SkillId;

use super::enemy::EnemyId;

/// Identity of one deferred impact. Monotonic per session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectId(pub u64);

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "effect#{}", self.0)
    }
}

/// Damage computed at cast time, applied when its impact completes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingImpact {
    pub effect: EffectId,
    pub skill: SkillId,
    pub target: EnemyId,
    pub damage: u32,
}

/// Mutable battle bookkeeping, reset per encounter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    /// Roster index of the enemy answers currently aim at.
    pub target_index: usize,
    /// Consecutive correct answers, including the one being resolved.
    pub combo: u32,
    /// Wrong attempts on the current question.
    pub wrong_attempts: u32,
    /// Set by the explicit reveal action; zeroes crit chance and maximizes
    /// the hint penalty.
    pub hint_revealed: bool,
    pub question: Option<Question>,
    /// Skill armed to replace the next correct answer's normal attack.
    pub armed_skill: Option<SkillId>,
    pending_impacts: ArrayVec<PendingImpact, { GameConfig::MAX_PENDING_IMPACTS }>,
    next_effect_id: u64,
}

impl BattleState {
    pub fn reset_for_encounter(&mut self) {
        self.target_index = 0;
        self.combo = 0;
        self.wrong_attempts = 0;
        self.hint_revealed = false;
        self.question = None;
        self.armed_skill = None;
        self.pending_impacts.clear();
    }

    /// Installs the next question, clearing per-question counters.
    pub fn set_question(&mut self, question: Question) {
        self.question = Some(question);
        self.wrong_attempts = 0;
        self.hint_revealed = false;
    }

    /// Queues a deferred impact, allocating its id.
    ///
    /// Returns `None` when the queue is full; callers treat that as an
    /// immediately-applied impact instead of dropping damage.
    pub fn push_impact(&mut self, skill: SkillId, target: EnemyId, damage: u32) -> Option<EffectId> {
        if self.pending_impacts.is_full() {
            return None;
        }
        let effect = EffectId(self.next_effect_id);
        self.next_effect_id += 1;
        self.pending_impacts.push(PendingImpact {
            effect,
            skill,
            target,
            damage,
        });
        Some(effect)
    }

    /// The impact that must complete next, if any.
    pub fn head_impact(&self) -> Option<&PendingImpact> {
        self.pending_impacts.first()
    }

    /// Removes and returns the head impact if it matches `effect`.
    ///
    /// Impacts complete strictly in FIFO order; an out-of-order id leaves the
    /// queue untouched.
    pub fn take_impact(&mut self, effect: EffectId) -> Option<PendingImpact> {
        if self.pending_impacts.first()?.effect != effect {
            return None;
        }
        Some(self.pending_impacts.remove(0))
    }

    pub fn pending_impacts(&self) -> impl Iterator<Item = &PendingImpact> {
        self.pending_impacts.iter()
    }

    pub fn has_pending_impacts(&self) -> bool {
        !self.pending_impacts.is_empty()
    }
}
