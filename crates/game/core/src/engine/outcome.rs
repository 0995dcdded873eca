//! What each accepted intent reports back.
//!
//! Outcomes carry everything the runtime needs to emit events without
//! re-deriving it from state: damage rolls, defeats, queued impacts, the
//! next question. They are plain data and hold no references into state.

use crate::combat::{ComboTier, EnemyAttackResult, PlayerAttackResult};
use crate::progression::LevelUp;
use crate::question::Question;
use crate::skill::{SkillId, SkillResult};
use crate::stage::StageId;
use crate::state::{EffectId, EnemyId, PendingImpact};

/// A fresh roster is installed and the first question is up.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterStart {
    /// Spawned enemy ids in roster order.
    pub roster: Vec<EnemyId>,
    pub question: Question,
}

/// Result of one answer submission.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnswerOutcome {
    /// The input did not match; the question stays up with one more hint.
    Wrong {
        wrong_attempts: u32,
        hint_mask: String,
        /// Every hidden character is now revealed.
        exhausted: bool,
    },
    /// The input matched and an action resolved against the roster.
    Correct {
        combo: u32,
        tier: ComboTier,
        action: AnswerAction,
        /// Enemies that died from the immediate part of the action.
        defeated: Vec<EnemyId>,
        /// The roster was wiped and the session moved to `StageCleared`.
        cleared: bool,
        /// Drawn when the battle continues.
        next_question: Option<Question>,
    },
}

/// What a correct answer did.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnswerAction {
    /// Normal attack against the current target.
    Attack {
        target: EnemyId,
        result: PlayerAttackResult,
    },
    /// The armed skill fired instead of the normal attack.
    Skill(SkillFired),
}

/// One skill execution, immediate or armed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillFired {
    pub skill: SkillId,
    pub result: SkillResult,
    /// Deferred impacts queued for completion, in FIFO order.
    pub impacts: Vec<EffectId>,
    /// HP actually restored (heal skills).
    pub restored: u32,
}

/// Result of a direct skill use.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillUseOutcome {
    /// Armed; fires on the next correct answer.
    Armed { skill: SkillId },
    /// Fired on the spot.
    Fired {
        cast: SkillFired,
        defeated: Vec<EnemyId>,
        cleared: bool,
    },
}

/// Result of completing the head impact.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpactOutcome {
    pub impact: PendingImpact,
    /// False when the target was already gone and the damage was dropped.
    pub applied: bool,
    pub defeated: Option<EnemyId>,
    pub cleared: bool,
}

/// Result of one enemy attack against the player.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyAttackOutcome {
    pub attacker: EnemyId,
    pub result: EnemyAttackResult,
    pub player_hp: u32,
    pub player_defeated: bool,
}

/// One poison tick applied to the player.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoisonTickOutcome {
    pub damage: u32,
    /// The poison ran out with this tick.
    pub expired: bool,
    pub player_hp: u32,
    pub player_defeated: bool,
}

/// EXP collected for a cleared floor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClearAward {
    /// Total awarded EXP after any boss-floor bonus.
    pub exp: u32,
    pub level_ups: Vec<LevelUp>,
}

/// Where an advance intent moved the session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FloorAdvance {
    NextFloor { floor_index: usize },
    NextStage { stage_id: StageId },
    /// Final floor of the final stage; position unchanged, re-battling open.
    Complete,
}
