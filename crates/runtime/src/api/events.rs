//! Events emitted during a session for front-ends to observe.
//!
//! Consumers subscribe to [`SessionEvent`] to react to battle progress
//! without blocking the worker loop. Events derived from a single intent are
//! published in resolution order, so a defeat always precedes the stage clear
//! it caused and the clear always precedes its EXP award.
use serde::{Deserialize, Serialize};

use game_core::engine::{
    AnswerOutcome, ClearAward, EnemyAttackOutcome, FloorAdvance, ImpactOutcome, PoisonTickOutcome,
    SkillUseOutcome,
};
use game_core::{EffectId, EnemyId, Notification, Question, SkillId};

/// Events broadcast by the session worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A fresh roster spawned and the first question is up.
    BattleStarted {
        roster: Vec<EnemyId>,
        question: Question,
    },
    /// An answer was judged; carries the full resolution.
    AnswerJudged { outcome: AnswerOutcome },
    /// The current question's hint was fully revealed.
    HintRevealed { mask: String },
    /// Answers now aim at a different enemy.
    TargetSelected { enemy: EnemyId, index: usize },
    /// A skill was armed or fired directly.
    SkillUsed {
        skill: SkillId,
        outcome: SkillUseOutcome,
    },
    /// A deferred skill impact is waiting for the render layer to play it
    /// out and report completion.
    ImpactRequested {
        effect: EffectId,
        skill: SkillId,
        target: EnemyId,
        damage: u32,
    },
    /// A deferred impact completed and its damage was settled.
    ImpactResolved { outcome: ImpactOutcome },
    /// An enemy attack timer fired and resolved against the player.
    EnemyAttacked { outcome: EnemyAttackOutcome },
    /// One poison tick was applied to the player.
    PoisonTicked { outcome: PoisonTickOutcome },
    /// An enemy dropped to 0 HP.
    EnemyDefeated { enemy: EnemyId },
    /// The whole roster is down; the EXP award follows after the clear delay.
    StageCleared,
    /// The clear award landed, with any level-ups it caused.
    ExpAwarded { award: ClearAward },
    /// A blocking notification became visible.
    NotificationShown { notification: Notification },
    /// The session moved to another floor or stage.
    FloorAdvanced { advance: FloorAdvance },
    /// The player dropped to 0 HP; battle timers are stopped.
    GameOver,
    /// The player came back from game over.
    Revived,
}
