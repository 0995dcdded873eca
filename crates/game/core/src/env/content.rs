//! Static content lookups.
//!
//! The content oracle resolves template data authored outside the rules
//! layer: enemy templates, skill templates, the level-gated skill unlock
//! table, stages, and the shared question pool. `game-content` provides the
//! built-in implementation.

use crate::question::Question;
use crate::skill::{SkillId, SkillTemplate};
use crate::stage::{EnemyTemplateId, Stage, StageId};
use crate::state::{EnemyVisual, QuestionMode, SpecialAttack};

/// Blueprint an encounter spawns an [`crate::state::Enemy`] from.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    pub id: EnemyTemplateId,
    pub name: String,
    pub level: u32,
    pub max_hp: u32,
    pub attack_power: u32,
    pub defense: u32,
    /// EXP granted when this enemy's encounter is cleared.
    pub exp: u32,
    pub speed: u32,
    pub luck: u32,
    /// Vocabulary word this enemy is themed around.
    pub word: String,
    pub visual: EnemyVisual,
    pub question_mode: QuestionMode,
    /// Enemy-specific question pool, used per `question_mode`.
    pub original_questions: Vec<Question>,
    pub special_attacks: Vec<SpecialAttack>,
}

/// Read-only access to authored content.
pub trait ContentOracle: Send + Sync {
    /// Looks up an enemy template by id.
    fn enemy_template(&self, id: &EnemyTemplateId) -> Option<&EnemyTemplate>;

    /// Looks up a skill template by id.
    fn skill_template(&self, id: &SkillId) -> Option<&SkillTemplate>;

    /// Returns the skill unlocked when the player reaches `level`, if any.
    fn skill_unlocked_at(&self, level: u32) -> Option<&SkillId>;

    /// Looks up a stage by id.
    fn stage(&self, id: &StageId) -> Option<&Stage>;

    /// Returns the stage a fresh session starts in.
    fn first_stage(&self) -> Option<&Stage>;

    /// Returns the stage after `id` in progression order, if any.
    fn next_stage(&self, id: &StageId) -> Option<&Stage>;

    /// Shared question pool available to every enemy whose mode allows it.
    fn common_questions(&self) -> &[Question];
}
