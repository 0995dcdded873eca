//! Combat resolution.
//!
//! Pure functions over `(player, enemy, config, rng, seeds)`; application to
//! state happens in the engine. Damage math runs in f64 and truncates toward
//! zero exactly once per pipeline step that the rules call for.
mod answer;
mod enemy;
mod result;

pub use answer::{AnswerContext, resolve_player_attack};
pub(crate) use answer::PLAYER_ENTITY;
pub use enemy::{perform_special, resolve_enemy_attack};
pub use result::{
    AttackRoll, ComboTier, EnemyAttackKind, EnemyAttackResult, HitGrade, PlayerAttackResult,
    SpecialOutcome,
};
