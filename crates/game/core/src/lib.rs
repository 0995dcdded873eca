//! Deterministic battle and progression rules for the vocabulary battler.
//!
//! `game-core` defines the canonical rules (combat resolution, skills,
//! progression, stage flow, notifications) and exposes pure APIs that can be
//! reused by both the runtime and offline tools. All state mutation flows
//! through [`engine::GameEngine`], and supporting crates depend on the types
//! re-exported here.
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod notify;
pub mod progression;
pub mod question;
pub mod skill;
pub mod stage;
pub mod state;

pub use combat::{
    AttackRoll, ComboTier, EnemyAttackKind, EnemyAttackResult, HitGrade, PlayerAttackResult,
    SpecialOutcome,
};
pub use config::GameConfig;
pub use engine::{
    AnswerOutcome, EncounterStart, EngineError, FloorAdvance, GameEngine, ImpactOutcome,
    SkillUseOutcome,
};
pub use env::{
    ContentOracle, EnemyTemplate, Env, GameEnv, OracleError, PcgRng, RngOracle, compute_seed,
};
pub use error::{ErrorSeverity, GameError};
pub use notify::{Notification, NotificationError, NotificationQueue, NotificationState};
pub use progression::{LevelUp, ProgressionError, award_exp};
pub use question::{Question, QuestionKind};
pub use skill::{
    SkillActivation, SkillBook, SkillError, SkillId, SkillInstance, SkillKind, SkillResult,
    SkillTargeting, SkillTemplate, SkillType,
};
pub use stage::{
    EnemyTemplateId, Floor, MonsterSet, RateWarning, Stage, StageId, select_monster_set,
};
pub use state::{
    BattleState, EffectId, EncounterState, Enemy, EnemyId, EnemyVisual, GamePhase,
    GameState, PendingImpact, Player, QuestionMode, SpecialAttack, SpecialEffect, StageProgress,
    StatusEffect, StatusEffectKind, StatusEffects, StoredProgress,
};
