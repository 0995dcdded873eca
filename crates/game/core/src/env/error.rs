//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};
use crate::skill::SkillId;
use crate::stage::{EnemyTemplateId, StageId};

/// Errors that occur when accessing oracle data.
///
/// Missing oracles are fatal since the engine cannot resolve content or
/// randomness without them; unresolvable references are validation errors.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// ContentOracle is not available in the environment.
    #[error("ContentOracle not available")]
    ContentNotAvailable,

    /// RngOracle is not available in the environment.
    #[error("RngOracle not available")]
    RngNotAvailable,

    /// Enemy template was not found by id.
    #[error("enemy template '{0}' not found")]
    EnemyTemplateNotFound(EnemyTemplateId),

    /// Skill template was not found by id.
    #[error("skill template '{0}' not found")]
    SkillNotFound(SkillId),

    /// Stage was not found by id.
    #[error("stage '{0}' not found")]
    StageNotFound(StageId),

    /// No stages are defined at all.
    #[error("content defines no stages")]
    NoStages,
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            // Missing oracles are fatal - engine cannot proceed
            ContentNotAvailable | RngNotAvailable | NoStages => ErrorSeverity::Fatal,

            // Not found errors are validation errors - invalid references
            EnemyTemplateNotFound(_) | SkillNotFound(_) | StageNotFound(_) => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            ContentNotAvailable => "ORACLE_CONTENT_NOT_AVAILABLE",
            RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
            EnemyTemplateNotFound(_) => "ORACLE_ENEMY_TEMPLATE_NOT_FOUND",
            SkillNotFound(_) => "ORACLE_SKILL_NOT_FOUND",
            StageNotFound(_) => "ORACLE_STAGE_NOT_FOUND",
            NoStages => "ORACLE_NO_STAGES",
        }
    }
}
