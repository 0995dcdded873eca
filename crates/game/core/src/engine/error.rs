//! Engine-level error type.

use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::notify::NotificationError;
use crate::progression::ProgressionError;
use crate::skill::SkillError;
use crate::stage::StageId;
use crate::state::{EffectId, GamePhase};

/// Any failure an intent can produce.
///
/// Domain errors pass through transparently so callers can match on the
/// original variant; the remaining variants are intent-validation failures
/// the engine itself detects.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Skill(#[from] SkillError),

    #[error(transparent)]
    Progression(#[from] ProgressionError),

    #[error(transparent)]
    Notification(#[from] NotificationError),

    #[error("intent requires phase {expected:?}, session is in {actual:?}")]
    WrongPhase {
        expected: GamePhase,
        actual: GamePhase,
    },

    #[error("no question is active")]
    NoActiveQuestion,

    /// Progress points at a floor the stage does not have.
    #[error("stage '{stage}' has no floor {floor_index}")]
    MissingFloor { stage: StageId, floor_index: usize },

    /// The selected floor cannot spawn anything.
    #[error("floor {floor_index} of stage '{stage}' has no spawnable monster set")]
    EmptyFloor { stage: StageId, floor_index: usize },

    #[error("no living enemy at roster index {0}")]
    InvalidTarget(usize),

    /// Impact completions must arrive in the order the impacts were queued.
    #[error("impact {0} is not next in the completion queue")]
    ImpactNotNext(EffectId),

    #[error("clear reward was already collected")]
    NothingToAward,

    /// Leaving a cleared floor before collecting its reward would drop EXP.
    #[error("clear reward has not been collected yet")]
    AwardPending,

    #[error("floor requires {required} clears, only {clears} recorded")]
    AdvanceLocked { required: u32, clears: u32 },
}

impl GameError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Oracle(e) => e.severity(),
            Self::Skill(e) => e.severity(),
            Self::Progression(e) => e.severity(),
            Self::Notification(e) => e.severity(),
            Self::AdvanceLocked { .. } => ErrorSeverity::Recoverable,
            Self::WrongPhase { .. }
            | Self::NoActiveQuestion
            | Self::InvalidTarget(_)
            | Self::ImpactNotNext(_)
            | Self::NothingToAward
            | Self::AwardPending => ErrorSeverity::Validation,
            Self::MissingFloor { .. } | Self::EmptyFloor { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Oracle(e) => e.error_code(),
            Self::Skill(e) => e.error_code(),
            Self::Progression(e) => e.error_code(),
            Self::Notification(e) => e.error_code(),
            Self::WrongPhase { .. } => "ENGINE_WRONG_PHASE",
            Self::NoActiveQuestion => "ENGINE_NO_ACTIVE_QUESTION",
            Self::MissingFloor { .. } => "ENGINE_MISSING_FLOOR",
            Self::EmptyFloor { .. } => "ENGINE_EMPTY_FLOOR",
            Self::InvalidTarget(_) => "ENGINE_INVALID_TARGET",
            Self::ImpactNotNext(_) => "ENGINE_IMPACT_NOT_NEXT",
            Self::NothingToAward => "ENGINE_NOTHING_TO_AWARD",
            Self::AwardPending => "ENGINE_AWARD_PENDING",
            Self::AdvanceLocked { .. } => "ENGINE_ADVANCE_LOCKED",
        }
    }
}
