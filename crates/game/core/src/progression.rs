//! Experience accrual and level-up sequencing.

use crate::config::GameConfig;
use crate::env::ContentOracle;
use crate::error::{ErrorSeverity, GameError};
use crate::skill::SkillId;
use crate::state::Player;

/// One level gained by an award, in crossing order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelUp {
    pub level: u32,
    /// Skill the level-gated unlock table grants at this level, if any.
    pub unlocked: Option<SkillId>,
}

/// Errors from awarding experience.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProgressionError {
    /// Negative awards are rejected at the boundary.
    #[error("rejecting negative EXP award of {0}")]
    NegativeAmount(i64),

    /// The computed level fell below the pre-award level.
    ///
    /// Cannot happen with a correct threshold walk; kept as a guard so a
    /// future logic error discards the update instead of corrupting state.
    #[error("level would regress from {from} to {computed}")]
    LevelRegression { from: u32, computed: u32 },
}

impl GameError for ProgressionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NegativeAmount(_) => ErrorSeverity::Validation,
            Self::LevelRegression { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NegativeAmount(_) => "PROGRESSION_NEGATIVE_AMOUNT",
            Self::LevelRegression { .. } => "PROGRESSION_LEVEL_REGRESSION",
        }
    }
}

/// Awards experience, resolving every level crossed.
///
/// The threshold is recomputed from each new level (`level * 100` by
/// default), so one large award can cross several levels; each crossing
/// applies the fixed growth deltas and fully restores HP/MP. At the level
/// cap EXP keeps accumulating but levels stop.
///
/// On error the caller keeps the original player; nothing is applied.
pub fn award_exp(
    player: &Player,
    amount: i64,
    config: &GameConfig,
    content: &(impl ContentOracle + ?Sized),
) -> Result<(Player, Vec<LevelUp>), ProgressionError> {
    if amount < 0 {
        return Err(ProgressionError::NegativeAmount(amount));
    }
    let gained = u32::try_from(amount).unwrap_or(u32::MAX);

    let mut next = player.clone();
    next.exp = next.exp.saturating_add(gained);
    next.total_exp = next.total_exp.saturating_add(u64::from(gained));

    let mut level_ups = Vec::new();
    while next.level < config.level_cap && next.exp >= config.exp_threshold(next.level) {
        next.exp -= config.exp_threshold(next.level);
        next = next.grow(config);
        level_ups.push(LevelUp {
            level: next.level,
            unlocked: content.skill_unlocked_at(next.level).cloned(),
        });
    }

    if next.level < player.level {
        return Err(ProgressionError::LevelRegression {
            from: player.level,
            computed: next.level,
        });
    }

    Ok((next, level_ups))
}
