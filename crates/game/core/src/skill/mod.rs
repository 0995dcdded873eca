//! Skill templates, acquisition, and execution.
//!
//! Templates are static content; a [`SkillInstance`] tracks per-session
//! cooldown state inside the [`SkillBook`]. Execution is a pure dispatch over
//! [`SkillKind`] in [`execute`]; the engine decides whether results apply
//! immediately (heal) or wait for a deferred impact (fire spells).

mod book;
mod execute;

pub use book::{SkillBook, SkillInstance};
pub use execute::{SkillResult, execute};

use core::fmt;

use crate::error::{ErrorSeverity, GameError};

/// Identifier of a skill template in the content catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SkillId(pub String);

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SkillId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Coarse classification used for display and content grouping.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SkillType {
    Heal,
    #[default]
    Damage,
    Buff,
    Debuff,
    Special,
}

/// When a skill's effect is allowed to fire.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SkillActivation {
    /// Always-on; never invoked directly.
    Passive,
    /// Armed on selection, fires when the next answer is correct.
    OnCorrectAnswer,
    /// Fires immediately on selection.
    #[default]
    OnCommand,
    OnCombo,
    OnEnemyDefeat,
    OnDamage,
}

/// Which entities a skill affects.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SkillTargeting {
    /// The player themselves.
    SelfTarget,
    #[default]
    SingleEnemy,
    AllEnemies,
    RandomEnemy,
}

/// Mechanical payload of a skill.
///
/// Content instantiates these: `fire_bolt` and `fire_ball` are both
/// [`SkillKind::Strike`] with different powers, `fire_storm` is a
/// [`SkillKind::Barrage`], `heal` a [`SkillKind::Heal`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillKind {
    /// Restores HP scaled by player level.
    Heal { power: u32 },
    /// Damages one enemy.
    Strike { power: u32 },
    /// Damages every living enemy independently.
    Barrage { power: u32 },
}

/// Static description of a skill.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillTemplate {
    pub id: SkillId,
    pub name: String,
    pub skill_type: SkillType,
    pub kind: SkillKind,
    pub mp_cost: u32,
    /// Answer submissions the skill stays unusable for after executing.
    pub cooldown: u32,
    pub activation: SkillActivation,
    pub targeting: SkillTargeting,
}

/// Errors from gating or dispatching a skill.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillError {
    /// Skill template does not exist in content.
    #[error("unknown skill '{0}'")]
    Unknown(SkillId),

    /// Skill exists but the player has not acquired it.
    #[error("skill '{0}' is not acquired")]
    NotAcquired(SkillId),

    /// Skill is still cooling down.
    #[error("skill '{skill}' is on cooldown for {remaining} more turns")]
    OnCooldown { skill: SkillId, remaining: u32 },

    /// Player cannot pay the MP cost.
    #[error("skill '{skill}' needs {required} MP, only {available} available")]
    InsufficientMp {
        skill: SkillId,
        required: u32,
        available: u32,
    },

    /// No living enemy to aim the skill at.
    #[error("no valid target for skill '{0}'")]
    NoValidTarget(SkillId),

    /// Skill cannot be invoked directly (e.g. passive).
    #[error("skill '{0}' cannot be used on command")]
    InvalidActivation(SkillId),
}

impl GameError for SkillError {
    fn severity(&self) -> ErrorSeverity {
        use SkillError::*;
        match self {
            OnCooldown { .. } | InsufficientMp { .. } | NoValidTarget(_) => {
                ErrorSeverity::Recoverable
            }
            Unknown(_) | NotAcquired(_) | InvalidActivation(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use SkillError::*;
        match self {
            Unknown(_) => "SKILL_UNKNOWN",
            NotAcquired(_) => "SKILL_NOT_ACQUIRED",
            OnCooldown { .. } => "SKILL_ON_COOLDOWN",
            InsufficientMp { .. } => "SKILL_INSUFFICIENT_MP",
            NoValidTarget(_) => "SKILL_NO_VALID_TARGET",
            InvalidActivation(_) => "SKILL_INVALID_ACTIVATION",
        }
    }
}
