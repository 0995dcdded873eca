//! Combat outcome types.

use crate::config::GameConfig;
use crate::state::StatusEffect;

/// Outcome band of the single miss/critical draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackRoll {
    /// Attack whiffed; no damage.
    Miss,
    /// Regular hit.
    Normal,
    /// Critical hit; damage recomputed from raw attack.
    Critical,
}

/// Display tier of the current combo streak.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComboTier {
    None,
    Combo,
    Big,
    Super,
}

impl ComboTier {
    /// Derives the tier from a streak length.
    pub fn from_count(combo: u32, config: &GameConfig) -> Self {
        if combo >= config.combo_tier_super {
            Self::Super
        } else if combo >= config.combo_tier_big {
            Self::Big
        } else if combo >= config.combo_tier_combo {
            Self::Combo
        } else {
            Self::None
        }
    }
}

/// Result of resolving one correct answer against the target.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerAttackResult {
    pub roll: AttackRoll,
    pub damage: u32,
    pub tier: ComboTier,
    /// Hint penalty factor that was applied (1.0 = no penalty).
    pub penalty: f64,
}

/// Flavor qualifier on enemy criticals. Message-only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HitGrade {
    Graze,
    Solid,
}

/// What a special attack did.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpecialOutcome {
    pub damage: u32,
    /// HP the enemy recovers (drain attacks).
    pub recovery: u32,
    /// Poison to apply to the player, if any.
    pub poison: Option<StatusEffect>,
    pub message: String,
}

/// Which path an enemy attack took.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnemyAttackKind {
    /// A special fired; carries its table name and flavor message.
    Special { name: String, message: String },
    /// Normal swing; `grade` is set on criticals.
    Normal {
        critical: bool,
        grade: Option<HitGrade>,
    },
}

/// Result of resolving one enemy attack against the player.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyAttackResult {
    pub kind: EnemyAttackKind,
    pub damage: u32,
    /// HP the enemy recovers (drain specials).
    pub recovery: u32,
    /// Poison the player contracts, if any.
    pub poison: Option<StatusEffect>,
}
