//! Pure skill effect computation.
//!
//! Execution turns a template plus resolved targets into concrete numbers.
//! Nothing here touches state: the engine applies heals directly and routes
//! damage through the pending-impact queue.

use crate::combat::PLAYER_ENTITY;
use crate::config::GameConfig;
use crate::env::{RngOracle, compute_seed};
use crate::skill::{SkillError, SkillKind, SkillTemplate};
use crate::state::{EnemyId, Player};

/// Draw context base for per-target variance, offset by target slot.
const CTX_SKILL_VARIANCE_BASE: u32 = 10;

/// Computed effect of one skill execution.
///
/// Damage and heal amounts are raw; clamping to max HP (heals) and
/// saturation at zero (damage) happen when the engine applies them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillResult {
    Healed { amount: u32 },
    Struck { target: EnemyId, damage: u32 },
    Barraged { hits: Vec<(EnemyId, u32)> },
}

/// Executes a skill against already-resolved targets.
///
/// Targeting resolution (picking a random enemy, collecting the living)
/// happens before this call; `targets` is the concrete list in arena order.
/// Heals ignore it, strikes read exactly one entry, barrages hit every entry
/// with an independent variance draw each.
pub fn execute(
    template: &SkillTemplate,
    player: &Player,
    targets: &[EnemyId],
    config: &GameConfig,
    rng: &dyn RngOracle,
    game_seed: u64,
    nonce: u64,
) -> Result<SkillResult, SkillError> {
    let variance = |slot: u32| {
        let seed = compute_seed(game_seed, nonce, PLAYER_ENTITY, CTX_SKILL_VARIANCE_BASE + slot);
        config.variance_base + rng.unit(seed) * config.variance_span
    };

    match template.kind {
        SkillKind::Heal { power } => Ok(SkillResult::Healed {
            amount: power + player.level / 2,
        }),
        SkillKind::Strike { power } => {
            let Some(target) = targets.first().copied() else {
                return Err(SkillError::NoValidTarget(template.id.clone()));
            };
            let damage = ((f64::from(power) + f64::from(player.power) * 0.5) * variance(0)) as u32;
            Ok(SkillResult::Struck { target, damage })
        }
        SkillKind::Barrage { power } => {
            if targets.is_empty() {
                return Err(SkillError::NoValidTarget(template.id.clone()));
            }
            let hits = targets
                .iter()
                .enumerate()
                .map(|(slot, &target)| {
                    let scaled = f64::from(power) * 0.7 + f64::from(player.power) * 0.3;
                    (target, (scaled * variance(slot as u32)) as u32)
                })
                .collect();
            Ok(SkillResult::Barraged { hits })
        }
    }
}
