//! Enemy attack resolution for one timer firing.
//!
//! One draw walks the special-attack table; if nothing fires the swing falls
//! through to the normal attack with its jitter and independent critical
//! roll. Criticals carry a graze/solid qualifier that only affects flavor
//! text.

use crate::config::GameConfig;
use crate::env::{RngOracle, compute_seed};
use crate::state::{Enemy, SpecialAttack, SpecialEffect, StatusEffect, StatusEffectKind};

use super::result::{EnemyAttackKind, EnemyAttackResult, HitGrade, SpecialOutcome};

const CTX_SPECIAL_SELECT: u32 = 0;
const CTX_DAMAGE: u32 = 1;
const CTX_CRIT_ROLL: u32 = 2;
const CTX_CRIT_VARIANCE: u32 = 3;
const CTX_GRADE: u32 = 4;

/// Resolves one enemy attack against the player.
///
/// Callers guarantee both sides are alive; a defeated attacker or defender
/// never reaches the resolver.
pub fn resolve_enemy_attack(
    enemy: &Enemy,
    config: &GameConfig,
    rng: &(impl RngOracle + ?Sized),
    game_seed: u64,
    nonce: u64,
) -> EnemyAttackResult {
    let entity = enemy.id.0;

    // Special-attack table: single draw, cumulative walk in list order.
    let select_draw = rng.unit(compute_seed(game_seed, nonce, entity, CTX_SPECIAL_SELECT));
    let mut cumulative = 0.0;
    for attack in &enemy.special_attacks {
        cumulative += attack.probability;
        if cumulative > select_draw {
            let outcome = perform_special(
                attack,
                config,
                rng,
                compute_seed(game_seed, nonce, entity, CTX_DAMAGE),
            );
            return EnemyAttackResult {
                kind: EnemyAttackKind::Special {
                    name: attack.name.clone(),
                    message: outcome.message.clone(),
                },
                damage: outcome.damage,
                recovery: outcome.recovery,
                poison: outcome.poison,
            };
        }
    }

    // Normal attack: jittered swing, then an independent critical roll.
    let jitter_draw = rng.unit(compute_seed(game_seed, nonce, entity, CTX_DAMAGE));
    let reduction = (jitter_draw * f64::from(config.enemy_damage_jitter)) as u32;
    let mut damage = enemy.attack_power.saturating_sub(reduction).max(1);

    let crit_rate = config.enemy_crit_base + f64::from(enemy.luck) * config.enemy_crit_step;
    let crit_draw = rng.unit(compute_seed(game_seed, nonce, entity, CTX_CRIT_ROLL));
    let critical = crit_draw < crit_rate;
    let grade = if critical {
        let variance_draw = rng.unit(compute_seed(game_seed, nonce, entity, CTX_CRIT_VARIANCE));
        let variance = config.variance_base + variance_draw * config.variance_span;
        damage = (f64::from(enemy.attack_power) * config.crit_multiplier * variance) as u32;

        let grade_draw = rng.unit(compute_seed(game_seed, nonce, entity, CTX_GRADE));
        Some(if grade_draw < 0.5 {
            HitGrade::Graze
        } else {
            HitGrade::Solid
        })
    } else {
        None
    };

    EnemyAttackResult {
        kind: EnemyAttackKind::Normal { critical, grade },
        damage,
        recovery: 0,
        poison: None,
    }
}

/// Executes one special-attack entry.
pub fn perform_special(
    attack: &SpecialAttack,
    config: &GameConfig,
    rng: &(impl RngOracle + ?Sized),
    damage_seed: u64,
) -> SpecialOutcome {
    let variance = config.variance_base + rng.unit(damage_seed) * config.variance_span;
    let scaled = |power: u32| (f64::from(power) * variance) as u32;

    match attack.effect {
        SpecialEffect::Strike { power } => SpecialOutcome {
            damage: scaled(power),
            recovery: 0,
            poison: None,
            message: attack.message.clone(),
        },
        SpecialEffect::Drain { power, recovery } => SpecialOutcome {
            damage: scaled(power),
            recovery,
            poison: None,
            message: attack.message.clone(),
        },
        SpecialEffect::Venom {
            power,
            ticks,
            damage_per_tick,
        } => SpecialOutcome {
            damage: scaled(power),
            recovery: 0,
            poison: Some(StatusEffect {
                kind: StatusEffectKind::Poison,
                ticks_remaining: ticks,
                damage_per_tick,
            }),
            message: attack.message.clone(),
        },
    }
}
