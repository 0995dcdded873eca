//! Player attack resolution for one correct answer.
//!
//! # Pipeline
//!
//! ```text
//! base    = max(min_base, attack - enemy.defense)
//! damage  = base * variance                      (draw 0)
//! damage *= hint_penalty
//! roll r                                          (draw 1)
//!   r < miss            -> 0, Miss
//!   r < miss + crit     -> floor(attack * variance * crit_mult), Critical
//!   otherwise           -> floor(damage), Normal
//! combo > 1             -> floor(damage * min(factor^(combo-1), cap))
//! ```
//!
//! The critical recomputation deliberately ignores enemy defense and the
//! hint penalty but reuses the variance factor from draw 0. Truncation
//! toward zero happens once in the roll step and once more after combo
//! scaling, exactly as the balance expects.

use crate::config::GameConfig;
use crate::env::{RngOracle, compute_seed};
use crate::question::Question;
use crate::state::{Enemy, Player};

use super::result::{AttackRoll, ComboTier, PlayerAttackResult};

/// Entity id used for player-side draws.
pub(crate) const PLAYER_ENTITY: u32 = 0;

const CTX_VARIANCE: u32 = 0;
const CTX_ATTACK_ROLL: u32 = 1;

/// Per-question inputs to the resolution.
#[derive(Clone, Copy, Debug)]
pub struct AnswerContext<'a> {
    pub question: &'a Question,
    /// Streak length counting the answer being resolved.
    pub combo: u32,
    pub wrong_attempts: u32,
    pub hint_revealed: bool,
}

/// Resolves a correct answer into damage against the target.
///
/// Correctness itself is judged by the engine before calling; a wrong answer
/// never reaches this function.
pub fn resolve_player_attack(
    player: &Player,
    enemy: &Enemy,
    ctx: &AnswerContext<'_>,
    config: &GameConfig,
    rng: &(impl RngOracle + ?Sized),
    game_seed: u64,
    nonce: u64,
) -> PlayerAttackResult {
    let base = player
        .attack
        .saturating_sub(enemy.defense)
        .max(config.min_base_damage) as f64;

    let variance_draw = rng.unit(compute_seed(game_seed, nonce, PLAYER_ENTITY, CTX_VARIANCE));
    let variance = config.variance_base + variance_draw * config.variance_span;
    let mut damage = base * variance;

    let penalty = hint_penalty(ctx);
    damage *= penalty;

    let miss_prob = (config.miss_base
        + f64::from(enemy.luck + enemy.speed) * config.miss_step)
        .min(config.miss_cap);
    let crit_prob = if ctx.hint_revealed {
        0.0
    } else {
        (config.crit_base + f64::from(player.luck + player.power) * config.crit_step)
            .min(config.crit_cap)
    };

    let roll_draw = rng.unit(compute_seed(game_seed, nonce, PLAYER_ENTITY, CTX_ATTACK_ROLL));
    let (roll, mut final_damage) = if roll_draw < miss_prob {
        (AttackRoll::Miss, 0)
    } else if roll_draw < miss_prob + crit_prob {
        let crit = f64::from(player.attack) * variance * config.crit_multiplier;
        (AttackRoll::Critical, crit as u32)
    } else {
        (AttackRoll::Normal, damage as u32)
    };

    if ctx.combo > 1 {
        let combo_mult = config
            .combo_factor
            .powi(ctx.combo as i32 - 1)
            .min(config.combo_cap);
        final_damage = (f64::from(final_damage) * combo_mult) as u32;
    }

    PlayerAttackResult {
        roll,
        damage: final_damage,
        tier: ComboTier::from_count(ctx.combo, config),
        penalty,
    }
}

/// Damage multiplier from hint usage.
///
/// Fully revealing the hint counts every slot as a wrong attempt; wrong
/// attempts past the slot count keep lowering the multiplier, floored at 0.
fn hint_penalty(ctx: &AnswerContext<'_>) -> f64 {
    let max_hints = ctx.question.max_hints();
    if max_hints == 0 {
        return 1.0;
    }
    let effective = if ctx.hint_revealed {
        max_hints
    } else {
        ctx.wrong_attempts
    };
    (1.0 - (f64::from(effective) / f64::from(max_hints)) / 2.0).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{EnemyId, EnemyVisual, QuestionMode};
    use crate::stage::EnemyTemplateId;
    use arrayvec::ArrayVec;

    /// Deterministic stub: every draw returns the same unit value.
    struct FixedRng(f64);

    impl RngOracle for FixedRng {
        fn next_u32(&self, _seed: u64) -> u32 {
            (self.0 * (f64::from(u32::MAX) + 1.0)) as u32
        }
    }

    fn slime() -> Enemy {
        Enemy {
            id: EnemyId(1),
            template: EnemyTemplateId::from("slime"),
            name: "Slime".into(),
            level: 1,
            max_hp: 10,
            current_hp: 10,
            attack_power: 5,
            defense: 2,
            exp: 10,
            speed: 1,
            luck: 1,
            word: "slime".into(),
            visual: EnemyVisual::default(),
            question_mode: QuestionMode::Common,
            original_questions: Vec::new(),
            special_attacks: ArrayVec::new(),
            defeated: false,
        }
    }

    fn leveled_player() -> Player {
        // level-3 shape from the default growth curve
        let config = GameConfig::default();
        Player::create_default().grow(&config).grow(&config)
    }

    fn ctx<'a>(question: &'a Question, combo: u32, wrong: u32, revealed: bool) -> AnswerContext<'a> {
        AnswerContext {
            question,
            combo,
            wrong_attempts: wrong,
            hint_revealed: revealed,
        }
    }

    #[test]
    fn clean_hit_at_mid_variance_deals_base_damage() {
        let question = Question::new("q", "prompt", "cat");
        let player = leveled_player();
        assert_eq!(player.attack, 14);

        let result = resolve_player_attack(
            &player,
            &slime(),
            &ctx(&question, 1, 0, false),
            &GameConfig::default(),
            &FixedRng(0.5),
            7,
            1,
        );

        // base = max(5, 14-2) = 12, variance = 0.9 + 0.5*0.2 = 1.0
        assert_eq!(result.roll, AttackRoll::Normal);
        assert_eq!(result.damage, 12);
        assert_eq!(result.tier, ComboTier::None);
    }

    #[test]
    fn weak_attacker_still_deals_the_minimum_base() {
        let question = Question::new("q", "prompt", "cat");
        let player = Player::create_default().with_hp(100);
        let mut tank = slime();
        tank.defense = 50;

        let result = resolve_player_attack(
            &player,
            &tank,
            &ctx(&question, 1, 0, false),
            &GameConfig::default(),
            &FixedRng(0.5),
            7,
            1,
        );
        assert_eq!(result.damage, 5);
    }

    #[test]
    fn hint_penalty_boundaries() {
        let question = Question::new("q", "prompt", "cat");
        let player = leveled_player();
        let config = GameConfig::default();

        // wrong_attempts == max_hints: multiplier exactly 0.5
        let penalized = resolve_player_attack(
            &player,
            &slime(),
            &ctx(&question, 1, 3, false),
            &config,
            &FixedRng(0.5),
            7,
            1,
        );
        assert_eq!(penalized.penalty, 0.5);
        assert_eq!(penalized.damage, 6);

        // no wrong attempts: multiplier exactly 1.0
        let clean = resolve_player_attack(
            &player,
            &slime(),
            &ctx(&question, 1, 0, false),
            &config,
            &FixedRng(0.5),
            7,
            1,
        );
        assert_eq!(clean.penalty, 1.0);
        assert_eq!(clean.damage, 12);
    }

    #[test]
    fn combo_scaling_boundaries() {
        let question = Question::new("q", "prompt", "cat");
        let player = leveled_player();
        let config = GameConfig::default();
        let resolve = |combo| {
            resolve_player_attack(
                &player,
                &slime(),
                &ctx(&question, combo, 0, false),
                &config,
                &FixedRng(0.5),
                7,
                1,
            )
            .damage
        };

        // damage before combo is 12 at mid variance
        assert_eq!(resolve(1), 12);
        assert_eq!(resolve(2), 13); // floor(12 * 1.1)
        assert_eq!(resolve(10), 24); // capped at 2.0, not 1.1^9 ≈ 2.36
    }

    #[test]
    fn low_roll_is_a_miss() {
        let question = Question::new("q", "prompt", "cat");
        let result = resolve_player_attack(
            &leveled_player(),
            &slime(),
            &ctx(&question, 1, 0, false),
            &GameConfig::default(),
            &FixedRng(0.0),
            7,
            1,
        );
        assert_eq!(result.roll, AttackRoll::Miss);
        assert_eq!(result.damage, 0);
    }

    #[test]
    fn crit_band_recomputes_from_raw_attack() {
        let question = Question::new("q", "prompt", "cat");
        let player = leveled_player();
        // slime: miss = 0.01 + 2*0.005 = 0.02; player luck 7, power 7:
        // crit = 0.01 + 14*0.005 = 0.08 -> band [0.02, 0.10)
        let result = resolve_player_attack(
            &player,
            &slime(),
            &ctx(&question, 1, 0, false),
            &GameConfig::default(),
            &FixedRng(0.05),
            7,
            1,
        );

        assert_eq!(result.roll, AttackRoll::Critical);
        // variance = 0.9 + 0.05*0.2 ≈ 0.91; floor(14 * 0.91 * 1.5) = 19
        assert_eq!(result.damage, 19);
    }

    #[test]
    fn revealed_hint_forces_crit_chance_to_zero() {
        let question = Question::new("q", "prompt", "cat");
        let player = leveled_player();
        let result = resolve_player_attack(
            &player,
            &slime(),
            &ctx(&question, 1, 0, true),
            &GameConfig::default(),
            &FixedRng(0.05),
            7,
            1,
        );

        // same draw that crit above now lands in the normal band, and the
        // forced full penalty halves the damage
        assert_eq!(result.roll, AttackRoll::Normal);
        assert_eq!(result.penalty, 0.5);
    }
}
