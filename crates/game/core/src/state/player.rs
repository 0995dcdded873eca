//! The player record and its pure update methods.
//!
//! Every mutation returns a new `Player`; no caller ever writes a field in
//! place. The clamps live in the update methods, so any reachable value
//! satisfies `0 <= hp <= max_hp`, `0 <= mp <= max_mp`, `level >= 1`.

use crate::config::GameConfig;

use super::status::{StatusEffect, StatusEffectKind, StatusEffects};

/// Canonical player state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub hp: u32,
    pub max_hp: u32,
    pub mp: u32,
    pub max_mp: u32,
    pub defense: u32,
    pub magic_defense: u32,
    pub level: u32,
    /// EXP toward the next level; always below the current threshold.
    pub exp: u32,
    /// Lifetime EXP, never consumed by level-ups.
    pub total_exp: u64,
    pub speed: u32,
    pub attack: u32,
    pub luck: u32,
    pub power: u32,
    pub status_effects: StatusEffects,
}

/// Result of one poison tick against the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoisonTick {
    pub damage: u32,
    /// Whether this tick consumed the effect's last second.
    pub expired: bool,
}

impl Player {
    /// Starting player for a fresh session.
    pub fn create_default() -> Self {
        Self {
            hp: 100,
            max_hp: 100,
            mp: 50,
            max_mp: 50,
            defense: 5,
            magic_defense: 5,
            level: 1,
            exp: 0,
            total_exp: 0,
            speed: 5,
            attack: 10,
            luck: 5,
            power: 5,
            status_effects: StatusEffects::empty(),
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    /// Applies damage, clamping HP at zero.
    #[must_use]
    pub fn take_damage(&self, amount: u32) -> Self {
        let mut next = self.clone();
        next.hp = next.hp.saturating_sub(amount);
        next
    }

    /// Restores HP up to the maximum.
    ///
    /// Returns the new player and the amount actually restored.
    #[must_use]
    pub fn heal(&self, amount: u32) -> (Self, u32) {
        let mut next = self.clone();
        let restored = amount.min(next.max_hp - next.hp);
        next.hp += restored;
        (next, restored)
    }

    /// Pays an MP cost, or `None` if the player cannot afford it.
    #[must_use]
    pub fn spend_mp(&self, cost: u32) -> Option<Self> {
        if self.mp < cost {
            return None;
        }
        let mut next = self.clone();
        next.mp -= cost;
        Some(next)
    }

    /// Applies a status effect, refreshing one of the same kind.
    #[must_use]
    pub fn with_status(&self, effect: StatusEffect) -> Self {
        let mut next = self.clone();
        next.status_effects.apply(effect);
        next
    }

    /// Removes every status effect.
    #[must_use]
    pub fn cleanse(&self) -> Self {
        let mut next = self.clone();
        next.status_effects.clear();
        next
    }

    /// Advances the active poison effect by one second.
    ///
    /// Returns `None` when no poison is active.
    #[must_use]
    pub fn poison_tick(&self) -> Option<(Self, PoisonTick)> {
        let mut next = self.clone();
        let damage = next.status_effects.tick(StatusEffectKind::Poison)?;
        next.hp = next.hp.saturating_sub(damage);
        let expired = !next.status_effects.has(StatusEffectKind::Poison);
        Some((next, PoisonTick { damage, expired }))
    }

    /// Applies one level worth of stat growth and fully restores HP/MP.
    #[must_use]
    pub fn grow(&self, config: &GameConfig) -> Self {
        let mut next = self.clone();
        next.level += 1;
        next.max_hp += config.growth_max_hp;
        next.max_mp += config.growth_max_mp;
        next.defense += config.growth_defense;
        next.magic_defense += config.growth_magic_defense;
        next.speed += config.growth_speed;
        next.luck += config.growth_luck;
        next.power += config.growth_power;
        next.attack += config.growth_attack;
        next.hp = next.max_hp;
        next.mp = next.max_mp;
        next
    }

    /// Post-defeat revival: HP restored in full, poison cleansed, MP kept.
    #[must_use]
    pub fn revive(&self) -> Self {
        let mut next = self.cleanse();
        next.hp = next.max_hp;
        next
    }

    /// Returns a copy with MP set (clamped to the maximum).
    #[must_use]
    pub fn with_mp(&self, mp: u32) -> Self {
        let mut next = self.clone();
        next.mp = mp.min(next.max_mp);
        next
    }

    /// Returns a copy with HP set (clamped to the maximum).
    #[must_use]
    pub fn with_hp(&self, hp: u32) -> Self {
        let mut next = self.clone();
        next.hp = hp.min(next.max_hp);
        next
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::create_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_clamps_at_zero() {
        let player = Player::create_default();
        let hurt = player.take_damage(10_000);
        assert_eq!(hurt.hp, 0);
        assert!(hurt.is_defeated());
        // original untouched
        assert_eq!(player.hp, 100);
    }

    #[test]
    fn heal_never_exceeds_max_and_reports_the_clamped_delta() {
        let player = Player::create_default().with_hp(90);
        let (healed, restored) = player.heal(25);
        assert_eq!(healed.hp, 100);
        assert_eq!(restored, 10);
    }

    #[test]
    fn spend_mp_requires_funds() {
        let player = Player::create_default().with_mp(10);
        assert!(player.spend_mp(11).is_none());
        let paid = player.spend_mp(10).unwrap();
        assert_eq!(paid.mp, 0);
    }

    #[test]
    fn poison_ticks_until_expiry() {
        let player = Player::create_default().with_status(StatusEffect {
            kind: StatusEffectKind::Poison,
            ticks_remaining: 2,
            damage_per_tick: 3,
        });

        let (p1, t1) = player.poison_tick().unwrap();
        assert_eq!((t1.damage, t1.expired), (3, false));
        assert_eq!(p1.hp, 97);

        let (p2, t2) = p1.poison_tick().unwrap();
        assert_eq!((t2.damage, t2.expired), (3, true));
        assert_eq!(p2.hp, 94);
        assert!(p2.poison_tick().is_none());
    }

    #[test]
    fn grow_applies_the_fixed_deltas_and_restores_resources() {
        let config = GameConfig::default();
        let player = Player::create_default().with_hp(1).with_mp(0);
        let grown = player.grow(&config);

        assert_eq!(grown.level, 2);
        assert_eq!(grown.max_hp, 110);
        assert_eq!(grown.hp, 110);
        assert_eq!(grown.max_mp, 55);
        assert_eq!(grown.mp, 55);
        assert_eq!(grown.attack, 12);
        assert_eq!(grown.defense, 6);
        assert_eq!(grown.magic_defense, 6);
        assert_eq!(grown.speed, 6);
        assert_eq!(grown.luck, 6);
        assert_eq!(grown.power, 6);
    }

    #[test]
    fn revive_restores_hp_and_cleanses_but_keeps_mp() {
        let player = Player::create_default()
            .with_hp(0)
            .with_mp(7)
            .with_status(StatusEffect {
                kind: StatusEffectKind::Poison,
                ticks_remaining: 5,
                damage_per_tick: 2,
            });

        let revived = player.revive();
        assert_eq!(revived.hp, revived.max_hp);
        assert_eq!(revived.mp, 7);
        assert!(revived.status_effects.is_empty());
    }
}
