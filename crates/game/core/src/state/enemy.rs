//! Enemy records and the per-encounter arena.
//!
//! Enemies use the same immutable-update discipline as [`super::Player`]:
//! records are replaced through [`EncounterState::apply`], never written in
//! place. Deferred completions (a fire-spell impact racing a normal
//! resolution) therefore always observe a consistent `defeated` flag.

use arrayvec::ArrayVec;
use core::fmt;

use crate::config::GameConfig;
use crate::env::EnemyTemplate;
use crate::question::Question;
use crate::stage::EnemyTemplateId;

/// Identity of an enemy within one session. Never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyId(pub u32);

impl fmt::Display for EnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "enemy#{}", self.0)
    }
}

/// Presentation metadata carried through snapshots for the render layer.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyVisual {
    pub image: String,
    pub offset_x: f32,
    pub offset_y: f32,
    pub scale: f32,
}

/// Which question pools an enemy draws from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuestionMode {
    /// Only the enemy's own questions.
    Original,
    /// Only the shared pool.
    #[default]
    Common,
    /// Both pools merged.
    Both,
}

/// Payload of a special attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpecialEffect {
    /// Plain heavy hit.
    Strike { power: u32 },
    /// Hit that heals the attacker for part of the damage dealt.
    Drain { power: u32, recovery: u32 },
    /// Hit that also poisons the player.
    Venom {
        power: u32,
        ticks: u32,
        damage_per_tick: u32,
    },
}

/// One entry of an enemy's special-attack table.
///
/// Selection walks the table in order against a single draw; the first entry
/// whose cumulative probability exceeds the draw fires. A table summing below
/// 1.0 leaves the remainder to the normal attack.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpecialAttack {
    pub name: String,
    pub probability: f64,
    pub effect: SpecialEffect,
    /// Flavor line shown when the attack fires.
    pub message: String,
}

/// One enemy in the current encounter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enemy {
    pub id: EnemyId,
    pub template: EnemyTemplateId,
    pub name: String,
    pub level: u32,
    pub max_hp: u32,
    pub current_hp: u32,
    pub attack_power: u32,
    pub defense: u32,
    pub exp: u32,
    pub speed: u32,
    pub luck: u32,
    pub word: String,
    pub visual: EnemyVisual,
    pub question_mode: QuestionMode,
    pub original_questions: Vec<Question>,
    pub special_attacks: ArrayVec<SpecialAttack, { GameConfig::MAX_SPECIAL_ATTACKS }>,
    pub defeated: bool,
}

impl Enemy {
    /// Instantiates a template into a live enemy at full HP.
    pub fn from_template(id: EnemyId, template: &EnemyTemplate) -> Self {
        let mut special_attacks = ArrayVec::new();
        for attack in template
            .special_attacks
            .iter()
            .take(GameConfig::MAX_SPECIAL_ATTACKS)
        {
            special_attacks.push(attack.clone());
        }
        Self {
            id,
            template: template.id.clone(),
            name: template.name.clone(),
            level: template.level,
            max_hp: template.max_hp,
            current_hp: template.max_hp,
            attack_power: template.attack_power,
            defense: template.defense,
            exp: template.exp,
            speed: template.speed,
            luck: template.luck,
            word: template.word.clone(),
            visual: template.visual.clone(),
            question_mode: template.question_mode,
            original_questions: template.original_questions.clone(),
            special_attacks,
            defeated: false,
        }
    }

    /// Applies damage, clamping HP at zero and syncing the defeated flag.
    #[must_use]
    pub fn take_damage(&self, amount: u32) -> Self {
        let mut next = self.clone();
        next.current_hp = next.current_hp.saturating_sub(amount);
        next.defeated = next.current_hp == 0;
        next
    }

    /// Restores HP up to the maximum (drain recovery).
    #[must_use]
    pub fn heal(&self, amount: u32) -> Self {
        let mut next = self.clone();
        next.current_hp = (next.current_hp + amount).min(next.max_hp);
        next.defeated = next.current_hp == 0;
        next
    }

    /// Restores the enemy to full HP.
    #[must_use]
    pub fn revive(&self) -> Self {
        let mut next = self.clone();
        next.current_hp = next.max_hp;
        next.defeated = false;
        next
    }
}

/// Arena of the current encounter's enemies, keyed by [`EnemyId`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterState {
    enemies: ArrayVec<Enemy, { GameConfig::MAX_ENEMIES }>,
}

impl EncounterState {
    pub fn empty() -> Self {
        Self {
            enemies: ArrayVec::new(),
        }
    }

    /// Installs a fresh roster, dropping any previous one.
    pub fn install(&mut self, roster: impl IntoIterator<Item = Enemy>) {
        self.enemies.clear();
        for enemy in roster.into_iter().take(GameConfig::MAX_ENEMIES) {
            self.enemies.push(enemy);
        }
    }

    pub fn get(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn get_at(&self, index: usize) -> Option<&Enemy> {
        self.enemies.get(index)
    }

    pub fn index_of(&self, id: EnemyId) -> Option<usize> {
        self.enemies.iter().position(|e| e.id == id)
    }

    /// Replaces the record for `id` with the value produced by `f`.
    ///
    /// This is the only mutation path into the arena.
    pub fn apply<F>(&mut self, id: EnemyId, f: F) -> Option<&Enemy>
    where
        F: FnOnce(&Enemy) -> Enemy,
    {
        let slot = self.enemies.iter_mut().find(|e| e.id == id)?;
        let next = f(&*slot);
        *slot = next;
        Some(&*slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter()
    }

    pub fn living(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| !e.defeated)
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    /// Whether the encounter is cleared: a non-empty roster, all defeated.
    pub fn all_defeated(&self) -> bool {
        !self.enemies.is_empty() && self.enemies.iter().all(|e| e.defeated)
    }

    /// Sum of the roster's EXP rewards (before any boss bonus).
    pub fn total_exp(&self) -> u32 {
        self.enemies.iter().map(|e| e.exp).fold(0, u32::saturating_add)
    }

    /// Finds the next living enemy, scanning from just after `current` and
    /// wrapping around to the start.
    pub fn next_living_after(&self, current: usize) -> Option<usize> {
        let len = self.enemies.len();
        if len == 0 {
            return None;
        }
        (1..=len)
            .map(|offset| (current + offset) % len)
            .find(|&idx| !self.enemies[idx].defeated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemy(id: u32, hp: u32) -> Enemy {
        Enemy {
            id: EnemyId(id),
            template: EnemyTemplateId::from("slime"),
            name: format!("slime-{id}"),
            level: 1,
            max_hp: hp,
            current_hp: hp,
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

    #[test]
    fn damage_clamps_and_syncs_defeated() {
        let e = enemy(1, 10);
        let hit = e.take_damage(4);
        assert_eq!(hit.current_hp, 6);
        assert!(!hit.defeated);

        let dead = hit.take_damage(100);
        assert_eq!(dead.current_hp, 0);
        assert!(dead.defeated);

        let back = dead.revive();
        assert_eq!(back.current_hp, 10);
        assert!(!back.defeated);
    }

    #[test]
    fn heal_clamps_at_max() {
        let e = enemy(1, 10).take_damage(5);
        let healed = e.heal(100);
        assert_eq!(healed.current_hp, 10);
    }

    #[test]
    fn apply_replaces_the_record_for_the_given_id() {
        let mut arena = EncounterState::empty();
        arena.install([enemy(1, 10), enemy(2, 10)]);

        arena.apply(EnemyId(2), |e| e.take_damage(10));
        assert!(arena.get(EnemyId(2)).unwrap().defeated);
        assert!(!arena.get(EnemyId(1)).unwrap().defeated);
        assert!(arena.apply(EnemyId(9), |e| e.clone()).is_none());
    }

    #[test]
    fn clear_detection_requires_a_non_empty_roster() {
        let mut arena = EncounterState::empty();
        assert!(!arena.all_defeated());

        arena.install([enemy(1, 10)]);
        assert!(!arena.all_defeated());

        arena.apply(EnemyId(1), |e| e.take_damage(10));
        assert!(arena.all_defeated());
    }

    #[test]
    fn next_living_wraps_around_the_roster() {
        let mut arena = EncounterState::empty();
        arena.install([enemy(1, 10), enemy(2, 10), enemy(3, 10)]);
        arena.apply(EnemyId(3), |e| e.take_damage(10));

        // from index 1 (enemy 2): next living is index 0 after wrapping past 3
        assert_eq!(arena.next_living_after(1), Some(0));

        arena.apply(EnemyId(1), |e| e.take_damage(10));
        arena.apply(EnemyId(2), |e| e.take_damage(10));
        assert_eq!(arena.next_living_after(0), None);
    }
}
