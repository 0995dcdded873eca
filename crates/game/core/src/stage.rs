//! Stage, floor, and encounter-table definitions.
//!
//! A stage is an ordered list of floors; each floor carries weighted monster
//! sets. Encounter rates are expected to sum to 1.0 per floor but are never
//! corrected here: [`Stage::validate`] reports deviations and selection's
//! last-set fallback absorbs rounding shortfalls.

use core::fmt;

use crate::config::GameConfig;

/// Identifier of a stage in the content catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StageId(pub String);

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StageId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Identifier of an enemy template in the content catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EnemyTemplateId(pub String);

impl fmt::Display for EnemyTemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EnemyTemplateId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// One weighted enemy lineup a floor can spawn.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterSet {
    /// Selection weight in [0, 1]; floor weights should sum to 1.0.
    pub encounter_rate: f64,
    pub enemies: Vec<EnemyTemplateId>,
}

/// One floor of a stage.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Floor {
    pub monster_sets: Vec<MonsterSet>,
    pub is_boss_floor: bool,
    /// Multiplier applied to clear EXP on boss floors.
    pub exp_bonus: f64,
    /// Clears of this floor required before "advance" unlocks.
    pub required_clears: u32,
}

impl Floor {
    /// Whether the player may advance past this floor.
    ///
    /// Staying to repeat the floor is always allowed; advancing unlocks once
    /// the floor has been cleared often enough.
    pub fn can_advance(&self, clear_count: u32) -> bool {
        clear_count >= self.required_clears
    }
}

/// An ordered sequence of floors.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stage {
    pub id: StageId,
    pub name: String,
    pub floors: Vec<Floor>,
}

/// A floor whose encounter rates do not sum to 1.0 within tolerance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RateWarning {
    pub floor_index: usize,
    pub rate_sum: f64,
}

impl Stage {
    pub fn floor(&self, index: usize) -> Option<&Floor> {
        self.floors.get(index)
    }

    pub fn has_floor(&self, index: usize) -> bool {
        index < self.floors.len()
    }

    /// Reports floors whose encounter rates deviate from 1.0.
    ///
    /// Deviations are authoring mistakes but not fatal; callers log them and
    /// keep the rates as written.
    pub fn validate(&self, config: &GameConfig) -> Vec<RateWarning> {
        self.floors
            .iter()
            .enumerate()
            .filter_map(|(floor_index, floor)| {
                let rate_sum: f64 = floor.monster_sets.iter().map(|s| s.encounter_rate).sum();
                ((rate_sum - 1.0).abs() > config.encounter_rate_tolerance).then_some(RateWarning {
                    floor_index,
                    rate_sum,
                })
            })
            .collect()
    }
}

/// Selects a monster set for an encounter from a single uniform draw.
///
/// Walks the sets in list order accumulating `encounter_rate`; the first set
/// whose cumulative sum reaches the draw is chosen. If rounding leaves the
/// draw above every cumulative sum, the last set is the fallback. Returns
/// `None` only for a floor with no sets at all.
pub fn select_monster_set(floor: &Floor, draw: f64) -> Option<&MonsterSet> {
    let mut cumulative = 0.0;
    for set in &floor.monster_sets {
        cumulative += set.encounter_rate;
        if cumulative >= draw {
            return Some(set);
        }
    }
    floor.monster_sets.last()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor_with_rates(rates: &[f64]) -> Floor {
        Floor {
            monster_sets: rates
                .iter()
                .enumerate()
                .map(|(i, rate)| MonsterSet {
                    encounter_rate: *rate,
                    enemies: vec![EnemyTemplateId(format!("set_{i}"))],
                })
                .collect(),
            is_boss_floor: false,
            exp_bonus: 1.0,
            required_clears: 0,
        }
    }

    #[test]
    fn low_draw_selects_the_first_set() {
        let floor = floor_with_rates(&[0.6, 0.3, 0.1]);
        let set = select_monster_set(&floor, 0.05).unwrap();
        assert_eq!(set.enemies[0].0, "set_0");
    }

    #[test]
    fn mid_draw_selects_the_second_set() {
        let floor = floor_with_rates(&[0.6, 0.3, 0.1]);
        let set = select_monster_set(&floor, 0.65).unwrap();
        assert_eq!(set.enemies[0].0, "set_1");
    }

    #[test]
    fn rounding_shortfall_falls_back_to_the_last_set() {
        let floor = floor_with_rates(&[0.5, 0.3]);
        let set = select_monster_set(&floor, 0.95).unwrap();
        assert_eq!(set.enemies[0].0, "set_1");
    }

    #[test]
    fn empty_floor_selects_nothing() {
        let floor = floor_with_rates(&[]);
        assert!(select_monster_set(&floor, 0.5).is_none());
    }

    #[test]
    fn validate_flags_rate_sums_outside_tolerance() {
        let stage = Stage {
            id: StageId::from("s1"),
            name: "Stage".into(),
            floors: vec![floor_with_rates(&[0.6, 0.3, 0.1]), floor_with_rates(&[0.5, 0.3])],
        };
        let warnings = stage.validate(&GameConfig::default());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].floor_index, 1);
        assert!((warnings[0].rate_sum - 0.8).abs() < 1e-9);
    }

    #[test]
    fn advance_gating_follows_clear_count() {
        let mut floor = floor_with_rates(&[1.0]);
        floor.required_clears = 2;
        assert!(!floor.can_advance(1));
        assert!(floor.can_advance(2));
        assert!(floor.can_advance(3));
    }
}
