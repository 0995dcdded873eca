//! Game configuration constants and tunable parameters.

/// Balance parameters used by the combat resolver and progression manager.
///
/// Defaults mirror the shipped balance. All probabilities are expressed in
/// [0, 1] and all multiplicative factors operate on f64 intermediates before
/// the final truncation toward zero.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Floor for the pre-variance base damage of a correct answer.
    pub min_base_damage: u32,
    /// Damage variance window: factor = `variance_base + r * variance_span`.
    pub variance_base: f64,
    pub variance_span: f64,
    /// Player-attack miss chance: `miss_base + (enemy.luck + enemy.speed) * miss_step`.
    pub miss_base: f64,
    pub miss_step: f64,
    pub miss_cap: f64,
    /// Player-attack critical chance: `crit_base + (player.luck + player.power) * crit_step`.
    pub crit_base: f64,
    pub crit_step: f64,
    pub crit_cap: f64,
    /// Critical hits deal `attack * variance * crit_multiplier`.
    pub crit_multiplier: f64,
    /// Enemy critical chance: `enemy_crit_base + enemy.luck * enemy_crit_step`.
    pub enemy_crit_base: f64,
    pub enemy_crit_step: f64,
    /// Enemy normal attacks lose up to this many points of damage per swing.
    pub enemy_damage_jitter: u32,
    /// Combo multiplier grows by `combo_factor^(combo - 1)` up to `combo_cap`.
    pub combo_factor: f64,
    pub combo_cap: f64,
    /// Combo display tiers (consecutive correct answers).
    pub combo_tier_combo: u32,
    pub combo_tier_big: u32,
    pub combo_tier_super: u32,
    /// EXP required to leave `level` is `level * exp_threshold_slope`.
    pub exp_threshold_slope: u32,
    /// Levels never exceed this value; EXP keeps accumulating past it.
    pub level_cap: u32,
    /// Per-level stat growth.
    pub growth_max_hp: u32,
    pub growth_max_mp: u32,
    pub growth_defense: u32,
    pub growth_magic_defense: u32,
    pub growth_speed: u32,
    pub growth_luck: u32,
    pub growth_power: u32,
    pub growth_attack: u32,
    /// Tolerated deviation of a floor's encounter-rate sum from 1.0.
    pub encounter_rate_tolerance: f64,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum enemies in one encounter roster.
    pub const MAX_ENEMIES: usize = 8;
    /// Maximum skills a player can hold.
    pub const MAX_SKILLS: usize = 16;
    /// Maximum concurrent status effects on the player.
    pub const MAX_STATUS_EFFECTS: usize = 4;
    /// Maximum special attacks per enemy.
    pub const MAX_SPECIAL_ATTACKS: usize = 4;
    /// Maximum deferred skill impacts awaiting completion.
    pub const MAX_PENDING_IMPACTS: usize = 8;

    pub fn new() -> Self {
        Self {
            min_base_damage: 5,
            variance_base: 0.9,
            variance_span: 0.2,
            miss_base: 0.01,
            miss_step: 0.005,
            miss_cap: 0.10,
            crit_base: 0.01,
            crit_step: 0.005,
            crit_cap: 0.15,
            crit_multiplier: 1.5,
            enemy_crit_base: 0.05,
            enemy_crit_step: 0.01,
            enemy_damage_jitter: 3,
            combo_factor: 1.1,
            combo_cap: 2.0,
            combo_tier_combo: 2,
            combo_tier_big: 3,
            combo_tier_super: 5,
            exp_threshold_slope: 100,
            level_cap: 100,
            growth_max_hp: 10,
            growth_max_mp: 5,
            growth_defense: 1,
            growth_magic_defense: 1,
            growth_speed: 1,
            growth_luck: 1,
            growth_power: 1,
            growth_attack: 2,
            encounter_rate_tolerance: 0.01,
        }
    }

    /// EXP required to advance past the given level.
    pub fn exp_threshold(&self, level: u32) -> u32 {
        level.saturating_mul(self.exp_threshold_slope)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
