//! Status effect bookkeeping for the player.
//!
//! Effects tick on real-time seconds, driven by the runtime's interval timer.
//! The rules layer only stores counts; it never owns a clock.

use arrayvec::ArrayVec;

use crate::config::GameConfig;

/// Types of status effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEffectKind {
    /// HP loss once per second for a fixed number of ticks.
    Poison,
}

/// A single active status effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    /// Seconds left before the effect expires.
    pub ticks_remaining: u32,
    /// Damage applied on each tick.
    pub damage_per_tick: u32,
}

/// Active status effects on the player.
///
/// At most one effect per kind: re-applying an active kind refreshes its
/// duration and strength instead of stacking a second instance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { GameConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    /// Creates an empty status effect set.
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Checks whether an effect of the given kind is active.
    pub fn has(&self, kind: StatusEffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    /// Returns the active effect of the given kind, if any.
    pub fn get(&self, kind: StatusEffectKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    /// Applies an effect, refreshing an existing one of the same kind.
    pub fn apply(&mut self, effect: StatusEffect) {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == effect.kind) {
            *existing = effect;
            return;
        }

        // Add new effect if space available
        if !self.effects.is_full() {
            self.effects.push(effect);
        }
    }

    /// Removes an effect immediately.
    pub fn remove(&mut self, kind: StatusEffectKind) {
        self.effects.retain(|e| e.kind != kind);
    }

    /// Removes every effect.
    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// Advances the effect of the given kind by one tick.
    ///
    /// Returns the damage dealt by this tick, or `None` if no such effect is
    /// active. The effect is removed once its last tick has been consumed.
    pub fn tick(&mut self, kind: StatusEffectKind) -> Option<u32> {
        let effect = self.effects.iter_mut().find(|e| e.kind == kind)?;
        let damage = effect.damage_per_tick;
        effect.ticks_remaining = effect.ticks_remaining.saturating_sub(1);
        if effect.ticks_remaining == 0 {
            self.remove(kind);
        }
        Some(damage)
    }

    /// Returns an iterator over all active effects.
    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    /// Returns true if no effects are active.
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
