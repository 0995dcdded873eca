//! Authoritative session state.
//!
//! This module owns the data structures that describe the player, the
//! current encounter, battle bookkeeping, and progression. Runtime layers
//! clone or query this state but mutate it exclusively through the engine.
mod battle;
mod enemy;
mod player;
mod progress;
mod status;

pub use battle::{BattleState, EffectId, PendingImpact};
pub use enemy::{Enemy, EnemyId, EnemyVisual, EncounterState, QuestionMode, SpecialAttack, SpecialEffect};
pub use player::{Player, PoisonTick};
pub use progress::{StageProgress, StoredProgress};
pub use status::{StatusEffect, StatusEffectKind, StatusEffects};

use crate::notify::NotificationQueue;
use crate::skill::SkillBook;

/// Coarse phase of the session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GamePhase {
    /// No encounter installed yet.
    #[default]
    Exploring,
    /// An encounter is live.
    InBattle,
    /// Roster fully defeated; waiting for the clear award/advance.
    StageCleared,
    /// Player at 0 HP.
    GameOver,
}

/// Canonical snapshot of the deterministic session state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// RNG seed for deterministic random generation.
    ///
    /// Set once at session start and never modified. Combined with `nonce`
    /// to derive a unique seed for each random draw.
    pub game_seed: u64,

    /// Intent sequence number; increments once per accepted intent.
    pub nonce: u64,

    /// Sequential enemy id allocator (monotonically increasing, never reused).
    next_enemy_id: u32,

    pub phase: GamePhase,
    pub player: Player,
    pub encounter: EncounterState,
    pub battle: BattleState,
    pub skills: SkillBook,
    pub progress: StageProgress,
    pub notifications: NotificationQueue,
}

impl GameState {
    /// Creates a fresh state with the given seed and starting position.
    pub fn new(game_seed: u64, progress: StageProgress) -> Self {
        Self {
            game_seed,
            nonce: 0,
            next_enemy_id: 1,
            phase: GamePhase::Exploring,
            player: Player::create_default(),
            encounter: EncounterState::empty(),
            battle: BattleState::default(),
            skills: SkillBook::empty(),
            progress,
            notifications: NotificationQueue::new(),
        }
    }

    /// Allocates a fresh [`EnemyId`].
    pub fn allocate_enemy_id(&mut self) -> EnemyId {
        let id = EnemyId(self.next_enemy_id);
        self.next_enemy_id = self.next_enemy_id.wrapping_add(1).max(1);
        id
    }

    /// The enemy answers currently aim at, if it exists.
    pub fn current_target(&self) -> Option<&Enemy> {
        self.encounter.get_at(self.battle.target_index)
    }
}
