//! Static content and data-file loaders for the vocabulary battler.
//!
//! This crate houses the built-in content catalog and provides loaders for
//! RON data files:
//! - stage layouts with weighted monster sets (data-driven via RON)
//! - enemy templates with question pools and special attacks (RON)
//! - skill templates plus their unlock levels (RON)
//! - shared question pools (RON)
//!
//! Content is consumed by the engine through [`game_core::ContentOracle`] and
//! never appears in game state.
//!
//! All loaders use game-core types directly with serde for RON
//! deserialization.

pub mod catalog;

mod builtin;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{Catalog, CatalogWarning};

#[cfg(feature = "loaders")]
pub use loaders::{
    ContentFactory, EnemyLoader, QuestionLoader, SkillEntry, SkillLoader, StageLoader,
    StageRateWarning,
};
