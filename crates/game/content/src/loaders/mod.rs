//! Content loaders for reading game data from files.
//!
//! Loaders convert RON files into the catalog types `game-core` defines;
//! [`ContentFactory`] assembles a complete [`crate::Catalog`] from a data
//! directory.

pub mod enemies;
pub mod factory;
pub mod questions;
pub mod skills;
pub mod stages;

pub use enemies::EnemyLoader;
pub use factory::ContentFactory;
pub use questions::QuestionLoader;
pub use skills::{SkillEntry, SkillLoader};
pub use stages::{StageLoader, StageRateWarning};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
