//! Persistence layer for stage progress.
//!
//! Stores handle the one piece of data that survives a session: the player's
//! stage position. Everything else (player stats, rosters, combos) is
//! session-local and rebuilt from content on the next launch.
//!
//! Store failures are never fatal to a session; the builder logs them and
//! starts from the first stage, and the worker logs failed saves and plays on.

mod file;
mod memory;

pub use file::JsonFileProgressStore;
pub use memory::MemoryProgressStore;

use thiserror::Error;

use game_core::StoredProgress;

/// Errors surfaced by progress store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("progress store lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Store for the player's persisted stage position.
pub trait ProgressStore: Send + Sync {
    /// Loads the stored position, if one exists.
    fn load(&self) -> Result<Option<StoredProgress>>;

    /// Saves the position, replacing any previous entry.
    fn save(&self, progress: &StoredProgress) -> Result<()>;
}
