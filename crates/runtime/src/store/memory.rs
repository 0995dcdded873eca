//! In-memory ProgressStore implementation for tests and local runs.

use std::sync::RwLock;

use game_core::StoredProgress;

use super::{ProgressStore, Result, StoreError};

/// In-memory implementation of [`ProgressStore`].
pub struct MemoryProgressStore {
    progress: RwLock<Option<StoredProgress>>,
}

impl MemoryProgressStore {
    /// Creates an empty store; loading yields `None` until a save lands.
    pub fn new() -> Self {
        Self {
            progress: RwLock::new(None),
        }
    }

    /// Creates a store pre-seeded with a position.
    pub fn with_progress(progress: StoredProgress) -> Self {
        Self {
            progress: RwLock::new(Some(progress)),
        }
    }
}

impl Default for MemoryProgressStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressStore for MemoryProgressStore {
    fn load(&self) -> Result<Option<StoredProgress>> {
        let progress = self.progress.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(progress.clone())
    }

    fn save(&self, progress: &StoredProgress) -> Result<()> {
        let mut slot = self.progress.write().map_err(|_| StoreError::LockPoisoned)?;
        *slot = Some(progress.clone());
        Ok(())
    }
}
