//! File-based ProgressStore implementation.

use std::fs;
use std::path::{Path, PathBuf};

use game_core::StoredProgress;

use super::{ProgressStore, Result, StoreError};

/// JSON-file implementation of [`ProgressStore`].
///
/// Stores the position as a single human-editable JSON file. Saves go through
/// a temp file followed by an atomic rename so a crash mid-write cannot leave
/// a truncated save behind.
pub struct JsonFileProgressStore {
    path: PathBuf,
}

impl JsonFileProgressStore {
    /// Creates a store backed by the given file, creating parent directories
    /// as needed.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(StoreError::Io)?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressStore for JsonFileProgressStore {
    fn load(&self) -> Result<Option<StoredProgress>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let text = fs::read_to_string(&self.path).map_err(StoreError::Io)?;
        let progress: StoredProgress = serde_json::from_str(&text).map_err(StoreError::Json)?;

        tracing::debug!(path = %self.path.display(), "loaded stored progress");

        Ok(Some(progress))
    }

    fn save(&self, progress: &StoredProgress) -> Result<()> {
        let temp_path = self.path.with_extension("json.tmp");

        let text = serde_json::to_string_pretty(progress).map_err(StoreError::Json)?;
        fs::write(&temp_path, text).map_err(StoreError::Io)?;
        fs::rename(&temp_path, &self.path).map_err(StoreError::Io)?;

        tracing::debug!(path = %self.path.display(), "saved stored progress");

        Ok(())
    }
}
