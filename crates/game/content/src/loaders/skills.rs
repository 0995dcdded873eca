//! Skill catalog loader.

use std::path::Path;

use game_core::SkillTemplate;

use crate::loaders::{LoadResult, read_file};

/// One entry of a RON skill file.
///
/// `unlock_level` registers the skill in the level-up unlock table; `None`
/// means leveling never grants it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SkillEntry {
    pub template: SkillTemplate,
    pub unlock_level: Option<u32>,
}

/// Loader for skill catalogs from RON files.
pub struct SkillLoader;

impl SkillLoader {
    /// Load skill entries from a RON file.
    ///
    /// RON format: Vec<SkillEntry>
    pub fn load(path: &Path) -> LoadResult<Vec<SkillEntry>> {
        let content = read_file(path)?;
        ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))
    }
}
