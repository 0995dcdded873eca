//! Content factory for building a catalog from data files.

use std::path::{Path, PathBuf};

use game_core::{EnemyTemplate, GameConfig, Question, Stage};

use crate::Catalog;
use crate::loaders::{
    EnemyLoader, LoadResult, QuestionLoader, SkillEntry, SkillLoader, StageLoader,
    StageRateWarning,
};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── stages.ron
/// ├── enemies.ron
/// ├── skills.ron
/// └── questions.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load stages from `stages.ron`.
    pub fn load_stages(
        &self,
        config: &GameConfig,
    ) -> LoadResult<(Vec<Stage>, Vec<StageRateWarning>)> {
        StageLoader::load(&self.data_dir.join("stages.ron"), config)
    }

    /// Load enemy templates from `enemies.ron`.
    pub fn load_enemies(&self) -> LoadResult<Vec<EnemyTemplate>> {
        EnemyLoader::load(&self.data_dir.join("enemies.ron"))
    }

    /// Load skill entries from `skills.ron`.
    pub fn load_skills(&self) -> LoadResult<Vec<SkillEntry>> {
        SkillLoader::load(&self.data_dir.join("skills.ron"))
    }

    /// Load the shared question pool from `questions.ron`.
    pub fn load_questions(&self) -> LoadResult<Vec<Question>> {
        QuestionLoader::load(&self.data_dir.join("questions.ron"))
    }

    /// Load everything into one catalog.
    ///
    /// Encounter-rate warnings ride along for the caller to log; the content
    /// is kept as written either way.
    pub fn load_catalog(
        &self,
        config: &GameConfig,
    ) -> LoadResult<(Catalog, Vec<StageRateWarning>)> {
        let (stages, warnings) = self.load_stages(config)?;

        let mut catalog = Catalog::new();
        for stage in stages {
            catalog.add_stage(stage);
        }
        for template in self.load_enemies()? {
            catalog.add_enemy(template);
        }
        for entry in self.load_skills()? {
            if let Some(level) = entry.unlock_level {
                catalog.add_unlock(level, entry.template.id.clone());
            }
            catalog.add_skill(entry.template);
        }
        for question in self.load_questions()? {
            catalog.add_question(question);
        }
        Ok((catalog, warnings))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
