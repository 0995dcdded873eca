//! Stage catalog loader.

use std::path::Path;

use game_core::{GameConfig, Stage, StageId};

use crate::loaders::{LoadResult, read_file};

/// A loaded floor whose encounter rates do not sum to 1.0.
///
/// Deviations are surfaced, never corrected; selection's last-set fallback
/// absorbs shortfalls at runtime.
#[derive(Clone, Debug, PartialEq)]
pub struct StageRateWarning {
    pub stage: StageId,
    pub floor_index: usize,
    pub rate_sum: f64,
}

/// Loader for stage catalogs from RON files.
pub struct StageLoader;

impl StageLoader {
    /// Load stages from a RON file, validating encounter-rate sums.
    ///
    /// RON format: Vec<Stage>. List order is progression order.
    pub fn load(
        path: &Path,
        config: &GameConfig,
    ) -> LoadResult<(Vec<Stage>, Vec<StageRateWarning>)> {
        let content = read_file(path)?;
        let stages: Vec<Stage> = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse stage catalog RON: {}", e))?;

        let warnings = stages
            .iter()
            .flat_map(|stage| {
                stage
                    .validate(config)
                    .into_iter()
                    .map(|warning| StageRateWarning {
                        stage: stage.id.clone(),
                        floor_index: warning.floor_index,
                        rate_sum: warning.rate_sum,
                    })
            })
            .collect();
        Ok((stages, warnings))
    }
}
