//! Stage progression state.

use crate::stage::StageId;

/// Where the player is and how often they have cleared each floor.
///
/// Clear counts are session-local; only the position is persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StageProgress {
    pub stage_id: StageId,
    pub floor_index: usize,
    /// Clears per floor of the current stage, indexed by floor.
    clear_counts: Vec<u32>,
}

impl StageProgress {
    pub fn new(stage_id: StageId, floor_index: usize) -> Self {
        Self {
            stage_id,
            floor_index,
            clear_counts: Vec::new(),
        }
    }

    /// Clears recorded for the given floor.
    pub fn clears(&self, floor_index: usize) -> u32 {
        self.clear_counts.get(floor_index).copied().unwrap_or(0)
    }

    /// Records one clear of the given floor.
    pub fn record_clear(&mut self, floor_index: usize) {
        if self.clear_counts.len() <= floor_index {
            self.clear_counts.resize(floor_index + 1, 0);
        }
        self.clear_counts[floor_index] += 1;
    }

    /// Moves to another floor of the same stage.
    pub fn move_to_floor(&mut self, floor_index: usize) {
        self.floor_index = floor_index;
    }

    /// Moves to a new stage, dropping the old stage's clear counts.
    pub fn move_to_stage(&mut self, stage_id: StageId) {
        self.stage_id = stage_id;
        self.floor_index = 0;
        self.clear_counts.clear();
    }

    /// The subset that survives the session.
    pub fn stored(&self) -> StoredProgress {
        StoredProgress {
            stage_id: self.stage_id.clone(),
            floor_index: self.floor_index,
        }
    }
}

/// Persisted progress: position only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoredProgress {
    pub stage_id: StageId,
    pub floor_index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_counts_grow_on_demand_and_reset_on_stage_change() {
        let mut progress = StageProgress::new(StageId::from("s1"), 0);
        assert_eq!(progress.clears(2), 0);

        progress.record_clear(2);
        progress.record_clear(2);
        assert_eq!(progress.clears(2), 2);
        assert_eq!(progress.clears(0), 0);

        progress.move_to_stage(StageId::from("s2"));
        assert_eq!(progress.clears(2), 0);
        assert_eq!(progress.floor_index, 0);
    }

    #[test]
    fn stored_subset_is_position_only() {
        let mut progress = StageProgress::new(StageId::from("s1"), 1);
        progress.record_clear(1);
        let stored = progress.stored();
        assert_eq!(stored.stage_id, StageId::from("s1"));
        assert_eq!(stored.floor_index, 1);
    }
}
