//! Domain Entities

use chrono::{DateTime, Utc};
use kernel::username::Username;

use crate::domain::value_objects::{StageIndex, StageTime};

/// One user's statistics for one stage
///
/// Unique per `(owner, stage)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageRecord {
    pub owner: Username,
    pub stage: StageIndex,
    pub total_time: StageTime,
    pub shortest_time: StageTime,
    pub total_goal_count: u32,
    pub streak_goal_count: u32,
    pub updated_at: DateTime<Utc>,
}

impl StageRecord {
    /// Build a record for a stage seen for the first time
    ///
    /// Fields absent from the patch start at zero.
    pub fn from_patch(owner: Username, patch: &StageRecordPatch, now: DateTime<Utc>) -> Self {
        Self {
            owner,
            stage: patch.stage,
            total_time: patch.total_time.unwrap_or(StageTime::ZERO),
            shortest_time: patch.shortest_time.unwrap_or(StageTime::ZERO),
            total_goal_count: patch.total_goal_count.unwrap_or(0),
            streak_goal_count: patch.streak_goal_count.unwrap_or(0),
            updated_at: now,
        }
    }

    /// Overwrite the fields present in the patch, keep the rest
    pub fn apply(&mut self, patch: &StageRecordPatch, now: DateTime<Utc>) {
        if let Some(total_time) = patch.total_time {
            self.total_time = total_time;
        }
        if let Some(shortest_time) = patch.shortest_time {
            self.shortest_time = shortest_time;
        }
        if let Some(count) = patch.total_goal_count {
            self.total_goal_count = count;
        }
        if let Some(count) = patch.streak_goal_count {
            self.streak_goal_count = count;
        }
        self.updated_at = now;
    }
}

/// Validated incoming values for one stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageRecordPatch {
    pub stage: StageIndex,
    pub total_time: Option<StageTime>,
    pub shortest_time: Option<StageTime>,
    pub total_goal_count: Option<u32>,
    pub streak_goal_count: Option<u32>,
}

impl StageRecordPatch {
    pub fn empty(stage: StageIndex) -> Self {
        Self {
            stage,
            total_time: None,
            shortest_time: None,
            total_goal_count: None,
            streak_goal_count: None,
        }
    }
}
