//! Record Store
//!
//! Push (upsert by stage) and pull (full export) of a user's stage records.

use std::sync::Arc;

use kernel::username::Username;

use crate::application::config::TrackingConfig;
use crate::domain::entities::{StageRecord, StageRecordPatch};
use crate::domain::repository::StageRecordRepository;
use crate::error::TrackingResult;

/// Record store over a [`StageRecordRepository`]
pub struct RecordStore<R>
where
    R: StageRecordRepository,
{
    record_repo: Arc<R>,
    config: TrackingConfig,
}

impl<R> RecordStore<R>
where
    R: StageRecordRepository,
{
    pub fn new(record_repo: Arc<R>, config: TrackingConfig) -> Self {
        Self {
            record_repo,
            config,
        }
    }

    /// Upsert every supplied stage for `owner`
    ///
    /// The whole push is checked against the configured limits before
    /// anything is written: one stage over the limit rejects it with `false`
    /// and no mutation.
    pub async fn push(&self, owner: &Username, patches: &[StageRecordPatch]) -> TrackingResult<bool> {
        if patches.len() > self.config.max_stages_per_push {
            tracing::debug!(
                username = %owner,
                stages = patches.len(),
                max = self.config.max_stages_per_push,
                "Push rejected: too many stages"
            );
            return Ok(false);
        }

        if let Some(patch) = patches
            .iter()
            .find(|patch| patch.stage.value() > self.config.max_stage_index)
        {
            tracing::debug!(username = %owner, stage = %patch.stage, "Push rejected: stage index too large");
            return Ok(false);
        }

        if !patches.is_empty() {
            self.record_repo.upsert(owner, patches).await?;
        }

        tracing::info!(username = %owner, stages = patches.len(), "Stage records pushed");

        Ok(true)
    }

    /// Export every record owned by `owner`, ordered by stage
    ///
    /// Empty when the user has no records.
    pub async fn pull(&self, owner: &Username) -> TrackingResult<Vec<StageRecord>> {
        let records = self.record_repo.scan_by_owner(owner).await?;

        tracing::debug!(username = %owner, stages = records.len(), "Stage records pulled");

        Ok(records)
    }
}
