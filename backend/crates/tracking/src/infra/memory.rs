//! In-Memory Repository Implementation

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::Utc;
use kernel::username::Username;
use tokio::sync::RwLock;

use crate::domain::entities::{StageRecord, StageRecordPatch};
use crate::domain::repository::StageRecordRepository;
use crate::domain::value_objects::StageIndex;
use crate::error::TrackingResult;

type OwnerRecords = BTreeMap<StageIndex, StageRecord>;

/// Process-local record table indexed by owner, then stage
#[derive(Clone, Default)]
pub struct InMemoryStageRecordRepository {
    records: Arc<RwLock<HashMap<Username, OwnerRecords>>>,
}

impl InMemoryStageRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StageRecordRepository for InMemoryStageRecordRepository {
    async fn upsert(&self, owner: &Username, patches: &[StageRecordPatch]) -> TrackingResult<()> {
        let now = Utc::now();
        // One guard for the whole batch: readers see all patches or none.
        let mut records = self.records.write().await;
        let stages = records.entry(owner.clone()).or_default();

        for patch in patches {
            stages
                .entry(patch.stage)
                .and_modify(|record| record.apply(patch, now))
                .or_insert_with(|| StageRecord::from_patch(owner.clone(), patch, now));
        }

        Ok(())
    }

    async fn scan_by_owner(&self, owner: &Username) -> TrackingResult<Vec<StageRecord>> {
        let records = self.records.read().await;
        Ok(records
            .get(owner)
            .map(|stages| stages.values().cloned().collect())
            .unwrap_or_default())
    }
}
