//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entities::{StageRecord, StageRecordPatch};
use crate::error::TrackingResult;
use kernel::username::Username;

/// Stage record repository trait
#[trait_variant::make(StageRecordRepository: Send)]
pub trait LocalStageRecordRepository {
    /// Upsert every patch for `owner` as one atomic write
    ///
    /// Existing rows get the patch's present fields; missing rows are created
    /// with absent fields at zero. Either all patches land or none do, and
    /// concurrent upserts of the same stage never interleave field writes.
    async fn upsert(&self, owner: &Username, patches: &[StageRecordPatch]) -> TrackingResult<()>;

    /// Every record owned by `owner`, ordered by stage
    async fn scan_by_owner(&self, owner: &Username) -> TrackingResult<Vec<StageRecord>>;
}
