//! Tracking Backend Module
//!
//! Per-user, per-stage progress records.
//!
//! Clean Architecture structure:
//! - `domain/` - StageRecord entity, stage index/time value objects, repository trait
//! - `application/` - Record Store (push/pull)
//! - `infra/` - In-memory and PostgreSQL record storage
//! - `presentation/` - Wire DTOs shared with the gateway
//!
//! The Record Store trusts the username it is given. Callers resolve it from
//! a verified token first.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::TrackingConfig;
pub use application::record_store::RecordStore;
pub use domain::repository::StageRecordRepository;
pub use error::{TrackingError, TrackingResult};
pub use infra::memory::InMemoryStageRecordRepository;
pub use infra::postgres::PgStageRecordRepository;
pub use presentation::dto::{
    StageDataPayload, TrackingDatas, parse_tracking_datas, to_tracking_datas,
};
