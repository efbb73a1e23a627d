//! Domain Layer
//!
//! This layer contains:
//! - Domain entities (StageRecord, StageRecordPatch)
//! - Domain value objects (StageIndex, StageTime)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod value_objects;
