//! Domain Layer
//!
//! Contains value objects, the access log entity and its repository trait.

pub mod entities;
pub mod repository;
pub mod value_objects;

// Re-exports
pub use entities::AccessLogEntry;
pub use repository::AccessLogRepository;
pub use value_objects::{Outcome, RequestMode};
