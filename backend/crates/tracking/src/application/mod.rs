//! Application Layer
//!
//! Record Store and its configuration.

pub mod config;
pub mod record_store;

// Re-exports
pub use config::TrackingConfig;
pub use record_store::RecordStore;
