//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entities::AccessLogEntry;
use crate::error::GatewayResult;

/// Access log repository trait
#[trait_variant::make(AccessLogRepository: Send)]
pub trait LocalAccessLogRepository {
    /// Append one entry; entries are never updated or removed
    async fn append(&self, entry: &AccessLogEntry) -> GatewayResult<()>;
}
