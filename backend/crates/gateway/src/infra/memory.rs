//! In-Memory Repository Implementation

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::entities::AccessLogEntry;
use crate::domain::repository::AccessLogRepository;
use crate::error::GatewayResult;

/// Process-local, append-only access log
#[derive(Clone, Default)]
pub struct InMemoryAccessLogRepository {
    entries: Arc<RwLock<Vec<AccessLogEntry>>>,
}

impl InMemoryAccessLogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every entry in append order
    pub async fn entries(&self) -> Vec<AccessLogEntry> {
        self.entries.read().await.clone()
    }
}

impl AccessLogRepository for InMemoryAccessLogRepository {
    async fn append(&self, entry: &AccessLogEntry) -> GatewayResult<()> {
        self.entries.write().await.push(entry.clone());
        Ok(())
    }
}
