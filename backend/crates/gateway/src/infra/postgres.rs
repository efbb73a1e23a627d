//! PostgreSQL Repository Implementation

use sqlx::PgPool;

use crate::domain::entities::AccessLogEntry;
use crate::domain::repository::AccessLogRepository;
use crate::error::GatewayResult;

/// PostgreSQL-backed access log
#[derive(Clone)]
pub struct PgAccessLogRepository {
    pool: PgPool,
}

impl PgAccessLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl AccessLogRepository for PgAccessLogRepository {
    async fn append(&self, entry: &AccessLogEntry) -> GatewayResult<()> {
        sqlx::query(
            r#"
            INSERT INTO access_logs (
                logged_at,
                mode,
                username,
                result
            ) VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(entry.timestamp)
        .bind(&entry.mode)
        .bind(&entry.username)
        .bind(entry.outcome.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
