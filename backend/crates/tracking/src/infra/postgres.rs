//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::username::Username;
use sqlx::PgPool;

use crate::domain::entities::{StageRecord, StageRecordPatch};
use crate::domain::repository::StageRecordRepository;
use crate::domain::value_objects::{StageIndex, StageTime};
use crate::error::{TrackingError, TrackingResult};

/// PostgreSQL-backed stage record repository
#[derive(Clone)]
pub struct PgStageRecordRepository {
    pool: PgPool,
}

impl PgStageRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl StageRecordRepository for PgStageRecordRepository {
    async fn upsert(&self, owner: &Username, patches: &[StageRecordPatch]) -> TrackingResult<()> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        // Absent fields bind as NULL: zero on insert, unchanged on update.
        for patch in patches {
            sqlx::query(
                r#"
                INSERT INTO stage_records (
                    username,
                    stage_index,
                    total_time_ticks,
                    shortest_time_ticks,
                    total_goal_count,
                    streak_goal_count,
                    updated_at
                ) VALUES (
                    $1,
                    $2,
                    COALESCE($3, 0),
                    COALESCE($4, 0),
                    COALESCE($5, 0),
                    COALESCE($6, 0),
                    $7
                )
                ON CONFLICT (username, stage_index) DO UPDATE SET
                    total_time_ticks = COALESCE($3, stage_records.total_time_ticks),
                    shortest_time_ticks = COALESCE($4, stage_records.shortest_time_ticks),
                    total_goal_count = COALESCE($5, stage_records.total_goal_count),
                    streak_goal_count = COALESCE($6, stage_records.streak_goal_count),
                    updated_at = $7
                "#,
            )
            .bind(owner.as_str())
            .bind(i64::from(patch.stage.value()))
            .bind(patch.total_time.map(|t| t.ticks()))
            .bind(patch.shortest_time.map(|t| t.ticks()))
            .bind(patch.total_goal_count.map(i64::from))
            .bind(patch.streak_goal_count.map(i64::from))
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    async fn scan_by_owner(&self, owner: &Username) -> TrackingResult<Vec<StageRecord>> {
        let rows = sqlx::query_as::<_, StageRecordRow>(
            r#"
            SELECT
                username,
                stage_index,
                total_time_ticks,
                shortest_time_ticks,
                total_goal_count,
                streak_goal_count,
                updated_at
            FROM stage_records
            WHERE username = $1
            ORDER BY stage_index
            "#,
        )
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_stage_record()).collect()
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct StageRecordRow {
    username: String,
    stage_index: i64,
    total_time_ticks: i64,
    shortest_time_ticks: i64,
    total_goal_count: i64,
    streak_goal_count: i64,
    updated_at: DateTime<Utc>,
}

impl StageRecordRow {
    fn into_stage_record(self) -> TrackingResult<StageRecord> {
        let corrupt = |what: &str, value: i64| {
            TrackingError::CorruptRecord(format!("Invalid {}: {}", what, value))
        };

        let owner = Username::new(self.username)
            .map_err(|e| TrackingError::CorruptRecord(format!("Invalid username: {}", e)))?;
        let stage = u32::try_from(self.stage_index)
            .ok()
            .and_then(|n| StageIndex::new(n).ok())
            .ok_or_else(|| corrupt("stage_index", self.stage_index))?;
        let total_goal_count = u32::try_from(self.total_goal_count)
            .map_err(|_| corrupt("total_goal_count", self.total_goal_count))?;
        let streak_goal_count = u32::try_from(self.streak_goal_count)
            .map_err(|_| corrupt("streak_goal_count", self.streak_goal_count))?;

        Ok(StageRecord {
            owner,
            stage,
            total_time: StageTime::from_ticks(self.total_time_ticks),
            shortest_time: StageTime::from_ticks(self.shortest_time_ticks),
            total_goal_count,
            streak_goal_count,
            updated_at: self.updated_at,
        })
    }
}
