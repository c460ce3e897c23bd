use crate::domain::audit::AuditRecord;
use crate::domain::environment::{Environment, StatefulResource};
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::FromRow;
use std::sync::Arc;

/// Append-only ledger of synthesis completions, keyed by `(day, task_id)`.
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Insert the record unless its key already exists. Writing the same key
    /// twice leaves exactly one record.
    async fn put(&self, record: &AuditRecord) -> Result<(), String>;

    async fn find_by_day(&self, day: &str) -> Result<Vec<AuditRecord>, String>;
}

#[derive(Debug, FromRow)]
struct AuditRow {
    day: String,
    task_id: String,
    output_uri: String,
}

impl From<AuditRow> for AuditRecord {
    fn from(row: AuditRow) -> Self {
        Self {
            day: row.day,
            task_id: row.task_id,
            output_uri: row.output_uri,
        }
    }
}

/// PostgreSQL ledger. Rows are scoped to the environment the repository was
/// built for, so tearing down one branch never touches another's records.
pub struct PgAuditRepository {
    pool: Arc<DbPool>,
    environment: String,
}

impl PgAuditRepository {
    pub fn new(pool: Arc<DbPool>, environment: String) -> Self {
        Self { pool, environment }
    }
}

#[async_trait]
impl AuditRepository for PgAuditRepository {
    async fn put(&self, record: &AuditRecord) -> Result<(), String> {
        let pool = self.pool.as_ref();

        sqlx::query(
            r#"
            INSERT INTO audit_records (environment, day, task_id, output_uri, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (environment, day, task_id) DO NOTHING
            "#,
        )
        .bind(&self.environment)
        .bind(&record.day)
        .bind(&record.task_id)
        .bind(&record.output_uri)
        .bind(Utc::now())
        .execute(pool)
        .await
        .map_err(|e| format!("Failed to insert audit record: {}", e))?;

        Ok(())
    }

    async fn find_by_day(&self, day: &str) -> Result<Vec<AuditRecord>, String> {
        let pool = self.pool.as_ref();

        let rows = sqlx::query_as::<_, AuditRow>(
            r#"
            SELECT day, task_id, output_uri
            FROM audit_records
            WHERE environment = $1 AND day = $2
            ORDER BY created_at, task_id
            "#,
        )
        .bind(&self.environment)
        .bind(day)
        .fetch_all(pool)
        .await
        .map_err(|e| format!("Failed to query audit records: {}", e))?;

        Ok(rows.into_iter().map(AuditRecord::from).collect())
    }
}

#[async_trait]
impl StatefulResource for PgAuditRepository {
    fn name(&self) -> String {
        "audit-ledger".to_string()
    }

    async fn purge(&self, environment: &Environment) -> Result<u64, String> {
        if environment.id != self.environment {
            return Err(format!(
                "audit ledger is scoped to '{}', refusing to purge '{}'",
                self.environment, environment.id
            ));
        }

        let pool = self.pool.as_ref();

        let result = sqlx::query("DELETE FROM audit_records WHERE environment = $1")
            .bind(&self.environment)
            .execute(pool)
            .await
            .map_err(|e| format!("Failed to purge audit records: {}", e))?;

        Ok(result.rows_affected())
    }
}
