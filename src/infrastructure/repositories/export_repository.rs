use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

/// Cross-environment registry of shared resource references, looked up by a
/// well-known export name.
#[async_trait]
pub trait SharedResourceCatalog: Send + Sync {
    async fn lookup(&self, name: &str) -> Result<Option<String>, String>;

    /// Register (or replace) the value exported under `name`.
    async fn register(&self, name: &str, value: &str, owner: &str) -> Result<(), String>;
}

pub struct PgExportRepository {
    pool: Arc<DbPool>,
}

impl PgExportRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SharedResourceCatalog for PgExportRepository {
    async fn lookup(&self, name: &str) -> Result<Option<String>, String> {
        let pool = self.pool.as_ref();

        let value = sqlx::query_scalar::<_, String>(
            "SELECT value FROM shared_resource_exports WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(pool)
        .await
        .map_err(|e| format!("Failed to look up export '{}': {}", name, e))?;

        Ok(value)
    }

    async fn register(&self, name: &str, value: &str, owner: &str) -> Result<(), String> {
        let pool = self.pool.as_ref();

        sqlx::query(
            r#"
            INSERT INTO shared_resource_exports (name, value, owner, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (name)
            DO UPDATE SET
                value = EXCLUDED.value,
                owner = EXCLUDED.owner,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(name)
        .bind(value)
        .bind(owner)
        .bind(Utc::now())
        .execute(pool)
        .await
        .map_err(|e| format!("Failed to register export '{}': {}", name, e))?;

        Ok(())
    }
}
