//! PostgreSQL storage implementation

use super::traits::*;
use crate::error::StorageError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use orrery_types::{PlanetDraft, PlanetId, PlanetKind, PlanetRecord};
use serde_json::Value;
use sqlx::{postgres::PgPoolOptions, postgres::PgRow, PgPool, Row};
use std::time::Duration;

const SELECT_COLUMNS: &str =
    "id, pseudo, name, kind, size, distance, temperature, atmosphere, has_water, created_at";

/// PostgreSQL-backed storage
#[derive(Debug, Clone)]
pub struct PostgresStorage {
    pool: PgPool,
}

impl PostgresStorage {
    /// Connect to PostgreSQL and initialize schema
    pub async fn new(
        url: &str,
        max_connections: u32,
        connect_timeout_secs: u64,
    ) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(connect_timeout_secs))
            .connect(url)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let storage = Self { pool };
        storage.initialize_schema().await?;
        Ok(storage)
    }

    async fn initialize_schema(&self) -> Result<(), StorageError> {
        let statements = [
            r#"
            CREATE TABLE IF NOT EXISTS planets (
                id BIGSERIAL PRIMARY KEY,
                pseudo TEXT NOT NULL,
                name TEXT NOT NULL,
                kind TEXT NOT NULL,
                size DOUBLE PRECISION NOT NULL,
                distance DOUBLE PRECISION NOT NULL,
                temperature DOUBLE PRECISION NOT NULL,
                atmosphere JSONB NOT NULL DEFAULT '[]'::jsonb,
                has_water BOOLEAN NOT NULL DEFAULT FALSE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );
            "#,
            r#"CREATE INDEX IF NOT EXISTS planets_created_at ON planets(created_at DESC, id DESC);"#,
        ];

        for stmt in statements {
            sqlx::query(stmt)
                .execute(&self.pool)
                .await
                .map_err(|e| StorageError::Query(e.to_string()))?;
        }

        tracing::debug!("Planet schema ready");
        Ok(())
    }

    fn to_json<T: serde::Serialize>(value: &T) -> Result<Value, StorageError> {
        serde_json::to_value(value)
            .map_err(|e| StorageError::InvalidData(format!("json serialize error: {}", e)))
    }

    fn from_json<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, StorageError> {
        serde_json::from_value(value)
            .map_err(|e| StorageError::InvalidData(format!("json deserialize error: {}", e)))
    }

    fn record_from_row(row: &PgRow) -> Result<PlanetRecord, StorageError> {
        let column = |e: sqlx::Error| StorageError::Query(e.to_string());

        let id: i64 = row.try_get("id").map_err(column)?;
        let kind: String = row.try_get("kind").map_err(column)?;
        let atmosphere: Value = row.try_get("atmosphere").map_err(column)?;
        let created_at: DateTime<Utc> = row.try_get("created_at").map_err(column)?;

        Ok(PlanetRecord {
            id: PlanetId::new(id),
            pseudo: row.try_get("pseudo").map_err(column)?,
            name: row.try_get("name").map_err(column)?,
            kind: PlanetKind::from(kind),
            size: row.try_get("size").map_err(column)?,
            distance: row.try_get("distance").map_err(column)?,
            temperature: row.try_get("temperature").map_err(column)?,
            atmosphere: Self::from_json(atmosphere)?,
            has_water: row.try_get("has_water").map_err(column)?,
            created_at,
        })
    }
}

#[async_trait]
impl PlanetStorage for PostgresStorage {
    async fn insert(&self, draft: PlanetDraft) -> StorageResult<PlanetRecord> {
        let atmosphere = Self::to_json(&draft.atmosphere)?;

        let row = sqlx::query(
            r#"
            INSERT INTO planets (pseudo, name, kind, size, distance, temperature, atmosphere, has_water)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, created_at
            "#,
        )
        .bind(&draft.pseudo)
        .bind(&draft.name)
        .bind(draft.kind.as_str())
        .bind(draft.size)
        .bind(draft.distance)
        .bind(draft.temperature)
        .bind(atmosphere)
        .bind(draft.has_water)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StorageError::Query(e.to_string()))?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| StorageError::Query(e.to_string()))?;
        let created_at: DateTime<Utc> = row
            .try_get("created_at")
            .map_err(|e| StorageError::Query(e.to_string()))?;

        Ok(draft.into_record(PlanetId::new(id), created_at))
    }

    async fn list(&self) -> StorageResult<Vec<PlanetRecord>> {
        let sql = format!(
            "SELECT {} FROM planets ORDER BY created_at DESC, id DESC",
            SELECT_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::Query(e.to_string()))?;

        rows.iter().map(Self::record_from_row).collect()
    }

    async fn get(&self, id: PlanetId) -> StorageResult<Option<PlanetRecord>> {
        let sql = format!("SELECT {} FROM planets WHERE id = $1", SELECT_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::Query(e.to_string()))?;

        row.as_ref().map(Self::record_from_row).transpose()
    }

    async fn delete(&self, id: PlanetId) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM planets WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Query(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }
}
