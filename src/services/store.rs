//! Record storage: the `RecordStore` seam plus PostgreSQL and in-memory backends.

use async_trait::async_trait;
use serde::Serialize;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::record::{Record, RecordFields};

/// Rows per INSERT statement. 21 binds per row keeps each statement well
/// under PostgreSQL's 65535 bind-parameter limit.
pub const INSERT_CHUNK: usize = 1000;

/// Outcome of a bulk replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub deleted: u64,
    pub inserted: u64,
}

/// Persistent collection of dataset records.
///
/// Handlers receive the store through [`crate::AppState`]; nothing reaches for
/// a process-wide connection.
#[async_trait]
pub trait RecordStore: Send + Sync + std::fmt::Debug {
    /// Every record, in import order.
    async fn fetch_all(&self) -> Result<Vec<Record>, AppError>;

    /// Delete every record, then insert `records` in order.
    async fn replace_all(&self, records: Vec<RecordFields>) -> Result<ImportSummary, AppError>;

    /// Number of stored records.
    async fn count(&self) -> Result<i64, AppError>;

    /// Cheap connectivity check for readiness probes.
    async fn ping(&self) -> Result<(), AppError>;
}

/// PostgreSQL-backed store.
#[derive(Debug, Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn fetch_all(&self) -> Result<Vec<Record>, AppError> {
        let rows = sqlx::query_as::<_, Record>("SELECT * FROM records ORDER BY position ASC")
            .fetch_all(&self.pool)
            .await?;
        tracing::debug!(count = rows.len(), "Fetched records");
        Ok(rows)
    }

    /// Runs the delete and the inserts in one transaction, so a failed insert
    /// rolls back to the previous contents instead of leaving the table empty.
    async fn replace_all(&self, records: Vec<RecordFields>) -> Result<ImportSummary, AppError> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM records")
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let mut inserted = 0u64;
        for (chunk_index, chunk) in records.chunks(INSERT_CHUNK).enumerate() {
            let offset = chunk_index * INSERT_CHUNK;
            let mut positions = Vec::with_capacity(chunk.len());
            for i in 0..chunk.len() {
                let position = i32::try_from(offset + i).map_err(|_| {
                    AppError::Import(format!("too many records: {}", records.len()))
                })?;
                positions.push(position);
            }

            let mut qb = QueryBuilder::<Postgres>::new(
                "INSERT INTO records (id, position, title, topic, sector, region, country, city, \
                 source, pest, swot, end_year, intensity, likelihood, relevance, insight, url, \
                 start_year, impact, added, published) ",
            );
            qb.push_values(chunk.iter().zip(positions), |mut row, (fields, position)| {
                row.push_bind(Uuid::new_v4())
                    .push_bind(position)
                    .push_bind(fields.title.clone())
                    .push_bind(fields.topic.clone())
                    .push_bind(fields.sector.clone())
                    .push_bind(fields.region.clone())
                    .push_bind(fields.country.clone())
                    .push_bind(fields.city.clone())
                    .push_bind(fields.source.clone())
                    .push_bind(fields.pest.clone())
                    .push_bind(fields.swot.clone())
                    .push_bind(fields.end_year.clone())
                    .push_bind(fields.intensity)
                    .push_bind(fields.likelihood)
                    .push_bind(fields.relevance)
                    .push_bind(fields.insight.clone())
                    .push_bind(fields.url.clone())
                    .push_bind(fields.start_year.clone())
                    .push_bind(fields.impact.clone())
                    .push_bind(fields.added.clone())
                    .push_bind(fields.published.clone());
            });

            inserted += qb.build().execute(&mut *tx).await?.rows_affected();
        }

        tx.commit().await?;

        tracing::info!(deleted, inserted, "Replaced record collection");
        Ok(ImportSummary { deleted, inserted })
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM records")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// In-memory store for tests and local runs without a database.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: RwLock<Vec<Record>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `fields`, in order.
    pub fn with_records(fields: Vec<RecordFields>) -> Self {
        Self {
            records: RwLock::new(into_records(fields)),
        }
    }
}

fn into_records(fields: Vec<RecordFields>) -> Vec<Record> {
    fields
        .into_iter()
        .zip(0..)
        .map(|(fields, position)| Record::new(position, fields))
        .collect()
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn fetch_all(&self) -> Result<Vec<Record>, AppError> {
        Ok(self.records.read().await.clone())
    }

    async fn replace_all(&self, records: Vec<RecordFields>) -> Result<ImportSummary, AppError> {
        let mut guard = self.records.write().await;
        let deleted = guard.len() as u64;
        *guard = into_records(records);
        let inserted = guard.len() as u64;
        Ok(ImportSummary { deleted, inserted })
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.records.read().await.len() as i64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
