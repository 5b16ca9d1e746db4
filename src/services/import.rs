//! Bulk loader: read the dataset file and replace the stored collection.

use std::path::Path;

use crate::errors::AppError;
use crate::models::record::RecordFields;
use crate::services::store::{ImportSummary, RecordStore};

/// Decode a JSON array of records.
pub fn parse_records(data: &[u8]) -> Result<Vec<RecordFields>, AppError> {
    serde_json::from_slice(data).map_err(|e| AppError::Import(format!("Invalid dataset JSON: {e}")))
}

/// Read and decode the dataset file at `path`.
pub async fn read_records(path: &Path) -> Result<Vec<RecordFields>, AppError> {
    let data = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::Import(format!("Failed to read {}: {e}", path.display())))?;
    parse_records(&data)
}

/// Replace the store's contents with the records in `path`.
///
/// The file is fully read and decoded before the store is touched, so a
/// missing or malformed file leaves existing records in place.
pub async fn import_file(store: &dyn RecordStore, path: &Path) -> Result<ImportSummary, AppError> {
    let records = read_records(path).await?;
    tracing::info!(path = %path.display(), count = records.len(), "Loaded dataset file");

    store.replace_all(records).await.map_err(|e| match e {
        AppError::Database(db) => AppError::Import(format!("Failed to replace records: {db}")),
        other => other,
    })
}
