//! Dataset routes: the full record collection for the dashboard.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::models::record::Record;
use crate::AppState;

/// GET /api/data — every stored record, unfiltered and unpaginated.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Record>>, AppError> {
    let records = state.store.fetch_all().await?;
    Ok(Json(records))
}
