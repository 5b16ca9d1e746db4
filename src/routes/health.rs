//! Health check endpoints for liveness and readiness probes.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Readiness probe detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub store: String,
    pub records: Option<i64>,
}

/// Liveness probe — always returns OK if the process is running.
pub async fn live() -> &'static str {
    "OK"
}

/// Readiness probe — checks store connectivity and reports the record count.
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    if let Err(e) = state.store.ping().await {
        tracing::warn!(error = %e, "Store health check failed");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthStatus {
                status: "degraded".to_string(),
                store: format!("error: {e}"),
                records: None,
            }),
        );
    }

    let records = match state.store.count().await {
        Ok(count) => Some(count),
        Err(e) => {
            tracing::warn!(error = %e, "Record count failed");
            None
        }
    };

    (
        StatusCode::OK,
        Json(HealthStatus {
            status: "ok".to_string(),
            store: "connected".to_string(),
            records,
        }),
    )
}
