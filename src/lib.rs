pub mod client;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod render;
pub mod routes;
pub mod services;

use std::sync::Arc;

use services::store::RecordStore;

/// Shared application state passed to all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub config: config::AppConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, config: config::AppConfig) -> Self {
        Self { store, config }
    }
}
