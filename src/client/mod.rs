//! Dashboard client: one-shot fetch of the record collection and session state.

use crate::config::ClientConfig;
use crate::errors::AppError;
use crate::models::filter::{FilterField, FilterSet};
use crate::models::record::Record;
use crate::services::dashboard::DashboardView;

/// HTTP client for the records endpoint.
#[derive(Debug, Clone)]
pub struct DashboardClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl DashboardClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Fetch every record. No retries.
    pub async fn fetch_all(&self) -> Result<Vec<Record>, AppError> {
        let url = self.config.data_url();
        tracing::debug!(%url, "Fetching records");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Fetch(format!("{url} returned {status}: {body}")));
        }

        let records = response.json::<Vec<Record>>().await?;
        tracing::info!(count = records.len(), "Fetched records");
        Ok(records)
    }
}

/// Dashboard session: fetched data, filter selections, and the loading flag.
///
/// The session goes `loading -> loaded` exactly once. A failed fetch is
/// logged and leaves an empty dataset behind.
#[derive(Debug, Clone)]
pub struct DashboardSession {
    records: Vec<Record>,
    filters: FilterSet,
    loading: bool,
}

impl Default for DashboardSession {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardSession {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            filters: FilterSet::new(),
            loading: true,
        }
    }

    /// Run the initial fetch. Later calls are no-ops.
    pub async fn load(&mut self, client: &DashboardClient) {
        if !self.loading {
            return;
        }
        let result = client.fetch_all().await;
        self.settle(result);
    }

    /// Apply the outcome of the initial fetch and clear the loading flag.
    pub fn settle(&mut self, result: Result<Vec<Record>, AppError>) {
        match result {
            Ok(records) => self.records = records,
            Err(e) => {
                tracing::error!(error = %e, "Error fetching data");
                self.records.clear();
            }
        }
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Change one selection. `""` resets the field to "All".
    pub fn select(&mut self, field: FilterField, value: impl Into<String>) {
        self.filters.set(field, value);
    }

    pub fn reset_filters(&mut self) {
        self.filters.clear();
    }

    /// Projections for the current data and filters.
    pub fn view(&self) -> DashboardView<'_> {
        DashboardView::build(&self.records, &self.filters)
    }
}
