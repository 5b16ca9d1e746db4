use std::env;

/// Default location of the bulk-load input file, relative to the working directory.
pub const DEFAULT_IMPORT_FILE: &str = "data/jsondata.json";

/// Default backend base URL for the dashboard client.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Server and import configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    /// Allowed CORS origin. Any origin is allowed when unset.
    pub frontend_url: Option<String>,
    pub import_file: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            host: env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("BACKEND_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            frontend_url: env::var("FRONTEND_URL").ok().filter(|v| !v.is_empty()),
            import_file: env::var("IMPORT_FILE")
                .unwrap_or_else(|_| DEFAULT_IMPORT_FILE.to_string()),
        })
    }
}

/// Dashboard client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, e.g. `http://localhost:3000`.
    pub api_url: String,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
        }
    }

    /// Full URL of the records endpoint.
    pub fn data_url(&self) -> String {
        format!("{}/api/data", self.api_url.trim_end_matches('/'))
    }
}
