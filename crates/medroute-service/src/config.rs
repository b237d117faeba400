//! Service configuration read from the environment.

use std::path::PathBuf;

/// Runtime configuration for the HTTP service.
///
/// All values come from the environment; nothing is read from disk and no
/// globals are involved, so tests can construct a config directly.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Path to the SQLite store holding the road network.
    pub database_path: PathBuf,
    /// Port the HTTP listener binds to.
    pub port: u16,
    /// Origins allowed to call the API from a browser.
    pub cors_origins: Vec<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("/data/network.db"),
            port: 8080,
            cors_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

impl ServiceConfig {
    /// Read configuration from the environment.
    ///
    /// - `MEDROUTE_DATABASE`: path to the SQLite store (default `/data/network.db`)
    /// - `SERVICE_PORT`: listener port (default 8080)
    /// - `CORS_ORIGINS`: comma-separated allowed origins
    ///   (default `http://localhost:3000`)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let database_path = std::env::var("MEDROUTE_DATABASE")
            .map(PathBuf::from)
            .unwrap_or(defaults.database_path);
        let port = std::env::var("SERVICE_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);
        let cors_origins = std::env::var("CORS_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.cors_origins);

        Self {
            database_path,
            port,
            cors_origins,
        }
    }
}
