//! Nearest-hospital routing HTTP service.
//!
//! # Endpoints
//!
//! - `GET /` - Welcome message
//! - `GET /api/nearest-hospital?latitude=..&longitude=..` - Route to the nearest hospital
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//!
//! # Configuration
//!
//! - `MEDROUTE_DATABASE` - Path to the SQLite store (default `/data/network.db`)
//! - `SERVICE_PORT` - HTTP port (default 8080)
//! - `CORS_ORIGINS` - Comma-separated allowed origins (default `http://localhost:3000`)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text

use std::net::SocketAddr;

use tracing::{error, info};

use medroute_service::{app, init_logging, AppState, LoggingConfig, ServiceConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env();
    init_logging(&logging_config);

    let config = ServiceConfig::from_env();
    info!(
        database = %config.database_path.display(),
        port = config.port,
        "starting nearest-hospital service"
    );

    let state = AppState::load(&config.database_path).map_err(|e| {
        error!(error = %e, path = %config.database_path.display(), "failed to load application state");
        e
    })?;

    let app = app(state, &config.cors_origins);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
