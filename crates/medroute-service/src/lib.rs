//! HTTP service for nearest-hospital routing.
//!
//! Handlers are thin: all routing logic lives in `medroute-lib`, this crate
//! provides HTTP glue only. The road network is loaded once at startup into
//! [`AppState`] and shared read-only across requests; per-query state is
//! derived from that snapshot inside the library.

#![deny(warnings)]

pub mod config;
mod health;
pub mod logging;
mod problem;
pub mod routes;
mod state;

pub use config::ServiceConfig;
pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use problem::{
    from_lib_error, ProblemDetails, PROBLEM_INTERNAL_ERROR, PROBLEM_INVALID_REQUEST,
    PROBLEM_MISSING_GEOMETRY, PROBLEM_NO_HOSPITAL_REACHABLE, PROBLEM_NO_NEARBY_NODE,
};
pub use routes::{app, NearestHospitalParams};
pub use state::{AppState, AppStateError};
