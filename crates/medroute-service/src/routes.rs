//! HTTP routes and handlers.

use axum::{
    extract::{Query, State},
    http::{HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

use medroute_lib::routing::HospitalQuery;
use medroute_lib::plan_hospital_route;

use crate::{from_lib_error, health_live, health_ready, AppState, ProblemDetails};

/// Query parameters for the nearest-hospital endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearestHospitalParams {
    /// Latitude of the query point in decimal degrees.
    pub latitude: f64,
    /// Longitude of the query point in decimal degrees.
    pub longitude: f64,
}

impl NearestHospitalParams {
    /// Validate coordinate ranges, returning a 400 problem for invalid input.
    pub fn validate(&self) -> Result<(), Box<ProblemDetails>> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'latitude' parameter must be between -90 and 90",
            )));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'longitude' parameter must be between -180 and 180",
            )));
        }
        Ok(())
    }
}

/// Welcome payload served at the API root.
#[derive(Debug, Serialize, Deserialize)]
pub struct Welcome {
    pub message: String,
}

/// Build the service router with CORS restricted to the given origins.
pub fn app(state: AppState, cors_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET]);

    Router::new()
        .route("/", get(root_handler))
        .route("/api/nearest-hospital", get(nearest_hospital_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handle `GET /`.
async fn root_handler() -> impl IntoResponse {
    Json(Welcome {
        message: "Nearest-hospital routing API. Query /api/nearest-hospital?latitude=..&longitude=..".to_string(),
    })
}

/// Handle `GET /api/nearest-hospital`.
async fn nearest_hospital_handler(
    State(state): State<AppState>,
    Query(params): Query<NearestHospitalParams>,
) -> axum::response::Response {
    info!(
        latitude = params.latitude,
        longitude = params.longitude,
        "handling nearest-hospital request"
    );

    if let Err(problem) = params.validate() {
        return problem.into_response();
    }

    let query = HospitalQuery {
        latitude: params.latitude,
        longitude: params.longitude,
    };
    match plan_hospital_route(state.network(), state.index(), &query) {
        Ok(collection) => {
            info!(features = collection.features.len(), "route computed");
            (StatusCode::OK, Json(collection)).into_response()
        }
        Err(e) => {
            error!(error = %e, "route planning failed");
            from_lib_error(&e).into_response()
        }
    }
}
