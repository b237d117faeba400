//! RFC 9457 Problem Details for HTTP APIs.
//!
//! See: <https://www.rfc-editor.org/rfc/rfc9457.html>

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use medroute_lib::error::Error as LibError;

/// Problem type URI for invalid request parameters.
pub const PROBLEM_INVALID_REQUEST: &str = "/problems/invalid-request";

/// Problem type URI for query points with no nearby network node.
pub const PROBLEM_NO_NEARBY_NODE: &str = "/problems/no-nearby-node";

/// Problem type URI for start nodes from which no hospital is reachable.
pub const PROBLEM_NO_HOSPITAL_REACHABLE: &str = "/problems/no-hospital-reachable";

/// Problem type URI for routes whose stored geometry is incomplete.
pub const PROBLEM_MISSING_GEOMETRY: &str = "/problems/missing-geometry";

/// Problem type URI for internal server errors.
pub const PROBLEM_INTERNAL_ERROR: &str = "/problems/internal-error";

/// RFC 9457 Problem Details response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// URI reference identifying the problem type (relative).
    #[serde(rename = "type")]
    pub type_uri: String,

    /// Short, human-readable summary of the problem.
    pub title: String,

    /// HTTP status code for this problem.
    pub status: u16,

    /// Human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ProblemDetails {
    /// Create a new ProblemDetails with required fields.
    pub fn new(type_uri: impl Into<String>, title: impl Into<String>, status: StatusCode) -> Self {
        Self {
            type_uri: type_uri.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
        }
    }

    /// Add a detailed explanation of this specific problem occurrence.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Create a 400 Bad Request problem for invalid input.
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INVALID_REQUEST,
            "Invalid Request",
            StatusCode::BAD_REQUEST,
        )
        .with_detail(detail)
    }

    /// Create a 404 Not Found problem for points without a nearby node.
    pub fn no_nearby_node(latitude: f64, longitude: f64) -> Self {
        Self::new(
            PROBLEM_NO_NEARBY_NODE,
            "No Nearby Node",
            StatusCode::NOT_FOUND,
        )
        .with_detail(format!(
            "No network node found near ({latitude}, {longitude})"
        ))
    }

    /// Create a 404 Not Found problem for unreachable hospitals.
    pub fn no_hospital_reachable(start: i64) -> Self {
        Self::new(
            PROBLEM_NO_HOSPITAL_REACHABLE,
            "No Hospital Reachable",
            StatusCode::NOT_FOUND,
        )
        .with_detail(format!("No hospital is reachable from node {start}"))
    }

    /// Create a 404 Not Found problem for incomplete route geometry.
    pub fn missing_geometry(detail: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_MISSING_GEOMETRY,
            "Missing Geometry",
            StatusCode::NOT_FOUND,
        )
        .with_detail(detail)
    }

    /// Create a 500 Internal Server Error problem.
    pub fn internal_error(detail: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INTERNAL_ERROR,
            "Internal Error",
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .with_detail(detail)
    }
}

impl std::fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.detail.as_deref().unwrap_or(""))
    }
}

impl std::error::Error for ProblemDetails {}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = Json(&self).into_response();
        response.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("application/problem+json"),
        );
        *response.status_mut() = status;
        response
    }
}

/// Convert library errors to ProblemDetails.
///
/// Routing failures that mean "there is no answer for this query" map to 404
/// with a distinct problem type; anything else is a 500.
pub fn from_lib_error(error: &LibError) -> ProblemDetails {
    match error {
        LibError::NoNearbyNode {
            latitude,
            longitude,
        } => ProblemDetails::no_nearby_node(*latitude, *longitude),
        LibError::NoHospitalReachable { start } => ProblemDetails::no_hospital_reachable(*start),
        LibError::MissingEdgeGeometry { from, to } => ProblemDetails::missing_geometry(format!(
            "No geometry stored for route segment {from} -> {to}"
        )),
        LibError::MissingHospitalGeometry { node } => ProblemDetails::missing_geometry(format!(
            "No geometry stored for the hospital at node {node}"
        )),
        _ => ProblemDetails::internal_error(error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_is_400() {
        let problem = ProblemDetails::bad_request("latitude out of range");
        assert_eq!(problem.status, 400);
        assert_eq!(problem.type_uri, PROBLEM_INVALID_REQUEST);
    }

    #[test]
    fn serialization_renames_type_uri() {
        let problem = ProblemDetails::bad_request("test");
        let json = serde_json::to_string(&problem).unwrap();
        assert!(json.contains("\"type\":\"/problems/invalid-request\""));
        assert!(json.contains("\"status\":400"));
    }

    #[test]
    fn no_hospital_reachable_maps_to_404() {
        let error = LibError::NoHospitalReachable { start: 42 };
        let problem = from_lib_error(&error);
        assert_eq!(problem.status, 404);
        assert_eq!(problem.type_uri, PROBLEM_NO_HOSPITAL_REACHABLE);
        assert!(problem.detail.as_deref().unwrap().contains("42"));
    }

    #[test]
    fn missing_edge_geometry_maps_to_404() {
        let error = LibError::MissingEdgeGeometry { from: 1, to: 2 };
        let problem = from_lib_error(&error);
        assert_eq!(problem.status, 404);
        assert_eq!(problem.type_uri, PROBLEM_MISSING_GEOMETRY);
    }

    #[test]
    fn unexpected_errors_map_to_500() {
        let error = LibError::UnsupportedSchema;
        let problem = from_lib_error(&error);
        assert_eq!(problem.status, 500);
    }
}
