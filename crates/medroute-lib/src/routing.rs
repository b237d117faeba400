//! Nearest-hospital query orchestration.
//!
//! A query runs a strict sequential pipeline over a point-in-time network
//! snapshot: snap the query point to its nearest node, build the adjacency
//! graph fresh from the full edge list, run the multi-target search against
//! the hospital node set, and assemble the resulting path into GeoJSON
//! features. All state is request-scoped; concurrent queries only share the
//! immutable snapshot.

use geojson::FeatureCollection;
use tracing::info;

use crate::db::RoadNetwork;
use crate::error::{Error, Result};
use crate::graph::build_graph;
use crate::route::assemble_route;
use crate::search::find_nearest_target;
use crate::spatial::NodeIndex;

/// A nearest-hospital query expressed as a geographic point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HospitalQuery {
    pub latitude: f64,
    pub longitude: f64,
}

/// Compute the route to the nearest hospital from a geographic point.
///
/// Typed not-found outcomes: [`Error::NoNearbyNode`] when the network has no
/// node to snap to, and [`Error::NoHospitalReachable`] when the search
/// exhausts the start node's connected component without settling a hospital.
/// An unreachable hospital is an expected outcome for callers to present, not
/// an internal failure.
pub fn plan_hospital_route(
    network: &RoadNetwork,
    index: &NodeIndex,
    query: &HospitalQuery,
) -> Result<FeatureCollection> {
    let start = index
        .nearest_node(query.latitude, query.longitude)
        .ok_or(Error::NoNearbyNode {
            latitude: query.latitude,
            longitude: query.longitude,
        })?;
    info!(start_node = start, "resolved query point to network node");

    let graph = build_graph(&network.edges)?;
    let targets = network.hospital_nodes();

    let found = find_nearest_target(&graph, start, &targets)
        .ok_or(Error::NoHospitalReachable { start })?;

    if found.path.len() == 1 {
        info!(node = start, "query point is already at a hospital");
    } else {
        info!(
            hospital_node = found.node,
            distance = found.distance,
            hops = found.path.len() - 1,
            "nearest hospital found"
        );
    }

    assemble_route(
        network,
        &found.path,
        found.node,
        found.distance,
        [query.longitude, query.latitude],
    )
}
