//! Medroute library entry points.
//!
//! This crate exposes helpers to locate and ingest a city's road-network
//! dataset, load it into memory, build the routing graph, and answer
//! nearest-hospital queries. Higher-level consumers (CLI, HTTP service)
//! should only depend on the functions exported here instead of
//! reimplementing behavior.

#![deny(warnings)]

pub mod dataset;
pub mod db;
pub mod error;
pub mod graph;
pub mod ingest;
pub mod route;
pub mod routing;
pub mod search;
pub mod spatial;

pub use dataset::{default_database_path, fetch_archive, resolve_database_path};
pub use db::{load_network, NetworkEdge, NetworkNode, NodeId, RoadNetwork};
pub use error::{Error, Result};
pub use graph::{build_graph, Graph};
pub use ingest::{ingest_extracts, IngestReport};
pub use route::{assemble_route, GeometryStore};
pub use routing::{plan_hospital_route, HospitalQuery};
pub use search::{find_nearest_target, NearestTarget};
pub use spatial::NodeIndex;
