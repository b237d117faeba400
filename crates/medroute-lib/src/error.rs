use std::path::PathBuf;

use thiserror::Error;

use crate::db::NodeId;

/// Convenient result alias for the medroute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Database could not be located at the resolved path.
    #[error("database not found at {path}")]
    DatabaseNotFound { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the dataset store")]
    ProjectDirsUnavailable,

    /// Raised when the store is missing the expected road-network tables.
    #[error("unsupported database schema; expected network_nodes/network_edges/network_hospitals tables")]
    UnsupportedSchema,

    /// Raised when an edge carries a zero or negative length. The graph
    /// builder refuses such data instead of normalizing it.
    #[error("edge {from}->{to} has non-positive length {length}")]
    InvalidEdgeLength { from: NodeId, to: NodeId, length: f64 },

    /// Raised when an edge references a node that was never loaded.
    #[error("edge {from}->{to} references an unknown node")]
    EdgeUnknownNode { from: NodeId, to: NodeId },

    /// Raised when a node carries a non-finite latitude or longitude.
    #[error("node {node} has a non-finite coordinate")]
    InvalidCoordinate { node: NodeId },

    /// Raised when a stored geometry document cannot be parsed or has the
    /// wrong GeoJSON type.
    #[error("invalid geometry for {context}")]
    InvalidGeometry { context: String },

    /// Raised when no network node exists near the queried point.
    #[error("no network node found near ({latitude}, {longitude})")]
    NoNearbyNode { latitude: f64, longitude: f64 },

    /// Raised when no hospital is reachable from the resolved start node.
    #[error("no hospital reachable from node {start}")]
    NoHospitalReachable { start: NodeId },

    /// Raised during route assembly when a traversed edge has no stored
    /// geometry.
    #[error("no stored geometry for edge {from}->{to}")]
    MissingEdgeGeometry { from: NodeId, to: NodeId },

    /// Raised during route assembly when the reached hospital has no stored
    /// point geometry.
    #[error("no stored geometry for hospital node {node}")]
    MissingHospitalGeometry { node: NodeId },

    /// Raised when a downloaded archive does not contain the expected CSV
    /// extracts.
    #[error("archive {archive} did not contain any CSV extracts")]
    ArchiveMissingExtracts { archive: PathBuf },

    /// Wrapper for SQLite errors.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for HTTP client errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Wrapper for ZIP archive parsing errors.
    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}
