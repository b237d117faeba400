//! Application state shared across axum handlers.

use std::path::Path;
use std::sync::Arc;

use medroute_lib::db::RoadNetwork;
use medroute_lib::error::Error as LibError;
use medroute_lib::{load_network, NodeIndex};

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// Database file not found.
    DatabaseNotFound(String),

    /// Failed to load the road network.
    NetworkLoad(LibError),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseNotFound(path) => write!(f, "database not found: {}", path),
            Self::NetworkLoad(e) => write!(f, "failed to load road network: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NetworkLoad(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        Self::NetworkLoad(err)
    }
}

/// Shared application state for all axum handlers.
///
/// Cheaply cloneable (`Arc` internally); share it via axum's `State`
/// extractor. Holds the point-in-time network snapshot and the node index
/// built over it. Per-query state is derived from the snapshot on each
/// request.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    network: RoadNetwork,
    index: NodeIndex,
}

impl AppState {
    /// Load application state from a SQLite store.
    pub fn load(db_path: impl AsRef<Path>) -> Result<Self, AppStateError> {
        let db_path = db_path.as_ref();

        if !db_path.exists() {
            return Err(AppStateError::DatabaseNotFound(
                db_path.display().to_string(),
            ));
        }

        tracing::info!(path = %db_path.display(), "loading road network");
        let network = load_network(db_path)?;
        let index = NodeIndex::build(&network);
        tracing::info!(
            nodes = network.nodes.len(),
            edges = network.edges.len(),
            hospitals = network.hospitals.len(),
            "road network loaded"
        );

        Ok(Self::from_components(network, index))
    }

    /// Create application state from pre-loaded components. Useful for tests.
    pub fn from_components(network: RoadNetwork, index: NodeIndex) -> Self {
        Self {
            inner: Arc::new(AppStateInner { network, index }),
        }
    }

    /// Access the loaded road network snapshot.
    pub fn network(&self) -> &RoadNetwork {
        &self.inner.network
    }

    /// Access the node index built over the snapshot.
    pub fn index(&self) -> &NodeIndex {
        &self.inner.index
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("node_count", &self.inner.network.nodes.len())
            .field("hospital_count", &self.inner.network.hospitals.len())
            .finish()
    }
}
