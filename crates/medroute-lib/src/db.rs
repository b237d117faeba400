use std::collections::{HashMap, HashSet};
use std::path::Path;

use rusqlite::Connection;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Numeric identifier for a road-network node.
pub type NodeId = i64;

/// GeoJSON position, `[longitude, latitude]`.
pub type PointCoords = Vec<f64>;

/// GeoJSON LineString coordinate sequence.
pub type LineCoords = Vec<Vec<f64>>;

/// A node of the road network with its geographic position.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkNode {
    pub id: NodeId,
    pub latitude: f64,
    pub longitude: f64,
}

/// A directed, weighted road segment between two nodes.
///
/// The segment geometry is kept separately in [`RoadNetwork::edge_geometry`];
/// the search only needs the endpoints and the length.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub length: f64,
}

/// A hospital snapped to its nearest network node.
#[derive(Debug, Clone, PartialEq)]
pub struct Hospital {
    pub id: i64,
    pub node: NodeId,
    pub geometry: PointCoords,
}

/// In-memory, point-in-time snapshot of the road network and hospital set.
///
/// Loaded once from the store; per-query state (the adjacency graph, the
/// search frontier) is derived fresh from this snapshot for every request.
#[derive(Debug, Clone, Default)]
pub struct RoadNetwork {
    pub nodes: HashMap<NodeId, NetworkNode>,
    pub edges: Vec<NetworkEdge>,
    pub edge_geometry: HashMap<(NodeId, NodeId), LineCoords>,
    pub hospitals: HashMap<NodeId, Hospital>,
}

impl RoadNetwork {
    /// The set of node ids acting as shortest-path targets.
    pub fn hospital_nodes(&self) -> HashSet<NodeId> {
        self.hospitals.keys().copied().collect()
    }
}

/// Load the road network and hospital set from a SQLite store.
///
/// The loader verifies the expected tables are present, rejects edges with
/// non-positive lengths, and skips edges whose endpoints were never loaded so
/// corrupt rows cannot reach the in-memory graph. Duplicate `(from, to)`
/// geometry rows keep the first occurrence, matching the de-duplication the
/// ingestion step applies on insert.
pub fn load_network(db_path: &Path) -> Result<RoadNetwork> {
    if !db_path.exists() {
        return Err(Error::DatabaseNotFound {
            path: db_path.to_path_buf(),
        });
    }

    let connection = Connection::open(db_path)?;
    ensure_schema(&connection)?;
    debug!(path = %db_path.display(), "loading road network");

    let nodes = load_nodes(&connection)?;
    let (edges, edge_geometry) = load_edges(&connection, &nodes)?;
    let hospitals = load_hospitals(&connection)?;

    debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        hospitals = hospitals.len(),
        "road network loaded"
    );

    Ok(RoadNetwork {
        nodes,
        edges,
        edge_geometry,
        hospitals,
    })
}

fn ensure_schema(connection: &Connection) -> Result<()> {
    for table in ["network_nodes", "network_edges", "network_hospitals"] {
        if !table_exists(connection, table)? {
            return Err(Error::UnsupportedSchema);
        }
    }
    Ok(())
}

fn load_nodes(connection: &Connection) -> Result<HashMap<NodeId, NetworkNode>> {
    let mut stmt =
        connection.prepare("SELECT node_id, latitude, longitude FROM network_nodes")?;
    let rows = stmt.query_map([], |row| {
        Ok(NetworkNode {
            id: row.get(0)?,
            latitude: row.get(1)?,
            longitude: row.get(2)?,
        })
    })?;

    let mut nodes = HashMap::new();
    for entry in rows {
        let node = entry?;
        if !node.latitude.is_finite() || !node.longitude.is_finite() {
            return Err(Error::InvalidCoordinate { node: node.id });
        }
        nodes.insert(node.id, node);
    }
    Ok(nodes)
}

#[allow(clippy::type_complexity)]
fn load_edges(
    connection: &Connection,
    nodes: &HashMap<NodeId, NetworkNode>,
) -> Result<(Vec<NetworkEdge>, HashMap<(NodeId, NodeId), LineCoords>)> {
    let mut stmt = connection
        .prepare("SELECT from_node, to_node, length, geometry FROM network_edges")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, NodeId>(0)?,
            row.get::<_, NodeId>(1)?,
            row.get::<_, f64>(2)?,
            row.get::<_, Option<String>>(3)?,
        ))
    })?;

    let mut edges = Vec::new();
    let mut edge_geometry: HashMap<(NodeId, NodeId), LineCoords> = HashMap::new();
    let mut skipped_edges = 0usize;
    for row in rows {
        let (from, to, length, geometry) = row?;
        if !nodes.contains_key(&from) || !nodes.contains_key(&to) {
            skipped_edges += 1;
            continue;
        }
        if !(length > 0.0) {
            return Err(Error::InvalidEdgeLength { from, to, length });
        }

        edges.push(NetworkEdge { from, to, length });
        if let Some(text) = geometry {
            let coords = parse_line_geometry(&text, &format!("edge {from}->{to}"))?;
            edge_geometry.entry((from, to)).or_insert(coords);
        }
    }

    if skipped_edges > 0 {
        warn!(skipped_edges, "ignored edges referencing unknown nodes");
    }

    Ok((edges, edge_geometry))
}

fn load_hospitals(connection: &Connection) -> Result<HashMap<NodeId, Hospital>> {
    let mut stmt = connection
        .prepare("SELECT hospital_id, node_id, geometry FROM network_hospitals")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, Option<NodeId>>(1)?,
            row.get::<_, Option<String>>(2)?,
        ))
    })?;

    let mut hospitals = HashMap::new();
    let mut unassigned = 0usize;
    for row in rows {
        let (id, node, geometry) = row?;
        let Some(node) = node else {
            unassigned += 1;
            continue;
        };
        let Some(text) = geometry else {
            unassigned += 1;
            continue;
        };
        let geometry = parse_point_geometry(&text, &format!("hospital {id}"))?;
        hospitals.insert(
            node,
            Hospital {
                id,
                node,
                geometry,
            },
        );
    }

    if unassigned > 0 {
        warn!(unassigned, "ignored hospitals without node assignment or geometry");
    }

    Ok(hospitals)
}

/// Parse a stored GeoJSON document into LineString coordinates.
pub(crate) fn parse_line_geometry(text: &str, context: &str) -> Result<LineCoords> {
    let geometry: geojson::Geometry =
        serde_json::from_str(text).map_err(|_| Error::InvalidGeometry {
            context: context.to_string(),
        })?;
    match geometry.value {
        geojson::Value::LineString(coords) => Ok(coords),
        _ => Err(Error::InvalidGeometry {
            context: context.to_string(),
        }),
    }
}

/// Parse a stored GeoJSON document into Point coordinates.
pub(crate) fn parse_point_geometry(text: &str, context: &str) -> Result<PointCoords> {
    let geometry: geojson::Geometry =
        serde_json::from_str(text).map_err(|_| Error::InvalidGeometry {
            context: context.to_string(),
        })?;
    match geometry.value {
        geojson::Value::Point(coords) => Ok(coords),
        _ => Err(Error::InvalidGeometry {
            context: context.to_string(),
        }),
    }
}

fn table_exists(connection: &Connection, table: &str) -> Result<bool> {
    let mut stmt = connection
        .prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1 LIMIT 1")?;
    let mut rows = stmt.query([table])?;
    Ok(rows.next()?.is_some())
}
