//! CSV extract ingestion into the SQLite store.
//!
//! Extracts are three CSV files produced by the dataset preparation step:
//!
//! - `nodes.csv`: `node_id,latitude,longitude`
//! - `edges.csv`: `from_node,to_node,length,geometry`
//! - `hospitals.csv`: `hospital_id,geometry`
//!
//! Geometry columns hold GeoJSON documents (`LineString` for edges, `Point`
//! for hospitals). Every record is validated before anything is written:
//! coordinates must be finite, edge lengths strictly positive, edge endpoints
//! must reference ingested nodes, and geometries must parse as the expected
//! type. Hospitals are snapped to their nearest network node during ingestion
//! so queries never need to resolve that mapping.

use std::collections::HashMap;
use std::path::Path;

use rusqlite::Connection;
use serde::Deserialize;
use tracing::info;

use crate::db::{self, NetworkNode, NodeId, RoadNetwork};
use crate::error::{Error, Result};
use crate::spatial::NodeIndex;

#[derive(Debug, Deserialize)]
struct NodeRecord {
    node_id: NodeId,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct EdgeRecord {
    from_node: NodeId,
    to_node: NodeId,
    length: f64,
    geometry: String,
}

#[derive(Debug, Deserialize)]
struct HospitalRecord {
    hospital_id: i64,
    geometry: String,
}

/// Row counts written by a successful ingestion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestReport {
    pub nodes: usize,
    pub edges: usize,
    pub hospitals: usize,
}

/// Load CSV extracts into the SQLite store at `db_path`.
///
/// Creates the schema when absent and uses `INSERT OR IGNORE` throughout, so
/// re-running an ingestion is idempotent. All rows are written inside a
/// single transaction; validation failures leave the store untouched.
pub fn ingest_extracts(
    db_path: &Path,
    nodes_csv: &Path,
    edges_csv: &Path,
    hospitals_csv: &Path,
) -> Result<IngestReport> {
    let nodes = read_nodes(nodes_csv)?;
    let edges = read_edges(edges_csv, &nodes)?;
    let hospitals = read_hospitals(hospitals_csv, &nodes)?;

    let mut connection = Connection::open(db_path)?;
    create_schema(&connection)?;

    let tx = connection.transaction()?;
    for node in nodes.values() {
        tx.execute(
            "INSERT OR IGNORE INTO network_nodes (node_id, latitude, longitude)
             VALUES (?1, ?2, ?3)",
            (node.id, node.latitude, node.longitude),
        )?;
    }
    for record in &edges {
        tx.execute(
            "INSERT OR IGNORE INTO network_edges (from_node, to_node, length, geometry)
             VALUES (?1, ?2, ?3, ?4)",
            (
                record.from_node,
                record.to_node,
                record.length,
                &record.geometry,
            ),
        )?;
    }
    for (record, node) in &hospitals {
        tx.execute(
            "INSERT OR IGNORE INTO network_hospitals (hospital_id, node_id, geometry)
             VALUES (?1, ?2, ?3)",
            (record.hospital_id, node, &record.geometry),
        )?;
    }
    tx.commit()?;

    let report = IngestReport {
        nodes: nodes.len(),
        edges: edges.len(),
        hospitals: hospitals.len(),
    };
    info!(
        nodes = report.nodes,
        edges = report.edges,
        hospitals = report.hospitals,
        path = %db_path.display(),
        "ingested extracts into store"
    );
    Ok(report)
}

fn create_schema(connection: &Connection) -> Result<()> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS network_nodes (
             node_id   INTEGER PRIMARY KEY,
             latitude  REAL NOT NULL,
             longitude REAL NOT NULL
         );
         CREATE TABLE IF NOT EXISTS network_edges (
             from_node INTEGER NOT NULL,
             to_node   INTEGER NOT NULL,
             length    REAL NOT NULL,
             geometry  TEXT,
             UNIQUE (from_node, to_node)
         );
         CREATE TABLE IF NOT EXISTS network_hospitals (
             hospital_id INTEGER PRIMARY KEY,
             node_id     INTEGER,
             geometry    TEXT
         );",
    )?;
    Ok(())
}

fn read_nodes(path: &Path) -> Result<HashMap<NodeId, NetworkNode>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut nodes = HashMap::new();
    for record in reader.deserialize() {
        let record: NodeRecord = record?;
        if !record.latitude.is_finite() || !record.longitude.is_finite() {
            return Err(Error::InvalidCoordinate {
                node: record.node_id,
            });
        }
        nodes.insert(
            record.node_id,
            NetworkNode {
                id: record.node_id,
                latitude: record.latitude,
                longitude: record.longitude,
            },
        );
    }
    Ok(nodes)
}

fn read_edges(path: &Path, nodes: &HashMap<NodeId, NetworkNode>) -> Result<Vec<EdgeRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut edges = Vec::new();
    for record in reader.deserialize() {
        let record: EdgeRecord = record?;
        if !nodes.contains_key(&record.from_node) || !nodes.contains_key(&record.to_node) {
            return Err(Error::EdgeUnknownNode {
                from: record.from_node,
                to: record.to_node,
            });
        }
        if !(record.length > 0.0) {
            return Err(Error::InvalidEdgeLength {
                from: record.from_node,
                to: record.to_node,
                length: record.length,
            });
        }
        db::parse_line_geometry(
            &record.geometry,
            &format!("edge {}->{}", record.from_node, record.to_node),
        )?;
        edges.push(record);
    }
    Ok(edges)
}

fn read_hospitals(
    path: &Path,
    nodes: &HashMap<NodeId, NetworkNode>,
) -> Result<Vec<(HospitalRecord, NodeId)>> {
    let network = RoadNetwork {
        nodes: nodes.clone(),
        ..RoadNetwork::default()
    };
    let index = NodeIndex::build(&network);

    let mut reader = csv::Reader::from_path(path)?;
    let mut hospitals = Vec::new();
    for record in reader.deserialize() {
        let record: HospitalRecord = record?;
        let coords = db::parse_point_geometry(
            &record.geometry,
            &format!("hospital {}", record.hospital_id),
        )?;
        if coords.len() < 2 {
            return Err(Error::InvalidGeometry {
                context: format!("hospital {}", record.hospital_id),
            });
        }
        let (longitude, latitude) = (coords[0], coords[1]);
        let node = index
            .nearest_node(latitude, longitude)
            .ok_or(Error::NoNearbyNode {
                latitude,
                longitude,
            })?;
        hospitals.push((record, node));
    }
    Ok(hospitals)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_csv(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn edges_referencing_unknown_nodes_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let nodes = write_csv(
            dir.path(),
            "nodes.csv",
            "node_id,latitude,longitude\n1,48.85,2.35\n",
        );
        let edges = write_csv(
            dir.path(),
            "edges.csv",
            "from_node,to_node,length,geometry\n1,2,10.0,\"{\"\"type\"\":\"\"LineString\"\",\"\"coordinates\"\":[[2.35,48.85],[2.36,48.86]]}\"\n",
        );
        let hospitals = write_csv(dir.path(), "hospitals.csv", "hospital_id,geometry\n");

        let err = ingest_extracts(&dir.path().join("net.db"), &nodes, &edges, &hospitals)
            .unwrap_err();
        assert!(matches!(err, Error::EdgeUnknownNode { from: 1, to: 2 }));
    }

    #[test]
    fn non_positive_length_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let nodes = write_csv(
            dir.path(),
            "nodes.csv",
            "node_id,latitude,longitude\n1,48.85,2.35\n2,48.86,2.36\n",
        );
        let edges = write_csv(
            dir.path(),
            "edges.csv",
            "from_node,to_node,length,geometry\n1,2,0.0,\"{\"\"type\"\":\"\"LineString\"\",\"\"coordinates\"\":[[2.35,48.85],[2.36,48.86]]}\"\n",
        );
        let hospitals = write_csv(dir.path(), "hospitals.csv", "hospital_id,geometry\n");

        let err = ingest_extracts(&dir.path().join("net.db"), &nodes, &edges, &hospitals)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidEdgeLength { .. }));
    }
}
