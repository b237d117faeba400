//! Shared fixture helpers for integration tests.

use std::path::{Path, PathBuf};

use rusqlite::Connection;

/// Build the fixture store in `dir` and return its path.
///
/// The network is a small directed triangle with a detour that beats the
/// direct edge, plus an isolated node far from everything else:
///
/// ```text
/// 1 -> 2 (5.0)   2 -> 3 (2.0)   1 -> 3 (10.0)      4 (isolated)
/// ```
///
/// Node 3 carries the only hospital. Edge `2 -> 3` optionally has no stored
/// geometry so assembler failures can be exercised end to end.
pub fn fixture_database(dir: &Path, with_geometry: bool) -> PathBuf {
    let path = dir.join("network.db");
    let connection = Connection::open(&path).expect("open fixture database");

    connection
        .execute_batch(
            "CREATE TABLE network_nodes (
                 node_id INTEGER PRIMARY KEY, latitude REAL NOT NULL, longitude REAL NOT NULL
             );
             CREATE TABLE network_edges (
                 from_node INTEGER NOT NULL, to_node INTEGER NOT NULL,
                 length REAL NOT NULL, geometry TEXT,
                 UNIQUE (from_node, to_node)
             );
             CREATE TABLE network_hospitals (
                 hospital_id INTEGER PRIMARY KEY, node_id INTEGER, geometry TEXT
             );",
        )
        .expect("create fixture schema");

    let nodes = [
        (1, 48.850, 2.350),
        (2, 48.855, 2.355),
        (3, 48.860, 2.360),
        (4, 48.950, 2.450),
    ];
    for (id, latitude, longitude) in nodes {
        connection
            .execute(
                "INSERT INTO network_nodes (node_id, latitude, longitude) VALUES (?1, ?2, ?3)",
                (id, latitude, longitude),
            )
            .expect("insert fixture node");
    }

    let edges = [
        (1, 2, 5.0, line(&[[2.350, 48.850], [2.355, 48.855]])),
        (
            2,
            3,
            2.0,
            if with_geometry {
                line(&[[2.355, 48.855], [2.360, 48.860]])
            } else {
                None
            },
        ),
        (1, 3, 10.0, line(&[[2.350, 48.850], [2.360, 48.860]])),
    ];
    for (from, to, length, geometry) in edges {
        connection
            .execute(
                "INSERT INTO network_edges (from_node, to_node, length, geometry)
                 VALUES (?1, ?2, ?3, ?4)",
                (from, to, length, geometry),
            )
            .expect("insert fixture edge");
    }

    connection
        .execute(
            "INSERT INTO network_hospitals (hospital_id, node_id, geometry)
             VALUES (42, 3, '{\"type\":\"Point\",\"coordinates\":[2.360,48.860]}')",
            (),
        )
        .expect("insert fixture hospital");

    path
}

fn line(coordinates: &[[f64; 2]]) -> Option<String> {
    let coords: Vec<Vec<f64>> = coordinates.iter().map(|c| c.to_vec()).collect();
    Some(
        serde_json::json!({"type": "LineString", "coordinates": coords}).to_string(),
    )
}
