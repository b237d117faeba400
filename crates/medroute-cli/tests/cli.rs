//! Integration tests for the `medroute` binary.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = fs::File::create(&path).expect("create csv");
    file.write_all(contents.as_bytes()).expect("write csv");
    path
}

/// Write the extract fixtures and return (nodes, edges, hospitals) paths.
fn fixture_extracts(dir: &Path) -> (PathBuf, PathBuf, PathBuf) {
    let nodes = write_csv(
        dir,
        "nodes.csv",
        "node_id,latitude,longitude\n\
         1,48.850,2.350\n\
         2,48.855,2.355\n\
         3,48.860,2.360\n",
    );
    let edges = write_csv(
        dir,
        "edges.csv",
        "from_node,to_node,length,geometry\n\
         1,2,5.0,\"{\"\"type\"\":\"\"LineString\"\",\"\"coordinates\"\":[[2.350,48.850],[2.355,48.855]]}\"\n\
         2,3,2.0,\"{\"\"type\"\":\"\"LineString\"\",\"\"coordinates\"\":[[2.355,48.855],[2.360,48.860]]}\"\n\
         1,3,10.0,\"{\"\"type\"\":\"\"LineString\"\",\"\"coordinates\"\":[[2.350,48.850],[2.360,48.860]]}\"\n",
    );
    let hospitals = write_csv(
        dir,
        "hospitals.csv",
        "hospital_id,geometry\n\
         42,\"{\"\"type\"\":\"\"Point\"\",\"\"coordinates\"\":[2.360,48.860]}\"\n",
    );
    (nodes, edges, hospitals)
}

fn medroute() -> Command {
    Command::cargo_bin("medroute").expect("binary exists")
}

#[test]
fn help_lists_the_subcommands() {
    medroute()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("fetch"))
        .stdout(predicate::str::contains("ingest"))
        .stdout(predicate::str::contains("route"));
}

#[test]
fn ingest_then_route_prints_a_feature_collection() {
    let temp = TempDir::new().expect("create temp dir");
    let (nodes, edges, hospitals) = fixture_extracts(temp.path());
    let db_path = temp.path().join("network.db");

    medroute()
        .arg("--database")
        .arg(&db_path)
        .arg("ingest")
        .arg("--nodes")
        .arg(&nodes)
        .arg("--edges")
        .arg(&edges)
        .arg("--hospitals")
        .arg(&hospitals)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 nodes, 3 edges, 1 hospitals"));

    medroute()
        .arg("--database")
        .arg(&db_path)
        .arg("route")
        .arg("--latitude")
        .arg("48.8501")
        .arg("--longitude")
        .arg("2.3501")
        .assert()
        .success()
        .stdout(predicate::str::contains("FeatureCollection"))
        .stdout(predicate::str::contains("LineString"));
}

#[test]
fn route_at_the_hospital_reports_already_there() {
    let temp = TempDir::new().expect("create temp dir");
    let (nodes, edges, hospitals) = fixture_extracts(temp.path());
    let db_path = temp.path().join("network.db");

    medroute()
        .arg("--database")
        .arg(&db_path)
        .arg("ingest")
        .arg("--nodes")
        .arg(&nodes)
        .arg("--edges")
        .arg(&edges)
        .arg("--hospitals")
        .arg(&hospitals)
        .assert()
        .success();

    medroute()
        .arg("--database")
        .arg(&db_path)
        .arg("route")
        .arg("--latitude")
        .arg("48.860")
        .arg("--longitude")
        .arg("2.360")
        .assert()
        .success()
        .stdout(predicate::str::contains("You are already at a hospital."));
}

#[test]
fn ingest_rejects_extracts_with_a_dangling_edge() {
    let temp = TempDir::new().expect("create temp dir");
    let nodes = write_csv(
        temp.path(),
        "nodes.csv",
        "node_id,latitude,longitude\n1,48.850,2.350\n",
    );
    let edges = write_csv(
        temp.path(),
        "edges.csv",
        "from_node,to_node,length,geometry\n\
         1,9,4.0,\"{\"\"type\"\":\"\"LineString\"\",\"\"coordinates\"\":[[2.350,48.850],[2.355,48.855]]}\"\n",
    );
    let hospitals = write_csv(temp.path(), "hospitals.csv", "hospital_id,geometry\n");
    let db_path = temp.path().join("network.db");

    medroute()
        .arg("--database")
        .arg(&db_path)
        .arg("ingest")
        .arg("--nodes")
        .arg(&nodes)
        .arg("--edges")
        .arg(&edges)
        .arg("--hospitals")
        .arg(&hospitals)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown node"));
}

#[test]
fn route_fails_cleanly_without_a_store() {
    let temp = TempDir::new().expect("create temp dir");
    let db_path = temp.path().join("missing.db");

    medroute()
        .arg("--database")
        .arg(&db_path)
        .arg("route")
        .arg("--latitude")
        .arg("48.85")
        .arg("--longitude")
        .arg("2.35")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load the network"));
}
