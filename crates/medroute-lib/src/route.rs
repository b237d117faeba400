use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};

use crate::db::{LineCoords, NodeId, PointCoords, RoadNetwork};
use crate::error::{Error, Result};

/// Accessor for the stored geometries the assembler needs.
///
/// `Ok(None)` is the typed not-found outcome; the assembler turns it into a
/// missing-geometry error naming the offending edge or node. `Err` is reserved
/// for store failures.
pub trait GeometryStore {
    /// Stored line geometry for the directed edge `from -> to`.
    fn edge_geometry(&self, from: NodeId, to: NodeId) -> Result<Option<LineCoords>>;

    /// Stored point geometry for a hospital node.
    fn hospital_geometry(&self, node: NodeId) -> Result<Option<PointCoords>>;
}

impl GeometryStore for RoadNetwork {
    fn edge_geometry(&self, from: NodeId, to: NodeId) -> Result<Option<LineCoords>> {
        Ok(self.edge_geometry.get(&(from, to)).cloned())
    }

    fn hospital_geometry(&self, node: NodeId) -> Result<Option<PointCoords>> {
        Ok(self.hospitals.get(&node).map(|h| h.geometry.clone()))
    }
}

/// Turn a node path into a client-consumable GeoJSON feature collection.
///
/// For a single-node path the caller is already at a hospital: the result is
/// one `Point` feature at the original query position carrying a status
/// message, and no geometry lookups occur. Otherwise the result is exactly two
/// features: the route `LineString` (per-edge geometries concatenated in path
/// order, annotated with the total distance) and the hospital `Point`
/// (annotated with its node id).
///
/// Assembly is all-or-nothing: a missing edge or hospital geometry fails the
/// whole call rather than producing a partial route.
pub fn assemble_route(
    store: &impl GeometryStore,
    path: &[NodeId],
    hospital: NodeId,
    distance: f64,
    origin: [f64; 2],
) -> Result<FeatureCollection> {
    if path.len() == 1 {
        let feature = feature(
            Value::Point(vec![origin[0], origin[1]]),
            [(
                "message",
                JsonValue::from("You are already at a hospital."),
            )],
        );
        return Ok(collection(vec![feature]));
    }

    let mut route_coordinates: LineCoords = Vec::new();
    for pair in path.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let coords = store
            .edge_geometry(from, to)?
            .ok_or(Error::MissingEdgeGeometry { from, to })?;
        route_coordinates.extend(coords);
    }

    let hospital_coordinates = store
        .hospital_geometry(hospital)?
        .ok_or(Error::MissingHospitalGeometry { node: hospital })?;

    let route_feature = feature(
        Value::LineString(route_coordinates),
        [("distance", JsonValue::from(distance))],
    );
    let hospital_feature = feature(
        Value::Point(hospital_coordinates),
        [("hospital_node", JsonValue::from(hospital))],
    );

    Ok(collection(vec![route_feature, hospital_feature]))
}

fn feature<const N: usize>(value: Value, properties: [(&str, JsonValue); N]) -> Feature {
    let mut map = JsonObject::new();
    for (key, property) in properties {
        map.insert(key.to_string(), property);
    }
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(map),
        foreign_members: None,
    }
}

fn collection(features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Hospital;

    fn fixture_network() -> RoadNetwork {
        let mut network = RoadNetwork::default();
        network
            .edge_geometry
            .insert((1, 2), vec![vec![2.30, 48.80], vec![2.31, 48.81]]);
        network
            .edge_geometry
            .insert((2, 3), vec![vec![2.31, 48.81], vec![2.32, 48.82]]);
        network.hospitals.insert(
            3,
            Hospital {
                id: 42,
                node: 3,
                geometry: vec![2.32, 48.82],
            },
        );
        network
    }

    #[test]
    fn assembles_route_and_hospital_features() {
        let network = fixture_network();
        let out = assemble_route(&network, &[1, 2, 3], 3, 7.0, [2.30, 48.80]).unwrap();
        assert_eq!(out.features.len(), 2);

        let route = &out.features[0];
        match &route.geometry.as_ref().unwrap().value {
            Value::LineString(coords) => assert_eq!(coords.len(), 4),
            other => panic!("expected LineString, got {other:?}"),
        }
        assert_eq!(
            route.properties.as_ref().unwrap()["distance"],
            JsonValue::from(7.0)
        );

        let hospital = &out.features[1];
        assert!(matches!(
            hospital.geometry.as_ref().unwrap().value,
            Value::Point(_)
        ));
        assert_eq!(
            hospital.properties.as_ref().unwrap()["hospital_node"],
            JsonValue::from(3)
        );
    }

    #[test]
    fn single_node_path_yields_status_feature() {
        let network = fixture_network();
        let out = assemble_route(&network, &[3], 3, 0.0, [2.35, 48.85]).unwrap();
        assert_eq!(out.features.len(), 1);
        let feature = &out.features[0];
        match &feature.geometry.as_ref().unwrap().value {
            Value::Point(coords) => assert_eq!(coords, &vec![2.35, 48.85]),
            other => panic!("expected Point, got {other:?}"),
        }
        assert!(feature.properties.as_ref().unwrap()["message"]
            .as_str()
            .unwrap()
            .contains("already at a hospital"));
    }

    #[test]
    fn missing_edge_geometry_fails_whole_assembly() {
        let mut network = fixture_network();
        network.edge_geometry.remove(&(2, 3));
        let err = assemble_route(&network, &[1, 2, 3], 3, 7.0, [2.30, 48.80]).unwrap_err();
        assert!(matches!(err, Error::MissingEdgeGeometry { from: 2, to: 3 }));
    }

    #[test]
    fn missing_hospital_geometry_fails_whole_assembly() {
        let mut network = fixture_network();
        network.hospitals.clear();
        let err = assemble_route(&network, &[1, 2, 3], 3, 7.0, [2.30, 48.80]).unwrap_err();
        assert!(matches!(err, Error::MissingHospitalGeometry { node: 3 }));
    }
}
