//! KD-tree index for snapping query points to their nearest network node.
//!
//! The index is built once from the loaded network and answers the
//! start-node resolution queries the routing pipeline needs. Coordinates are
//! stored `[longitude, latitude]` as `f32`, which is ample precision for
//! city-scale snapping.

use kiddo::float::kdtree::KdTree;
use kiddo::SquaredEuclidean;
use tracing::debug;

use crate::db::{NodeId, RoadNetwork};

/// KD-tree bucket size (kiddo default).
const BUCKET_SIZE: usize = 32;

/// Nearest-node spatial index over the road network.
pub struct NodeIndex {
    tree: KdTree<f32, usize, 2, BUCKET_SIZE, u32>,
    ids: Vec<NodeId>,
}

impl NodeIndex {
    /// Build an index over every node of the network.
    pub fn build(network: &RoadNetwork) -> Self {
        let mut tree: KdTree<f32, usize, 2, BUCKET_SIZE, u32> = KdTree::new();
        let mut ids = Vec::with_capacity(network.nodes.len());

        for node in network.nodes.values() {
            let index = ids.len();
            tree.add(&[node.longitude as f32, node.latitude as f32], index);
            ids.push(node.id);
        }

        debug!(node_count = ids.len(), "built node index");
        Self { tree, ids }
    }

    /// Number of indexed nodes.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if no nodes are indexed.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Id of the network node nearest to the given point, or `None` when the
    /// network has no nodes.
    pub fn nearest_node(&self, latitude: f64, longitude: f64) -> Option<NodeId> {
        if self.ids.is_empty() {
            return None;
        }

        let query = [longitude as f32, latitude as f32];
        let neighbour = self.tree.nearest_one::<SquaredEuclidean>(&query);
        Some(self.ids[neighbour.item])
    }
}
