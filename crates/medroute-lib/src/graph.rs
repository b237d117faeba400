use std::collections::HashMap;

use crate::db::{NetworkEdge, NodeId};
use crate::error::{Error, Result};

/// Outgoing edge within the routing graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub target: NodeId,
    pub length: f64,
}

/// Adjacency structure used by the shortest-path search.
///
/// Edges are directed; no implicit reverse edge is added. Nodes that only
/// appear as a destination have no entry, and [`Graph::neighbours`] returns an
/// empty slice for them.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: HashMap<NodeId, Vec<Edge>>,
}

impl Graph {
    /// Return the outgoing edges for a given node.
    pub fn neighbours(&self, node: NodeId) -> &[Edge] {
        self.adjacency
            .get(&node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of nodes with at least one outgoing edge.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }
}

/// Build the routing graph from a flat list of directed weighted edges.
///
/// Each edge is appended to the adjacency list of its `from` node in input
/// order, so building from the same edge list twice yields a structurally
/// identical graph. Duplicate `(from, to)` pairs are retained as distinct
/// entries; the search resolves them through normal relaxation.
///
/// Edges with zero or negative length are a data-integrity violation and the
/// builder refuses to construct a graph from them.
pub fn build_graph(edges: &[NetworkEdge]) -> Result<Graph> {
    let mut adjacency: HashMap<NodeId, Vec<Edge>> = HashMap::new();
    for edge in edges {
        if !(edge.length > 0.0) {
            return Err(Error::InvalidEdgeLength {
                from: edge.from,
                to: edge.to,
                length: edge.length,
            });
        }
        adjacency.entry(edge.from).or_default().push(Edge {
            target: edge.to,
            length: edge.length,
        });
    }
    Ok(Graph { adjacency })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(from: NodeId, to: NodeId, length: f64) -> NetworkEdge {
        NetworkEdge { from, to, length }
    }

    #[test]
    fn builder_keeps_insertion_order() {
        let graph = build_graph(&[edge(1, 2, 5.0), edge(1, 3, 10.0), edge(2, 3, 2.0)]).unwrap();
        let targets: Vec<_> = graph.neighbours(1).iter().map(|e| e.target).collect();
        assert_eq!(targets, vec![2, 3]);
    }

    #[test]
    fn destination_only_nodes_have_no_neighbours() {
        let graph = build_graph(&[edge(1, 2, 5.0)]).unwrap();
        assert!(graph.neighbours(2).is_empty());
        assert!(graph.neighbours(99).is_empty());
    }

    #[test]
    fn builder_rejects_zero_length() {
        let err = build_graph(&[edge(1, 2, 0.0)]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidEdgeLength { from: 1, to: 2, .. }
        ));
    }

    #[test]
    fn builder_rejects_negative_length() {
        assert!(build_graph(&[edge(3, 4, -1.5)]).is_err());
    }

    #[test]
    fn duplicate_edges_are_retained() {
        let graph = build_graph(&[edge(1, 2, 5.0), edge(1, 2, 3.0)]).unwrap();
        assert_eq!(graph.neighbours(1).len(), 2);
    }
}
