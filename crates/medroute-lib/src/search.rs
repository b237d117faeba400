use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::db::NodeId;
use crate::graph::Graph;

/// Result of a successful multi-target search.
///
/// `path` runs from the start node (inclusive) to the settled target
/// (inclusive); a single-element path means the start was itself a target.
#[derive(Debug, Clone, PartialEq)]
pub struct NearestTarget {
    pub node: NodeId,
    pub path: Vec<NodeId>,
    pub distance: f64,
}

/// Find the closest member of `targets` reachable from `start`.
///
/// Runs a single-source Dijkstra search with a lazy frontier: relaxations
/// push fresh entries instead of decreasing keys, and stale entries for
/// already-settled nodes are discarded on pop. The first target to be settled
/// is returned immediately;
/// because settlement order is non-decreasing in distance for non-negative
/// weights, that target is the nearest one. Ties on equal distance are broken
/// by lower node id so results are deterministic for a given input.
///
/// Returns `None` when the frontier empties without settling any target,
/// having explored exactly the connected component of `start`.
pub fn find_nearest_target(
    graph: &Graph,
    start: NodeId,
    targets: &HashSet<NodeId>,
) -> Option<NearestTarget> {
    let mut settled: HashSet<NodeId> = HashSet::new();
    let mut distances: HashMap<NodeId, f64> = HashMap::new();
    let mut parents: HashMap<NodeId, Option<NodeId>> = HashMap::new();
    let mut queue = BinaryHeap::new();

    distances.insert(start, 0.0);
    parents.insert(start, None);
    queue.push(QueueEntry::new(start, 0.0));

    while let Some(entry) = queue.pop() {
        if !settled.insert(entry.node) {
            continue;
        }

        if targets.contains(&entry.node) {
            return Some(NearestTarget {
                node: entry.node,
                path: reconstruct_path(&parents, start, entry.node),
                distance: entry.cost.0,
            });
        }

        for edge in graph.neighbours(entry.node) {
            if settled.contains(&edge.target) {
                continue;
            }
            let next_cost = entry.cost.0 + edge.length;
            if next_cost < *distances.get(&edge.target).unwrap_or(&f64::INFINITY) {
                distances.insert(edge.target, next_cost);
                parents.insert(edge.target, Some(entry.node));
                queue.push(QueueEntry::new(edge.target, next_cost));
            }
        }
    }

    None
}

fn reconstruct_path(
    parents: &HashMap<NodeId, Option<NodeId>>,
    start: NodeId,
    goal: NodeId,
) -> Vec<NodeId> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node);
        if node == start {
            break;
        }
        current = parents.get(&node).copied().flatten();
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: NodeId,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: NodeId, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost, with
        // lower node id winning ties.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
