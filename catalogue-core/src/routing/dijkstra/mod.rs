//! Shortest-path engine over [`DirectedWeightedGraph`]

mod shortest_paths;
mod state;

use std::sync::OnceLock;

use super::graph::{DirectedWeightedGraph, EdgeId, VertexId};
use shortest_paths::{ShortestPathTree, shortest_path_tree};

/// Path found by [`Router::build_route`]
#[derive(Debug, Clone, PartialEq)]
pub struct RouteInfo {
    pub total_weight: f64,
    /// Edge ids in travel order
    pub edges: Vec<EdgeId>,
}

/// Answers shortest-path queries on an immutable graph
///
/// Single-source trees are computed on the first query from each source and
/// kept for the router's lifetime. Each source has its own slot, so queries
/// from different sources never wait for each other.
#[derive(Debug)]
pub struct Router<P> {
    graph: DirectedWeightedGraph<P>,
    /// Indexed by source vertex
    trees: Vec<OnceLock<ShortestPathTree>>,
}

impl<P> Router<P> {
    pub fn new(graph: DirectedWeightedGraph<P>) -> Self {
        let trees = (0..graph.vertex_count()).map(|_| OnceLock::new()).collect();
        Self { graph, trees }
    }

    pub fn graph(&self) -> &DirectedWeightedGraph<P> {
        &self.graph
    }

    /// Cheapest path between two vertices, `None` if unreachable or out of range
    pub fn build_route(&self, from: VertexId, to: VertexId) -> Option<RouteInfo> {
        if from >= self.graph.vertex_count() || to >= self.graph.vertex_count() {
            return None;
        }
        let tree = self.tree(from)?;
        Some(RouteInfo {
            total_weight: tree.cost_to(to)?,
            edges: tree.edges_to(&self.graph, to)?,
        })
    }

    /// Number of sources with a cached tree
    pub fn cached_sources(&self) -> usize {
        self.trees
            .iter()
            .filter(|tree| tree.get().is_some())
            .count()
    }

    fn tree(&self, source: VertexId) -> Option<&ShortestPathTree> {
        let slot = self.trees.get(source)?;
        Some(slot.get_or_init(|| shortest_path_tree(&self.graph, source)))
    }
}
