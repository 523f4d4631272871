use std::collections::BinaryHeap;

use petgraph::{graph::NodeIndex, visit::EdgeRef};

use super::state::State;
use crate::routing::graph::{DirectedWeightedGraph, EdgeId, VertexId};

/// Shortest paths from one source vertex to every reachable vertex
#[derive(Debug, Clone)]
pub(crate) struct ShortestPathTree {
    source: VertexId,
    costs: Vec<Option<f64>>,
    /// Last edge on the best known path to each vertex
    incoming: Vec<Option<EdgeId>>,
}

impl ShortestPathTree {
    pub(crate) fn cost_to(&self, target: VertexId) -> Option<f64> {
        self.costs.get(target).copied().flatten()
    }

    /// Edge ids from the source to `target`, in travel order
    pub(crate) fn edges_to<P>(
        &self,
        graph: &DirectedWeightedGraph<P>,
        target: VertexId,
    ) -> Option<Vec<EdgeId>> {
        self.cost_to(target)?;

        let mut edges = Vec::new();
        let mut current = target;
        while current != self.source {
            let edge_id = self.incoming[current]?;
            edges.push(edge_id);
            current = graph.edge(edge_id)?.from;
        }
        edges.reverse();
        Some(edges)
    }
}

/// Dijkstra's algorithm over non-negative weights
///
/// Only strict improvements replace a known path, so for a fixed graph the
/// chosen path among equal-cost alternatives never changes.
pub(crate) fn shortest_path_tree<P>(
    graph: &DirectedWeightedGraph<P>,
    source: VertexId,
) -> ShortestPathTree {
    let vertex_count = graph.vertex_count();
    let mut costs: Vec<Option<f64>> = vec![None; vertex_count];
    let mut incoming: Vec<Option<EdgeId>> = vec![None; vertex_count];
    let mut heap = BinaryHeap::with_capacity(vertex_count / 4 + 1);

    if source < vertex_count {
        costs[source] = Some(0.0);
        heap.push(State {
            cost: 0.0,
            vertex: source,
        });
    }

    while let Some(State { cost, vertex }) = heap.pop() {
        // Skip if we've found a better path
        if costs[vertex].is_some_and(|best| cost > best) {
            continue;
        }

        for edge in graph.graph.edges(NodeIndex::new(vertex)) {
            let next = edge.target().index();
            let next_cost = cost + edge.weight().weight;

            if costs[next].is_none_or(|best| next_cost < best) {
                costs[next] = Some(next_cost);
                incoming[next] = Some(edge.id().index());
                heap.push(State {
                    cost: next_cost,
                    vertex: next,
                });
            }
        }
    }

    ShortestPathTree {
        source,
        costs,
        incoming,
    }
}
