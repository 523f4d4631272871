//! Directed weighted graph with a payload stored on every edge

use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};

use crate::{Error, Result};

pub type VertexId = usize;
pub type EdgeId = usize;

/// Graph edge
#[derive(Debug, Clone, PartialEq)]
pub struct Edge<P> {
    pub from: VertexId,
    pub to: VertexId,
    /// Non-negative, finite
    pub weight: f64,
    pub payload: P,
}

/// Directed graph with a fixed vertex set and append-only edges
///
/// Vertex ids are dense and zero-based, edge ids follow insertion order.
#[derive(Debug, Clone)]
pub struct DirectedWeightedGraph<P> {
    pub(crate) graph: DiGraph<(), Edge<P>>,
}

impl<P> DirectedWeightedGraph<P> {
    pub fn new(vertex_count: usize) -> Self {
        let mut graph = DiGraph::with_capacity(vertex_count, vertex_count);
        for _ in 0..vertex_count {
            graph.add_node(());
        }
        Self { graph }
    }

    /// Adds an edge and returns its id
    ///
    /// # Errors
    ///
    /// Returns an error if a vertex is out of range or the weight is negative or not finite
    pub fn add_edge(
        &mut self,
        from: VertexId,
        to: VertexId,
        weight: f64,
        payload: P,
    ) -> Result<EdgeId> {
        for vertex in [from, to] {
            if vertex >= self.vertex_count() {
                return Err(Error::InvalidVertex(vertex));
            }
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::InvalidData(format!(
                "Edge weight must be a non-negative number, got {weight}"
            )));
        }

        Ok(self.push_edge(from, to, weight, payload))
    }

    /// Adds an edge the caller already knows to be valid
    pub(crate) fn push_edge(
        &mut self,
        from: VertexId,
        to: VertexId,
        weight: f64,
        payload: P,
    ) -> EdgeId {
        let edge = Edge {
            from,
            to,
            weight,
            payload,
        };
        self.graph
            .add_edge(NodeIndex::new(from), NodeIndex::new(to), edge)
            .index()
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge<P>> {
        self.graph.edge_weight(EdgeIndex::new(id))
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_ids_follow_insertion() {
        let mut graph = DirectedWeightedGraph::new(3);
        assert_eq!(graph.add_edge(0, 1, 1.5, "a").unwrap(), 0);
        assert_eq!(graph.add_edge(1, 2, 0.0, "b").unwrap(), 1);
        assert_eq!(graph.edge_count(), 2);

        let edge = graph.edge(1).unwrap();
        assert_eq!((edge.from, edge.to, edge.payload), (1, 2, "b"));
        assert!(graph.edge(2).is_none());
    }

    #[test]
    fn test_rejects_bad_edges() {
        let mut graph = DirectedWeightedGraph::new(2);
        assert!(matches!(graph.add_edge(0, 2, 1.0, ()), Err(Error::InvalidVertex(2))));
        assert!(graph.add_edge(0, 1, -1.0, ()).is_err());
        assert!(graph.add_edge(0, 1, f64::NAN, ()).is_err());
        assert_eq!(graph.edge_count(), 0);
    }
}
