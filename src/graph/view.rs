//! Read-only adjacency view used by the annealer and the modularity evaluator.
//!
//! Edges are always read as undirected: a directed edge `a -> b` makes `a` and
//! `b` neighbors of each other. Self-loops are kept out of the adjacency, the
//! degrees, the edge list and the total weight.

use crate::error::{Error, Result};
use petgraph::graph::{Graph, IndexType};
use petgraph::visit::EdgeRef;
use petgraph::EdgeType;

/// Undirected, weighted, loop-free adjacency over a dense vertex index space.
#[derive(Debug, Clone)]
pub struct GraphView {
    /// Adjacency: vertex -> [(neighbor, weight)]
    adj: Vec<Vec<(usize, f64)>>,
    /// Non-loop edges as (source, target, weight).
    edges: Vec<(usize, usize, f64)>,
    /// Sum of non-loop edge weights.
    total_weight: f64,
}

impl GraphView {
    /// Build a view of a petgraph graph.
    ///
    /// `weights` is indexed by edge index; `None` gives every edge weight 1.0.
    pub fn from_graph<N, E, Ty, Ix>(
        graph: &Graph<N, E, Ty, Ix>,
        weights: Option<&[f64]>,
    ) -> Result<Self>
    where
        Ty: EdgeType,
        Ix: IndexType,
    {
        if let Some(w) = weights {
            if w.len() != graph.edge_count() {
                return Err(Error::DimensionMismatch {
                    expected: graph.edge_count(),
                    found: w.len(),
                });
            }
        }

        let edges: Vec<(usize, usize, f64)> = graph
            .edge_references()
            .map(|e| {
                let w = weights.map_or(1.0, |w| w[e.id().index()]);
                (e.source().index(), e.target().index(), w)
            })
            .collect();

        Self::build(graph.node_count(), &edges)
    }

    /// Build a view from an explicit edge list over vertices `0..n`.
    pub fn from_edges(n: usize, edges: &[(usize, usize, f64)]) -> Result<Self> {
        for &(i, j, _) in edges {
            let hi = i.max(j);
            if hi >= n {
                return Err(Error::DimensionMismatch {
                    expected: n,
                    found: hi + 1,
                });
            }
        }
        Self::build(n, edges)
    }

    fn build(n: usize, edges: &[(usize, usize, f64)]) -> Result<Self> {
        let mut adj = vec![Vec::new(); n];
        let mut kept = Vec::with_capacity(edges.len());
        let mut total_weight = 0.0;

        for (idx, &(i, j, w)) in edges.iter().enumerate() {
            if !w.is_finite() || w < 0.0 {
                return Err(Error::InvalidWeight {
                    edge: idx,
                    value: w,
                });
            }
            if i == j {
                continue;
            }
            adj[i].push((j, w));
            adj[j].push((i, w));
            kept.push((i, j, w));
            total_weight += w;
        }

        Ok(Self {
            adj,
            edges: kept,
            total_weight,
        })
    }

    /// Number of vertices.
    pub fn node_count(&self) -> usize {
        self.adj.len()
    }

    /// Number of non-loop edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Sum of non-loop edge weights.
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Loop-free degree (parallel edges counted separately).
    pub fn degree(&self, v: usize) -> usize {
        self.adj[v].len()
    }

    /// Summed weight of the non-loop edges at `v`.
    pub fn strength(&self, v: usize) -> f64 {
        self.adj[v].iter().map(|&(_, w)| w).sum()
    }

    /// Neighbors of `v` with the weight of the connecting edge.
    pub fn neighbors(&self, v: usize) -> &[(usize, f64)] {
        &self.adj[v]
    }

    /// Non-loop edges.
    pub fn edges(&self) -> &[(usize, usize, f64)] {
        &self.edges
    }

    /// Sum of degrees over all vertices (twice the non-loop edge count).
    pub fn total_degree(&self) -> usize {
        2 * self.edges.len()
    }

    /// Distinct degrees present in the graph, ascending.
    pub fn degree_classes(&self) -> Vec<usize> {
        let mut degs: Vec<usize> = self.adj.iter().map(Vec::len).collect();
        degs.sort_unstable();
        degs.dedup();
        degs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::graph::{DiGraph, UnGraph};

    #[test]
    fn test_view_skips_self_loops() {
        let mut graph = UnGraph::<(), ()>::new_undirected();
        let a = graph.add_node(());
        let b = graph.add_node(());
        let _ = graph.add_edge(a, b, ());
        let _ = graph.add_edge(a, a, ());

        let view = GraphView::from_graph(&graph, None).unwrap();
        assert_eq!(view.node_count(), 2);
        assert_eq!(view.edge_count(), 1);
        assert_eq!(view.degree(0), 1);
        assert_eq!(view.degree(1), 1);
        assert_eq!(view.total_weight(), 1.0);
    }

    #[test]
    fn test_view_directed_read_as_undirected() {
        let mut graph = DiGraph::<(), ()>::new();
        let a = graph.add_node(());
        let b = graph.add_node(());
        let c = graph.add_node(());
        let _ = graph.add_edge(a, b, ());
        let _ = graph.add_edge(c, b, ());

        let view = GraphView::from_graph(&graph, Some(&[2.0, 0.5])).unwrap();
        assert_eq!(view.degree(1), 2);
        assert_eq!(view.neighbors(0), &[(1, 2.0)]);
        assert_eq!(view.neighbors(2), &[(1, 0.5)]);
        assert_eq!(view.total_weight(), 2.5);
        assert_eq!(view.degree_classes(), vec![1, 2]);
        assert_eq!(view.strength(1), 2.5);
        assert_eq!(view.strength(2), 0.5);
    }

    #[test]
    fn test_view_weight_length_mismatch() {
        let mut graph = UnGraph::<(), ()>::new_undirected();
        let a = graph.add_node(());
        let b = graph.add_node(());
        let _ = graph.add_edge(a, b, ());

        let err = GraphView::from_graph(&graph, Some(&[])).unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                expected: 1,
                found: 0
            }
        );
    }

    #[test]
    fn test_view_rejects_negative_weight() {
        let err = GraphView::from_edges(2, &[(0, 1, -1.0)]).unwrap_err();
        assert!(matches!(err, Error::InvalidWeight { edge: 0, .. }));
    }

    #[test]
    fn test_view_rejects_out_of_range_vertex() {
        let err = GraphView::from_edges(2, &[(0, 2, 1.0)]).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { expected: 2, found: 3 }));
    }
}
