//! Community detection traits.

use crate::error::Result;
use petgraph::graph::{Graph, IndexType};
use petgraph::EdgeType;

/// Trait for community detection algorithms.
pub trait CommunityDetection {
    /// Detect communities in a graph. Directed graphs are read as undirected.
    ///
    /// Returns a mapping from node index to community ID, numbered `0..k` in
    /// order of first appearance.
    fn detect<N, E, Ty, Ix>(&self, graph: &Graph<N, E, Ty, Ix>) -> Result<Vec<usize>>
    where
        Ty: EdgeType,
        Ix: IndexType;

    /// Get the resolution parameter (if applicable).
    fn resolution(&self) -> f64 {
        1.0
    }
}
