//! Newman modularity of a partition.
//!
//! ```text
//! Q = 1/(2W) × [ Σ_{e=(i,j), c_i = c_j} 2·w(e)  −  Σ_c K_c² / (2E) ]
//! ```
//!
//! `W` is the total edge weight, `E` the number of edges and `K_c` the summed
//! degree of community `c`, self-loops excluded everywhere. On unweighted
//! graphs `W = E` and this is the usual `Σ_c (e_cc − a_c²)`.
//!
//! Degenerate partitions score zero: a graph without edges, a graph of zero
//! total weight, and a partition with a single community.

use crate::error::{Error, Result};
use crate::graph::GraphView;
use petgraph::graph::{Graph, IndexType};
use petgraph::EdgeType;
use rustc_hash::FxHashMap;

/// Modularity of `labels` (one per vertex) on `view`.
pub fn modularity(view: &GraphView, labels: &[usize]) -> Result<f64> {
    if labels.len() != view.node_count() {
        return Err(Error::DimensionMismatch {
            expected: view.node_count(),
            found: labels.len(),
        });
    }

    let n_edges = view.edge_count();
    let w = view.total_weight();
    if n_edges == 0 || w == 0.0 {
        return Ok(0.0);
    }

    let mut community_degree: FxHashMap<usize, usize> = FxHashMap::default();
    for (v, &c) in labels.iter().enumerate() {
        *community_degree.entry(c).or_insert(0) += view.degree(v);
    }
    if community_degree.len() < 2 {
        return Ok(0.0);
    }

    let internal: f64 = view
        .edges()
        .iter()
        .filter(|&&(i, j, _)| labels[i] == labels[j])
        .map(|&(_, _, w)| 2.0 * w)
        .sum();

    let mut ks: Vec<usize> = community_degree.into_values().collect();
    ks.sort_unstable();
    let expected: f64 = ks
        .iter()
        .map(|&k| (k as f64) * (k as f64))
        .sum::<f64>()
        / (2 * n_edges) as f64;

    Ok((internal - expected) / (2.0 * w))
}

/// Modularity of `labels` on a petgraph graph, read as undirected.
///
/// `weights` is indexed by edge index; `None` means unit weights.
pub fn modularity_of<N, E, Ty, Ix>(
    graph: &Graph<N, E, Ty, Ix>,
    weights: Option<&[f64]>,
    labels: &[usize],
) -> Result<f64>
where
    Ty: EdgeType,
    Ix: IndexType,
{
    let view = GraphView::from_graph(graph, weights)?;
    modularity(&view, labels)
}
