//! # spinglass
//!
//! Community detection on graphs by simulated annealing of a Potts spin
//! glass (Reichardt & Bornholdt), plus a modularity evaluator for any
//! partition.
//!
//! Graphs come in as [`petgraph`] graphs (directed edges are read as
//! undirected, self-loops are ignored) with optional per-edge weights.
//! Labels can also be read from and written to named property maps through
//! [`AttributedGraph`].
//!
//! ```rust
//! use petgraph::graph::UnGraph;
//! use spinglass::{modularity_of, CommunityDetection, SpinGlass};
//!
//! let mut graph = UnGraph::<(), ()>::new_undirected();
//! let n: Vec<_> = (0..4).map(|_| graph.add_node(())).collect();
//! graph.add_edge(n[0], n[1], ());
//! graph.add_edge(n[2], n[3], ());
//!
//! let labels = SpinGlass::new().with_seed(1).detect(&graph)?;
//! let q = modularity_of(&graph, None, &labels)?;
//! assert!(q <= 1.0);
//! # Ok::<(), spinglass::Error>(())
//! ```
//!
//! The optional `parallel` feature runs [`best_of_trials`] on rayon's pool.

pub mod community;
/// Error types used across `spinglass`.
pub mod error;
pub mod graph;

pub use error::{Error, Result};

pub use community::{
    best_of_trials, modularity, modularity_of, CommunityDetection, CoolingSchedule, NullModelKind,
    SpinGlass, SweepReport, TrialResult,
};
pub use graph::{AttributedGraph, GraphView, PropertyKind, PropertyStore, PropertyValues};
