//! A petgraph graph bundled with named property maps.

use super::property::{PropertyKind, PropertyStore, PropertyValues};
use crate::community::{modularity_of, SpinGlass};
use crate::error::{Error, Result};
use log::debug;
use petgraph::graph::Graph;
use petgraph::{EdgeType, Undirected};

/// Graph plus property maps keyed by vertex or edge index.
#[derive(Debug, Clone)]
pub struct AttributedGraph<N, E, Ty: EdgeType = Undirected> {
    /// The graph. Adding or removing vertices or edges invalidates existing maps.
    pub graph: Graph<N, E, Ty>,
    /// Named maps.
    pub properties: PropertyStore,
}

impl<N, E, Ty: EdgeType> AttributedGraph<N, E, Ty> {
    /// Wrap a graph with an empty property store.
    pub fn new(graph: Graph<N, E, Ty>) -> Self {
        Self {
            graph,
            properties: PropertyStore::new(),
        }
    }

    /// Attach a real-valued edge map, one value per edge index.
    pub fn set_edge_weights(&mut self, name: &str, weights: Vec<f64>) -> Result<()> {
        if weights.len() != self.graph.edge_count() {
            return Err(Error::DimensionMismatch {
                expected: self.graph.edge_count(),
                found: weights.len(),
            });
        }
        self.properties
            .insert(name, PropertyKind::Edge, PropertyValues::Real(weights));
        Ok(())
    }

    fn weights(&self, weight: Option<&str>) -> Result<Option<Vec<f64>>> {
        weight
            .map(|name| self.properties.edge_weights(name, self.graph.edge_count()))
            .transpose()
    }

    /// Run `detector` and store the raw spins as an integer vertex map `property`.
    ///
    /// `weight` names an edge map; `None` means unit weights. Nothing is
    /// written if reading the weights or the detection fails.
    pub fn detect_communities(
        &mut self,
        detector: &SpinGlass,
        weight: Option<&str>,
        property: &str,
    ) -> Result<()> {
        let weights = self.weights(weight)?;
        let spins = detector.run(&self.graph, weights.as_deref())?;
        let labels = spins.into_iter().map(|s| s as i64).collect();
        if self
            .properties
            .insert(property, PropertyKind::Vertex, PropertyValues::Int(labels))
            .is_some()
        {
            debug!("replaced property map '{property}'");
        }
        Ok(())
    }

    /// Modularity of the integer vertex map `property`.
    pub fn modularity(&self, weight: Option<&str>, property: &str) -> Result<f64> {
        let labels = self
            .properties
            .vertex_labels(property, self.graph.node_count())?;
        let weights = self.weights(weight)?;
        modularity_of(&self.graph, weights.as_deref(), &labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use petgraph::graph::UnGraph;

    fn clique_pair() -> AttributedGraph<(), ()> {
        let mut graph = UnGraph::<(), ()>::new_undirected();
        let n: Vec<_> = (0..20).map(|_| graph.add_node(())).collect();
        for offset in [0, 10] {
            for i in 0..10 {
                for j in (i + 1)..10 {
                    let _ = graph.add_edge(n[offset + i], n[offset + j], ());
                }
            }
        }
        let _ = graph.add_edge(n[9], n[10], ());
        AttributedGraph::new(graph)
    }

    #[test]
    fn test_detect_writes_vertex_labels() {
        let mut g = clique_pair();
        let detector = SpinGlass::new().with_iterations(100).with_seed(4);
        g.detect_communities(&detector, None, "spin").unwrap();

        let map = g.properties.get("spin").unwrap();
        assert_eq!(map.kind, PropertyKind::Vertex);
        assert!(matches!(&map.values, PropertyValues::Int(v) if v.len() == 20));

        let q = g.modularity(None, "spin").unwrap();
        assert!(q > 0.4, "q = {q}");
    }

    #[test]
    fn test_detect_replaces_existing_map() {
        let mut g = clique_pair();
        g.properties.insert(
            "spin",
            PropertyKind::Edge,
            PropertyValues::Text(vec!["x".into()]),
        );
        g.detect_communities(&SpinGlass::new().with_iterations(5), None, "spin")
            .unwrap();
        assert_eq!(g.properties.get("spin").unwrap().kind, PropertyKind::Vertex);
    }

    #[test]
    fn test_failed_detection_writes_nothing() {
        let mut g = clique_pair();
        let err = g
            .detect_communities(&SpinGlass::new(), Some("missing"), "spin")
            .unwrap_err();
        assert_eq!(
            err,
            Error::PropertyNotFound {
                name: "missing".to_string()
            }
        );
        assert!(!g.properties.contains("spin"));

        let bad = SpinGlass::new().with_resolution(-1.0);
        assert!(g.detect_communities(&bad, None, "spin").is_err());
        assert!(!g.properties.contains("spin"));
    }

    #[test]
    fn test_weighted_modularity_by_name() {
        let mut graph = UnGraph::<(), ()>::new_undirected();
        let n: Vec<_> = (0..4).map(|_| graph.add_node(())).collect();
        let _ = graph.add_edge(n[0], n[1], ());
        let _ = graph.add_edge(n[2], n[3], ());
        let _ = graph.add_edge(n[1], n[2], ());
        let mut g = AttributedGraph::new(graph);
        g.set_edge_weights("w", vec![3.0, 3.0, 1.0]).unwrap();
        g.properties.insert(
            "block",
            PropertyKind::Vertex,
            PropertyValues::Int(vec![0, 0, 1, 1]),
        );

        assert_relative_eq!(
            g.modularity(Some("w"), "block").unwrap(),
            9.0 / 14.0,
            epsilon = 1e-12
        );
        assert!(g.set_edge_weights("short", vec![1.0]).is_err());
    }

    #[test]
    fn test_modularity_rejects_text_labels() {
        let mut g = clique_pair();
        g.properties.insert(
            "name",
            PropertyKind::Vertex,
            PropertyValues::Text(vec![String::new(); 20]),
        );
        assert!(matches!(
            g.modularity(None, "name"),
            Err(Error::PropertyType { .. })
        ));
    }
}
