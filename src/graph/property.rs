//! Named vertex and edge property maps.
//!
//! A minimal stand-in for a host graph library's property system: detection
//! reads edge weights by name and writes vertex labels by name.

use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// What a property map is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// One value per vertex, indexed by `NodeIndex::index()`.
    Vertex,
    /// One value per edge, indexed by `EdgeIndex::index()`.
    Edge,
}

/// Values of a property map.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValues {
    /// Real values.
    Real(Vec<f64>),
    /// Integer values.
    Int(Vec<i64>),
    /// Text values.
    Text(Vec<String>),
}

impl PropertyValues {
    /// Number of stored values.
    pub fn len(&self) -> usize {
        match self {
            PropertyValues::Real(v) => v.len(),
            PropertyValues::Int(v) => v.len(),
            PropertyValues::Text(v) => v.len(),
        }
    }

    /// Whether no values are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named map: key kind plus values.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyMap {
    /// Key kind.
    pub kind: PropertyKind,
    /// Values.
    pub values: PropertyValues,
}

impl PropertyMap {
    fn describe(&self) -> &'static str {
        match (self.kind, &self.values) {
            (PropertyKind::Vertex, PropertyValues::Real(_)) => "a real vertex property",
            (PropertyKind::Vertex, PropertyValues::Int(_)) => "an integer vertex property",
            (PropertyKind::Vertex, PropertyValues::Text(_)) => "a text vertex property",
            (PropertyKind::Edge, PropertyValues::Real(_)) => "a real edge property",
            (PropertyKind::Edge, PropertyValues::Int(_)) => "an integer edge property",
            (PropertyKind::Edge, PropertyValues::Text(_)) => "a text edge property",
        }
    }
}

/// Property maps by name. Names are unique across vertex and edge maps.
#[derive(Debug, Clone, Default)]
pub struct PropertyStore {
    maps: BTreeMap<String, PropertyMap>,
}

impl PropertyStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a map, returning the one it replaced.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        kind: PropertyKind,
        values: PropertyValues,
    ) -> Option<PropertyMap> {
        self.maps.insert(name.into(), PropertyMap { kind, values })
    }

    /// Look up a map.
    pub fn get(&self, name: &str) -> Option<&PropertyMap> {
        self.maps.get(name)
    }

    /// Remove a map.
    pub fn remove(&mut self, name: &str) -> Option<PropertyMap> {
        self.maps.remove(name)
    }

    /// Whether a map with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.maps.contains_key(name)
    }

    /// Names of all maps, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.maps.keys().map(String::as_str)
    }

    fn lookup(&self, name: &str) -> Result<&PropertyMap> {
        self.maps.get(name).ok_or_else(|| Error::PropertyNotFound {
            name: name.to_string(),
        })
    }

    /// Read an edge map as real weights. Integer maps are converted.
    pub fn edge_weights(&self, name: &str, edge_count: usize) -> Result<Vec<f64>> {
        let map = self.lookup(name)?;
        let weights = match (map.kind, &map.values) {
            (PropertyKind::Edge, PropertyValues::Real(v)) => v.clone(),
            (PropertyKind::Edge, PropertyValues::Int(v)) => v.iter().map(|&x| x as f64).collect(),
            _ => {
                return Err(Error::PropertyType {
                    name: name.to_string(),
                    expected: "a numeric edge property",
                    found: map.describe(),
                })
            }
        };
        if weights.len() != edge_count {
            return Err(Error::DimensionMismatch {
                expected: edge_count,
                found: weights.len(),
            });
        }
        Ok(weights)
    }

    /// Read a vertex map as community labels.
    pub fn vertex_labels(&self, name: &str, node_count: usize) -> Result<Vec<usize>> {
        let map = self.lookup(name)?;
        let raw = match (map.kind, &map.values) {
            (PropertyKind::Vertex, PropertyValues::Int(v)) => v,
            _ => {
                return Err(Error::PropertyType {
                    name: name.to_string(),
                    expected: "an integer vertex property",
                    found: map.describe(),
                })
            }
        };
        if raw.len() != node_count {
            return Err(Error::DimensionMismatch {
                expected: node_count,
                found: raw.len(),
            });
        }
        raw.iter()
            .enumerate()
            .map(|(vertex, &value)| {
                usize::try_from(value).map_err(|_| Error::InvalidLabel { vertex, value })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_by_name() {
        let mut store = PropertyStore::new();
        assert!(store
            .insert("c", PropertyKind::Edge, PropertyValues::Real(vec![1.0]))
            .is_none());
        let old = store.insert("c", PropertyKind::Vertex, PropertyValues::Int(vec![0, 1]));
        assert_eq!(old.map(|m| m.kind), Some(PropertyKind::Edge));
        assert_eq!(store.get("c").unwrap().kind, PropertyKind::Vertex);
        assert_eq!(store.names().collect::<Vec<_>>(), vec!["c"]);
    }

    #[test]
    fn test_edge_weights_converts_integers() {
        let mut store = PropertyStore::new();
        store.insert("w", PropertyKind::Edge, PropertyValues::Int(vec![2, 3]));
        assert_eq!(store.edge_weights("w", 2).unwrap(), vec![2.0, 3.0]);
    }

    #[test]
    fn test_edge_weights_type_mismatch() {
        let mut store = PropertyStore::new();
        store.insert("w", PropertyKind::Vertex, PropertyValues::Real(vec![1.0]));
        let err = store.edge_weights("w", 1).unwrap_err();
        assert!(matches!(err, Error::PropertyType { .. }));
        assert!(err.to_string().contains("real vertex property"));
    }

    #[test]
    fn test_missing_property() {
        let store = PropertyStore::new();
        let err = store.vertex_labels("nope", 3).unwrap_err();
        assert_eq!(
            err,
            Error::PropertyNotFound {
                name: "nope".to_string()
            }
        );
    }

    #[test]
    fn test_vertex_labels_rejects_negative() {
        let mut store = PropertyStore::new();
        store.insert("c", PropertyKind::Vertex, PropertyValues::Int(vec![0, -2]));
        let err = store.vertex_labels("c", 2).unwrap_err();
        assert_eq!(err, Error::InvalidLabel { vertex: 1, value: -2 });
    }

    #[test]
    fn test_vertex_labels_text_is_type_error() {
        let mut store = PropertyStore::new();
        store.insert(
            "c",
            PropertyKind::Vertex,
            PropertyValues::Text(vec!["a".into()]),
        );
        assert!(matches!(
            store.vertex_labels("c", 1),
            Err(Error::PropertyType { .. })
        ));
    }
}
