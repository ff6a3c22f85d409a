use thiserror::Error;

/// Result alias for `spinglass`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by community detection and partition evaluation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Graph has no vertices.
    #[error("empty input provided")]
    EmptyInput,

    /// Slice length does not match the graph (weights per edge, labels per vertex).
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected length.
        expected: usize,
        /// Found length.
        found: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },

    /// Edge weight is negative or not finite.
    #[error("invalid weight {value} on edge {edge}")]
    InvalidWeight {
        /// Edge index.
        edge: usize,
        /// Offending value.
        value: f64,
    },

    /// Community label cannot be used as a label index.
    #[error("invalid label {value} on vertex {vertex}")]
    InvalidLabel {
        /// Vertex index.
        vertex: usize,
        /// Offending value.
        value: i64,
    },

    /// No property map with this name.
    #[error("error getting scalar property: property '{name}' not found")]
    PropertyNotFound {
        /// Property name.
        name: String,
    },

    /// Property map exists but has the wrong key or value type.
    #[error("error getting scalar property: '{name}' is {found}, expected {expected}")]
    PropertyType {
        /// Property name.
        name: String,
        /// Expected key/value description.
        expected: &'static str,
        /// Actual key/value description.
        found: &'static str,
    },
}
