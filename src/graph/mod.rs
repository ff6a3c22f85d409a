//! Graph inputs: the adjacency view the algorithms read, and named property maps.

mod attributed;
mod property;
mod view;

pub use attributed::AttributedGraph;
pub use property::{PropertyKind, PropertyMap, PropertyStore, PropertyValues};
pub use view::GraphView;
