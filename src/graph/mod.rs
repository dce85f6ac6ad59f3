//! Network data model
//!
//! Nodes keyed by gene or pathway identifier with attribute bags, undirected weighted
//! edges, and the `Network` container shared by every builder.

pub mod attribute;
pub mod edge;
pub mod network;
pub mod node;
pub mod types;

// Re-export main types
pub use attribute::{AttributeMap, AttributeValue};
pub use edge::GraphEdge;
pub use network::{Network, NetworkSummary};
pub use node::{keys, GraphNode};
pub use types::{GeneId, NodeKey, PathwayId};
