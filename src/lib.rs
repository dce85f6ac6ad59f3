//! genenet: gene interaction and pathway network analysis
//!
//! Turns differential-expression results, a protein-interaction database and pathway
//! enrichment results into analyzable networks.
//!
//! # Architecture
//!
//! - `graph`: identifier-keyed undirected networks with attribute bags
//! - `data`: read-only input tables (DE results, interactions, pathways, enrichment) and
//!   their TSV readers
//! - `analysis`: network construction, hub scoring, Steiner subnetwork extraction, pathway
//!   similarity and pathway networks
//! - `algo`: adapter onto the dense-index algorithms in `genenet-graph-algorithms`
//! - `export`: flat node and edge tables
//!
//! ## Example Usage
//!
//! ```rust
//! use genenet::{CentralityMeasure, HubScorer, InteractionDatabase, InteractionEdge, NetworkBuilder, Order};
//! use genenet::GeneId;
//! use std::collections::BTreeSet;
//!
//! let db = InteractionDatabase::from_edges(vec![
//!     InteractionEdge::new("TP53", "MDM2", Some(0.99)),
//!     InteractionEdge::new("MDM2", "CDKN1A", Some(0.80)),
//! ])
//! .unwrap();
//!
//! let seeds: BTreeSet<GeneId> = ["TP53", "CDKN1A"].into_iter().map(GeneId::from).collect();
//! let net = NetworkBuilder::new(Order::Minimum).build(&seeds, &db).unwrap();
//! assert_eq!(net.node_count(), 3);
//!
//! let scored = HubScorer::new(CentralityMeasure::Betweenness).score(net);
//! assert_eq!(HubScorer::hubs(&scored), vec![GeneId::from("MDM2")]);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod analysis;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod graph;

// Re-export main types for convenience
pub use analysis::{
    CentralityMeasure, DistanceMatrix, DistanceMethod, Foundation, HubScorer, NetworkBuilder,
    Order, PathwayNetwork, PathwayNetworkBuilder, PathwaySimilarityEngine, SubnetworkExtractor,
};

pub use config::{AnalysisConfig, ExpressionConfig, ExtractionConfig, NetworkConfig, PathwayConfig};

pub use data::{
    DiffExpCollection, DiffExpTable, Direction, EnrichmentResult, EnrichmentRow, Gene,
    InteractionDatabase, InteractionEdge, MembershipRow, Pathway, PathwayCollection,
};

pub use error::{AnalysisError, AnalysisResult};

pub use export::{EdgeRecord, NodeRecord};

pub use graph::{
    AttributeMap, AttributeValue, GeneId, GraphEdge, GraphNode, Network, NetworkSummary,
    NodeKey, PathwayId,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.3.0");
    }
}
