//! Network analysis pipelines
//!
//! Gene branch: [`NetworkBuilder`] -> [`HubScorer`] -> [`SubnetworkExtractor`].
//! Pathway branch: [`PathwaySimilarityEngine`] -> [`PathwayNetworkBuilder::foundation`] ->
//! [`PathwayNetworkBuilder::create`].

pub mod builder;
pub mod hub;
pub mod pathway_network;
pub mod similarity;
pub mod subnetwork;

pub use builder::{NetworkBuilder, Order};
pub use hub::{CentralityMeasure, HubScorer};
pub use pathway_network::{Foundation, PathwayNetwork, PathwayNetworkBuilder};
pub use similarity::{DistanceMatrix, DistanceMethod, PathwaySimilarityEngine};
pub use subnetwork::SubnetworkExtractor;
