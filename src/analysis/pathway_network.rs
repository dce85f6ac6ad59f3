//! Pathway-similarity networks
//!
//! Two stages: a distance matrix is thresholded once into a reusable [`Foundation`], and
//! each enrichment result is then overlaid onto it.

use super::similarity::DistanceMatrix;
use crate::algo::{build_view, connected_components};
use crate::data::{EnrichmentResult, PathwayCollection};
use crate::error::{AnalysisError, AnalysisResult};
use crate::graph::{keys, AttributeValue, Network, PathwayId};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// A network over pathways with enrichment overlaid
pub type PathwayNetwork = Network<PathwayId>;

/// Threshold-pruned pathway-similarity graph. Every pathway of the matrix is a node, even
/// without edges; edge weight is the similarity `1 - distance`.
#[derive(Debug, Clone, PartialEq)]
pub struct Foundation {
    network: Network<PathwayId>,
    max_distance: f64,
}

impl Foundation {
    pub fn network(&self) -> &Network<PathwayId> {
        &self.network
    }

    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    pub fn contains(&self, id: &PathwayId) -> bool {
        self.network.contains_node(id)
    }

    /// Distance of a retained pair; `None` when the pair was pruned
    pub fn distance(&self, a: &PathwayId, b: &PathwayId) -> Option<f64> {
        self.network.edge(a, b).map(|e| 1.0 - e.weight)
    }

    /// Attach `name`, `group` and `size` from a pathway collection. Returns the number of
    /// nodes described.
    pub fn describe(&mut self, pathways: &PathwayCollection) -> usize {
        let mut described = 0;
        for node in self.network.nodes_mut() {
            if let Some(p) = pathways.get(&node.id) {
                node.set(keys::NAME, p.name.as_str());
                node.set(keys::GROUP, p.group.as_str());
                node.set(keys::SIZE, p.len());
                described += 1;
            }
        }
        described
    }
}

/// Builds foundations and overlays enrichment results on them
#[derive(Debug, Clone, Default)]
pub struct PathwayNetworkBuilder;

impl PathwayNetworkBuilder {
    pub fn new() -> Self {
        PathwayNetworkBuilder
    }

    /// Keep a pathway pair as an edge iff its distance is <= `max_distance` (in [0, 1]).
    pub fn foundation(&self, matrix: &DistanceMatrix, max_distance: f64) -> AnalysisResult<Foundation> {
        if !(0.0..=1.0).contains(&max_distance) {
            return Err(AnalysisError::invalid_config("max_distance", max_distance));
        }

        let mut network = Network::new();
        for id in matrix.ids() {
            network.add_node(id.clone());
        }
        for (a, b, d) in matrix.pairs_within(max_distance) {
            network.add_edge(a.clone(), b.clone(), 1.0 - d);
        }

        info!(
            "Foundation at distance <= {}: {} pathways, {} edges",
            max_distance,
            network.node_count(),
            network.edge_count()
        );
        Ok(Foundation {
            network,
            max_distance,
        })
    }

    /// Overlay `enrichment` onto `foundation`.
    ///
    /// Matching nodes get `enriched = true` with direction, significance, comparison and
    /// genes of their best row; all others are background with `enriched = false`.
    /// `trim = true` keeps only components of the foundation that contain an enriched
    /// node. Any row naming a pathway outside the foundation fails with `MappingError`.
    pub fn create(
        &self,
        foundation: &Foundation,
        enrichment: &EnrichmentResult,
        trim: bool,
    ) -> AnalysisResult<PathwayNetwork> {
        if let Some(row) = enrichment.rows().iter().find(|r| !foundation.contains(&r.pathway_id)) {
            return Err(AnalysisError::mapping(&row.pathway_id, "foundation"));
        }

        let mut net = foundation.network.clone();
        for node in net.nodes_mut() {
            node.set(keys::ENRICHED, false);
        }

        let hits = enrichment.by_pathway();
        for (id, hit) in &hits {
            let Some(node) = net.node_mut(id) else {
                continue;
            };
            let row = hit.best;
            node.set(keys::ENRICHED, true);
            node.set(keys::DIRECTION, row.direction.as_str());
            node.set(keys::P_VALUE, row.p_value);
            node.set(keys::ADJ_P_VALUE, row.adj_p_value);
            node.set(keys::COMPARISON, row.comparison.as_str());
            node.set(keys::COMPARISONS, hit.comparisons.clone());
            node.set(keys::GENE_COUNT, row.genes.len());
            node.set(
                keys::GENES,
                AttributeValue::List(row.genes.iter().map(|g| g.to_string()).collect()),
            );
        }

        if trim {
            net = reachable_from_enriched(&net);
        }

        info!(
            "Pathway network: {} enriched of {} nodes, {} edges (trim = {})",
            hits.len(),
            net.node_count(),
            net.edge_count(),
            trim
        );
        Ok(net)
    }
}

/// Nodes of every component holding at least one enriched node, with their edges
fn reachable_from_enriched(net: &PathwayNetwork) -> PathwayNetwork {
    let view = build_view(net);
    let partition = connected_components(&view.graph);

    let keep: BTreeSet<PathwayId> = partition
        .members
        .iter()
        .filter(|members| {
            members
                .iter()
                .any(|&i| net.node(view.key(i)).is_some_and(|n| n.flag(keys::ENRICHED)))
        })
        .flat_map(|members| members.iter().map(|&i| view.key(i).clone()))
        .collect();

    debug!(
        "Trim kept {} of {} pathways",
        keep.len(),
        net.node_count()
    );
    net.induced_subgraph(&keep)
}
