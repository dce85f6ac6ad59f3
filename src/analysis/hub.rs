//! Hub scoring
//!
//! One centrality measure per node, then a per-component percentile cutoff decides which
//! nodes are hubs.

use crate::algo::{betweenness_centrality, build_view, connected_components, degree_centrality};
use crate::config::NetworkConfig;
use crate::error::{AnalysisError, AnalysisResult};
use crate::graph::{keys, Network, NodeKey};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// Centrality measure used for hub detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CentralityMeasure {
    Degree,
    Betweenness,
}

impl fmt::Display for CentralityMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CentralityMeasure::Degree => "degree",
            CentralityMeasure::Betweenness => "betweenness",
        })
    }
}

impl FromStr for CentralityMeasure {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "degree" => Ok(CentralityMeasure::Degree),
            "betweenness" => Ok(CentralityMeasure::Betweenness),
            other => Err(AnalysisError::invalid_config("measure", other)),
        }
    }
}

/// Scores nodes and flags hubs
#[derive(Debug, Clone)]
pub struct HubScorer {
    measure: CentralityMeasure,
    percentile: f64,
}

impl HubScorer {
    /// Scorer with the default top-decile cutoff
    pub fn new(measure: CentralityMeasure) -> Self {
        HubScorer {
            measure,
            percentile: 0.9,
        }
    }

    pub fn from_config(config: &NetworkConfig) -> AnalysisResult<Self> {
        Self::new(config.measure).with_percentile(config.hub_percentile)
    }

    /// Percentile in (0, 1) a score must exceed within its component
    pub fn with_percentile(mut self, percentile: f64) -> AnalysisResult<Self> {
        if !(percentile > 0.0 && percentile < 1.0) {
            return Err(AnalysisError::invalid_config("hub_percentile", percentile));
        }
        self.percentile = percentile;
        Ok(self)
    }

    pub fn measure(&self) -> CentralityMeasure {
        self.measure
    }

    /// Populate `centrality`, `hub` and `component` on every node.
    ///
    /// Components are numbered by their smallest node id. Isolated nodes score 0 and are
    /// never hubs.
    pub fn score<K: NodeKey>(&self, mut net: Network<K>) -> Network<K> {
        let view = build_view(&net);
        let partition = connected_components(&view.graph);
        let scores = match self.measure {
            CentralityMeasure::Degree => degree_centrality(&view.graph),
            CentralityMeasure::Betweenness => betweenness_centrality(&view.graph),
        };

        let mut is_hub = vec![false; view.len()];
        for members in &partition.members {
            if members.len() < 2 {
                continue;
            }
            let component_scores: Vec<f64> = members.iter().map(|&i| scores[i]).collect();
            let cutoff = percentile(&component_scores, self.percentile);
            for &i in members {
                is_hub[i] = scores[i] > cutoff && scores[i] > 0.0;
            }
        }

        for (i, key) in view.keys.iter().enumerate() {
            if let Some(node) = net.node_mut(key) {
                let isolated = view.graph.degree(i) == 0;
                node.set(keys::CENTRALITY, if isolated { 0.0 } else { scores[i] });
                node.set(keys::HUB, is_hub[i] && !isolated);
                node.set(keys::COMPONENT, partition.component(i));
            }
        }

        info!(
            "Scored {} nodes by {}: {} hubs across {} components",
            view.len(),
            self.measure,
            is_hub.iter().filter(|&&h| h).count(),
            partition.count()
        );
        net
    }

    /// Ids flagged as hubs by a previous `score` call
    pub fn hubs<K: NodeKey>(net: &Network<K>) -> Vec<K> {
        net.nodes()
            .filter(|n| n.flag(keys::HUB))
            .map(|n| n.id.clone())
            .collect()
    }
}

/// Linear-interpolation percentile of `values` (`p` in [0, 1])
fn percentile(values: &[f64], p: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}
