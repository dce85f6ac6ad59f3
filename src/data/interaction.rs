//! Gene–gene interaction database
//!
//! A static, read-only edge list. The adjacency index used by every shortest-path query
//! is built once here and shared by all builders.

use crate::algo::IndexedView;
use crate::error::{AnalysisError, AnalysisResult};
use crate::graph::GeneId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// An undirected interaction with optional confidence and source metadata.
/// Endpoints are stored in id order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionEdge {
    pub a: GeneId,
    pub b: GeneId,
    pub weight: Option<f64>,
    pub source: Option<String>,
}

impl InteractionEdge {
    pub fn new(a: impl Into<GeneId>, b: impl Into<GeneId>, weight: Option<f64>) -> Self {
        InteractionEdge {
            a: a.into(),
            b: b.into(),
            weight,
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    fn normalized(mut self) -> Self {
        if self.b < self.a {
            std::mem::swap(&mut self.a, &mut self.b);
        }
        self
    }
}

/// Read-only interaction database with a prebuilt adjacency index
#[derive(Debug, Clone)]
pub struct InteractionDatabase {
    edges: Vec<InteractionEdge>,
    view: IndexedView<GeneId>,
}

impl InteractionDatabase {
    /// Build from raw interaction records.
    ///
    /// Duplicate undirected pairs collapse into one edge keeping the highest weight and the
    /// union of sources. A self-pair fails with `InvalidInteraction`.
    pub fn from_edges(records: impl IntoIterator<Item = InteractionEdge>) -> AnalysisResult<Self> {
        let mut merged: BTreeMap<(GeneId, GeneId), InteractionEdge> = BTreeMap::new();
        let mut raw = 0usize;

        for record in records {
            raw += 1;
            if record.a == record.b {
                return Err(AnalysisError::InvalidInteraction {
                    gene: record.a.to_string(),
                });
            }
            let record = record.normalized();
            let key = (record.a.clone(), record.b.clone());
            match merged.get_mut(&key) {
                Some(existing) => {
                    existing.weight = match (existing.weight, record.weight) {
                        (Some(x), Some(y)) => Some(x.max(y)),
                        (x, y) => x.or(y),
                    };
                    existing.source = merge_sources(existing.source.take(), record.source);
                }
                None => {
                    merged.insert(key, record);
                }
            }
        }

        let edges: Vec<InteractionEdge> = merged.into_values().collect();
        debug!(
            "Interaction database: {} records collapsed to {} edges",
            raw,
            edges.len()
        );
        Ok(Self::from_normalized(edges))
    }

    fn from_normalized(edges: Vec<InteractionEdge>) -> Self {
        let genes: Vec<GeneId> = edges
            .iter()
            .flat_map(|e| [e.a.clone(), e.b.clone()])
            .collect();
        let view = IndexedView::from_parts(genes, edges.iter().map(|e| (&e.a, &e.b, e.weight)));
        InteractionDatabase { edges, view }
    }

    /// Copy keeping only edges with confidence >= `min`; edges without a weight are kept
    pub fn with_min_confidence(&self, min: f64) -> Self {
        let edges: Vec<InteractionEdge> = self
            .edges
            .iter()
            .filter(|e| e.weight.map_or(true, |w| w >= min))
            .cloned()
            .collect();
        debug!(
            "Confidence filter {}: kept {} of {} edges",
            min,
            edges.len(),
            self.edges.len()
        );
        Self::from_normalized(edges)
    }

    /// True if the gene takes part in at least one interaction
    pub fn contains(&self, gene: &GeneId) -> bool {
        self.view.index_of(gene).is_some()
    }

    pub fn gene_count(&self) -> usize {
        self.view.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges sorted by endpoint ids
    pub fn edges(&self) -> &[InteractionEdge] {
        &self.edges
    }

    pub fn edge(&self, a: &GeneId, b: &GeneId) -> Option<&InteractionEdge> {
        let (a, b) = if a <= b { (a, b) } else { (b, a) };
        self.edges
            .binary_search_by(|e| (&e.a, &e.b).cmp(&(a, b)))
            .ok()
            .map(|i| &self.edges[i])
    }

    /// Interaction partners of `gene`, in id order
    pub fn neighbors(&self, gene: &GeneId) -> Vec<&GeneId> {
        match self.view.index_of(gene) {
            Some(i) => self
                .view
                .graph
                .neighbors(i)
                .iter()
                .map(|&j| self.view.key(j))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Adjacency index over every gene in the database
    pub fn view(&self) -> &IndexedView<GeneId> {
        &self.view
    }

    /// Weight reported for the edge between two dense indices (1.0 when unweighted)
    pub(crate) fn weight_at(&self, u: usize, v: usize) -> f64 {
        self.view.weight(u, v)
    }
}

fn merge_sources(a: Option<String>, b: Option<String>) -> Option<String> {
    match (a, b) {
        (Some(a), Some(b)) => {
            let mut parts: Vec<&str> = a.split(',').chain(b.split(',')).collect();
            parts.sort_unstable();
            parts.dedup();
            Some(parts.join(","))
        }
        (a, b) => a.or(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g(id: &str) -> GeneId {
        GeneId::new(id)
    }

    #[test]
    fn test_duplicates_collapse() {
        let db = InteractionDatabase::from_edges(vec![
            InteractionEdge::new("A", "B", Some(0.4)).with_source("string"),
            InteractionEdge::new("B", "A", Some(0.9)).with_source("biogrid"),
            InteractionEdge::new("B", "C", None),
        ])
        .unwrap();

        assert_eq!(db.edge_count(), 2);
        assert_eq!(db.gene_count(), 3);
        let ab = db.edge(&g("B"), &g("A")).unwrap();
        assert_eq!(ab.weight, Some(0.9));
        assert_eq!(ab.source.as_deref(), Some("biogrid,string"));
        assert_eq!(db.neighbors(&g("B")), vec![&g("A"), &g("C")]);
        assert!(db.neighbors(&g("Z")).is_empty());
    }

    #[test]
    fn test_self_pair_rejected() {
        let err = InteractionDatabase::from_edges(vec![InteractionEdge::new("A", "A", None)])
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInteraction { .. }));
    }

    #[test]
    fn test_min_confidence() {
        let db = InteractionDatabase::from_edges(vec![
            InteractionEdge::new("A", "B", Some(0.2)),
            InteractionEdge::new("B", "C", Some(0.8)),
            InteractionEdge::new("C", "D", None),
        ])
        .unwrap();

        let strict = db.with_min_confidence(0.5);
        assert_eq!(strict.edge_count(), 2);
        assert!(!strict.contains(&g("A")));
        assert!(strict.contains(&g("D")));
        // Original is untouched
        assert_eq!(db.edge_count(), 3);
    }
}
