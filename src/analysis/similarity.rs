//! Pathway similarity
//!
//! Pairwise set distances between pathway gene sets. Pairs are independent, so the
//! matrix is filled in parallel by the algorithms crate.

use crate::algo::{distance_matrix, SetDistance};
use crate::data::PathwayCollection;
use crate::error::{AnalysisError, AnalysisResult};
use crate::graph::{GeneId, PathwayId};
use ndarray::Array2;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// Set distance used to compare pathways
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMethod {
    Jaccard,
    Overlap,
}

impl From<DistanceMethod> for SetDistance {
    fn from(method: DistanceMethod) -> Self {
        match method {
            DistanceMethod::Jaccard => SetDistance::Jaccard,
            DistanceMethod::Overlap => SetDistance::Overlap,
        }
    }
}

impl fmt::Display for DistanceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DistanceMethod::Jaccard => "jaccard",
            DistanceMethod::Overlap => "overlap",
        })
    }
}

impl FromStr for DistanceMethod {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jaccard" => Ok(DistanceMethod::Jaccard),
            "overlap" => Ok(DistanceMethod::Overlap),
            other => Err(AnalysisError::invalid_config("method", other)),
        }
    }
}

/// Square, symmetric, zero-diagonal distance matrix over pathway ids (in id order)
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    ids: Vec<PathwayId>,
    values: Array2<f64>,
}

impl DistanceMatrix {
    pub fn ids(&self) -> &[PathwayId] {
        &self.ids
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn index_of(&self, id: &PathwayId) -> Option<usize> {
        self.ids.binary_search(id).ok()
    }

    pub fn get(&self, a: &PathwayId, b: &PathwayId) -> Option<f64> {
        Some(self.values[[self.index_of(a)?, self.index_of(b)?]])
    }

    /// Unordered pairs `(i < j)` with distance <= `max_distance`
    pub fn pairs_within(&self, max_distance: f64) -> impl Iterator<Item = (&PathwayId, &PathwayId, f64)> + '_ {
        let n = self.ids.len();
        (0..n).flat_map(move |i| {
            ((i + 1)..n).filter_map(move |j| {
                let d = self.values[[i, j]];
                (d <= max_distance).then(|| (&self.ids[i], &self.ids[j], d))
            })
        })
    }
}

/// Computes pairwise pathway distances
#[derive(Debug, Clone)]
pub struct PathwaySimilarityEngine {
    method: DistanceMethod,
}

impl Default for PathwaySimilarityEngine {
    fn default() -> Self {
        Self::new(DistanceMethod::Jaccard)
    }
}

impl PathwaySimilarityEngine {
    pub fn new(method: DistanceMethod) -> Self {
        PathwaySimilarityEngine { method }
    }

    pub fn method(&self) -> DistanceMethod {
        self.method
    }

    /// Distance matrix over `pathways`. Any empty gene set fails with `InvalidPathway`.
    pub fn distances(&self, pathways: &BTreeMap<PathwayId, BTreeSet<GeneId>>) -> AnalysisResult<DistanceMatrix> {
        if let Some((id, _)) = pathways.iter().find(|(_, genes)| genes.is_empty()) {
            return Err(AnalysisError::InvalidPathway {
                pathway: id.to_string(),
            });
        }

        // Gene ids -> dense u32 so set intersection is a merge of sorted integer slices
        let mut universe: FxHashMap<&GeneId, u32> = FxHashMap::default();
        let sets: Vec<Vec<u32>> = pathways
            .values()
            .map(|genes| {
                let mut set: Vec<u32> = genes
                    .iter()
                    .map(|g| {
                        let next = universe.len() as u32;
                        *universe.entry(g).or_insert(next)
                    })
                    .collect();
                set.sort_unstable();
                set
            })
            .collect();

        let values = distance_matrix(&sets, self.method.into());
        info!(
            "Computed {} distances for {} pathways over {} genes",
            self.method,
            pathways.len(),
            universe.len()
        );
        Ok(DistanceMatrix {
            ids: pathways.keys().cloned().collect(),
            values,
        })
    }

    pub fn distances_for(&self, collection: &PathwayCollection) -> AnalysisResult<DistanceMatrix> {
        self.distances(&collection.gene_sets())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sets(entries: &[(&str, &[&str])]) -> BTreeMap<PathwayId, BTreeSet<GeneId>> {
        entries
            .iter()
            .map(|(id, genes)| (PathwayId::new(*id), genes.iter().map(|g| GeneId::new(*g)).collect()))
            .collect()
    }

    #[test]
    fn test_jaccard_example() {
        let m = PathwaySimilarityEngine::default()
            .distances(&sets(&[("P1", &["g1", "g2", "g3"]), ("P2", &["g2", "g3", "g4"])]))
            .unwrap();

        let (p1, p2) = (PathwayId::new("P1"), PathwayId::new("P2"));
        assert!((m.get(&p1, &p2).unwrap() - 0.5).abs() < 1e-12);
        assert_eq!(m.get(&p1, &p2), m.get(&p2, &p1));
        assert_eq!(m.get(&p1, &p1), Some(0.0));
        assert_eq!(m.pairs_within(0.4).count(), 0);
        assert_eq!(m.pairs_within(0.6).count(), 1);
    }

    #[test]
    fn test_identical_sets_zero() {
        let m = PathwaySimilarityEngine::new(DistanceMethod::Overlap)
            .distances(&sets(&[("A", &["g1", "g2"]), ("B", &["g1", "g2"]), ("C", &["g9"])]))
            .unwrap();
        assert_eq!(m.get(&PathwayId::new("A"), &PathwayId::new("B")), Some(0.0));
        assert_eq!(m.get(&PathwayId::new("A"), &PathwayId::new("C")), Some(1.0));
        assert_eq!(m.len(), 3);
    }

    #[test]
    fn test_empty_pathway_rejected() {
        let err = PathwaySimilarityEngine::default()
            .distances(&sets(&[("A", &["g1"]), ("B", &[])]))
            .unwrap_err();
        match err {
            AnalysisError::InvalidPathway { pathway } => assert_eq!(pathway, "B"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_method_parse() {
        assert_eq!("Overlap".parse::<DistanceMethod>().unwrap(), DistanceMethod::Overlap);
        assert!("cosine".parse::<DistanceMethod>().is_err());
    }
}
