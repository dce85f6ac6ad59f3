//! Pathway membership

use crate::error::{AnalysisError, AnalysisResult};
use crate::graph::{GeneId, PathwayId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A pathway / gene set with a non-empty member set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pathway {
    pub id: PathwayId,
    pub name: String,
    /// Parent group label (e.g. a KEGG or Reactome top-level category)
    pub group: String,
    pub genes: BTreeSet<GeneId>,
}

impl Pathway {
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}

/// One (pathway, gene) membership row of a pathway table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembershipRow {
    pub pathway_id: PathwayId,
    pub pathway_name: String,
    pub parent_group: String,
    pub gene_id: GeneId,
}

/// Pathways keyed by id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathwayCollection {
    pathways: BTreeMap<PathwayId, Pathway>,
}

impl PathwayCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group membership rows into per-pathway gene sets. The first row seen for a pathway
    /// supplies its name and group.
    pub fn from_rows(rows: impl IntoIterator<Item = MembershipRow>) -> Self {
        let mut pathways: BTreeMap<PathwayId, Pathway> = BTreeMap::new();
        for row in rows {
            pathways
                .entry(row.pathway_id.clone())
                .or_insert_with(|| Pathway {
                    id: row.pathway_id,
                    name: row.pathway_name,
                    group: row.parent_group,
                    genes: BTreeSet::new(),
                })
                .genes
                .insert(row.gene_id);
        }
        PathwayCollection { pathways }
    }

    /// Insert a pathway; an empty gene set fails with `InvalidPathway`
    pub fn insert(&mut self, pathway: Pathway) -> AnalysisResult<()> {
        if pathway.is_empty() {
            return Err(AnalysisError::InvalidPathway {
                pathway: pathway.id.to_string(),
            });
        }
        self.pathways.insert(pathway.id.clone(), pathway);
        Ok(())
    }

    pub fn get(&self, id: &PathwayId) -> Option<&Pathway> {
        self.pathways.get(id)
    }

    pub fn contains(&self, id: &PathwayId) -> bool {
        self.pathways.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.pathways.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pathways.is_empty()
    }

    /// Pathways in id order
    pub fn iter(&self) -> impl Iterator<Item = &Pathway> {
        self.pathways.values()
    }

    /// Keep pathways with `min <= size <= max` genes
    pub fn filter_by_size(&self, min: usize, max: Option<usize>) -> Self {
        let pathways = self
            .pathways
            .iter()
            .filter(|(_, p)| p.len() >= min && max.map_or(true, |m| p.len() <= m))
            .map(|(id, p)| (id.clone(), p.clone()))
            .collect();
        PathwayCollection { pathways }
    }

    /// Per-pathway gene sets, the input shape of the similarity engine
    pub fn gene_sets(&self) -> BTreeMap<PathwayId, BTreeSet<GeneId>> {
        self.pathways
            .iter()
            .map(|(id, p)| (id.clone(), p.genes.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pathway: &str, gene: &str) -> MembershipRow {
        MembershipRow {
            pathway_id: PathwayId::new(pathway),
            pathway_name: format!("{} name", pathway),
            parent_group: "Signaling".to_string(),
            gene_id: GeneId::new(gene),
        }
    }

    #[test]
    fn test_group_rows() {
        let collection = PathwayCollection::from_rows(vec![
            row("P1", "g1"),
            row("P1", "g2"),
            row("P2", "g2"),
            row("P1", "g2"),
        ]);

        assert_eq!(collection.len(), 2);
        let p1 = collection.get(&PathwayId::new("P1")).unwrap();
        assert_eq!(p1.len(), 2);
        assert_eq!(p1.name, "P1 name");
        assert_eq!(collection.gene_sets()[&PathwayId::new("P2")].len(), 1);
    }

    #[test]
    fn test_filter_by_size() {
        let collection = PathwayCollection::from_rows(vec![
            row("P1", "g1"),
            row("P1", "g2"),
            row("P1", "g3"),
            row("P2", "g2"),
        ]);
        assert_eq!(collection.filter_by_size(2, None).len(), 1);
        assert_eq!(collection.filter_by_size(1, Some(2)).len(), 1);
        assert_eq!(collection.filter_by_size(1, None).len(), 2);
    }

    #[test]
    fn test_empty_pathway_rejected() {
        let mut collection = PathwayCollection::new();
        let err = collection
            .insert(Pathway {
                id: PathwayId::new("P0"),
                name: "empty".to_string(),
                group: "none".to_string(),
                genes: BTreeSet::new(),
            })
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidPathway { .. }));
    }
}
