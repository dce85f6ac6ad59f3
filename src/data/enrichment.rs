//! Enrichment results produced by an external enrichment tool

use super::expression::Direction;
use crate::graph::{GeneId, PathwayId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One enriched pathway for one comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentRow {
    pub pathway_id: PathwayId,
    pub direction: Direction,
    pub p_value: f64,
    pub adj_p_value: f64,
    pub comparison: String,
    /// Contributing genes
    pub genes: Vec<GeneId>,
}

/// The best row for a pathway plus every comparison that reported it
#[derive(Debug, Clone, PartialEq)]
pub struct PathwayHit<'a> {
    pub best: &'a EnrichmentRow,
    pub comparisons: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichmentResult {
    rows: Vec<EnrichmentRow>,
}

impl EnrichmentResult {
    pub fn new(rows: Vec<EnrichmentRow>) -> Self {
        EnrichmentResult { rows }
    }

    pub fn rows(&self) -> &[EnrichmentRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Collapse rows per pathway. The row with the smallest adjusted p-value wins (first
    /// row on ties); comparison labels are collected sorted and deduplicated.
    pub fn by_pathway(&self) -> BTreeMap<&PathwayId, PathwayHit<'_>> {
        let mut hits: BTreeMap<&PathwayId, PathwayHit<'_>> = BTreeMap::new();
        for row in &self.rows {
            let hit = hits.entry(&row.pathway_id).or_insert_with(|| PathwayHit {
                best: row,
                comparisons: Vec::new(),
            });
            if row.adj_p_value < hit.best.adj_p_value {
                hit.best = row;
            }
            hit.comparisons.push(row.comparison.clone());
        }
        for hit in hits.values_mut() {
            hit.comparisons.sort();
            hit.comparisons.dedup();
        }
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pathway: &str, adj: f64, comparison: &str) -> EnrichmentRow {
        EnrichmentRow {
            pathway_id: PathwayId::new(pathway),
            direction: Direction::Up,
            p_value: adj / 10.0,
            adj_p_value: adj,
            comparison: comparison.to_string(),
            genes: vec![GeneId::new("7157")],
        }
    }

    #[test]
    fn test_best_row_per_pathway() {
        let result = EnrichmentResult::new(vec![
            row("P1", 0.04, "day1"),
            row("P1", 0.001, "day7"),
            row("P2", 0.02, "day1"),
            row("P1", 0.03, "day1"),
        ]);

        let hits = result.by_pathway();
        assert_eq!(hits.len(), 2);
        let p1 = &hits[&PathwayId::new("P1")];
        assert_eq!(p1.best.comparison, "day7");
        assert_eq!(p1.comparisons, vec!["day1".to_string(), "day7".to_string()]);
    }
}
