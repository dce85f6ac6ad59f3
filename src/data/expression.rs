//! Differential-expression results
//!
//! Tables arrive pre-computed from an external DE tool; this module only stores them and
//! derives each gene's direction of change from configurable thresholds.

use crate::config::ExpressionConfig;
use crate::error::{AnalysisError, AnalysisResult};
use crate::graph::{keys, GeneId, Network};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Direction of regulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    None,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::None => "none",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "+" | "1" => Ok(Direction::Up),
            "down" | "-" | "-1" => Ok(Direction::Down),
            "none" | "" | "0" | "ns" => Ok(Direction::None),
            other => Err(AnalysisError::invalid_config("direction", other)),
        }
    }
}

/// One row of a DE result table. Immutable once the table is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gene {
    pub id: GeneId,
    pub symbol: String,
    /// Signed log2 fold change
    pub fold_change: f64,
    pub p_value: f64,
    pub adj_p_value: f64,
    pub direction: Direction,
}

impl Gene {
    /// Create a gene; direction stays `None` until the owning table classifies it
    pub fn new(
        id: impl Into<GeneId>,
        symbol: impl Into<String>,
        fold_change: f64,
        p_value: f64,
        adj_p_value: f64,
    ) -> Self {
        Gene {
            id: id.into(),
            symbol: symbol.into(),
            fold_change,
            p_value,
            adj_p_value,
            direction: Direction::None,
        }
    }

    /// Direction implied by `config`: significant and past the fold-change threshold
    pub fn classify(&self, config: &ExpressionConfig) -> Direction {
        let p = if config.use_adjusted { self.adj_p_value } else { self.p_value };
        if p.is_nan() || p > config.p_value_threshold {
            return Direction::None;
        }
        if self.fold_change >= config.fold_change_threshold && self.fold_change > 0.0 {
            Direction::Up
        } else if self.fold_change <= -config.fold_change_threshold && self.fold_change < 0.0 {
            Direction::Down
        } else {
            Direction::None
        }
    }
}

/// A named DE table keyed by gene id
#[derive(Debug, Clone, PartialEq)]
pub struct DiffExpTable {
    name: String,
    genes: IndexMap<GeneId, Gene>,
}

impl DiffExpTable {
    /// Build a table, deriving every gene's direction. Duplicate gene ids are rejected.
    pub fn from_genes(
        name: impl Into<String>,
        genes: impl IntoIterator<Item = Gene>,
        config: &ExpressionConfig,
    ) -> AnalysisResult<Self> {
        let name = name.into();
        let mut map = IndexMap::new();
        for mut gene in genes {
            gene.direction = gene.classify(config);
            if map.contains_key(&gene.id) {
                return Err(AnalysisError::mapping(
                    &gene.id,
                    format!("unique row keys of table '{}'", name),
                ));
            }
            map.insert(gene.id.clone(), gene);
        }
        Ok(DiffExpTable { name, genes: map })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, id: &GeneId) -> Option<&Gene> {
        self.genes.get(id)
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Rows in load order
    pub fn iter(&self) -> impl Iterator<Item = &Gene> {
        self.genes.values()
    }

    /// Genes with a direction other than `None`; the usual seed set
    pub fn significant_genes(&self) -> BTreeSet<GeneId> {
        self.genes
            .values()
            .filter(|g| g.direction != Direction::None)
            .map(|g| g.id.clone())
            .collect()
    }

    pub fn genes_with_direction(&self, direction: Direction) -> BTreeSet<GeneId> {
        self.genes
            .values()
            .filter(|g| g.direction == direction)
            .map(|g| g.id.clone())
            .collect()
    }
}

/// Named collection of DE tables, one per comparison
#[derive(Debug, Clone, Default)]
pub struct DiffExpCollection {
    tables: IndexMap<String, DiffExpTable>,
}

impl DiffExpCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a table under its own name, replacing any table of the same name
    pub fn insert(&mut self, table: DiffExpTable) -> Option<DiffExpTable> {
        self.tables.insert(table.name().to_string(), table)
    }

    pub fn get(&self, name: &str) -> Option<&DiffExpTable> {
        self.tables.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Union of significant genes across every table
    pub fn significant_genes(&self) -> BTreeSet<GeneId> {
        self.tables
            .values()
            .flat_map(|t| t.significant_genes())
            .collect()
    }
}

impl Network<GeneId> {
    /// Attach symbol, fold change, significance and direction from a DE table.
    /// Nodes absent from the table get `direction = none` and nothing else.
    /// Returns the number of nodes matched in the table.
    pub fn annotate_expression(&mut self, table: &DiffExpTable) -> usize {
        let mut matched = 0;
        for node in self.nodes_mut() {
            match table.get(&node.id) {
                Some(gene) => {
                    node.set(keys::SYMBOL, gene.symbol.as_str());
                    node.set(keys::FOLD_CHANGE, gene.fold_change);
                    node.set(keys::P_VALUE, gene.p_value);
                    node.set(keys::ADJ_P_VALUE, gene.adj_p_value);
                    node.set(keys::DIRECTION, gene.direction.as_str());
                    matched += 1;
                }
                None => {
                    node.set(keys::DIRECTION, Direction::None.as_str());
                }
            }
        }
        tracing::debug!(
            "Annotated {} of {} nodes from table '{}'",
            matched,
            self.node_count(),
            table.name()
        );
        matched
    }
}
