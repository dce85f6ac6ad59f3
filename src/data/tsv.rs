//! Tab-separated table readers
//!
//! Every table has a header row naming its columns; blank lines and lines starting with
//! `#` are skipped. Column lookup is case-insensitive and accepts a few common aliases.

use super::enrichment::{EnrichmentResult, EnrichmentRow};
use super::expression::{DiffExpTable, Direction, Gene};
use super::interaction::{InteractionDatabase, InteractionEdge};
use super::pathway::{MembershipRow, PathwayCollection};
use crate::config::ExpressionConfig;
use crate::error::{AnalysisError, AnalysisResult};
use crate::graph::{GeneId, PathwayId};
use std::collections::BTreeSet;
use std::io::BufRead;

/// A parsed table: header plus (line number, fields) rows
#[derive(Debug, Clone)]
pub struct TsvTable {
    header: Vec<String>,
    rows: Vec<(usize, Vec<String>)>,
}

impl TsvTable {
    /// Read a table. A header without data rows fails with `EmptyInput`.
    pub fn read(reader: impl BufRead, what: &str) -> AnalysisResult<Self> {
        let mut header: Option<Vec<String>> = None;
        let mut rows = Vec::new();

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim_end_matches(['\r', '\n']);
            if trimmed.trim().is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let fields: Vec<String> = trimmed.split('\t').map(|f| f.trim().to_string()).collect();
            if header.is_none() {
                header = Some(fields.iter().map(|f| f.to_ascii_lowercase()).collect());
            } else {
                rows.push((i + 1, fields));
            }
        }

        let header = header.ok_or_else(|| AnalysisError::empty_input(format!("{} table has no header", what)))?;
        if rows.is_empty() {
            return Err(AnalysisError::empty_input(format!("{} table has no rows", what)));
        }
        Ok(TsvTable { header, rows })
    }

    /// Index of the first column matching any of `names`
    pub fn column(&self, names: &[&str]) -> AnalysisResult<usize> {
        self.optional_column(names).ok_or_else(|| AnalysisError::Parse {
            line: 1,
            message: format!("missing column '{}'", names[0]),
        })
    }

    pub fn optional_column(&self, names: &[&str]) -> Option<usize> {
        names
            .iter()
            .find_map(|name| self.header.iter().position(|h| h == name))
    }

    pub fn rows(&self) -> impl Iterator<Item = &(usize, Vec<String>)> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn field<'a>(line: usize, fields: &'a [String], col: usize) -> AnalysisResult<&'a str> {
    fields
        .get(col)
        .map(String::as_str)
        .ok_or_else(|| AnalysisError::Parse {
            line,
            message: format!("expected at least {} fields, found {}", col + 1, fields.len()),
        })
}

fn float_field(line: usize, fields: &[String], col: usize) -> AnalysisResult<f64> {
    let raw = field(line, fields, col)?;
    match raw.to_ascii_lowercase().as_str() {
        "na" | "nan" | "" => Ok(f64::NAN),
        _ => raw.parse::<f64>().map_err(|e| AnalysisError::Parse {
            line,
            message: format!("'{}' is not a number: {}", raw, e),
        }),
    }
}

fn optional_float(line: usize, fields: &[String], col: Option<usize>) -> AnalysisResult<Option<f64>> {
    match col {
        Some(c) if fields.get(c).is_some_and(|f| !f.is_empty()) => {
            let v = float_field(line, fields, c)?;
            Ok((!v.is_nan()).then_some(v))
        }
        _ => Ok(None),
    }
}

/// DE table: `gene_id`, optional `symbol`, `log2fc`, `p_value`, `adj_p_value`
pub fn read_diff_exp(
    name: &str,
    reader: impl BufRead,
    config: &ExpressionConfig,
) -> AnalysisResult<DiffExpTable> {
    let table = TsvTable::read(reader, "expression")?;
    let id = table.column(&["gene_id", "id", "gene"])?;
    let symbol = table.optional_column(&["symbol", "gene_symbol"]);
    let fc = table.column(&["log2fc", "log2foldchange", "logfc", "fold_change"])?;
    let p = table.column(&["p_value", "pvalue", "p.value"])?;
    let padj = table.column(&["adj_p_value", "padj", "adj.p.val", "fdr"])?;

    let mut genes = Vec::with_capacity(table.len());
    for (line, fields) in table.rows() {
        let gene_id = field(*line, fields, id)?;
        let sym = match symbol {
            Some(c) => field(*line, fields, c)?,
            None => gene_id,
        };
        genes.push(Gene::new(
            gene_id,
            sym,
            float_field(*line, fields, fc)?,
            float_field(*line, fields, p)?,
            float_field(*line, fields, padj)?,
        ));
    }
    DiffExpTable::from_genes(name, genes, config)
}

/// Interaction table: `gene_a`, `gene_b`, optional `weight`, optional `source`
pub fn read_interactions(reader: impl BufRead) -> AnalysisResult<InteractionDatabase> {
    let table = TsvTable::read(reader, "interaction")?;
    let a = table.column(&["gene_a", "protein1", "source_gene"])?;
    let b = table.column(&["gene_b", "protein2", "target_gene"])?;
    let weight = table.optional_column(&["weight", "confidence", "combined_score"]);
    let source = table.optional_column(&["source", "database"]);

    let mut records = Vec::with_capacity(table.len());
    for (line, fields) in table.rows() {
        let mut edge = InteractionEdge::new(
            field(*line, fields, a)?,
            field(*line, fields, b)?,
            optional_float(*line, fields, weight)?,
        );
        if let Some(c) = source {
            if let Some(s) = fields.get(c).filter(|s| !s.is_empty()) {
                edge = edge.with_source(s.as_str());
            }
        }
        records.push(edge);
    }
    InteractionDatabase::from_edges(records)
}

/// Pathway membership: `pathway_id`, `pathway_name`, `parent_group`, `gene_id`
pub fn read_pathways(reader: impl BufRead) -> AnalysisResult<PathwayCollection> {
    let table = TsvTable::read(reader, "pathway")?;
    let id = table.column(&["pathway_id", "term_id"])?;
    let name = table.optional_column(&["pathway_name", "term_name", "name"]);
    let group = table.optional_column(&["parent_group", "group", "category"]);
    let gene = table.column(&["gene_id", "gene"])?;

    let mut rows = Vec::with_capacity(table.len());
    for (line, fields) in table.rows() {
        let pathway_id = field(*line, fields, id)?;
        rows.push(MembershipRow {
            pathway_id: PathwayId::new(pathway_id),
            pathway_name: match name {
                Some(c) => field(*line, fields, c)?.to_string(),
                None => pathway_id.to_string(),
            },
            parent_group: match group {
                Some(c) => field(*line, fields, c)?.to_string(),
                None => String::new(),
            },
            gene_id: GeneId::new(field(*line, fields, gene)?),
        });
    }
    Ok(PathwayCollection::from_rows(rows))
}

/// Enrichment rows: `pathway_id`, `direction`, `p_value`, `adj_p_value`, `comparison`,
/// `genes` (separated by `;`, `/` or `,`)
pub fn read_enrichment(reader: impl BufRead) -> AnalysisResult<EnrichmentResult> {
    let table = TsvTable::read(reader, "enrichment")?;
    let id = table.column(&["pathway_id", "term_id"])?;
    let direction = table.optional_column(&["direction"]);
    let p = table.column(&["p_value", "pvalue"])?;
    let padj = table.column(&["adj_p_value", "padj", "fdr"])?;
    let comparison = table.optional_column(&["comparison", "contrast"]);
    let genes = table.optional_column(&["genes", "member_genes"]);

    let mut rows = Vec::with_capacity(table.len());
    for (line, fields) in table.rows() {
        let direction = match direction {
            Some(c) => field(*line, fields, c)?.parse::<Direction>().map_err(|_| AnalysisError::Parse {
                line: *line,
                message: format!("unknown direction '{}'", fields[c]),
            })?,
            None => Direction::None,
        };
        let genes = match genes {
            Some(c) => fields
                .get(c)
                .map(|s| {
                    s.split([';', '/', ','])
                        .map(str::trim)
                        .filter(|g| !g.is_empty())
                        .map(GeneId::new)
                        .collect()
                })
                .unwrap_or_default(),
            None => Vec::new(),
        };
        rows.push(EnrichmentRow {
            pathway_id: PathwayId::new(field(*line, fields, id)?),
            direction,
            p_value: float_field(*line, fields, p)?,
            adj_p_value: float_field(*line, fields, padj)?,
            comparison: match comparison {
                Some(c) => fields.get(c).cloned().unwrap_or_default(),
                None => String::new(),
            },
            genes,
        });
    }
    Ok(EnrichmentResult::new(rows))
}

/// A plain gene list: first field of each non-comment line, no header
pub fn read_gene_list(reader: impl BufRead) -> AnalysisResult<BTreeSet<GeneId>> {
    let mut genes = BTreeSet::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if let Some(first) = trimmed.split(['\t', ',', ' ']).next() {
            genes.insert(GeneId::new(first));
        }
    }
    Ok(genes)
}
