//! Core identifier types for network nodes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// Stable cross-reference identifier of a gene (e.g. Entrez or Ensembl id)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct GeneId(String);

impl GeneId {
    pub fn new(id: impl Into<String>) -> Self {
        GeneId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GeneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for GeneId {
    fn from(s: String) -> Self {
        GeneId(s)
    }
}

impl From<&str> for GeneId {
    fn from(s: &str) -> Self {
        GeneId(s.to_string())
    }
}

/// Identifier of a pathway / gene set (e.g. "hsa04110", "GO:0006915")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct PathwayId(String);

impl PathwayId {
    pub fn new(id: impl Into<String>) -> Self {
        PathwayId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PathwayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PathwayId {
    fn from(s: String) -> Self {
        PathwayId(s)
    }
}

impl From<&str> for PathwayId {
    fn from(s: &str) -> Self {
        PathwayId(s.to_string())
    }
}

/// Anything that can identify a node in a [`Network`](super::Network).
///
/// Ordering matters: dense algorithm indices are assigned in key order, which makes every
/// tie-break in the graph kernels an identifier-order tie-break.
pub trait NodeKey: Clone + Ord + Hash + fmt::Display + fmt::Debug {
    fn as_key(&self) -> &str;
}

impl NodeKey for GeneId {
    fn as_key(&self) -> &str {
        &self.0
    }
}

impl NodeKey for PathwayId {
    fn as_key(&self) -> &str {
        &self.0
    }
}
