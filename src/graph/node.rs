//! Node implementation for analysis networks

use super::attribute::{AttributeMap, AttributeValue};
use super::types::NodeKey;
use serde::{Deserialize, Serialize};

/// Well-known attribute keys written by the builders and scorers
pub mod keys {
    pub const SEED: &str = "seed";
    pub const SYMBOL: &str = "symbol";
    pub const FOLD_CHANGE: &str = "fold_change";
    pub const P_VALUE: &str = "p_value";
    pub const ADJ_P_VALUE: &str = "adj_p_value";
    pub const DIRECTION: &str = "direction";
    pub const CENTRALITY: &str = "centrality";
    pub const HUB: &str = "hub";
    pub const COMPONENT: &str = "component";
    pub const ANCHOR: &str = "anchor";
    pub const NAME: &str = "name";
    pub const GROUP: &str = "group";
    pub const SIZE: &str = "size";
    pub const ENRICHED: &str = "enriched";
    pub const COMPARISON: &str = "comparison";
    pub const COMPARISONS: &str = "comparisons";
    pub const GENE_COUNT: &str = "gene_count";
    pub const GENES: &str = "genes";
}

/// A node in an analysis network: an identifier plus a mutable attribute bag.
/// Identity is the id alone; two nodes with the same id are the same node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode<K> {
    pub id: K,
    pub attributes: AttributeMap,
}

impl<K: NodeKey> GraphNode<K> {
    pub fn new(id: K) -> Self {
        GraphNode {
            id,
            attributes: AttributeMap::new(),
        }
    }

    /// Set an attribute value, returning the previous one
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Option<AttributeValue> {
        self.attributes.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Read a boolean flag; absent or non-boolean attributes count as false
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).and_then(AttributeValue::as_boolean).unwrap_or(false)
    }

    pub fn float(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(AttributeValue::as_float)
    }
}
