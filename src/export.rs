//! Tabular views of a network
//!
//! Flat node and edge records for downstream rendering (CLI tables, JSON, CSV).

use crate::graph::{AttributeMap, AttributeValue, Network, NodeKey};
use indexmap::IndexSet;
use serde::Serialize;

/// One node row: the identifier plus its attributes flattened into columns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeRecord {
    pub id: String,
    #[serde(flatten)]
    pub attributes: AttributeMap,
}

impl NodeRecord {
    /// Cell text for `column`; empty when the node has no such attribute
    pub fn cell(&self, column: &str) -> String {
        if column == "id" {
            return self.id.clone();
        }
        match self.attributes.get(column) {
            Some(AttributeValue::Null) | None => String::new(),
            Some(value) => value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

impl<K: NodeKey> Network<K> {
    /// Node rows in identifier order
    pub fn node_table(&self) -> Vec<NodeRecord> {
        self.nodes()
            .map(|node| NodeRecord {
                id: node.id.as_key().to_string(),
                attributes: node.attributes.clone(),
            })
            .collect()
    }

    /// Edge rows in (source, target) order
    pub fn edge_table(&self) -> Vec<EdgeRecord> {
        self.edges()
            .map(|edge| EdgeRecord {
                source: edge.source.as_key().to_string(),
                target: edge.target.as_key().to_string(),
                weight: edge.weight,
            })
            .collect()
    }

    /// `id` followed by every attribute key in the network, in first-seen order
    pub fn node_columns(&self) -> Vec<String> {
        let mut columns: IndexSet<String> = IndexSet::new();
        columns.insert("id".to_string());
        for node in self.nodes() {
            columns.extend(node.attributes.keys().cloned());
        }
        columns.into_iter().collect()
    }
}
