//! Undirected, weighted edges

use super::types::NodeKey;
use serde::{Deserialize, Serialize};

/// An undirected edge. Endpoints are stored in key order (`source < target`), so the same
/// pair always produces the same edge regardless of insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge<K> {
    pub source: K,
    pub target: K,
    pub weight: f64,
}

impl<K: NodeKey> GraphEdge<K> {
    /// Create a normalized edge; `None` for a self-loop
    pub fn new(a: K, b: K, weight: f64) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(GraphEdge { source: a, target: b, weight }),
            std::cmp::Ordering::Greater => Some(GraphEdge { source: b, target: a, weight }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn key(&self) -> (K, K) {
        (self.source.clone(), self.target.clone())
    }

    pub fn touches(&self, id: &K) -> bool {
        &self.source == id || &self.target == id
    }

    /// The endpoint opposite `id`, if `id` is an endpoint
    pub fn other(&self, id: &K) -> Option<&K> {
        if &self.source == id {
            Some(&self.target)
        } else if &self.target == id {
            Some(&self.source)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GeneId;

    #[test]
    fn test_edge_normalization() {
        let e = GraphEdge::new(GeneId::new("B"), GeneId::new("A"), 0.7).unwrap();
        assert_eq!(e.source.as_str(), "A");
        assert_eq!(e.target.as_str(), "B");
        assert_eq!(e.other(&GeneId::new("A")), Some(&GeneId::new("B")));
        assert!(e.touches(&GeneId::new("B")));
        assert!(GraphEdge::new(GeneId::new("A"), GeneId::new("A"), 1.0).is_none());
    }
}
