//! In-memory analysis network
//!
//! Nodes live in an arena keyed by identifier; edges reference nodes only by identifier,
//! so there is no cyclic ownership between neighbors. Both maps are ordered, which makes
//! iteration (and everything derived from it) independent of construction order.

use super::attribute::AttributeValue;
use super::edge::GraphEdge;
use super::node::{keys, GraphNode};
use super::types::NodeKey;
use crate::algo::build_view;
use crate::error::{AnalysisError, AnalysisResult};
use genenet_graph_algorithms::connected_components;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Undirected network with unique nodes and no self-loops or duplicate edges.
///
/// Invariant: every edge endpoint exists as a node.
#[derive(Debug, Clone, PartialEq)]
pub struct Network<K: NodeKey> {
    nodes: BTreeMap<K, GraphNode<K>>,
    edges: BTreeMap<(K, K), GraphEdge<K>>,
    /// Neighbor ids per node, kept in step with `edges`
    adjacency: BTreeMap<K, BTreeSet<K>>,
}

/// Size and shape statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NetworkSummary {
    pub nodes: usize,
    pub edges: usize,
    pub components: usize,
    pub largest_component: usize,
    pub hubs: usize,
}

impl<K: NodeKey> Default for Network<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: NodeKey> Network<K> {
    pub fn new() -> Self {
        Network {
            nodes: BTreeMap::new(),
            edges: BTreeMap::new(),
            adjacency: BTreeMap::new(),
        }
    }

    /// Get or insert the node `id`
    pub fn add_node(&mut self, id: K) -> &mut GraphNode<K> {
        self.nodes
            .entry(id.clone())
            .or_insert_with(|| GraphNode::new(id))
    }

    /// Insert an undirected edge, creating missing endpoints.
    ///
    /// Returns false for a self-loop or an already present pair; a duplicate keeps the
    /// larger of the two weights.
    pub fn add_edge(&mut self, a: K, b: K, weight: f64) -> bool {
        let Some(edge) = GraphEdge::new(a, b, weight) else {
            return false;
        };
        if let Some(existing) = self.edges.get_mut(&edge.key()) {
            existing.weight = existing.weight.max(weight);
            return false;
        }
        self.add_node(edge.source.clone());
        self.add_node(edge.target.clone());
        self.adjacency
            .entry(edge.source.clone())
            .or_default()
            .insert(edge.target.clone());
        self.adjacency
            .entry(edge.target.clone())
            .or_default()
            .insert(edge.source.clone());
        self.edges.insert(edge.key(), edge);
        true
    }

    pub fn contains_node(&self, id: &K) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn contains_edge(&self, a: &K, b: &K) -> bool {
        self.edge(a, b).is_some()
    }

    /// The edge between `a` and `b` in either orientation
    pub fn edge(&self, a: &K, b: &K) -> Option<&GraphEdge<K>> {
        let key = if a <= b {
            (a.clone(), b.clone())
        } else {
            (b.clone(), a.clone())
        };
        self.edges.get(&key)
    }

    pub fn node(&self, id: &K) -> Option<&GraphNode<K>> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: &K) -> Option<&mut GraphNode<K>> {
        self.nodes.get_mut(id)
    }

    /// Nodes in identifier order
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode<K>> {
        self.nodes.values()
    }

    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut GraphNode<K>> {
        self.nodes.values_mut()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &K> {
        self.nodes.keys()
    }

    /// Edges in (source, target) order
    pub fn edges(&self) -> impl Iterator<Item = &GraphEdge<K>> {
        self.edges.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn degree(&self, id: &K) -> usize {
        self.adjacency.get(id).map_or(0, BTreeSet::len)
    }

    /// Neighbors of `id` in identifier order
    pub fn neighbors(&self, id: &K) -> impl Iterator<Item = &K> {
        self.adjacency.get(id).into_iter().flatten()
    }

    /// Set an attribute on an existing node
    pub fn set_attribute(
        &mut self,
        id: &K,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> AnalysisResult<()> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| AnalysisError::mapping(id, "network nodes"))?;
        node.set(key, value);
        Ok(())
    }

    /// Attach a caller-supplied categorical column. Nodes without an entry are untouched;
    /// entries for ids not in the network are ignored. Returns the number of nodes tagged.
    pub fn attach_category<S: AsRef<str>>(&mut self, column: &str, values: &HashMap<K, S>) -> usize {
        let mut tagged = 0;
        for (id, node) in self.nodes.iter_mut() {
            if let Some(value) = values.get(id) {
                node.set(column, value.as_ref());
                tagged += 1;
            }
        }
        tagged
    }

    /// Subgraph induced by `keep`: the kept nodes (with attributes) and every edge between them
    pub fn induced_subgraph(&self, keep: &BTreeSet<K>) -> Self {
        let mut sub = Network::new();
        for (id, node) in self.nodes.iter().filter(|(id, _)| keep.contains(*id)) {
            sub.nodes.insert(id.clone(), node.clone());
        }
        for edge in self
            .edges
            .values()
            .filter(|e| keep.contains(&e.source) && keep.contains(&e.target))
        {
            sub.add_edge(edge.source.clone(), edge.target.clone(), edge.weight);
        }
        sub
    }

    /// Number of connected components (isolated nodes count as components)
    pub fn component_count(&self) -> usize {
        connected_components(&build_view(self).graph).count()
    }

    /// True when the network has exactly one component. The empty network is not connected.
    pub fn is_connected(&self) -> bool {
        self.component_count() == 1
    }

    pub fn summary(&self) -> NetworkSummary {
        let partition = connected_components(&build_view(self).graph);
        NetworkSummary {
            nodes: self.node_count(),
            edges: self.edge_count(),
            components: partition.count(),
            largest_component: partition.largest(),
            hubs: self.nodes().filter(|n| n.flag(keys::HUB)).count(),
        }
    }
}
