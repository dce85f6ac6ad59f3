//! Graph algorithms module
//!
//! Algorithms are implemented in the `genenet-graph-algorithms` crate over dense indices.
//! This module provides the adapter layer between identifier-keyed networks and those
//! dense views.

use crate::graph::{Network, NodeKey};
use genenet_graph_algorithms::{GraphView, PathResult};
use rustc_hash::FxHashMap;

// Re-export algorithms
pub use genenet_graph_algorithms::{
    betweenness_centrality, bfs, bfs_distances, closest_label, connected_components, degree_centrality,
    distance_matrix, shortest_path_between, ComponentPartition, SetDistance,
};

/// A `GraphView` together with the identifier <-> index mapping it was built with.
///
/// Indices are assigned in key order, so index order and identifier order agree.
#[derive(Debug, Clone)]
pub struct IndexedView<K> {
    /// Mapping from dense index (0..N) back to the node key
    pub keys: Vec<K>,
    /// Mapping from node key to dense index
    pub index: FxHashMap<K, usize>,
    pub graph: GraphView,
}

impl<K: NodeKey> IndexedView<K> {
    /// Build from keys (sorted and deduplicated here) and keyed edges. Edges naming an
    /// unknown key are skipped.
    pub fn from_parts<'a, I>(mut keys: Vec<K>, edges: I) -> Self
    where
        K: 'a,
        I: IntoIterator<Item = (&'a K, &'a K, Option<f64>)>,
    {
        keys.sort();
        keys.dedup();
        let index: FxHashMap<K, usize> = keys
            .iter()
            .enumerate()
            .map(|(i, k)| (k.clone(), i))
            .collect();

        let dense: Vec<(usize, usize, Option<f64>)> = edges
            .into_iter()
            .filter_map(|(a, b, w)| Some((*index.get(a)?, *index.get(b)?, w)))
            .collect();

        let graph = GraphView::from_edges(keys.len(), &dense);
        IndexedView { keys, index, graph }
    }

    pub fn index_of(&self, key: &K) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn key(&self, idx: usize) -> &K {
        &self.keys[idx]
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Dense indices of the given keys that are present, sorted ascending
    pub fn indices_of<'a>(&self, keys: impl IntoIterator<Item = &'a K>) -> Vec<usize>
    where
        K: 'a,
    {
        let mut out: Vec<usize> = keys.into_iter().filter_map(|k| self.index_of(k)).collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Path as node keys
    pub fn path_keys(&self, path: &PathResult) -> Vec<K> {
        path.path.iter().map(|&i| self.keys[i].clone()).collect()
    }

    /// Weight of edge `u`-`v` as stored in the view (1.0 when unweighted)
    pub fn weight(&self, u: usize, v: usize) -> f64 {
        self.graph.weight_between(u, v).unwrap_or(1.0)
    }
}

/// Build an `IndexedView` of a network for algorithm execution
pub fn build_view<K: NodeKey>(net: &Network<K>) -> IndexedView<K> {
    let keys: Vec<K> = net.node_ids().cloned().collect();
    IndexedView::from_parts(
        keys,
        net.edges().map(|e| (&e.source, &e.target, Some(e.weight))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GeneId;

    #[test]
    fn test_view_projection() {
        let mut net = Network::new();
        net.add_edge(GeneId::new("C"), GeneId::new("A"), 0.5);
        net.add_edge(GeneId::new("A"), GeneId::new("B"), 0.9);
        net.add_node(GeneId::new("D"));

        let view = build_view(&net);

        assert_eq!(view.len(), 4);
        // Indices follow identifier order
        assert_eq!(view.index_of(&GeneId::new("A")), Some(0));
        assert_eq!(view.index_of(&GeneId::new("D")), Some(3));
        assert_eq!(view.graph.neighbors(0), &[1, 2]);
        assert_eq!(view.graph.degree(3), 0);
        assert_eq!(view.weight(0, 2), 0.5);

        let path = bfs(&view.graph, 1, 2).unwrap();
        assert_eq!(
            view.path_keys(&path),
            vec![GeneId::new("B"), GeneId::new("A"), GeneId::new("C")]
        );
    }
}
