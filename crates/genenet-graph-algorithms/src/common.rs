//! Shared utilities for graph algorithms
//!
//! Provides a read-only, dense view of an undirected graph topology for algorithm execution.

/// A dense, integer-indexed view of an undirected graph in Compressed Sparse Row (CSR) format.
///
/// Every undirected edge is stored once per endpoint. Neighbor lists are sorted ascending,
/// so any traversal driven by this view visits nodes in index order. Callers that assign
/// indices in identifier order therefore get identifier-ordered tie-breaking for free.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,
    /// Offsets into `targets`. Size = node_count + 1
    pub offsets: Vec<usize>,
    /// Contiguous array of neighbor indices
    pub targets: Vec<usize>,
    /// Edge weights: aligned with `targets`
    pub weights: Option<Vec<f64>>,
}

impl GraphView {
    /// Build a view from an undirected edge list.
    ///
    /// Self-loops and out-of-range endpoints are ignored. Parallel edges collapse into one,
    /// keeping the largest weight. Missing weights count as 1.0; if no edge carries a weight
    /// the view is unweighted.
    pub fn from_edges(node_count: usize, edges: &[(usize, usize, Option<f64>)]) -> Self {
        let weighted = edges.iter().any(|(_, _, w)| w.is_some());
        let mut adjacency: Vec<Vec<(usize, f64)>> = vec![Vec::new(); node_count];

        for &(u, v, w) in edges {
            if u == v || u >= node_count || v >= node_count {
                continue;
            }
            let w = w.unwrap_or(1.0);
            adjacency[u].push((v, w));
            adjacency[v].push((u, w));
        }

        let mut offsets = Vec::with_capacity(node_count + 1);
        let mut targets = Vec::new();
        let mut flat_weights = Vec::new();

        offsets.push(0);
        for mut neighbors in adjacency {
            // Heaviest first within a target so dedup keeps the max weight
            neighbors.sort_by(|a, b| {
                a.0.cmp(&b.0)
                    .then(b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal))
            });
            neighbors.dedup_by_key(|(t, _)| *t);
            for (t, w) in neighbors {
                targets.push(t);
                flat_weights.push(w);
            }
            offsets.push(targets.len());
        }

        GraphView {
            node_count,
            offsets,
            targets,
            weights: if weighted { Some(flat_weights) } else { None },
        }
    }

    /// Helper to create an unweighted GraphView from adjacency lists (test support)
    pub fn from_adjacency_list(adjacency: &[Vec<usize>]) -> Self {
        let edges: Vec<(usize, usize, Option<f64>)> = adjacency
            .iter()
            .enumerate()
            .flat_map(|(u, neighbors)| neighbors.iter().map(move |&v| (u, v, None)))
            .collect();
        Self::from_edges(adjacency.len(), &edges)
    }

    /// Get the degree of a node (by index)
    pub fn degree(&self, idx: usize) -> usize {
        self.offsets[idx + 1] - self.offsets[idx]
    }

    /// Get neighbors of a node, sorted ascending
    pub fn neighbors(&self, idx: usize) -> &[usize] {
        let start = self.offsets[idx];
        let end = self.offsets[idx + 1];
        &self.targets[start..end]
    }

    /// Get weights aligned with `neighbors(idx)`
    pub fn weights(&self, idx: usize) -> Option<&[f64]> {
        self.weights.as_ref().map(|w| {
            let start = self.offsets[idx];
            let end = self.offsets[idx + 1];
            &w[start..end]
        })
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.targets.len() / 2
    }

    /// Weight of the edge `u`-`v`, or `None` when the nodes are not adjacent.
    /// Unweighted views report 1.0 for every edge.
    pub fn weight_between(&self, u: usize, v: usize) -> Option<f64> {
        let pos = self.neighbors(u).binary_search(&v).ok()?;
        Some(self.weights(u).map(|w| w[pos]).unwrap_or(1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_edges_collapses_duplicates() {
        let view = GraphView::from_edges(
            3,
            &[(0, 1, Some(0.4)), (1, 0, Some(0.9)), (1, 2, None), (2, 2, None)],
        );

        assert_eq!(view.edge_count(), 2);
        assert_eq!(view.neighbors(1), &[0, 2]);
        assert_eq!(view.weight_between(0, 1), Some(0.9));
        assert_eq!(view.weight_between(2, 1), Some(1.0));
        assert_eq!(view.weight_between(0, 2), None);
        assert_eq!(view.degree(2), 1);
    }

    #[test]
    fn test_neighbors_sorted() {
        let view = GraphView::from_adjacency_list(&[vec![3, 1, 2], vec![], vec![], vec![]]);
        assert_eq!(view.neighbors(0), &[1, 2, 3]);
        assert!(view.weights.is_none());
    }
}
