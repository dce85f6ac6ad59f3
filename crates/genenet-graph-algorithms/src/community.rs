//! Connected components
//!
//! The component partition is computed once per graph and shared by centrality
//! scoring and subnetwork extraction.

use super::common::GraphView;

/// Partition of node indices into connected components.
///
/// Components are numbered in order of their smallest member index, and each member
/// list is sorted ascending.
#[derive(Debug, Clone, Default)]
pub struct ComponentPartition {
    /// Node index -> component id
    pub component_of: Vec<usize>,
    /// Component id -> member node indices
    pub members: Vec<Vec<usize>>,
}

impl ComponentPartition {
    pub fn count(&self) -> usize {
        self.members.len()
    }

    pub fn component(&self, idx: usize) -> usize {
        self.component_of[idx]
    }

    pub fn members(&self, component: usize) -> &[usize] {
        &self.members[component]
    }

    pub fn same_component(&self, a: usize, b: usize) -> bool {
        self.component_of[a] == self.component_of[b]
    }

    /// Size of the largest component (0 for an empty graph)
    pub fn largest(&self) -> usize {
        self.members.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Union-Find data structure
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    pub fn new(size: usize) -> Self {
        UnionFind {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    pub fn find(&mut self, i: usize) -> usize {
        if self.parent[i] != i {
            self.parent[i] = self.find(self.parent[i]); // Path compression
        }
        self.parent[i]
    }

    /// Merge the sets containing `i` and `j`. Returns false if they were already joined.
    pub fn union(&mut self, i: usize, j: usize) -> bool {
        let root_i = self.find(i);
        let root_j = self.find(j);

        if root_i == root_j {
            return false;
        }
        if self.rank[root_i] < self.rank[root_j] {
            self.parent[root_i] = root_j;
        } else if self.rank[root_i] > self.rank[root_j] {
            self.parent[root_j] = root_i;
        } else {
            self.parent[root_j] = root_i;
            self.rank[root_i] += 1;
        }
        true
    }

    pub fn connected(&mut self, i: usize, j: usize) -> bool {
        self.find(i) == self.find(j)
    }
}

/// Connected components of an undirected view.
pub fn connected_components(view: &GraphView) -> ComponentPartition {
    let n = view.node_count;
    let mut uf = UnionFind::new(n);

    for u in 0..n {
        for &v in view.neighbors(u) {
            if v > u {
                uf.union(u, v);
            }
        }
    }

    // Iterating indices ascending numbers components by their smallest member
    let mut root_to_component = vec![usize::MAX; n];
    let mut component_of = vec![0; n];
    let mut members: Vec<Vec<usize>> = Vec::new();

    for i in 0..n {
        let root = uf.find(i);
        if root_to_component[root] == usize::MAX {
            root_to_component[root] = members.len();
            members.push(Vec::new());
        }
        let c = root_to_component[root];
        component_of[i] = c;
        members[c].push(i);
    }

    ComponentPartition {
        component_of,
        members,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_components() {
        // Edges: 0-1, 2-3-4, 5 isolated
        let view = GraphView::from_adjacency_list(&[
            vec![1],
            vec![],
            vec![3],
            vec![4],
            vec![],
            vec![],
        ]);

        let partition = connected_components(&view);

        assert_eq!(partition.count(), 3);
        assert_eq!(partition.members(0), &[0, 1]);
        assert_eq!(partition.members(1), &[2, 3, 4]);
        assert_eq!(partition.members(2), &[5]);
        assert!(partition.same_component(2, 4));
        assert!(!partition.same_component(0, 5));
        assert_eq!(partition.largest(), 3);
    }

    #[test]
    fn test_union_find() {
        let mut uf = UnionFind::new(4);
        assert!(uf.union(0, 1));
        assert!(!uf.union(1, 0));
        assert!(uf.union(2, 3));
        assert!(!uf.connected(0, 3));
        uf.union(1, 2);
        assert!(uf.connected(0, 3));
    }
}
