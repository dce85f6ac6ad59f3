//! Pathfinding algorithms
//!
//! Unweighted (hop-count) shortest paths with deterministic tie-breaking. Neighbor lists in
//! `GraphView` are sorted, so among equally short paths BFS always settles on the one whose
//! parents were discovered first in index order.

use super::common::GraphView;
use std::collections::VecDeque;

/// Result of a pathfinding algorithm
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult {
    pub source: usize,
    pub target: usize,
    pub path: Vec<usize>,
    pub cost: f64,
}

impl PathResult {
    /// Number of edges on the path
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Consecutive node pairs along the path
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.path.windows(2).map(|w| (w[0], w[1]))
    }
}

/// Breadth-First Search (Unweighted Shortest Path)
pub fn bfs(view: &GraphView, source: usize, target: usize) -> Option<PathResult> {
    if source >= view.node_count || target >= view.node_count {
        return None;
    }

    let mut queue = VecDeque::new();
    let mut parent: Vec<Option<usize>> = vec![None; view.node_count];
    let mut visited = vec![false; view.node_count];

    queue.push_back(source);
    visited[source] = true;

    while let Some(current) = queue.pop_front() {
        if current == target {
            // Reconstruct path
            let mut path = vec![target];
            let mut curr = target;
            while let Some(p) = parent[curr] {
                path.push(p);
                curr = p;
            }
            path.reverse();
            return Some(PathResult {
                source,
                target,
                cost: (path.len() - 1) as f64,
                path,
            });
        }

        for &next in view.neighbors(current) {
            if !visited[next] {
                visited[next] = true;
                parent[next] = Some(current);
                queue.push_back(next);
            }
        }
    }

    None
}

/// Hop distance from the nearest of `sources` to every node; `None` when unreachable.
pub fn bfs_distances(view: &GraphView, sources: &[usize]) -> Vec<Option<usize>> {
    let mut dist = vec![None; view.node_count];
    let mut queue = VecDeque::new();

    for &s in sources {
        if s < view.node_count && dist[s].is_none() {
            dist[s] = Some(0);
            queue.push_back(s);
        }
    }

    while let Some(v) = queue.pop_front() {
        let next_dist = dist[v].map(|d| d + 1);
        for &w in view.neighbors(v) {
            if dist[w].is_none() {
                dist[w] = next_dist;
                queue.push_back(w);
            }
        }
    }

    dist
}

/// Shortest path from any node in `sources` to any node flagged in `is_target`.
///
/// Among all minimum-length connections the smallest target index wins, then the smallest
/// source index reaching it at that length; the route between the two follows [`bfs`].
/// Interior nodes of the returned path are never sources or targets.
pub fn shortest_path_between(
    view: &GraphView,
    sources: &[usize],
    is_target: &[bool],
) -> Option<PathResult> {
    let n = view.node_count;
    let mut visited = vec![false; n];
    let mut frontier: Vec<usize> = Vec::new();

    for &s in sources {
        if s < n && !visited[s] {
            visited[s] = true;
            frontier.push(s);
        }
    }

    // Level-synchronous BFS: stop at the first level that touches a target
    let target = loop {
        if frontier.is_empty() {
            return None;
        }
        if let Some(&t) = frontier.iter().filter(|&&v| is_target[v]).min() {
            break t;
        }
        let mut next = Vec::new();
        for &v in &frontier {
            for &w in view.neighbors(v) {
                if !visited[w] {
                    visited[w] = true;
                    next.push(w);
                }
            }
        }
        frontier = next;
    };

    let from_target = bfs_distances(view, &[target]);
    let source = sources
        .iter()
        .copied()
        .filter(|&s| s < n)
        .filter_map(|s| from_target[s].map(|d| (d, s)))
        .min()?
        .1;

    bfs(view, source, target)
}

/// Closest pair of labelled groups, from one multi-source BFS.
///
/// `labels[v]` names the group of `v` (`None` for unlabelled nodes). Every node is claimed
/// by the group that reaches it first; the shortest connection between two different
/// groups then crosses a claim boundary, so its length is the minimum of
/// `dist[u] + 1 + dist[w]` over edges `u`-`w` claimed by different groups.
///
/// Returns `(hops, label)`: the minimum connection length and the smallest label that
/// takes part in a connection of that length. `None` when no two groups are connected.
pub fn closest_label(view: &GraphView, labels: &[Option<usize>]) -> Option<(usize, usize)> {
    let n = view.node_count;
    let mut dist: Vec<Option<usize>> = vec![None; n];
    let mut owner: Vec<Option<usize>> = vec![None; n];
    let mut queue = VecDeque::new();

    for (v, label) in labels.iter().enumerate().take(n) {
        if label.is_some() {
            dist[v] = Some(0);
            owner[v] = *label;
            queue.push_back(v);
        }
    }

    while let Some(u) = queue.pop_front() {
        let next = dist[u].map(|d| d + 1);
        for &w in view.neighbors(u) {
            if dist[w].is_none() {
                dist[w] = next;
                owner[w] = owner[u];
                queue.push_back(w);
            }
        }
    }

    let mut best: Option<(usize, usize)> = None;
    for u in 0..n {
        let (Some(du), Some(lu)) = (dist[u], owner[u]) else {
            continue;
        };
        for &w in view.neighbors(u) {
            let (Some(dw), Some(lw)) = (dist[w], owner[w]) else {
                continue;
            };
            if lu != lw {
                let candidate = (du + dw + 1, lu.min(lw));
                if best.map_or(true, |b| candidate < b) {
                    best = Some(candidate);
                }
            }
        }
    }
    best
}
