//! Centrality algorithms: Degree and Betweenness (Brandes).
//!
//! Both operate on undirected views. Shortest paths never cross component boundaries, so
//! betweenness is naturally accumulated per connected component.

use super::common::GraphView;
use std::collections::VecDeque;

/// Raw degree of every node, as `f64` for uniform handling with other measures.
pub fn degree_centrality(view: &GraphView) -> Vec<f64> {
    (0..view.node_count).map(|i| view.degree(i) as f64).collect()
}

/// Betweenness centrality via Brandes' algorithm (unweighted, undirected).
///
/// Scores are unnormalized pair counts: each unordered pair (s, t) contributes the fraction
/// of its shortest paths passing through a node. Isolated nodes and leaves score 0.
/// Sources are processed in index order so the floating-point accumulation is reproducible.
pub fn betweenness_centrality(view: &GraphView) -> Vec<f64> {
    let n = view.node_count;
    let mut bc = vec![0.0_f64; n];
    if n == 0 {
        return bc;
    }

    let mut stack: Vec<usize> = Vec::with_capacity(n);
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma = vec![0.0_f64; n];
    let mut dist = vec![-1i64; n];
    let mut delta = vec![0.0_f64; n];
    let mut queue = VecDeque::new();

    for s in 0..n {
        if view.degree(s) == 0 {
            continue;
        }

        stack.clear();
        predecessors.iter_mut().for_each(Vec::clear);
        sigma.iter_mut().for_each(|x| *x = 0.0);
        dist.iter_mut().for_each(|d| *d = -1);
        delta.iter_mut().for_each(|d| *d = 0.0);

        sigma[s] = 1.0;
        dist[s] = 0;
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            stack.push(v);
            for &w in view.neighbors(v) {
                if dist[w] < 0 {
                    queue.push_back(w);
                    dist[w] = dist[v] + 1;
                }
                if dist[w] == dist[v] + 1 {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        // Back-propagation
        while let Some(w) = stack.pop() {
            for &v in &predecessors[w] {
                delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
            }
            if w != s {
                bc[w] += delta[w];
            }
        }
    }

    // Every unordered pair was counted from both ends
    for b in bc.iter_mut() {
        *b /= 2.0;
    }
    bc
}
