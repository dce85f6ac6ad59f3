//! Minimally-connected subnetwork extraction
//!
//! Approximate Steiner-tree reduction: every anchor starts as its own component and the
//! two closest components are merged along a shortest path through the network until no
//! further merge is possible. Anchors are first grouped by the connected component they
//! sit in, so merges are only attempted where a path exists.

use crate::algo::{build_view, closest_label, connected_components, shortest_path_between, IndexedView};
use crate::error::AnalysisResult;
use crate::graph::{keys, Network, NodeKey};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

/// Reduces a network to the part needed to connect a set of anchors
#[derive(Debug, Clone)]
pub struct SubnetworkExtractor {
    trim: bool,
}

impl SubnetworkExtractor {
    /// `trim = true` keeps only the merge-path edges; `trim = false` keeps every original
    /// edge among the touched nodes.
    pub fn new(trim: bool) -> Self {
        SubnetworkExtractor { trim }
    }

    /// Extract the subnetwork connecting `anchors` within `net`.
    ///
    /// Anchors absent from `net` are dropped. Anchors that cannot reach the others remain
    /// as disconnected residual nodes. Every node keeps its attributes from `net` and gains
    /// a boolean `anchor` attribute.
    pub fn extract<K: NodeKey>(&self, net: &Network<K>, anchors: &BTreeSet<K>) -> AnalysisResult<Network<K>> {
        self.extract_with(net, anchors, self.trim)
    }

    /// [`extract`](Self::extract) with `trim` given per call instead of by the extractor.
    pub fn extract_with<K: NodeKey>(
        &self,
        net: &Network<K>,
        anchors: &BTreeSet<K>,
        trim: bool,
    ) -> AnalysisResult<Network<K>> {
        if anchors.is_empty() {
            debug!("Empty anchor set, returning empty network");
            return Ok(Network::new());
        }

        let view = build_view(net);
        let anchor_idx = view.indices_of(anchors);
        let dropped = anchors.len() - anchor_idx.len();
        if dropped > 0 {
            warn!("{} anchors are not in the network and were dropped", dropped);
        }

        let partition = connected_components(&view.graph);
        let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for &a in &anchor_idx {
            groups.entry(partition.component(a)).or_default().push(a);
        }

        let mut touched: BTreeSet<usize> = BTreeSet::new();
        let mut path_edges: BTreeSet<(usize, usize)> = BTreeSet::new();
        for group in groups.values() {
            steiner_merge(&view, group, &mut touched, &mut path_edges);
        }

        let mut result = Network::new();
        for &i in &touched {
            let key = view.key(i);
            let node = result.add_node(key.clone());
            if let Some(original) = net.node(key) {
                node.attributes = original.attributes.clone();
            }
        }
        if trim {
            for &(u, v) in &path_edges {
                result.add_edge(view.key(u).clone(), view.key(v).clone(), view.weight(u, v));
            }
        } else {
            for &u in &touched {
                for &v in view.graph.neighbors(u) {
                    if v > u && touched.contains(&v) {
                        result.add_edge(view.key(u).clone(), view.key(v).clone(), view.weight(u, v));
                    }
                }
            }
        }
        for node in result.nodes_mut() {
            let is_anchor = anchors.contains(&node.id);
            node.set(keys::ANCHOR, is_anchor);
        }

        info!(
            "Extracted subnetwork: {} nodes, {} edges for {} anchors in {} groups (trim = {})",
            result.node_count(),
            result.edge_count(),
            anchor_idx.len(),
            groups.len(),
            trim
        );
        Ok(result)
    }
}

/// Merge the anchors of one connected component into a single tree-like union of paths.
///
/// Each step is one labelled BFS over the view plus one set-to-set search. Components are
/// kept ordered by smallest member; the first one taking part in a connection of the
/// globally shortest length is merged, along the path [`shortest_path_between`] picks
/// from it (smallest target, then smallest source).
fn steiner_merge<K: NodeKey>(
    view: &IndexedView<K>,
    anchors: &[usize],
    touched: &mut BTreeSet<usize>,
    path_edges: &mut BTreeSet<(usize, usize)>,
) {
    let n = view.len();
    // Each component: sorted member list
    let mut components: Vec<Vec<usize>> = anchors.iter().map(|&a| vec![a]).collect();
    let mut label: Vec<Option<usize>> = vec![None; n];

    while components.len() > 1 {
        for (c, members) in components.iter().enumerate() {
            for &m in members {
                label[m] = Some(c);
            }
        }

        // Closest pair of components; the smaller-indexed one wins ties
        let Some((hops, c)) = closest_label(&view.graph, &label) else {
            break;
        };
        let targets: Vec<bool> = label.iter().map(|l| l.is_some_and(|x| x != c)).collect();
        let Some(path) = shortest_path_between(&view.graph, &components[c], &targets) else {
            break;
        };
        debug_assert_eq!(path.hops(), hops);
        let Some(other) = label[path.target] else {
            break;
        };

        for (u, v) in path.edges() {
            path_edges.insert((u.min(v), u.max(v)));
        }
        let mut merged: Vec<usize> = components[c]
            .iter()
            .chain(components[other].iter())
            .chain(path.path.iter())
            .copied()
            .collect();
        merged.sort_unstable();
        merged.dedup();

        debug!(
            "Merged {} and {} over {} hops",
            view.key(path.source),
            view.key(path.target),
            path.hops()
        );

        let (keep, remove) = (c.min(other), c.max(other));
        components[keep] = merged;
        components.remove(remove);
        components.sort_by_key(|members| members[0]);
        label.iter_mut().for_each(|l| *l = None);
    }

    for members in components {
        touched.extend(members);
    }
}
