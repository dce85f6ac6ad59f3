//! Seeded network construction
//!
//! Builds a gene network from a seed set and the interaction database under one of three
//! neighborhood policies (zero, first, minimum order).

use crate::algo::{closest_label, shortest_path_between};
use crate::config::NetworkConfig;
use crate::data::InteractionDatabase;
use crate::error::{AnalysisError, AnalysisResult};
use crate::graph::{keys, GeneId, Network};
use genenet_graph_algorithms::community::UnionFind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// How far the network expands beyond the seed set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    /// Induced subgraph on the seeds
    Zero,
    /// Seeds plus their direct interaction partners
    First,
    /// Induced subgraph joined by shortest connector paths
    Minimum,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Order::Zero => "zero",
            Order::First => "first",
            Order::Minimum => "minimum",
        })
    }
}

impl FromStr for Order {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zero" | "0" => Ok(Order::Zero),
            "first" | "1" => Ok(Order::First),
            "minimum" | "min" => Ok(Order::Minimum),
            other => Err(AnalysisError::invalid_config("order", other)),
        }
    }
}

/// Builds seeded networks from an [`InteractionDatabase`]
#[derive(Debug, Clone)]
pub struct NetworkBuilder {
    order: Order,
    keep_isolated_seeds: bool,
}

impl NetworkBuilder {
    pub fn new(order: Order) -> Self {
        NetworkBuilder {
            order,
            keep_isolated_seeds: false,
        }
    }

    pub fn from_config(config: &NetworkConfig) -> Self {
        NetworkBuilder {
            order: config.order,
            keep_isolated_seeds: config.keep_isolated_seeds,
        }
    }

    /// Also emit seeds that end up without any edge (including seeds unknown to the
    /// database) as isolated nodes, so they can still be annotated.
    pub fn keep_isolated_seeds(mut self, keep: bool) -> Self {
        self.keep_isolated_seeds = keep;
        self
    }

    pub fn order(&self) -> Order {
        self.order
    }

    /// Build the network for `seeds`. An empty seed set yields an empty network.
    ///
    /// Every node carries a boolean `seed` attribute.
    pub fn build(&self, seeds: &BTreeSet<GeneId>, db: &InteractionDatabase) -> AnalysisResult<Network<GeneId>> {
        if seeds.is_empty() {
            debug!("Empty seed set, returning empty network");
            return Ok(Network::new());
        }

        let mut net = match self.order {
            Order::Zero => zero_order(seeds, db),
            Order::First => first_order(seeds, db),
            Order::Minimum => minimum_order(seeds, db),
        };

        if self.keep_isolated_seeds {
            for seed in seeds {
                net.add_node(seed.clone());
            }
        }
        for node in net.nodes_mut() {
            let is_seed = seeds.contains(&node.id);
            node.set(keys::SEED, is_seed);
        }

        let unknown = seeds.iter().filter(|s| !db.contains(s)).count();
        info!(
            "Built {} order network: {} nodes, {} edges from {} seeds ({} unknown to database)",
            self.order,
            net.node_count(),
            net.edge_count(),
            seeds.len(),
            unknown
        );
        Ok(net)
    }
}

fn zero_order(seeds: &BTreeSet<GeneId>, db: &InteractionDatabase) -> Network<GeneId> {
    let view = db.view();
    let seed_idx = view.indices_of(seeds);
    let mut is_seed = vec![false; view.len()];
    for &i in &seed_idx {
        is_seed[i] = true;
    }

    let mut net = Network::new();
    for &u in &seed_idx {
        for &v in view.graph.neighbors(u) {
            if v > u && is_seed[v] {
                net.add_edge(view.key(u).clone(), view.key(v).clone(), db.weight_at(u, v));
            }
        }
    }
    net
}

fn first_order(seeds: &BTreeSet<GeneId>, db: &InteractionDatabase) -> Network<GeneId> {
    let view = db.view();
    let mut net = Network::new();
    for u in view.indices_of(seeds) {
        for &v in view.graph.neighbors(u) {
            net.add_edge(view.key(u).clone(), view.key(v).clone(), db.weight_at(u, v));
        }
    }
    net
}

/// Zero-order graph over every seed known to the database, then repeatedly joined by the
/// shortest connector path between the closest pair of components.
///
/// Each merge step costs one labelled BFS ([`closest_label`]) plus one set-to-set search.
/// Ties are broken component-first: among components with a connection of the globally
/// shortest length, the one with the smallest member wins. Within it the path follows
/// [`shortest_path_between`] (smallest target, then smallest source), which is not the same
/// as the smallest endpoint pair overall. Seeds that stay unconnected are dropped like
/// isolated seeds in the zero-order network.
fn minimum_order(seeds: &BTreeSet<GeneId>, db: &InteractionDatabase) -> Network<GeneId> {
    let view = db.view();
    let graph = &view.graph;
    let n = view.len();

    let seed_idx = view.indices_of(seeds);
    let mut in_net = vec![false; n];
    let mut uf = UnionFind::new(n);
    let mut edges: BTreeSet<(usize, usize)> = BTreeSet::new();

    for &u in &seed_idx {
        in_net[u] = true;
    }
    for &u in &seed_idx {
        for &v in graph.neighbors(u) {
            if v > u && in_net[v] {
                edges.insert((u, v));
                uf.union(u, v);
            }
        }
    }

    let mut labels: Vec<Option<usize>> = vec![None; n];
    let mut merges = 0usize;
    loop {
        let components = current_components(&in_net, &mut uf);
        if components.len() <= 1 {
            break;
        }

        labels.iter_mut().for_each(|l| *l = None);
        for (c, members) in components.iter().enumerate() {
            for &m in members {
                labels[m] = Some(c);
            }
        }

        let Some((hops, c)) = closest_label(graph, &labels) else {
            debug!("No connecting path between {} remaining components", components.len());
            break;
        };
        let targets: Vec<bool> = labels.iter().map(|l| l.is_some_and(|x| x != c)).collect();
        let Some(path) = shortest_path_between(graph, &components[c], &targets) else {
            break;
        };
        debug_assert_eq!(path.hops(), hops);

        for (u, v) in path.edges() {
            in_net[u] = true;
            in_net[v] = true;
            edges.insert((u.min(v), u.max(v)));
            uf.union(u, v);
        }
        merges += 1;
        debug!(
            "Connected {} to {} through {} connector genes",
            view.key(path.source),
            view.key(path.target),
            path.hops().saturating_sub(1)
        );
    }
    debug!("Minimum order expansion finished after {} merges", merges);

    let mut net = Network::new();
    for (u, v) in edges {
        net.add_edge(view.key(u).clone(), view.key(v).clone(), db.weight_at(u, v));
    }
    net
}

/// Members of each component among `in_net` nodes, sorted, ordered by smallest member
fn current_components(in_net: &[bool], uf: &mut UnionFind) -> Vec<Vec<usize>> {
    let mut by_root: std::collections::BTreeMap<usize, Vec<usize>> = std::collections::BTreeMap::new();
    for i in (0..in_net.len()).filter(|&i| in_net[i]) {
        by_root.entry(uf.find(i)).or_default().push(i);
    }
    let mut components: Vec<Vec<usize>> = by_root.into_values().collect();
    components.sort_by_key(|members| members[0]);
    components
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::InteractionEdge;

    fn g(id: &str) -> GeneId {
        GeneId::new(id)
    }

    fn seeds(ids: &[&str]) -> BTreeSet<GeneId> {
        ids.iter().map(|s| g(s)).collect()
    }

    // A-B, B-C, C-D, D-E, A-X, Y-Z
    fn db() -> InteractionDatabase {
        InteractionDatabase::from_edges(vec![
            InteractionEdge::new("A", "B", Some(0.9)),
            InteractionEdge::new("B", "C", Some(0.8)),
            InteractionEdge::new("C", "D", Some(0.7)),
            InteractionEdge::new("D", "E", Some(0.6)),
            InteractionEdge::new("A", "X", Some(0.5)),
            InteractionEdge::new("Y", "Z", None),
        ])
        .unwrap()
    }

    #[test]
    fn test_zero_order_induced() {
        let net = NetworkBuilder::new(Order::Zero)
            .build(&seeds(&["A", "B", "E", "Q"]), &db())
            .unwrap();

        assert_eq!(net.node_count(), 2);
        assert_eq!(net.edge_count(), 1);
        assert!(net.contains_edge(&g("A"), &g("B")));
        assert!(!net.contains_node(&g("E")));
        assert!(net.node(&g("A")).unwrap().flag(keys::SEED));
    }

    #[test]
    fn test_zero_order_keep_isolated() {
        let net = NetworkBuilder::new(Order::Zero)
            .keep_isolated_seeds(true)
            .build(&seeds(&["A", "B", "E", "Q"]), &db())
            .unwrap();
        assert_eq!(net.node_count(), 4);
        assert_eq!(net.degree(&g("Q")), 0);
    }

    #[test]
    fn test_first_order_neighborhood() {
        let net = NetworkBuilder::new(Order::First)
            .build(&seeds(&["A"]), &db())
            .unwrap();

        assert_eq!(net.node_count(), 3);
        assert!(net.contains_edge(&g("A"), &g("B")));
        assert!(net.contains_edge(&g("A"), &g("X")));
        // No second hop
        assert!(!net.contains_node(&g("C")));
        assert!(!net.node(&g("X")).unwrap().flag(keys::SEED));
        assert_eq!(net.edges().find(|e| e.target == g("X")).unwrap().weight, 0.5);
    }

    #[test]
    fn test_minimum_order_connects_through_path() {
        let net = NetworkBuilder::new(Order::Minimum)
            .build(&seeds(&["A", "E"]), &db())
            .unwrap();

        assert!(net.is_connected());
        let ids: Vec<&str> = net.node_ids().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C", "D", "E"]);
        assert_eq!(net.edge_count(), 4);
        assert!(!net.contains_node(&g("X")));
    }

    #[test]
    fn test_minimum_order_unreachable_seed_dropped() {
        let net = NetworkBuilder::new(Order::Minimum)
            .build(&seeds(&["A", "C", "Y"]), &db())
            .unwrap();

        assert_eq!(net.node_ids().map(|id| id.as_str()).collect::<Vec<_>>(), vec!["A", "B", "C"]);
        assert!(net.is_connected());
    }

    fn db_from(pairs: &[(&str, &str)]) -> InteractionDatabase {
        InteractionDatabase::from_edges(pairs.iter().map(|(a, b)| InteractionEdge::new(*a, *b, None)).collect::<Vec<_>>())
            .unwrap()
    }

    fn edge_ids(net: &Network<GeneId>) -> Vec<(String, String)> {
        net.edges()
            .map(|e| (e.source.as_str().to_string(), e.target.as_str().to_string()))
            .collect()
    }

    #[test]
    fn test_minimum_order_merges_globally_closest_pair_first() {
        // M-N are 2 apart, A is 3 from M but only 2 from C once M-C-N is joined
        let db = db_from(&[
            ("M", "C"),
            ("C", "N"),
            ("A", "Q"),
            ("Q", "C"),
            ("A", "D1"),
            ("D1", "D2"),
            ("D2", "M"),
        ]);
        let net = NetworkBuilder::new(Order::Minimum)
            .build(&seeds(&["A", "M", "N"]), &db)
            .unwrap();

        let ids: Vec<&str> = net.node_ids().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["A", "C", "M", "N", "Q"]);
        assert_eq!(net.edge_count(), 4);
        assert!(net.contains_edge(&g("A"), &g("Q")));
        assert!(net.contains_edge(&g("Q"), &g("C")));
        assert!(!net.contains_node(&g("D1")));
    }

    #[test]
    fn test_minimum_order_equal_length_tie() {
        // Every seed pair is 2 hops apart
        let db = db_from(&[("A", "P"), ("P", "M"), ("M", "R"), ("R", "N"), ("A", "S"), ("S", "N")]);
        let net = NetworkBuilder::new(Order::Minimum)
            .build(&seeds(&["A", "M", "N"]), &db)
            .unwrap();

        // {A} joins its smallest target M first, then {A, M, P} reaches N from source A
        assert_eq!(
            edge_ids(&net),
            vec![
                ("A".to_string(), "P".to_string()),
                ("A".to_string(), "S".to_string()),
                ("M".to_string(), "P".to_string()),
                ("N".to_string(), "S".to_string()),
            ]
        );
        assert!(!net.contains_node(&g("R")));
    }

    #[test]
    fn test_empty_seeds() {
        let net = NetworkBuilder::new(Order::Minimum)
            .build(&BTreeSet::new(), &db())
            .unwrap();
        assert!(net.is_empty());
    }

    #[test]
    fn test_order_parse() {
        assert_eq!("Minimum".parse::<Order>().unwrap(), Order::Minimum);
        let err = "second".parse::<Order>().unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidConfiguration { .. }));
    }
}
