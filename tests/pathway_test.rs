use genenet::data::tsv;
use genenet::graph::keys;
use genenet::{
    AnalysisError, AttributeValue, DistanceMethod, EnrichmentResult, PathwayCollection, PathwayId,
    PathwayNetworkBuilder, PathwaySimilarityEngine,
};
use std::collections::BTreeSet;
use std::io::Cursor;

// P1/P2 share two of four genes, P3 nests in P4, P5 is unrelated
const MEMBERSHIP: &str = concat!(
    "pathway_id\tpathway_name\tparent_group\tgene_id\n",
    "P1\tCell cycle\tCellular Processes\tg1\n",
    "P1\tCell cycle\tCellular Processes\tg2\n",
    "P1\tCell cycle\tCellular Processes\tg3\n",
    "P2\tp53 signaling\tCellular Processes\tg2\n",
    "P2\tp53 signaling\tCellular Processes\tg3\n",
    "P2\tp53 signaling\tCellular Processes\tg4\n",
    "P3\tGlycolysis\tMetabolism\th1\n",
    "P3\tGlycolysis\tMetabolism\th2\n",
    "P4\tCarbon metabolism\tMetabolism\th1\n",
    "P4\tCarbon metabolism\tMetabolism\th2\n",
    "P4\tCarbon metabolism\tMetabolism\th3\n",
    "P5\tRibosome\tGenetic Information\tz1\n",
);

const ENRICHMENT: &str = concat!(
    "pathway_id\tdirection\tp_value\tadj_p_value\tcomparison\tgenes\n",
    "P1\tup\t0.001\t0.02\tday1\tg1;g2\n",
    "P1\tup\t0.0001\t0.004\tday7\tg1/g2/g3\n",
    "P3\tdown\t0.01\t0.04\tday7\th1\n",
);

fn p(id: &str) -> PathwayId {
    PathwayId::new(id)
}

fn pathways() -> PathwayCollection {
    tsv::read_pathways(Cursor::new(MEMBERSHIP)).unwrap()
}

fn enrichment() -> EnrichmentResult {
    tsv::read_enrichment(Cursor::new(ENRICHMENT)).unwrap()
}

fn ids(net: &genenet::PathwayNetwork) -> BTreeSet<PathwayId> {
    net.node_ids().cloned().collect()
}

#[test]
fn test_distance_matrix_properties() {
    let matrix = PathwaySimilarityEngine::new(DistanceMethod::Jaccard)
        .distances_for(&pathways())
        .unwrap();
    assert_eq!(matrix.len(), 5);

    for a in matrix.ids() {
        assert_eq!(matrix.get(a, a), Some(0.0));
        for b in matrix.ids() {
            let d = matrix.get(a, b).unwrap();
            assert!((0.0..=1.0).contains(&d));
            assert_eq!(d, matrix.get(b, a).unwrap());
        }
    }
    assert!((matrix.get(&p("P1"), &p("P2")).unwrap() - 0.5).abs() < 1e-12);
    assert!((matrix.get(&p("P3"), &p("P4")).unwrap() - 1.0 / 3.0).abs() < 1e-12);
    assert_eq!(matrix.get(&p("P1"), &p("P5")), Some(1.0));

    // Overlap treats a nested set as identical
    let overlap = PathwaySimilarityEngine::new(DistanceMethod::Overlap)
        .distances_for(&pathways())
        .unwrap();
    assert_eq!(overlap.get(&p("P3"), &p("P4")), Some(0.0));
}

#[test]
fn test_foundation_is_monotonic_in_threshold() {
    let matrix = PathwaySimilarityEngine::default().distances_for(&pathways()).unwrap();
    let builder = PathwayNetworkBuilder::new();

    let mut previous: BTreeSet<(PathwayId, PathwayId)> = BTreeSet::new();
    for max_distance in [0.0, 0.3, 0.4, 0.6, 1.0] {
        let foundation = builder.foundation(&matrix, max_distance).unwrap();
        assert_eq!(foundation.network().node_count(), 5);
        let edges: BTreeSet<_> = foundation.network().edges().map(|e| e.key()).collect();
        assert!(previous.is_subset(&edges), "threshold {}", max_distance);
        previous = edges;
    }
    // At 1.0 every pair is connected
    assert_eq!(previous.len(), 10);

    let foundation = builder.foundation(&matrix, 0.4).unwrap();
    let edge = foundation.network().edges().next().unwrap();
    assert_eq!((edge.source.as_str(), edge.target.as_str()), ("P3", "P4"));
    assert!((edge.weight - 2.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_enrichment_overlay() {
    let matrix = PathwaySimilarityEngine::default().distances_for(&pathways()).unwrap();
    let builder = PathwayNetworkBuilder::new();
    let mut foundation = builder.foundation(&matrix, 0.6).unwrap();
    assert_eq!(foundation.describe(&pathways()), 5);

    let trimmed = builder.create(&foundation, &enrichment(), true).unwrap();
    let full = builder.create(&foundation, &enrichment(), false).unwrap();

    assert_eq!(ids(&trimmed), [p("P1"), p("P2"), p("P3"), p("P4")].into_iter().collect());
    assert_eq!(ids(&full).len(), 5);
    assert!(ids(&trimmed).is_subset(&ids(&full)));
    assert_eq!(trimmed.edge_count(), full.edge_count());

    let p1 = trimmed.node(&p("P1")).unwrap();
    assert!(p1.flag(keys::ENRICHED));
    assert_eq!(p1.float(keys::ADJ_P_VALUE), Some(0.004));
    assert_eq!(p1.get(keys::COMPARISON), Some(&AttributeValue::from("day7")));
    assert_eq!(p1.get(keys::GENE_COUNT), Some(&AttributeValue::Integer(3)));
    assert_eq!(
        p1.get(keys::COMPARISONS).and_then(|v| v.as_list()),
        Some(&["day1".to_string(), "day7".to_string()][..])
    );
    assert_eq!(p1.get(keys::NAME), Some(&AttributeValue::from("Cell cycle")));

    let p3 = trimmed.node(&p("P3")).unwrap();
    assert_eq!(p3.get(keys::DIRECTION), Some(&AttributeValue::from("down")));

    let p2 = trimmed.node(&p("P2")).unwrap();
    assert!(!p2.flag(keys::ENRICHED));
    assert_eq!(p2.get(keys::GROUP), Some(&AttributeValue::from("Cellular Processes")));
}

#[test]
fn test_unknown_enriched_pathway_fails() {
    let matrix = PathwaySimilarityEngine::default().distances_for(&pathways()).unwrap();
    let builder = PathwayNetworkBuilder::new();
    let foundation = builder.foundation(&matrix, 0.6).unwrap();

    let rows = concat!(
        "pathway_id\tdirection\tp_value\tadj_p_value\n",
        "P1\tup\t0.001\t0.01\n",
        "P42\tdown\t0.001\t0.01\n",
    );
    let enrichment = tsv::read_enrichment(Cursor::new(rows)).unwrap();
    match builder.create(&foundation, &enrichment, true) {
        Err(AnalysisError::MappingError { id, .. }) => assert_eq!(id, "P42"),
        other => panic!("expected mapping error, got {:?}", other),
    }
}

#[test]
fn test_size_filter_removes_pathways_from_foundation() {
    let filtered = pathways().filter_by_size(2, None);
    assert_eq!(filtered.len(), 4);

    let matrix = PathwaySimilarityEngine::default().distances_for(&filtered).unwrap();
    let foundation = PathwayNetworkBuilder::new().foundation(&matrix, 0.6).unwrap();
    assert!(!foundation.contains(&p("P5")));
}
