use genenet::{
    AnalysisConfig, AnalysisError, CentralityMeasure, DistanceMethod, GeneId, HubScorer,
    InteractionDatabase, InteractionEdge, NetworkBuilder, Order,
};
use std::collections::BTreeSet;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_from_file() {
    let file = write_config(
        "network:\n  order: zero\n  keep_isolated_seeds: true\n  min_confidence: 0.5\npathway:\n  method: overlap\n  min_size: 3\n",
    );
    let config = AnalysisConfig::from_file(file.path()).unwrap();

    assert_eq!(config.network.order, Order::Zero);
    assert!(config.network.keep_isolated_seeds);
    assert_eq!(config.network.min_confidence, Some(0.5));
    assert_eq!(config.pathway.method, DistanceMethod::Overlap);
    assert_eq!(config.pathway.min_size, 3);
    // Untouched sections keep their defaults
    assert_eq!(config.expression.p_value_threshold, 0.05);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = AnalysisConfig::from_file(dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, AnalysisError::Io(_)));
}

#[test]
fn test_config_drives_builder() {
    let config = AnalysisConfig::from_yaml_str(
        "network:\n  order: zero\n  keep_isolated_seeds: true\n  min_confidence: 0.5\n",
    )
    .unwrap();

    let db = InteractionDatabase::from_edges(vec![
        InteractionEdge::new("A", "B", Some(0.9)),
        InteractionEdge::new("B", "C", Some(0.2)),
    ])
    .unwrap();
    let db = db.with_min_confidence(config.network.min_confidence.unwrap());
    assert_eq!(db.edge_count(), 1);

    let seeds: BTreeSet<GeneId> = ["A", "B", "C"].into_iter().map(GeneId::from).collect();
    let net = NetworkBuilder::from_config(&config.network).build(&seeds, &db).unwrap();
    assert_eq!(net.node_count(), 3);
    assert_eq!(net.edge_count(), 1);
    assert_eq!(net.degree(&GeneId::from("C")), 0);
}

#[test]
fn test_invalid_options() {
    assert!(matches!(
        "second".parse::<Order>(),
        Err(AnalysisError::InvalidConfiguration { .. })
    ));
    assert!(matches!(
        "closeness".parse::<CentralityMeasure>(),
        Err(AnalysisError::InvalidConfiguration { .. })
    ));
    assert!(matches!(
        "cosine".parse::<DistanceMethod>(),
        Err(AnalysisError::InvalidConfiguration { .. })
    ));
    assert!(HubScorer::new(CentralityMeasure::Degree).with_percentile(0.0).is_err());

    let file = write_config("network:\n  measure: closeness\n");
    assert!(matches!(
        AnalysisConfig::from_file(file.path()),
        Err(AnalysisError::Config(_))
    ));
}
