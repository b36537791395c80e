//! Configuration parsing, validation, and request building.


use memscout::memscout_core::config::{DEFAULT_SAFETY_MARGIN, DEFAULT_SAMPLE_ROWS};
use memscout::{
    DecisionThresholds, ErrorKind, EstimationRequest, EstimatorConfig, FileFormat, LogicalType,
    OverheadTable, SamplingStrategy, TypeOverhead,
};
use test_data_gen::{cleanup, create_temp_dir, write_bytes};

#[test]
fn test_defaults_match_documented_constants() {
    let cfg = EstimatorConfig::default();
    assert_eq!(cfg.sample_rows, 1000);
    assert_eq!(cfg.safety_margin, 0.3);
    assert_eq!(cfg.thresholds.eager_max_ratio, 0.65);
    assert_eq!(cfg.thresholds.lazy_max_ratio, 2.0);
    assert_eq!(cfg.csv_format_overhead, 1.59);
    assert_eq!(cfg.parquet_format_overhead, 1.22);
    assert_eq!(cfg.csv_delimiter, ',');
    assert!(cfg.sniff_signature);
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_empty_document_keeps_defaults() {
    let cfg = EstimatorConfig::from_yaml_str("{}").expect("valid yaml");
    assert_eq!(cfg, EstimatorConfig::default());
}

#[test]
fn test_partial_yaml_overrides_named_keys() {
    let yaml = r#"
sample_rows: 250
safety_margin: 0.1
thresholds:
  lazy_max_ratio: 3.0
csv_delimiter: ";"
"#;
    let cfg = EstimatorConfig::from_yaml_str(yaml).expect("valid yaml");
    assert_eq!(cfg.sample_rows, 250);
    assert_eq!(cfg.safety_margin, 0.1);
    assert_eq!(cfg.thresholds.eager_max_ratio, 0.65);
    assert_eq!(cfg.thresholds.lazy_max_ratio, 3.0);
    assert_eq!(cfg.csv_delimiter, ';');
    assert_eq!(cfg.parquet_format_overhead, 1.22);
}

#[test]
fn test_overhead_table_replaces_defaults() {
    let yaml = r#"
type_overheads:
  string: 3.0
  integer: 1.5
"#;
    let cfg = EstimatorConfig::from_yaml_str(yaml).expect("valid yaml");
    let table = &cfg.type_overheads;
    assert_eq!(table.overhead(&LogicalType::String), 3.0);
    assert_eq!(table.overhead(&LogicalType::Integer), 1.5);
    // untabulated types take the largest multiplier
    assert_eq!(table.overhead(&LogicalType::Float), 3.0);
    assert_eq!(table.overhead(&LogicalType::Other), 3.0);
}

#[test]
fn test_invalid_values_are_rejected() {
    let cases = [
        "sample_rows: 0",
        "safety_margin: 1.0",
        "safety_margin: -0.2",
        "thresholds: {eager_max_ratio: 2.5, lazy_max_ratio: 2.0}",
        "csv_format_overhead: 0.5",
        "type_overheads: {string: 0.9}",
        "type_overheads: {}",
        "type_overheads: {decimal: 2.0}",
        "sample_rows: lots",
    ];
    for doc in cases {
        let err = EstimatorConfig::from_yaml_str(doc).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration, "{}", doc);
    }
}

#[test]
fn test_unvalidated_parse_defers_range_checks() {
    let mut cfg = EstimatorConfig::parse_yaml_str("safety_margin: 1.5").expect("shape is valid");
    assert_eq!(cfg.safety_margin, 1.5);
    assert_eq!(cfg.validate().unwrap_err().kind(), ErrorKind::InvalidConfiguration);
    cfg.safety_margin = 0.2;
    assert!(cfg.validate().is_ok());

    let err = EstimatorConfig::parse_yaml_str("sample_rows: lots").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
}

#[test]
fn test_profiles_carry_configured_overheads() {
    let cfg = EstimatorConfig {
        csv_format_overhead: 2.5,
        ..EstimatorConfig::default()
    };
    let csv = cfg.csv_profile();
    assert_eq!(csv.format, FileFormat::Csv);
    assert_eq!(csv.overhead, 2.5);
    assert_eq!(csv.sampling, SamplingStrategy::HeadRows);
    let parquet = cfg.parquet_profile();
    assert_eq!(parquet.overhead, 1.22);
    assert_eq!(parquet.sampling, SamplingStrategy::MetadataOnly);
}

#[test]
fn test_json_documents_are_accepted() {
    let json = serde_json::json!({
        "sample_rows": 42,
        "sniff_signature": false,
    })
    .to_string();
    let cfg = EstimatorConfig::from_yaml_str(&json).expect("json is yaml");
    assert_eq!(cfg.sample_rows, 42);
    assert!(!cfg.sniff_signature);
}

#[test]
fn test_serialized_config_reloads_unchanged() {
    let mut cfg = EstimatorConfig::default();
    cfg.sample_rows = 77;
    cfg.thresholds = DecisionThresholds {
        eager_max_ratio: 0.5,
        lazy_max_ratio: 1.5,
    };
    cfg.type_overheads =
        OverheadTable::from_entries([(LogicalType::String, 2.5), (LogicalType::Float, 1.1)])
            .expect("valid table");
    let yaml = serde_yaml::to_string(&cfg).expect("serializable");
    assert_eq!(EstimatorConfig::from_yaml_str(&yaml).expect("reload"), cfg);
}

#[test]
fn test_config_file_loading() {
    let dir = create_temp_dir("config-file");
    let path = dir.join("memscout.yaml");
    write_bytes(&path, b"sample_rows: 10\nsafety_margin: 0.5\n");

    let cfg = EstimatorConfig::from_yaml_file(&path).expect("config file");
    assert_eq!(cfg.sample_rows, 10);
    assert_eq!(cfg.safety_margin, 0.5);

    let err = EstimatorConfig::from_yaml_file(&dir.join("missing.yaml")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FileNotFound);

    cleanup(&dir);
}

#[test]
fn test_environment_overlays_defaults() {
    // The only test in this binary that touches these variables.
    std::env::set_var("MEMSCOUT_SAMPLE_ROWS", "64");
    std::env::set_var("MEMSCOUT_SAFETY_MARGIN", "not-a-number");
    std::env::set_var("MEMSCOUT_CSV_DELIMITER", "|");
    let cfg = EstimatorConfig::from_env();
    std::env::remove_var("MEMSCOUT_SAMPLE_ROWS");
    std::env::remove_var("MEMSCOUT_SAFETY_MARGIN");
    std::env::remove_var("MEMSCOUT_CSV_DELIMITER");

    assert_eq!(cfg.sample_rows, 64);
    assert_eq!(cfg.safety_margin, DEFAULT_SAFETY_MARGIN);
    assert_eq!(cfg.csv_delimiter, '|');
}

#[test]
fn test_request_builder_and_validation() {
    let request = EstimationRequest::new("data.csv");
    assert_eq!(request.sample_rows, DEFAULT_SAMPLE_ROWS);
    assert_eq!(request.safety_margin, DEFAULT_SAFETY_MARGIN);
    assert!(request.validate().is_ok());

    let request = request.with_sample_rows(5).with_safety_margin(0.0);
    assert_eq!(request.sample_rows, 5);
    assert!(request.validate().is_ok());

    for margin in [1.0, 1.01, -0.01, f64::NAN] {
        let err = EstimationRequest::new("data.csv")
            .with_safety_margin(margin)
            .validate()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
    }

    let cfg = EstimatorConfig {
        sample_rows: 12,
        safety_margin: 0.4,
        ..EstimatorConfig::default()
    };
    let request = cfg.request("x.parquet");
    assert_eq!(request.sample_rows, 12);
    assert_eq!(request.safety_margin, 0.4);
}
