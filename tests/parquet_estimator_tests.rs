//! Parquet footer reading and metadata-based estimation.


use std::path::Path;
use std::sync::Arc;

use memscout::memscout_io::ParquetMetadataReader;
use memscout::memscout_planner::estimate::ParquetEstimator;
use memscout::memscout_planner::FormatSizeEstimator;
use memscout::{
    default_overhead_table, ColumnMetadata, ColumnarMetadata, ColumnarMetadataSource, ErrorKind,
    FormatProfile, LogicalType, Result, TypeOverhead,
};
use test_data_gen::{
    approx_eq, cleanup, create_temp_dir, write_bytes, write_people_parquet, write_typed_parquet,
};

struct StaticMetadata(ColumnarMetadata);

impl ColumnarMetadataSource for StaticMetadata {
    fn read_metadata(&self, _path: &Path) -> Result<ColumnarMetadata> {
        Ok(self.0.clone())
    }
}

fn overheads() -> Arc<dyn TypeOverhead> {
    Arc::new(default_overhead_table().clone())
}

fn column(name: &str, logical_type: LogicalType, uncompressed_bytes: u64) -> ColumnMetadata {
    ColumnMetadata {
        name: name.to_string(),
        logical_type,
        uncompressed_bytes,
    }
}

#[test]
fn test_scenario_a_metadata_estimate() {
    let meta = ColumnarMetadata {
        num_rows: 1_000_000,
        columns: vec![
            column("id", LogicalType::Integer, 40_000_000),
            column("price", LogicalType::Float, 50_000_000),
        ],
    };
    let estimator = ParquetEstimator::new(StaticMetadata(meta), overheads(), FormatProfile::parquet());
    let estimate = estimator
        .estimate_bytes(Path::new("scenario_a.parquet"), 1000)
        .expect("estimate");

    assert!(approx_eq(estimate.estimated_total_bytes as f64, 109_800_000.0, 2.0));
    assert_eq!(estimate.total_rows, 1_000_000);
    assert_eq!(estimate.sampled_rows, 1_000_000);
    assert_eq!(estimate.format_overhead, 1.22);
    assert!(approx_eq(estimate.bytes_per_row, 90.0, 1e-9));
}

#[test]
fn test_type_overhead_applies_per_column() {
    let meta = ColumnarMetadata {
        num_rows: 10,
        columns: vec![
            column("n", LogicalType::Integer, 1000),
            column("s", LogicalType::String, 1000),
            column("blob", LogicalType::Other, 1000),
        ],
    };
    let estimator = ParquetEstimator::new(
        StaticMetadata(meta),
        overheads(),
        FormatProfile::parquet().with_overhead(1.0),
    );
    let estimate = estimator
        .estimate_bytes(Path::new("typed.parquet"), 1)
        .expect("estimate");
    // 1000 * 1.0 + 1000 * 2.0 + 1000 * 2.0 (untabulated -> largest)
    assert_eq!(estimate.estimated_total_bytes, 5000);
    assert_eq!(estimate.columns[2].type_overhead, 2.0);
}

#[test]
fn test_zero_row_metadata_is_zero_estimate() {
    let meta = ColumnarMetadata {
        num_rows: 0,
        columns: vec![column("id", LogicalType::Integer, 0)],
    };
    let estimator = ParquetEstimator::new(StaticMetadata(meta), overheads(), FormatProfile::parquet());
    let estimate = estimator
        .estimate_bytes(Path::new("empty.parquet"), 1)
        .expect("estimate");
    assert_eq!(estimate.estimated_total_bytes, 0);
    assert_eq!(estimate.bytes_per_row, 0.0);
    assert_eq!(estimate.schema.len(), 1);
}

#[test]
fn test_reader_maps_arrow_written_types() {
    let dir = create_temp_dir("pq-types");
    let path = dir.join("people.parquet");
    write_people_parquet(&path, 5000, 1000);

    let meta = ParquetMetadataReader::new()
        .read_metadata(&path)
        .expect("footer");
    assert_eq!(meta.num_rows, 5000);
    let names: Vec<&str> = meta.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["id", "name", "score", "active"]);
    let types: Vec<LogicalType> = meta.columns.iter().map(|c| c.logical_type).collect();
    assert_eq!(
        types,
        vec![
            LogicalType::Integer,
            LogicalType::String,
            LogicalType::Float,
            LogicalType::Boolean,
        ]
    );
    assert!(meta.columns.iter().all(|c| c.uncompressed_bytes > 0));

    cleanup(&dir);
}

#[test]
fn test_reader_maps_temporal_decimal_and_binary_types() {
    let dir = create_temp_dir("pq-typed");
    let path = dir.join("typed.parquet");
    write_typed_parquet(&path, 200);

    let meta = ParquetMetadataReader::new()
        .read_metadata(&path)
        .expect("footer");
    assert_eq!(meta.num_rows, 200);
    let mapped: Vec<(&str, LogicalType)> = meta
        .columns
        .iter()
        .map(|c| (c.name.as_str(), c.logical_type))
        .collect();
    assert_eq!(
        mapped,
        vec![
            ("ts", LogicalType::Datetime),
            ("d", LogicalType::Datetime),
            ("dec", LogicalType::Float),
            ("bin", LogicalType::Other),
            ("ls", LogicalType::String),
        ]
    );

    // raw binary is untabulated and takes the largest multiplier
    let estimator =
        ParquetEstimator::new(ParquetMetadataReader::new(), overheads(), FormatProfile::parquet());
    let estimate = estimator.estimate_bytes(&path, 1000).expect("estimate");
    assert_eq!(estimate.columns[3].type_overhead, 2.0);
    assert_eq!(estimate.columns[0].type_overhead, 1.25);

    cleanup(&dir);
}

#[test]
fn test_real_file_estimate_matches_footer_sizes() {
    let dir = create_temp_dir("pq-estimate");
    let path = dir.join("people.parquet");
    write_people_parquet(&path, 20_000, 4096);

    let meta = ParquetMetadataReader::new()
        .read_metadata(&path)
        .expect("footer");
    let table = default_overhead_table();
    let expected: f64 = meta
        .columns
        .iter()
        .map(|c| c.uncompressed_bytes as f64 * table.overhead(&c.logical_type))
        .sum::<f64>()
        * 1.22;

    let estimator =
        ParquetEstimator::new(ParquetMetadataReader::new(), overheads(), FormatProfile::parquet());
    let estimate = estimator.estimate_bytes(&path, 1000).expect("estimate");
    assert_eq!(estimate.total_rows, 20_000);
    assert!(approx_eq(estimate.estimated_total_bytes as f64, expected, 1.0));

    cleanup(&dir);
}

#[test]
fn test_zero_row_file_has_schema_and_zero_estimate() {
    let dir = create_temp_dir("pq-zero");
    let path = dir.join("empty.parquet");
    write_people_parquet(&path, 0, 1);

    let estimator =
        ParquetEstimator::new(ParquetMetadataReader::new(), overheads(), FormatProfile::parquet());
    let estimate = estimator.estimate_bytes(&path, 1000).expect("estimate");
    assert_eq!(estimate.total_rows, 0);
    assert_eq!(estimate.estimated_total_bytes, 0);
    assert_eq!(estimate.schema.len(), 4);

    cleanup(&dir);
}

#[test]
fn test_corrupt_footer_is_metadata_error() {
    let dir = create_temp_dir("pq-corrupt");
    let path = dir.join("broken.parquet");
    write_bytes(&path, b"PAR1 this is not a parquet footer PAR1");

    let err = ParquetMetadataReader::new()
        .read_metadata(&path)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MetadataRead);

    let tiny = dir.join("tiny.parquet");
    write_bytes(&tiny, b"PA");
    let err = ParquetMetadataReader::new()
        .read_metadata(&tiny)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MetadataRead);

    cleanup(&dir);
}

#[test]
fn test_missing_file_is_file_not_found() {
    let err = ParquetMetadataReader::new()
        .read_metadata(Path::new("/definitely/not/here.parquet"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FileNotFound);
}
