#![forbid(unsafe_code)]
//! memscout-io: the only crate that reads file bytes.
//!
//! - `readers::csv` samples the head of a delimited file and counts the rest.
//! - `readers::parquet` reads footer metadata, never row groups.
//! - `signature` sniffs magic bytes for format detection.

pub mod buf;
pub mod readers;
pub mod signature;

pub use readers::csv::CsvSampler;
pub use readers::parquet::ParquetMetadataReader;
pub use signature::{sniff_format, PARQUET_MAGIC};
