//! Parquet footer reader.
//!
//! Only the footer is parsed: row count, leaf column descriptors, and the
//! uncompressed size the writer recorded for every column chunk. Row groups
//! are never decoded.

use std::fs::File;
use std::path::Path;

use ::parquet::basic::{ConvertedType, LogicalType as ParquetLogicalType, Type as PhysicalType};
use ::parquet::file::reader::{FileReader, SerializedFileReader};
use ::parquet::schema::types::ColumnDescriptor;
use memscout_core::error::{Error, Result};
use memscout_core::schema::LogicalType;
use memscout_core::source::{ColumnMetadata, ColumnarMetadata, ColumnarMetadataSource};

#[derive(Debug, Clone, Copy, Default)]
pub struct ParquetMetadataReader;

impl ParquetMetadataReader {
    pub fn new() -> Self {
        Self
    }
}

impl ColumnarMetadataSource for ParquetMetadataReader {
    fn read_metadata(&self, path: &Path) -> Result<ColumnarMetadata> {
        let file = File::open(path).map_err(|e| Error::from_io(path, e))?;
        let reader = SerializedFileReader::new(file).map_err(|e| Error::MetadataRead {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        let metadata = reader.metadata();
        let file_meta = metadata.file_metadata();

        let num_rows = u64::try_from(file_meta.num_rows()).map_err(|_| Error::MetadataRead {
            path: path.to_path_buf(),
            detail: format!("negative row count {}", file_meta.num_rows()),
        })?;

        let descriptors = file_meta.schema_descr().columns();
        let mut columns: Vec<ColumnMetadata> = descriptors
            .iter()
            .map(|descr| ColumnMetadata {
                name: descr.path().string(),
                logical_type: logical_type_of(descr),
                uncompressed_bytes: 0,
            })
            .collect();

        for (rg_idx, row_group) in metadata.row_groups().iter().enumerate() {
            if row_group.num_columns() != columns.len() {
                return Err(Error::MetadataRead {
                    path: path.to_path_buf(),
                    detail: format!(
                        "row group {rg_idx} has {} column chunks, schema has {}",
                        row_group.num_columns(),
                        columns.len()
                    ),
                });
            }
            for (column, chunk) in columns.iter_mut().zip(row_group.columns()) {
                let size = u64::try_from(chunk.uncompressed_size()).map_err(|_| {
                    Error::MetadataRead {
                        path: path.to_path_buf(),
                        detail: format!(
                            "negative uncompressed size for column '{}' in row group {rg_idx}",
                            column.name
                        ),
                    }
                })?;
                column.uncompressed_bytes = column.uncompressed_bytes.saturating_add(size);
            }
        }

        tracing::debug!(
            path = %path.display(),
            num_rows,
            row_groups = metadata.num_row_groups(),
            columns = columns.len(),
            "read parquet footer"
        );

        Ok(ColumnarMetadata { num_rows, columns })
    }
}

/// Map a leaf column's physical type and annotation onto a [`LogicalType`].
pub fn logical_type_of(descr: &ColumnDescriptor) -> LogicalType {
    let annotation = descr.logical_type();
    let converted = descr.converted_type();
    match descr.physical_type() {
        PhysicalType::BOOLEAN => LogicalType::Boolean,
        PhysicalType::INT32 | PhysicalType::INT64 => match (annotation, converted) {
            (Some(ParquetLogicalType::Date), _)
            | (Some(ParquetLogicalType::Time { .. }), _)
            | (Some(ParquetLogicalType::Timestamp { .. }), _) => LogicalType::Datetime,
            (Some(ParquetLogicalType::Decimal { .. }), _) => LogicalType::Float,
            (
                None,
                ConvertedType::DATE
                | ConvertedType::TIME_MILLIS
                | ConvertedType::TIME_MICROS
                | ConvertedType::TIMESTAMP_MILLIS
                | ConvertedType::TIMESTAMP_MICROS,
            ) => LogicalType::Datetime,
            (None, ConvertedType::DECIMAL) => LogicalType::Float,
            _ => LogicalType::Integer,
        },
        PhysicalType::INT96 => LogicalType::Datetime,
        PhysicalType::FLOAT | PhysicalType::DOUBLE => LogicalType::Float,
        PhysicalType::BYTE_ARRAY => match (annotation, converted) {
            (Some(ParquetLogicalType::String), _)
            | (Some(ParquetLogicalType::Enum), _)
            | (Some(ParquetLogicalType::Json), _) => LogicalType::String,
            (Some(ParquetLogicalType::Decimal { .. }), _) => LogicalType::Float,
            (None, ConvertedType::UTF8 | ConvertedType::ENUM | ConvertedType::JSON) => {
                LogicalType::String
            }
            (None, ConvertedType::DECIMAL) => LogicalType::Float,
            _ => LogicalType::Other,
        },
        PhysicalType::FIXED_LEN_BYTE_ARRAY => match (annotation, converted) {
            (Some(ParquetLogicalType::Decimal { .. }), _)
            | (Some(ParquetLogicalType::Float16), _)
            | (None, ConvertedType::DECIMAL) => LogicalType::Float,
            _ => LogicalType::Other,
        },
    }
}
