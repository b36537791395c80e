//! Format detection: extension first, magic bytes second.

use std::path::Path;

use memscout_core::error::{Error, Result};
use memscout_core::profile::FileFormat;
use memscout_io::sniff_format;

/// Detect the format of an existing file.
///
/// The extension (case-insensitive) decides. With `sniff` enabled, a
/// `.parquet` file must carry the `PAR1` magic, and a file with an unknown or
/// missing extension is accepted as Parquet when it carries the magic.
pub fn detect_format(path: &Path, sniff: bool) -> Result<FileFormat> {
    let ext = path.extension().and_then(|e| e.to_str());
    match ext.and_then(FileFormat::from_extension) {
        Some(FileFormat::Csv) => Ok(FileFormat::Csv),
        Some(FileFormat::Parquet) => {
            if sniff && sniff_format(path)? != Some(FileFormat::Parquet) {
                return Err(Error::MetadataRead {
                    path: path.to_path_buf(),
                    detail: "missing PAR1 magic".into(),
                });
            }
            Ok(FileFormat::Parquet)
        }
        None => {
            if sniff && sniff_format(path)? == Some(FileFormat::Parquet) {
                return Ok(FileFormat::Parquet);
            }
            let reason = match ext {
                Some(e) => format!("extension '{e}' is not one of csv, parquet"),
                None => "no file extension and no recognizable signature".to_string(),
            };
            Err(Error::UnsupportedFormat {
                path: path.to_path_buf(),
                reason,
            })
        }
    }
}
