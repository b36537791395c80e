//! Magic-byte sniffing.
//!
//! Parquet files start (and end) with `PAR1`. CSV has no signature, so it is
//! only ever recognised by extension.

use std::path::Path;

use memscout_core::error::Result;
use memscout_core::profile::FileFormat;

use crate::buf::read_prefix;

pub const PARQUET_MAGIC: &[u8; 4] = b"PAR1";

/// Returns `Some(Parquet)` when the file starts with the Parquet magic.
pub fn sniff_format(path: &Path) -> Result<Option<FileFormat>> {
    match read_prefix::<4>(path)? {
        Some(head) if &head == PARQUET_MAGIC => Ok(Some(FileFormat::Parquet)),
        _ => Ok(None),
    }
}
