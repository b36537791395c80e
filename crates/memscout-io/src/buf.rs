//! Bounded file access for sampling and sniffing.
//!
//! Every read goes through a `BufReader` with an explicit capacity, so sampling
//! a huge file never holds more than `capacity` bytes of it in flight.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use memscout_core::error::{Error, Result};

/// Read buffer used for CSV sampling and counting.
pub const DEFAULT_READ_CAPACITY: usize = 64 * 1024;

/// Open `path` behind a buffer of at most `capacity` bytes.
pub fn open_bounded(path: &Path, capacity: usize) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| Error::from_io(path, e))?;
    Ok(BufReader::with_capacity(capacity.max(1), file))
}

/// First `N` bytes of the file, or `None` when it is shorter than that.
pub fn read_prefix<const N: usize>(path: &Path) -> Result<Option<[u8; N]>> {
    let mut reader = open_bounded(path, N)?;
    let mut head = [0u8; N];
    let mut filled = 0;
    while filled < N {
        let n = reader
            .read(&mut head[filled..])
            .map_err(|e| Error::from_io(path, e))?;
        if n == 0 {
            return Ok(None);
        }
        filled += n;
    }
    Ok(Some(head))
}
