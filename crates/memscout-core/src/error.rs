use std::path::PathBuf;

use thiserror::Error;

/// Canonical result for memscout.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("unsupported format for {}: {reason}", path.display())]
    UnsupportedFormat { path: PathBuf, reason: String },

    /// CSV only: no data rows, so there is nothing to infer types from.
    #[error("no data rows to sample in {}", path.display())]
    EmptySource { path: PathBuf },

    #[error("schema inference failed for {}: {detail}", path.display())]
    SchemaInference { path: PathBuf, detail: String },

    #[error("cannot read columnar metadata of {}: {detail}", path.display())]
    MetadataRead { path: PathBuf, detail: String },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    // Read failures that are none of the above (permissions, truncated reads).
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Flat view of the error taxonomy, for callers that branch on the kind only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    FileNotFound,
    UnsupportedFormat,
    EmptySource,
    SchemaInference,
    MetadataRead,
    InvalidConfiguration,
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::FileNotFound { .. } => ErrorKind::FileNotFound,
            Error::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            Error::EmptySource { .. } => ErrorKind::EmptySource,
            Error::SchemaInference { .. } => ErrorKind::SchemaInference,
            Error::MetadataRead { .. } => ErrorKind::MetadataRead,
            Error::InvalidConfiguration(_) => ErrorKind::InvalidConfiguration,
            Error::Io { .. } => ErrorKind::Io,
        }
    }

    /// Map an `std::io::Error` raised while touching `path`.
    ///
    /// `NotFound` becomes [`Error::FileNotFound`]; everything else is [`Error::Io`].
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound { path }
        } else {
            Error::Io { path, source }
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::InvalidConfiguration(e.to_string())
    }
}
