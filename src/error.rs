//! Error types for seccheat
//!
//! Loading the catalog is best-effort and only fails when the data directory
//! itself is unusable. Everything that writes (add, init) returns these errors
//! so the front ends can report them instead of crashing.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for catalog and store operations
#[derive(Error, Debug)]
pub enum Error {
    /// I/O failure on a specific path
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON encode/decode failure on a specific path
    #[error("JSON error in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The canonical file exists but does not hold a JSON array of records
    #[error("{} is not a valid cheat sheet file ({reason}); refusing to overwrite it", path.display())]
    CorruptStore { path: PathBuf, reason: String },

    /// Another process holds the write lock
    #[error("{} is locked by another writer (remove {} if no other seccheat is running)", path.display(), lock_path(path).display())]
    Locked { path: PathBuf },

    /// User input rejected before it reached the store
    #[error("{0}")]
    Validation(String),

    /// Terminal or file-watcher setup failed in the browser
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Error::Json {
            path: path.into(),
            source,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Terminal(e.to_string())
    }
}

/// Path of the lock file guarding writes to `path`
pub fn lock_path(path: &std::path::Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".lock");
    path.with_file_name(name)
}

pub type Result<T> = std::result::Result<T, Error>;
