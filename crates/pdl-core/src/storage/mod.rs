//! Persisting fetched bodies to local storage.
//!
//! One file per target, named after the target's final path segment. Writes go
//! to a temp file in the output directory and are atomically renamed into
//! place, so an interrupted or failed write never leaves a corrupt file at the
//! final path and a retry cleanly overwrites an earlier attempt.

mod fs;

pub use fs::FsPersister;

use std::path::PathBuf;

/// Temp-file suffix used before the atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Failure to persist a body. Retryable from the job runner's point of view.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("create temp file in {}: {source}", .dir.display())]
    CreateTemp {
        dir: PathBuf,
        source: std::io::Error,
    },
    #[error("write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("rename into {}: {source}", .path.display())]
    Finalize {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Writes a fetched body for a target.
pub trait Persister: Send + Sync {
    /// Persist `body` for `target`, overwriting any earlier file. Returns the final path.
    fn save(&self, target: &str, body: &[u8]) -> Result<PathBuf, PersistError>;
}
