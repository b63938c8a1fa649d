//! Error types for the file syncer.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur while syncing a document with its file.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Helper methods like `is_*()` provide stable APIs
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyncError {
    /// The operation needs a bound document.
    #[error("No document bound to the syncer")]
    NotBound,

    /// Reading or writing the backing file failed.
    #[error("File I/O error on {path:?}: {source}")]
    FileIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SyncError {
    /// Check if this error is caused by a missing bound document.
    pub fn is_not_bound(&self) -> bool {
        matches!(self, SyncError::NotBound)
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        matches!(self, SyncError::FileIo { .. })
    }

    /// Check if the backing file does not exist.
    pub fn is_file_missing(&self) -> bool {
        matches!(self, SyncError::FileIo { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

impl From<SyncError> for crate::Error {
    fn from(err: SyncError) -> Self {
        crate::Error::Sync(err)
    }
}
