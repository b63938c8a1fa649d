//! Error types for tree navigation and mutation.
//!
//! Every fallible tree operation returns a [`TreeError`] directly; the variants
//! distinguish malformed or shape-inconsistent paths, out-of-range array
//! indices, operations invoked on the wrong node kind, lookups that miss, and
//! scalar conversions that cannot be represented.

use thiserror::Error;

use super::Kind;

/// Structured error types for tree operations.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// Malformed path, or a segment that does not fit the shape of the data
    /// (a key on an Array, a bracket index on a Group, anything below a scalar).
    #[error("Invalid path: {path}")]
    InvalidPath { path: String },

    /// Array index outside the valid range for the operation.
    #[error("No such index [{index}]")]
    IndexOutOfRange { index: usize },

    /// The operation requires a Group or Array but the node holds something else.
    #[error("Wrong node kind: expected {expected}, found {actual}")]
    WrongKind { expected: Kind, actual: Kind },

    /// Read-only navigation reached a Group without the requested key.
    #[error("Path not found: {path}")]
    PathNotFound { path: String },

    /// A scalar could not be converted to the requested type.
    #[error("Type mismatch: cannot read {actual} as {expected}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },
}

impl TreeError {
    pub(crate) fn invalid_path(path: &str) -> Self {
        TreeError::InvalidPath {
            path: path.to_string(),
        }
    }

    /// Check if this error comes from a path that cannot be resolved or parsed.
    pub fn is_path_error(&self) -> bool {
        matches!(
            self,
            TreeError::InvalidPath { .. }
                | TreeError::PathNotFound { .. }
                | TreeError::IndexOutOfRange { .. }
        )
    }

    /// Check if this error indicates a missing key.
    pub fn is_not_found(&self) -> bool {
        matches!(self, TreeError::PathNotFound { .. })
    }

    /// Check if this error is an out-of-range array index.
    pub fn is_index_error(&self) -> bool {
        matches!(self, TreeError::IndexOutOfRange { .. })
    }

    /// Check if this error was raised by an operation on the wrong node kind.
    pub fn is_kind_error(&self) -> bool {
        matches!(self, TreeError::WrongKind { .. })
    }

    /// Check if this error is a failed scalar conversion.
    pub fn is_type_error(&self) -> bool {
        matches!(self, TreeError::TypeMismatch { .. })
    }

    /// Get the path if this is a path-related error.
    pub fn path(&self) -> Option<&str> {
        match self {
            TreeError::InvalidPath { path } | TreeError::PathNotFound { path } => Some(path),
            _ => None,
        }
    }

    /// Get the offending index for `IndexOutOfRange`.
    pub fn index(&self) -> Option<usize> {
        match self {
            TreeError::IndexOutOfRange { index } => Some(*index),
            _ => None,
        }
    }
}

impl From<TreeError> for crate::Error {
    fn from(err: TreeError) -> Self {
        crate::Error::Tree(err)
    }
}
