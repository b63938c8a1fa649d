//!
//! Arbor: dynamic, schema-less document trees.
//! This library provides an in-memory tree of nested groups, arrays and scalar values,
//! addressed by dotted paths, with deep merging, change notification and file persistence.
//!
//! ## Core Concepts
//!
//! * **Documents (`tree::Document`)**: An owned tree of nodes. Every node holds a Group, an Array or a scalar value.
//! * **Paths**: Dotted strings such as `"server.hosts.[0]"`. Keys select Group children, bracketed indices select Array elements.
//! * **Handles (`tree::Node`, `tree::NodeMut`)**: Borrowed views of a single node used for reads and mutations.
//! * **Values (`tree::Value`)**: Detached literal trees used to build and extract documents, and the serialization boundary.
//! * **Change hooks (`tree::ChangeHook`)**: Observers notified whenever a node or anything below it changes.
//! * **Formatters (`format::Formatter`)**: Encode documents to bytes and decode them back, as JSON or YAML.
//! * **File syncing (`sync::FileSyncer`)**: Keeps a document in sync with a file, on demand, after changes, or on a timer.

pub mod format;
pub mod sync;
pub mod tree;

pub use format::{Formatter, JsonFormatter, YamlFormatter};
pub use sync::{FileSyncer, SyncConfig};
pub use tree::{Document, Node, NodeMut, Value};

/// Result type used throughout the Arbor library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Arbor library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured navigation and mutation errors from the tree module
    #[error(transparent)]
    Tree(tree::TreeError),

    /// Structured encoding errors from the format module
    #[error(transparent)]
    Format(format::FormatError),

    /// Structured persistence errors from the sync module
    #[error(transparent)]
    Sync(sync::SyncError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Tree(_) => "tree",
            Error::Format(_) => "format",
            Error::Sync(_) => "sync",
        }
    }

    /// Check if this error indicates a path or bound document was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Tree(tree_err) => tree_err.is_not_found(),
            Error::Sync(sync_err) => sync_err.is_not_bound() || sync_err.is_file_missing(),
            _ => false,
        }
    }

    /// Check if this error comes from an unresolvable path.
    pub fn is_path_error(&self) -> bool {
        matches!(self, Error::Tree(tree_err) if tree_err.is_path_error())
    }

    /// Check if this error is a failed scalar conversion.
    pub fn is_type_error(&self) -> bool {
        matches!(self, Error::Tree(tree_err) if tree_err.is_type_error())
    }

    /// Check if this error happened while encoding or decoding.
    pub fn is_format_error(&self) -> bool {
        matches!(self, Error::Format(_))
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        matches!(self, Error::Sync(sync_err) if sync_err.is_io_error())
    }
}
