//! Encoding documents to bytes and back.
//!
//! A [`Formatter`] turns a Group-rooted [`Document`] into bytes and back. The
//! encoded side is always produced from [`Document::staticize`], so formats
//! only ever see plain maps, sequences and scalars.

use crate::{Result, tree::Document};

mod errors;
mod json;
mod yaml;

pub use errors::FormatError;
pub use json::JsonFormatter;
pub use yaml::YamlFormatter;

/// A serialization format for documents.
pub trait Formatter: Send + Sync {
    /// Encodes the staticized form of `doc`.
    fn encode(&self, doc: &Document) -> Result<Vec<u8>>;

    /// Decodes bytes into a document with a Group root.
    fn decode(&self, data: &[u8]) -> Result<Document>;
}
