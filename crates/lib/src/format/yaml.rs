use tracing::debug;

use super::{FormatError, Formatter};
use crate::{
    Error, Result,
    tree::{Document, Value},
};

/// YAML formatter built on `serde_yaml`.
///
/// Encodes a single block-style document. Decoding requires a mapping at the
/// top level; an empty input is not a mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFormatter;

impl YamlFormatter {
    pub fn new() -> Self {
        YamlFormatter
    }
}

impl Formatter for YamlFormatter {
    fn encode(&self, doc: &Document) -> Result<Vec<u8>> {
        let out = serde_yaml::to_string(&doc.staticize())
            .map_err(|e| -> Error { FormatError::encode("YAML", e).into() })?;
        Ok(out.into_bytes())
    }

    fn decode(&self, data: &[u8]) -> Result<Document> {
        let value: Value = serde_yaml::from_slice(data)
            .map_err(|e| -> Error { FormatError::decode("YAML", e).into() })?;
        if !value.is_group() {
            return Err(FormatError::NotAGroup {
                actual: value.kind(),
            }
            .into());
        }
        debug!(bytes = data.len(), "Decoded YAML document");
        Ok(Document::new(value))
    }
}
