use tracing::debug;

use super::{FormatError, Formatter};
use crate::{
    Error, Result,
    tree::{Document, Value},
};

/// JSON formatter built on `serde_json`.
///
/// Output ends with a newline. Decoding requires a JSON object at the top
/// level.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter {
    /// Indent the output
    pub pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        JsonFormatter { pretty: true }
    }
}

impl Formatter for JsonFormatter {
    fn encode(&self, doc: &Document) -> Result<Vec<u8>> {
        let data = doc.staticize();
        let mut out = if self.pretty {
            serde_json::to_vec_pretty(&data)
        } else {
            serde_json::to_vec(&data)
        }
        .map_err(|e| -> Error { FormatError::encode("JSON", e).into() })?;
        out.push(b'\n');
        Ok(out)
    }

    fn decode(&self, data: &[u8]) -> Result<Document> {
        let value: Value = serde_json::from_slice(data)
            .map_err(|e| -> Error { FormatError::decode("JSON", e).into() })?;
        if !value.is_group() {
            return Err(FormatError::NotAGroup {
                actual: value.kind(),
            }
            .into());
        }
        debug!(bytes = data.len(), "Decoded JSON document");
        Ok(Document::new(value))
    }
}
