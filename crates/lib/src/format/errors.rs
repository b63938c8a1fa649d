//! Error types for document formatters.

use std::error::Error as StdError;

use thiserror::Error;

use crate::tree::Kind;

/// Errors raised while encoding or decoding documents.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum FormatError {
    /// The document could not be serialized.
    #[error("Failed to encode {format} document: {source}")]
    Encode {
        format: &'static str,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// The input is not valid for this format.
    #[error("Failed to decode {format} document: {source}")]
    Decode {
        format: &'static str,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// The decoded top level is not a mapping.
    #[error("Decoded document must be a group, found {actual}")]
    NotAGroup { actual: Kind },
}

impl FormatError {
    pub(crate) fn encode(format: &'static str, source: impl StdError + Send + Sync + 'static) -> Self {
        FormatError::Encode {
            format,
            source: Box::new(source),
        }
    }

    pub(crate) fn decode(format: &'static str, source: impl StdError + Send + Sync + 'static) -> Self {
        FormatError::Decode {
            format,
            source: Box::new(source),
        }
    }

    /// Check if this error happened while reading input.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            FormatError::Decode { .. } | FormatError::NotAGroup { .. }
        )
    }

    /// Name of the format that failed, if known.
    pub fn format(&self) -> Option<&'static str> {
        match self {
            FormatError::Encode { format, .. } | FormatError::Decode { format, .. } => {
                Some(*format)
            }
            _ => None,
        }
    }

    /// Check if this error happened while producing output.
    pub fn is_encode_error(&self) -> bool {
        matches!(self, FormatError::Encode { .. })
    }
}

impl From<FormatError> for crate::Error {
    fn from(err: FormatError) -> Self {
        crate::Error::Format(err)
    }
}
