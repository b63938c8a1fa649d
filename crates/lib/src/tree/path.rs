//! Path grammar.
//!
//! A path is a `.`-separated list of segments. A segment written as `[n]`,
//! with `n` a non-negative decimal integer, selects element `n` of an Array;
//! every other segment is a Group key, digit-only keys included. Empty
//! segments are skipped, so `"a..b"`, `".a.b."` and `"a.b"` are the same path
//! and `""` addresses the starting node itself.

use std::{fmt, sync::OnceLock};

use regex::Regex;

use super::TreeError;

fn index_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\[([0-9]+)\]$").expect("index pattern is valid"))
}

/// One parsed segment of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A Group key, taken verbatim
    Key(&'a str),
    /// An array index accessor; holds the digits between the brackets
    Index(&'a str),
}

impl<'a> Segment<'a> {
    fn classify(raw: &'a str) -> Self {
        match index_pattern().captures(raw).and_then(|c| c.get(1)) {
            Some(digits) => Segment::Index(digits.as_str()),
            None => Segment::Key(raw),
        }
    }

    pub fn is_index(&self) -> bool {
        matches!(self, Segment::Index(_))
    }

    /// Parses the index of an accessor segment.
    ///
    /// `path` is only used to describe the failure: a key segment, or digits
    /// that do not fit in `usize`, yield [`TreeError::InvalidPath`].
    pub fn parse_index(&self, path: &str) -> Result<usize, TreeError> {
        match self {
            Segment::Index(digits) => digits
                .parse::<usize>()
                .map_err(|_| TreeError::invalid_path(path)),
            Segment::Key(_) => Err(TreeError::invalid_path(path)),
        }
    }
}

impl fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => f.write_str(key),
            Segment::Index(digits) => write!(f, "[{digits}]"),
        }
    }
}

/// Splits a path into its segments.
pub fn split(path: &str) -> Vec<Segment<'_>> {
    path.trim()
        .split('.')
        .filter(|raw| !raw.is_empty())
        .map(Segment::classify)
        .collect()
}

/// Returns true if `segment` is written as an array index accessor.
pub fn is_index_accessor(segment: &str) -> bool {
    index_pattern().is_match(segment)
}
