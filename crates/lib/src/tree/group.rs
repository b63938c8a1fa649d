//! Group iteration and merging.

use tracing::trace;

use super::{Kind, Map, Node, NodeMut, TreeError, Value, document::Payload};

fn wrong_kind(actual: Kind) -> TreeError {
    TreeError::WrongKind {
        expected: Kind::Group,
        actual,
    }
}

/// Merges `other` into `into`.
///
/// Keys missing from `into` are copied over. Where both sides hold a Group the
/// merge recurses; any other collision is resolved in favour of `other` only
/// when `forced` is set.
pub(crate) fn merge_groups(into: &mut Map, other: Map, forced: bool) {
    for (key, incoming) in other {
        let Some(existing) = into.get_mut(&key) else {
            into.insert(key, incoming);
            continue;
        };
        match (existing, incoming) {
            (Value::Group(existing), Value::Group(incoming)) => {
                merge_groups(existing, incoming, forced);
            }
            (existing, incoming) => {
                if forced {
                    *existing = incoming;
                }
            }
        }
    }
}

impl<'a> Node<'a> {
    /// Number of keys.
    pub fn group_len(&self) -> Result<usize, TreeError> {
        match self.payload() {
            Payload::Group(map) => Ok(map.len()),
            other => Err(wrong_kind(other.kind())),
        }
    }

    /// Keys of this Group, in no particular order.
    pub fn keys(&self) -> Result<Vec<&'a str>, TreeError> {
        match self.payload() {
            Payload::Group(map) => Ok(map.keys().map(String::as_str).collect()),
            other => Err(wrong_kind(other.kind())),
        }
    }

    /// Visits every key and child, stopping at the first error.
    ///
    /// The visiting order is unspecified.
    pub fn group_foreach<E, F>(&self, mut visit: F) -> Result<(), E>
    where
        E: From<TreeError>,
        F: FnMut(&'a str, Node<'a>) -> Result<(), E>,
    {
        let map = match self.payload() {
            Payload::Group(map) => map,
            other => return Err(wrong_kind(other.kind()).into()),
        };
        for (key, &id) in map {
            visit(key.as_str(), Node::new(self.document(), id))?;
        }
        Ok(())
    }
}

impl NodeMut<'_> {
    pub fn group_len(&self) -> Result<usize, TreeError> {
        self.as_node().group_len()
    }

    /// Deep-merges another Group into this one.
    ///
    /// Keys only present in `other` are added. Nested Groups present on both
    /// sides are merged recursively; any other key present on both sides takes
    /// `other`'s value only when `forced` is true.
    ///
    /// The merge is computed on a copy of this node and committed in one step.
    /// The node keeps its identity, parent and hook, but the nodes below it are
    /// rebuilt, so ids held for descendants no longer resolve afterwards.
    ///
    /// # Errors
    ///
    /// [`TreeError::WrongKind`] if either side is not a Group. Nothing is
    /// modified in that case.
    pub fn group_merge(&mut self, other: impl Into<Value>, forced: bool) -> Result<(), TreeError> {
        let merged = self.merged_with(other.into(), forced)?;
        let id = self.id;
        self.doc.replace_payload(id, merged);
        self.commit(id, id);
        trace!(node = %id, forced, "Merged group");
        Ok(())
    }

    /// Same as [`group_merge`](Self::group_merge) without notifying hooks.
    pub(crate) fn group_merge_quiet(&mut self, other: Value, forced: bool) -> Result<(), TreeError> {
        let merged = self.merged_with(other, forced)?;
        self.replace_quiet(merged);
        Ok(())
    }

    fn merged_with(&self, other: Value, forced: bool) -> Result<Value, TreeError> {
        let mut base = match self.to_value() {
            Value::Group(map) => map,
            base => return Err(wrong_kind(base.kind())),
        };
        let other = match other {
            Value::Group(map) => map,
            other => return Err(wrong_kind(other.kind())),
        };
        merge_groups(&mut base, other, forced);
        Ok(Value::Group(base))
    }

    /// Visits every key with a writable handle, stopping at the first error.
    pub fn group_foreach_mut<E, F>(&mut self, mut visit: F) -> Result<(), E>
    where
        E: From<TreeError>,
        F: FnMut(&str, &mut NodeMut<'_>) -> Result<(), E>,
    {
        let entries: Vec<_> = match self.doc.payload(self.id) {
            Payload::Group(map) => map.iter().map(|(k, &v)| (k.clone(), v)).collect(),
            other => return Err(wrong_kind(other.kind()).into()),
        };
        for (key, id) in entries {
            visit(key.as_str(), &mut NodeMut::new(self.doc, id))?;
        }
        Ok(())
    }
}
