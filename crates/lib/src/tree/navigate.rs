//! Path resolution.
//!
//! [`resolve`] follows a path without touching the tree. [`resolve_or_create`]
//! additionally materializes missing Group levels, but only after checking
//! that the whole remainder of the path can be created, so a rejected path
//! leaves the tree exactly as it was.

use super::{
    Document, Map, NodeId, TreeError, Value,
    document::Payload,
    link::relink,
    path::{self, Segment},
};

enum Step {
    Found(NodeId),
    /// `at` is a Group without the requested key
    Missing,
}

fn step(doc: &Document, at: NodeId, segment: &Segment<'_>, path: &str) -> Result<Step, TreeError> {
    match (doc.payload(at), segment) {
        (Payload::Group(map), Segment::Key(key)) => {
            Ok(map.get(*key).map_or(Step::Missing, |&child| Step::Found(child)))
        }
        (Payload::Array(items), Segment::Index(_)) => {
            let index = segment.parse_index(path)?;
            items
                .get(index)
                .map(|&child| Step::Found(child))
                .ok_or(TreeError::IndexOutOfRange { index })
        }
        // Bracket index on a Group, key on an Array, anything below a scalar
        _ => Err(TreeError::invalid_path(path)),
    }
}

/// Resolves `path` relative to `from`.
pub(crate) fn resolve(doc: &Document, from: NodeId, path: &str) -> Result<NodeId, TreeError> {
    resolve_segments(doc, from, &path::split(path), path)
}

/// Resolves already split segments; `path` only describes failures.
pub(crate) fn resolve_segments(
    doc: &Document,
    from: NodeId,
    segments: &[Segment<'_>],
    path: &str,
) -> Result<NodeId, TreeError> {
    let mut current = from;
    for segment in segments {
        match step(doc, current, segment, path)? {
            Step::Found(child) => current = child,
            Step::Missing => {
                return Err(TreeError::PathNotFound {
                    path: path.to_string(),
                });
            }
        }
    }
    Ok(current)
}

/// Resolves `path` relative to `from`, creating missing Group levels.
///
/// The last created node is a `Null` leaf. Returns the target node together
/// with the deepest node that already existed before the call, which is the
/// root of everything that was created.
pub(crate) fn resolve_or_create(
    doc: &mut Document,
    from: NodeId,
    path: &str,
) -> Result<(NodeId, NodeId), TreeError> {
    let segments = path::split(path);

    let mut current = from;
    let mut existing = 0;
    while existing < segments.len() {
        match step(doc, current, &segments[existing], path)? {
            Step::Found(child) => current = child,
            Step::Missing => break,
        }
        existing += 1;
    }

    let missing = &segments[existing..];
    if missing.is_empty() {
        return Ok((current, current));
    }
    // Only Groups are created implicitly, so an index anywhere in the
    // remainder can never resolve.
    if missing.iter().any(Segment::is_index) {
        return Err(TreeError::invalid_path(path));
    }
    let keys: Vec<&str> = missing
        .iter()
        .filter_map(|segment| match segment {
            Segment::Key(key) => Some(*key),
            Segment::Index(_) => None,
        })
        .collect();

    let anchor = current;
    let chain = keys[1..].iter().rev().fold(Value::null(), |inner, key| {
        Value::Group(Map::from([(key.to_string(), inner)]))
    });
    let created = doc.build(chain, Some(anchor));
    if let Payload::Group(map) = &mut doc.slot_mut(anchor).payload {
        map.insert(keys[0].to_string(), created);
    }
    relink(doc, anchor);

    let mut target = created;
    for key in &keys[1..] {
        target = match doc.payload(target) {
            Payload::Group(map) => map.get(*key).copied().unwrap_or(target),
            _ => target,
        };
    }
    Ok((target, anchor))
}
