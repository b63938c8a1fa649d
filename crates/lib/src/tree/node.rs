//! Read and write handles to the nodes of a [`Document`].

use std::{fmt, ptr, sync::Arc};

use tracing::trace;

use super::{
    ChangeHook, Document, Kind, NodeId, Scalar, TreeError, Value,
    document::Payload,
    link::{bubble, relink},
    navigate::{resolve, resolve_or_create, resolve_segments},
    path::{self, Segment},
};

/// Shared handle to one node of a [`Document`].
///
/// Handles are cheap to copy. Two handles are equal when they address the
/// same node of the same document, regardless of the node's content.
#[derive(Clone, Copy)]
pub struct Node<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> Node<'a> {
    pub(crate) fn new(doc: &'a Document, id: NodeId) -> Self {
        Node { doc, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The document this node belongs to.
    pub fn document(&self) -> &'a Document {
        self.doc
    }

    pub(crate) fn payload(&self) -> &'a Payload {
        self.doc.payload(self.id)
    }

    pub fn kind(&self) -> Kind {
        self.payload().kind()
    }

    pub fn is_group(&self) -> bool {
        self.kind() == Kind::Group
    }

    pub fn is_array(&self) -> bool {
        self.kind() == Kind::Array
    }

    pub fn is_value(&self) -> bool {
        self.kind() == Kind::Value
    }

    /// True for a scalar node without payload.
    pub fn is_nil(&self) -> bool {
        matches!(self.payload(), Payload::Value(Scalar::Null))
    }

    /// True if this node holds the same kind of payload as `value`. Scalars
    /// must also be the same variant; `Int` and `Uint` count as one.
    pub fn is_like(&self, value: &Value) -> bool {
        match (self.payload(), value) {
            (
                Payload::Value(Scalar::Int(_) | Scalar::Uint(_)),
                Value::Scalar(Scalar::Int(_) | Scalar::Uint(_)),
            ) => true,
            (Payload::Value(a), Value::Scalar(b)) => {
                std::mem::discriminant(a) == std::mem::discriminant(b)
            }
            (payload, value) => payload.kind() == value.kind(),
        }
    }

    /// The container holding this node, or `None` for the root.
    pub fn parent(&self) -> Option<Node<'a>> {
        self.doc
            .slot(self.id)
            .parent
            .map(|parent| Node::new(self.doc, parent))
    }

    /// True if a change hook is registered on this node.
    pub fn has_on_change(&self) -> bool {
        self.doc.slot(self.id).hook.is_some()
    }

    /// Resolves `path` relative to this node without modifying anything.
    ///
    /// # Errors
    ///
    /// - [`TreeError::PathNotFound`] when a Group lacks a key on the path
    /// - [`TreeError::IndexOutOfRange`] for an index past the end of an Array
    /// - [`TreeError::InvalidPath`] when a segment does not fit the node it is
    ///   applied to
    pub fn get(&self, path: &str) -> Result<Node<'a>, TreeError> {
        resolve(self.doc, self.id, path).map(|id| Node::new(self.doc, id))
    }

    /// Like [`get`](Self::get), for paths the caller knows to exist.
    ///
    /// # Panics
    ///
    /// Panics if the path does not resolve.
    pub fn must_get(&self, path: &str) -> Node<'a> {
        match self.get(path) {
            Ok(node) => node,
            Err(e) => panic!("must_get({path:?}) failed: {e}"),
        }
    }

    /// True if `path` resolves. Malformed paths are reported as absent.
    pub fn has(&self, path: &str) -> bool {
        self.get(path).is_ok()
    }

    /// The scalar payload, or `None` for containers.
    pub fn scalar(&self) -> Option<&'a Scalar> {
        match self.payload() {
            Payload::Value(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Deep copy of this subtree as a literal.
    pub fn to_value(&self) -> Value {
        self.doc.snapshot(self.id)
    }

    /// Deep copy of this subtree as a new document with this node as its root.
    pub fn clone_document(&self) -> Document {
        Document::new(self.to_value())
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .finish()
    }
}

impl From<Node<'_>> for Value {
    fn from(node: Node<'_>) -> Self {
        node.to_value()
    }
}

/// Exclusive handle to one node of a [`Document`].
///
/// Every mutation relinks the parent pointers below the changed container and
/// then notifies the change hooks from the changed node up to the root.
pub struct NodeMut<'a> {
    pub(crate) doc: &'a mut Document,
    pub(crate) id: NodeId,
}

impl<'a> NodeMut<'a> {
    pub(crate) fn new(doc: &'a mut Document, id: NodeId) -> Self {
        NodeMut { doc, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn as_node(&self) -> Node<'_> {
        Node::new(self.doc, self.id)
    }

    pub fn into_node(self) -> Node<'a> {
        Node::new(self.doc, self.id)
    }

    pub fn kind(&self) -> Kind {
        self.as_node().kind()
    }

    pub fn has(&self, path: &str) -> bool {
        self.as_node().has(path)
    }

    pub fn to_value(&self) -> Value {
        self.as_node().to_value()
    }

    /// Resolves `path` relative to this node for writing.
    pub fn get_mut(&mut self, path: &str) -> Result<NodeMut<'_>, TreeError> {
        let id = resolve(self.doc, self.id, path)?;
        Ok(NodeMut::new(self.doc, id))
    }

    /// Relinks below `container` and notifies hooks from `changed` upward.
    pub(crate) fn commit(&mut self, container: NodeId, changed: NodeId) {
        relink(self.doc, container);
        bubble(self.doc, changed);
    }

    /// Writes `value` at `path`, creating missing Group levels on the way.
    ///
    /// An empty path replaces this node's own payload. Returns the id of the
    /// written node. A failed call leaves the tree untouched.
    ///
    /// # Errors
    ///
    /// - [`TreeError::InvalidPath`] when the path crosses a scalar, uses a key
    ///   on an Array, an index on a Group, or an index below a missing key
    ///   (Arrays are never created implicitly)
    /// - [`TreeError::IndexOutOfRange`] for an index past the end of an Array
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> Result<NodeId, TreeError> {
        let (target, anchor) = resolve_or_create(self.doc, self.id, path)?;
        self.doc.replace_payload(target, value.into());
        self.commit(anchor, target);
        trace!(node = %target, path, "Set value");
        Ok(target)
    }

    /// [`set`](Self::set) only if `path` already resolves.
    pub fn set_if_has(&mut self, path: &str, value: impl Into<Value>) -> Result<(), TreeError> {
        if self.has(path) {
            self.set(path, value)?;
        }
        Ok(())
    }

    /// [`set`](Self::set) only if `path` does not resolve yet.
    pub fn set_if_not_has(&mut self, path: &str, value: impl Into<Value>) -> Result<(), TreeError> {
        if !self.has(path) {
            self.set(path, value)?;
        }
        Ok(())
    }

    /// Replaces this node's payload, keeping its identity, parent and hook.
    pub fn set_val(&mut self, value: impl Into<Value>) {
        let id = self.id;
        self.doc.replace_payload(id, value.into());
        self.commit(id, id);
        trace!(node = %id, "Replaced payload");
    }

    /// Deletes the node at `path`.
    ///
    /// Returns true if the path does not resolve after the call, whether it
    /// was deleted or never existed. Returns false for an empty path and when
    /// the parent of the target is an Array: elements are removed with
    /// [`arr_remove`](Self::arr_remove).
    pub fn remove(&mut self, path: &str) -> bool {
        let segments = path::split(path);
        let Some((last, init)) = segments.split_last() else {
            return false;
        };

        let Ok(parent) = resolve_segments(self.doc, self.id, init, path) else {
            return true;
        };

        let removed = match (&mut self.doc.slot_mut(parent).payload, last) {
            (Payload::Array(_), _) => return false,
            (Payload::Group(map), Segment::Key(key)) => map.remove(*key),
            _ => None,
        };
        if let Some(child) = removed {
            self.doc.free_subtree(child);
            self.commit(parent, parent);
            trace!(node = %parent, path, "Removed child");
        }
        true
    }

    /// Registers `hook` to be called whenever this node or anything below it
    /// changes. Replaces any previous hook.
    pub fn set_on_change(&mut self, hook: impl ChangeHook + 'static) {
        self.doc.slot_mut(self.id).hook = Some(Arc::new(hook));
    }

    /// Removes and returns the registered hook.
    pub fn clear_on_change(&mut self) -> Option<Arc<dyn ChangeHook>> {
        self.doc.slot_mut(self.id).hook.take()
    }

    /// Replaces the payload without notifying any hook.
    pub(crate) fn replace_quiet(&mut self, value: Value) {
        let id = self.id;
        self.doc.replace_payload(id, value);
        relink(self.doc, id);
    }
}

impl fmt::Debug for NodeMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.as_node(), f)
    }
}
