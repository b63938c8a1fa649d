//! Node storage.
//!
//! A [`Document`] keeps all of its nodes in a flat arena. Containers refer to
//! their children by [`NodeId`] and every node records the id of its
//! container, so the parent relation never owns anything: dropping a subtree
//! only walks downwards through the owning links.

use std::{collections::HashMap, fmt, sync::Arc};

use super::{ChangeHook, Kind, Map, Node, NodeMut, Scalar, TreeError, Value};

/// Generational handle to a node of a [`Document`].
///
/// Ids are only meaningful for the document that issued them. Once a node is
/// removed its id stays dead: a later node reusing the same storage carries a
/// different generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Children or leaf value of a node.
#[derive(Debug, Clone)]
pub(crate) enum Payload {
    Group(HashMap<String, NodeId>),
    Array(Vec<NodeId>),
    Value(Scalar),
}

impl Payload {
    pub(crate) fn kind(&self) -> Kind {
        match self {
            Payload::Group(_) => Kind::Group,
            Payload::Array(_) => Kind::Array,
            Payload::Value(_) => Kind::Value,
        }
    }

    pub(crate) fn children(&self) -> Vec<NodeId> {
        match self {
            Payload::Group(map) => map.values().copied().collect(),
            Payload::Array(items) => items.clone(),
            Payload::Value(_) => Vec::new(),
        }
    }
}

pub(crate) struct Slot {
    pub(crate) payload: Payload,
    pub(crate) parent: Option<NodeId>,
    pub(crate) hook: Option<Arc<dyn ChangeHook>>,
}

/// Index for a slot appended at position `len`.
fn slot_index(len: usize) -> u32 {
    match u32::try_from(len) {
        Ok(index) => index,
        Err(_) => panic!("document cannot hold more than {} nodes", u32::MAX),
    }
}

struct Entry {
    generation: u32,
    slot: Option<Slot>,
}

/// An owned tree of nodes.
///
/// The document always has a root node; the `Document` methods that take a
/// path resolve it from the root and mirror the ones on [`NodeMut`].
///
/// Cloning a document deep-copies the tree into fresh storage. Change hooks are
/// not carried over to the copy.
pub struct Document {
    entries: Vec<Entry>,
    free: Vec<u32>,
    root: NodeId,
}

impl Document {
    /// Creates a document whose root holds `value`.
    pub fn new(value: impl Into<Value>) -> Self {
        let mut doc = Document {
            entries: Vec::new(),
            free: Vec::new(),
            root: NodeId {
                index: 0,
                generation: 0,
            },
        };
        doc.root = doc.build(value.into(), None);
        doc
    }

    /// Id of the root node.
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn root(&self) -> Node<'_> {
        Node::new(self, self.root)
    }

    pub fn root_mut(&mut self) -> NodeMut<'_> {
        let root = self.root;
        NodeMut::new(self, root)
    }

    /// Looks up a node by id. Returns `None` for ids that have been removed.
    pub fn node(&self, id: NodeId) -> Option<Node<'_>> {
        self.get_slot(id).map(|_| Node::new(self, id))
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<NodeMut<'_>> {
        self.get_slot(id)?;
        Some(NodeMut::new(self, id))
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.slot.is_some()).count()
    }

    /// Always false: a document has at least its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn kind(&self) -> Kind {
        self.root().kind()
    }

    /// See [`Node::get`].
    pub fn get(&self, path: &str) -> Result<Node<'_>, TreeError> {
        self.root().get(path)
    }

    /// See [`Node::must_get`].
    pub fn must_get(&self, path: &str) -> Node<'_> {
        self.root().must_get(path)
    }

    /// See [`Node::has`].
    pub fn has(&self, path: &str) -> bool {
        self.root().has(path)
    }

    /// See [`NodeMut::get_mut`].
    pub fn get_mut(&mut self, path: &str) -> Result<NodeMut<'_>, TreeError> {
        let id = self.root().get(path)?.id();
        Ok(NodeMut::new(self, id))
    }

    /// See [`NodeMut::set`].
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> Result<NodeId, TreeError> {
        self.root_mut().set(path, value)
    }

    /// See [`NodeMut::set_if_has`].
    pub fn set_if_has(&mut self, path: &str, value: impl Into<Value>) -> Result<(), TreeError> {
        self.root_mut().set_if_has(path, value)
    }

    /// See [`NodeMut::set_if_not_has`].
    pub fn set_if_not_has(
        &mut self,
        path: &str,
        value: impl Into<Value>,
    ) -> Result<(), TreeError> {
        self.root_mut().set_if_not_has(path, value)
    }

    /// See [`NodeMut::remove`].
    pub fn remove(&mut self, path: &str) -> bool {
        self.root_mut().remove(path)
    }

    /// See [`NodeMut::group_merge`].
    pub fn group_merge(&mut self, other: impl Into<Value>, forced: bool) -> Result<(), TreeError> {
        self.root_mut().group_merge(other, forced)
    }

    /// See [`Node::staticize`].
    pub fn staticize(&self) -> Map {
        self.root().staticize()
    }

    /// Deep copy of the whole tree as a literal.
    pub fn to_value(&self) -> Value {
        self.snapshot(self.root)
    }

    // Arena internals. Every id reaching these helpers comes from a live
    // handle, so a missing slot is a broken invariant.

    pub(crate) fn get_slot(&self, id: NodeId) -> Option<&Slot> {
        self.entries
            .get(id.index as usize)
            .filter(|e| e.generation == id.generation)
            .and_then(|e| e.slot.as_ref())
    }

    pub(crate) fn slot(&self, id: NodeId) -> &Slot {
        match self.get_slot(id) {
            Some(slot) => slot,
            None => panic!("node {id} is not part of this document"),
        }
    }

    pub(crate) fn slot_mut(&mut self, id: NodeId) -> &mut Slot {
        match self
            .entries
            .get_mut(id.index as usize)
            .filter(|e| e.generation == id.generation)
            .and_then(|e| e.slot.as_mut())
        {
            Some(slot) => slot,
            None => panic!("node {id} is not part of this document"),
        }
    }

    #[cfg(test)]
    pub(crate) fn entries_len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn payload(&self, id: NodeId) -> &Payload {
        &self.slot(id).payload
    }

    fn alloc(&mut self, payload: Payload, parent: Option<NodeId>) -> NodeId {
        let slot = Slot {
            payload,
            parent,
            hook: None,
        };
        match self.free.pop() {
            Some(index) => {
                let entry = &mut self.entries[index as usize];
                entry.slot = Some(slot);
                NodeId {
                    index,
                    generation: entry.generation,
                }
            }
            None => {
                let index = slot_index(self.entries.len());
                self.entries.push(Entry {
                    generation: 0,
                    slot: Some(slot),
                });
                NodeId {
                    index,
                    generation: 0,
                }
            }
        }
    }

    /// Allocates `value` as a new subtree below `parent`.
    pub(crate) fn build(&mut self, value: Value, parent: Option<NodeId>) -> NodeId {
        let id = self.alloc(Payload::Value(Scalar::Null), parent);
        let payload = self.build_payload(value, id);
        self.slot_mut(id).payload = payload;
        id
    }

    fn build_payload(&mut self, value: Value, owner: NodeId) -> Payload {
        match value {
            Value::Group(map) => Payload::Group(
                map.into_iter()
                    .map(|(key, child)| (key, self.build(child, Some(owner))))
                    .collect(),
            ),
            Value::Array(items) => Payload::Array(
                items
                    .into_iter()
                    .map(|child| self.build(child, Some(owner)))
                    .collect(),
            ),
            Value::Scalar(scalar) => Payload::Value(scalar),
        }
    }

    /// Releases `id` and everything below it.
    pub(crate) fn free_subtree(&mut self, id: NodeId) {
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            let Some(entry) = self.entries.get_mut(next.index as usize) else {
                continue;
            };
            if entry.generation != next.generation {
                continue;
            }
            if let Some(slot) = entry.slot.take() {
                entry.generation = entry.generation.wrapping_add(1);
                self.free.push(next.index);
                pending.extend(slot.payload.children());
            }
        }
    }

    /// Swaps the payload of `id` for `value`, dropping the old children.
    ///
    /// The node keeps its id, parent and hook.
    pub(crate) fn replace_payload(&mut self, id: NodeId, value: Value) {
        let payload = self.build_payload(value, id);
        let old = std::mem::replace(&mut self.slot_mut(id).payload, payload);
        for child in old.children() {
            self.free_subtree(child);
        }
    }

    /// Deep copy of the subtree at `id`.
    pub(crate) fn snapshot(&self, id: NodeId) -> Value {
        match self.payload(id) {
            Payload::Group(map) => Value::Group(
                map.iter()
                    .map(|(key, child)| (key.clone(), self.snapshot(*child)))
                    .collect(),
            ),
            Payload::Array(items) => {
                Value::Array(items.iter().map(|child| self.snapshot(*child)).collect())
            }
            Payload::Value(scalar) => Value::Scalar(scalar.clone()),
        }
    }
}

impl Default for Document {
    /// A document with an empty Group at the root.
    fn default() -> Self {
        Document::new(Value::group())
    }
}

impl Clone for Document {
    fn clone(&self) -> Self {
        Document::new(self.to_value())
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.to_value() == other.to_value()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("root", &self.root)
            .field("value", &self.to_value())
            .finish()
    }
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        Document::new(value)
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        doc.to_value()
    }
}

impl From<&Document> for Value {
    fn from(doc: &Document) -> Self {
        doc.to_value()
    }
}
