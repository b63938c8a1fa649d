//! Array operations.
//!
//! All of these require the handle to address an Array and fail with
//! [`TreeError::WrongKind`] otherwise. Each mutation relinks the array's
//! children and notifies change hooks once.

use tracing::trace;

use super::{Kind, Node, NodeId, NodeMut, TreeError, Value, document::Payload};

fn wrong_kind(actual: Kind) -> TreeError {
    TreeError::WrongKind {
        expected: Kind::Array,
        actual,
    }
}

impl<'a> Node<'a> {
    fn elements(&self) -> Result<&'a [NodeId], TreeError> {
        match self.payload() {
            Payload::Array(items) => Ok(items),
            other => Err(wrong_kind(other.kind())),
        }
    }

    /// Number of elements.
    pub fn arr_len(&self) -> Result<usize, TreeError> {
        self.elements().map(<[NodeId]>::len)
    }

    /// Element at `index`.
    pub fn arr_get(&self, index: usize) -> Result<Node<'a>, TreeError> {
        let items = self.elements()?;
        items
            .get(index)
            .map(|&id| Node::new(self.document(), id))
            .ok_or(TreeError::IndexOutOfRange { index })
    }

    /// Visits every element in order, stopping at the first error.
    ///
    /// ```
    /// use arbor::{array, tree::{Document, TreeError}};
    ///
    /// let doc = Document::new(array![1, 2, 3]);
    /// let mut sum = 0;
    /// doc.root()
    ///     .arr_foreach(|_, node| {
    ///         sum += node.as_i64()?;
    ///         Ok::<_, TreeError>(())
    ///     })
    ///     .unwrap();
    /// assert_eq!(sum, 6);
    /// ```
    pub fn arr_foreach<E, F>(&self, mut visit: F) -> Result<(), E>
    where
        E: From<TreeError>,
        F: FnMut(usize, Node<'a>) -> Result<(), E>,
    {
        for (index, &id) in self.elements()?.iter().enumerate() {
            visit(index, Node::new(self.document(), id))?;
        }
        Ok(())
    }
}

impl NodeMut<'_> {
    fn elements_mut(&mut self) -> Result<&mut Vec<NodeId>, TreeError> {
        match &mut self.doc.slot_mut(self.id).payload {
            Payload::Array(items) => Ok(items),
            other => Err(wrong_kind(other.kind())),
        }
    }

    fn array_changed(&mut self, op: &'static str) {
        let id = self.id;
        self.commit(id, id);
        trace!(node = %id, op, "Array changed");
    }

    pub fn arr_len(&self) -> Result<usize, TreeError> {
        self.as_node().arr_len()
    }

    pub fn arr_get(&self, index: usize) -> Result<Node<'_>, TreeError> {
        self.as_node().arr_get(index)
    }

    /// Writable handle to the element at `index`.
    pub fn arr_get_mut(&mut self, index: usize) -> Result<NodeMut<'_>, TreeError> {
        let id = self.as_node().arr_get(index)?.id();
        Ok(NodeMut::new(self.doc, id))
    }

    /// Appends `value`.
    pub fn arr_push(&mut self, value: impl Into<Value>) -> Result<NodeId, TreeError> {
        self.elements_mut()?;
        let child = self.doc.build(value.into(), Some(self.id));
        self.elements_mut()?.push(child);
        self.array_changed("push");
        Ok(child)
    }

    /// Appends every value in order.
    pub fn arr_push_all<I>(&mut self, values: I) -> Result<(), TreeError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.elements_mut()?;
        let parent = Some(self.id);
        let children: Vec<NodeId> = values
            .into_iter()
            .map(|value| self.doc.build(value.into(), parent))
            .collect();
        self.elements_mut()?.extend(children);
        self.array_changed("push_all");
        Ok(())
    }

    /// Appends a copy of every element of another Array.
    ///
    /// Fails with [`TreeError::WrongKind`] if either side is not an Array, in
    /// which case nothing is appended.
    pub fn arr_merge(&mut self, other: impl Into<Value>) -> Result<(), TreeError> {
        self.elements_mut()?;
        match other.into() {
            Value::Array(items) => self.arr_push_all(items),
            other => Err(wrong_kind(other.kind())),
        }
    }

    /// Removes and returns the last element.
    pub fn arr_pop(&mut self) -> Result<Value, TreeError> {
        let last = self
            .elements_mut()?
            .pop()
            .ok_or(TreeError::IndexOutOfRange { index: 0 })?;
        Ok(self.detach(last, "pop"))
    }

    /// Removes and returns the first element.
    pub fn arr_shift(&mut self) -> Result<Value, TreeError> {
        let items = self.elements_mut()?;
        if items.is_empty() {
            return Err(TreeError::IndexOutOfRange { index: 0 });
        }
        let first = items.remove(0);
        Ok(self.detach(first, "shift"))
    }

    /// Inserts `value` at the front.
    pub fn arr_unshift(&mut self, value: impl Into<Value>) -> Result<NodeId, TreeError> {
        self.arr_insert(0, value)
    }

    /// Inserts `value` before `index`; `index` may equal the length.
    pub fn arr_insert(&mut self, index: usize, value: impl Into<Value>) -> Result<NodeId, TreeError> {
        if index > self.elements_mut()?.len() {
            return Err(TreeError::IndexOutOfRange { index });
        }
        let child = self.doc.build(value.into(), Some(self.id));
        self.elements_mut()?.insert(index, child);
        self.array_changed("insert");
        Ok(child)
    }

    /// Removes the element at `index` and returns it.
    pub fn arr_remove(&mut self, index: usize) -> Result<Value, TreeError> {
        let items = self.elements_mut()?;
        if index >= items.len() {
            return Err(TreeError::IndexOutOfRange { index });
        }
        let removed = items.remove(index);
        Ok(self.detach(removed, "remove"))
    }

    /// Replaces the element at `index`, which must already exist.
    pub fn arr_set(&mut self, index: usize, value: impl Into<Value>) -> Result<NodeId, TreeError> {
        let target = self.as_node().arr_get(index)?.id();
        self.doc.replace_payload(target, value.into());
        let id = self.id;
        self.commit(id, target);
        trace!(node = %id, index, "Array element replaced");
        Ok(target)
    }

    /// Visits every element with a writable handle, stopping at the first error.
    pub fn arr_foreach_mut<E, F>(&mut self, mut visit: F) -> Result<(), E>
    where
        E: From<TreeError>,
        F: FnMut(usize, &mut NodeMut<'_>) -> Result<(), E>,
    {
        let items = self.elements_mut()?.clone();
        for (index, id) in items.into_iter().enumerate() {
            visit(index, &mut NodeMut::new(self.doc, id))?;
        }
        Ok(())
    }

    fn detach(&mut self, child: NodeId, op: &'static str) -> Value {
        let value = self.doc.snapshot(child);
        self.doc.free_subtree(child);
        self.array_changed(op);
        value
    }
}
