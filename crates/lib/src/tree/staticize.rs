//! Conversion of subtrees into plain maps for formatters.

use super::{Map, Node, Value};

/// Key wrapping an Array root in [`Node::staticize`] output.
pub const LIST_KEY: &str = "list";
/// Key wrapping a scalar root in [`Node::staticize`] output.
pub const VALUE_KEY: &str = "val";

impl Node<'_> {
    /// Converts this subtree into plain maps, vectors and scalars with a map at
    /// the top level.
    ///
    /// A Group converts to its map directly. An Array is wrapped as
    /// `{"list": [...]}` and a scalar as `{"val": ...}`. Only this node is
    /// wrapped; everything below keeps its natural form.
    pub fn staticize(&self) -> Map {
        match self.to_value() {
            Value::Group(map) => map,
            list @ Value::Array(_) => Map::from([(LIST_KEY.to_string(), list)]),
            scalar => Map::from([(VALUE_KEY.to_string(), scalar)]),
        }
    }
}
