use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use arbor::{
    array, group,
    tree::{Document, Node, NodeMut, Value},
};

/// `{"a": {"b": {"c": "c"}}}`
pub fn nested_doc() -> Document {
    Document::new(group! {
        "a" => group! { "b" => group! { "c" => "c" } },
    })
}

/// A document mixing every node kind at several depths
pub fn mixed_doc() -> Document {
    Document::new(group! {
        "name" => "arbor",
        "version" => 3,
        "port" => 8080u16,
        "max_size" => u64::MAX,
        "count" => 3usize,
        "ratio" => 0.5,
        "enabled" => true,
        "tags" => array!["a", "b", "c"],
        "servers" => array![
            group! { "host" => "alpha", "ports" => array![80, 443] },
            group! { "host" => "beta", "ports" => array![8080] },
        ],
        "limits" => group! { "cpu" => 2, "memory" => group! { "soft" => 512, "hard" => 1024 } },
        "empty" => (),
    })
}

/// Counts change notifications delivered to a hook
#[derive(Clone, Default)]
pub struct HookCounter(Arc<AtomicUsize>);

impl HookCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    /// Registers a counting hook on `node`
    pub fn attach(&self, node: &mut NodeMut<'_>) {
        let calls = Arc::clone(&self.0);
        node.set_on_change(move || -> arbor::Result<()> {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
    }
}

/// Assert that every node below `node` reports its container as parent
pub fn assert_parent_links(node: Node<'_>) {
    if node.is_group() {
        node.group_foreach(|key, child| {
            assert_eq!(child.parent(), Some(node), "parent link broken at key {key:?}");
            assert_eq!(node.get(key).unwrap(), child);
            assert_parent_links(child);
            Ok::<_, arbor::tree::TreeError>(())
        })
        .unwrap();
    } else if node.is_array() {
        node.arr_foreach(|index, child| {
            assert_eq!(child.parent(), Some(node), "parent link broken at [{index}]");
            assert_eq!(node.arr_get(index).unwrap(), child);
            assert_parent_links(child);
            Ok::<_, arbor::tree::TreeError>(())
        })
        .unwrap();
    }
}

/// Assert the whole document matches a literal
pub fn assert_doc_eq(doc: &Document, expected: Value) {
    assert_eq!(doc.to_value(), expected, "document: {}", doc.to_value());
}
