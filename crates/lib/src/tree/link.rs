//! Parent links and change notification.

use std::sync::Arc;

use tracing::warn;

use super::{Document, NodeId};

/// Observer notified when a node or anything below it changes.
///
/// Hooks are attached to individual nodes with
/// [`NodeMut::set_on_change`](super::NodeMut::set_on_change). After a mutation
/// every hook between the mutated node and the root is called, innermost first.
///
/// A failing hook never fails the mutation that triggered it. The error is
/// logged and the walk continues with the next ancestor.
pub trait ChangeHook: Send + Sync {
    fn on_change(&self) -> crate::Result<()>;
}

impl<F> ChangeHook for F
where
    F: Fn() -> crate::Result<()> + Send + Sync,
{
    fn on_change(&self) -> crate::Result<()> {
        self()
    }
}

/// Points every node below `id` at its immediate container.
pub(crate) fn relink(doc: &mut Document, id: NodeId) {
    let mut pending = vec![id];
    while let Some(parent) = pending.pop() {
        for child in doc.payload(parent).children() {
            doc.slot_mut(child).parent = Some(parent);
            pending.push(child);
        }
    }
}

/// Calls every hook from `id` up to the root.
pub(crate) fn bubble(doc: &Document, id: NodeId) {
    let mut hooks: Vec<(NodeId, Arc<dyn ChangeHook>)> = Vec::new();
    let mut cursor = Some(id);
    while let Some(current) = cursor {
        let slot = doc.slot(current);
        if let Some(hook) = &slot.hook {
            hooks.push((current, Arc::clone(hook)));
        }
        cursor = slot.parent;
    }

    for (node, hook) in hooks {
        if let Err(e) = hook.on_change() {
            warn!(node = %node, error = %e, "Change hook failed");
        }
    }
}
