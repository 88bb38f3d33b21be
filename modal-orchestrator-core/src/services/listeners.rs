//! Per-record listener tables

use log::trace;
use serde::Serialize;

use crate::traits::{InputHandler, ListenerId, ListenerTarget, SurfaceAdapter};
use crate::types::InputCategory;

/// What a listener is attached for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ListenerRole {
    /// Scroll and resize of the container.
    PositionSync,
    /// Wheel, key and (under `ChainWalk`) touch input on the backdrop.
    ScrollIntent,
    BackdropClick,
    EscapeKey,
}

/// One attached listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerBinding {
    pub role: ListenerRole,
    pub category: InputCategory,
    pub id: ListenerId,
}

/// The listeners a modal record attached, detached together at disposal.
#[derive(Debug, Default)]
pub struct ListenerTable {
    bindings: Vec<ListenerBinding>,
}

impl ListenerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `handler` through `adapter` and record the binding.
    pub fn attach<S: SurfaceAdapter>(
        &mut self,
        adapter: &S,
        role: ListenerRole,
        target: ListenerTarget<S::Surface>,
        category: InputCategory,
        handler: InputHandler<S::Surface>,
    ) -> ListenerId {
        let id = adapter.attach_listener(target, category, handler);
        self.bindings.push(ListenerBinding { role, category, id });
        id
    }

    pub fn bindings(&self) -> &[ListenerBinding] {
        &self.bindings
    }

    pub fn has_role(&self, role: ListenerRole) -> bool {
        self.bindings.iter().any(|b| b.role == role)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Detach every binding. Returns how many were detached; a second call
    /// detaches nothing.
    pub fn detach_all<S: SurfaceAdapter>(&mut self, adapter: &S) -> usize {
        let count = self.bindings.len();
        for binding in self.bindings.drain(..) {
            trace!(
                "Detaching {:?} listener {:?} ({:?})",
                binding.role, binding.id, binding.category
            );
            adapter.detach_listener(binding.id);
        }
        count
    }
}
