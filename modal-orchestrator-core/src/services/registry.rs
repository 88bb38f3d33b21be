//! Modal record registry

use std::collections::BTreeMap;
use std::sync::Arc;

use super::listeners::ListenerTable;
use super::position_sync::PositionSynchronizer;
use super::scroll_intent::ScrollIntentResolver;
use crate::traits::{BackdropSurfaces, SurfaceAdapter};
use crate::types::{
    ModalId, ModalOptions, ModalSnapshot, ModalState, SignalSender, TouchBlockStrategy,
};

/// Bookkeeping of one modal between `open` and disposal.
pub(crate) struct ModalRecord<S: SurfaceAdapter> {
    pub(crate) id: ModalId,
    pub(crate) container: S::Surface,
    pub(crate) z_index: u32,
    pub(crate) state: ModalState,
    pub(crate) close_queued: bool,
    pub(crate) options: ModalOptions<S::Surface>,
    pub(crate) content: S::Surface,
    pub(crate) backdrop: BackdropSurfaces<S::Surface>,
    pub(crate) wrapper: S::Surface,
    pub(crate) opened: SignalSender<S::Surface>,
    pub(crate) closed: SignalSender<S::Surface>,
    pub(crate) listeners: ListenerTable,
    pub(crate) touch_strategy: TouchBlockStrategy,
    // Handlers hold these weakly; the record keeps them alive.
    pub(crate) _resolver: Arc<ScrollIntentResolver<S>>,
    pub(crate) _position_sync: Arc<PositionSynchronizer<S>>,
}

impl<S: SurfaceAdapter> ModalRecord<S> {
    pub(crate) fn snapshot(&self) -> ModalSnapshot<S::Surface> {
        ModalSnapshot {
            id: self.id,
            container: self.container.clone(),
            z_index: self.z_index,
            state: self.state,
            close_queued: self.close_queued,
        }
    }

    pub(crate) fn holds_scroll_lock(&self) -> bool {
        self.touch_strategy == TouchBlockStrategy::LockContainer
    }
}

/// Registered records, ordered by id.
pub(crate) struct Registry<S: SurfaceAdapter> {
    records: BTreeMap<ModalId, ModalRecord<S>>,
}

impl<S: SurfaceAdapter> Default for Registry<S> {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }
}

impl<S: SurfaceAdapter> Registry<S> {
    pub(crate) fn insert(&mut self, record: ModalRecord<S>) {
        self.records.insert(record.id, record);
    }

    pub(crate) fn get(&self, id: ModalId) -> Option<&ModalRecord<S>> {
        self.records.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: ModalId) -> Option<&mut ModalRecord<S>> {
        self.records.get_mut(&id)
    }

    pub(crate) fn remove(&mut self, id: ModalId) -> Option<ModalRecord<S>> {
        self.records.remove(&id)
    }

    /// Remove the record with the lowest id.
    pub(crate) fn pop_first(&mut self) -> Option<ModalRecord<S>> {
        self.records.pop_first().map(|(_, record)| record)
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn ids(&self) -> Vec<ModalId> {
        self.records.keys().copied().collect()
    }

    /// Ids of records anchored to `container`.
    pub(crate) fn ids_in(&self, container: &S::Surface) -> Vec<ModalId> {
        self.records
            .values()
            .filter(|r| r.container == *container)
            .map(|r| r.id)
            .collect()
    }

    /// Record whose content is `content`, if any.
    pub(crate) fn find_by_content(&self, content: &S::Surface) -> Option<ModalId> {
        self.records
            .values()
            .find(|r| r.content == *content)
            .map(|r| r.id)
    }

    /// Stacking order for a new record in `container`: one above the highest
    /// record there, closing records included.
    pub(crate) fn next_z_index(&self, container: &S::Surface) -> u32 {
        self.records
            .values()
            .filter(|r| r.container == *container)
            .map(|r| r.z_index)
            .max()
            .map_or(1, |z| z.saturating_add(1))
    }

    /// Number of records holding the scroll lock of `container`.
    pub(crate) fn scroll_lock_holders(&self, container: &S::Surface) -> usize {
        self.records
            .values()
            .filter(|r| r.container == *container && r.holds_scroll_lock())
            .count()
    }

    pub(crate) fn snapshot(&self) -> Vec<ModalSnapshot<S::Surface>> {
        self.records.values().map(ModalRecord::snapshot).collect()
    }
}
