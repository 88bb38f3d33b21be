//! Backdrop position synchronization

use std::sync::Arc;

use crate::traits::{ListenerTarget, SurfaceAdapter};

/// Keeps a backdrop aligned with the scroll offset of its container.
///
/// Stateless: every [`sync`](Self::sync) copies the container's current offset
/// onto the backdrop.
pub struct PositionSynchronizer<S: SurfaceAdapter> {
    adapter: Arc<S>,
    container: S::Surface,
    backdrop: S::Surface,
}

impl<S: SurfaceAdapter> PositionSynchronizer<S> {
    pub fn new(adapter: Arc<S>, container: S::Surface, backdrop: S::Surface) -> Self {
        Self {
            adapter,
            container,
            backdrop,
        }
    }

    /// Where scroll and resize events for the container are observed.
    ///
    /// The root surface scrolls with the viewport.
    pub fn target(&self) -> ListenerTarget<S::Surface> {
        if self.adapter.is_root(&self.container) {
            ListenerTarget::Viewport
        } else {
            ListenerTarget::Surface(self.container.clone())
        }
    }

    pub fn sync(&self) {
        let offset = self.adapter.scroll_offset(&self.container);
        self.adapter.set_offset(&self.backdrop, offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemorySurfaceTree;
    use crate::types::Point;

    #[test]
    fn root_container_listens_on_viewport() {
        let tree = Arc::new(MemorySurfaceTree::new());
        let backdrop = tree.create_detached();
        let sync = PositionSynchronizer::new(Arc::clone(&tree), tree.root(), backdrop);
        assert_eq!(sync.target(), ListenerTarget::Viewport);
    }

    #[test]
    fn copies_container_offset_onto_backdrop() {
        let tree = Arc::new(MemorySurfaceTree::new());
        let container = tree.create_element(&tree.root());
        let backdrop = tree.create_element(&container);
        tree.set_scroll_range(&container, Point::new(0.0, 1000.0));
        let sync = PositionSynchronizer::new(Arc::clone(&tree), container.clone(), backdrop.clone());

        assert_eq!(sync.target(), ListenerTarget::Surface(container.clone()));

        tree.scroll_to(&container, Point::new(0.0, 240.0));
        sync.sync();
        assert_eq!(tree.offset(&backdrop), Some(Point::new(0.0, 240.0)));

        tree.scroll_to(&container, Point::new(0.0, 10.0));
        sync.sync();
        assert_eq!(tree.offset(&backdrop), Some(Point::new(0.0, 10.0)));
    }
}
