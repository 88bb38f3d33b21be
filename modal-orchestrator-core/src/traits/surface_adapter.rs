//! Surface adapter abstract Trait

use std::fmt::Debug;
use std::sync::Arc;

use modal_orchestrator_animation::AnimatedSurface;
use serde::{Deserialize, Serialize};

use crate::types::{
    Axis, EventDisposition, InputCategory, InputEvent, ModalStyle, Point, ScrollMetrics,
    TouchBlockStrategy,
};

/// Callback invoked by the adapter for each event of the attached category.
///
/// The returned disposition tells the adapter whether to cancel the event's
/// default action.
pub type InputHandler<H> = Arc<dyn Fn(&InputEvent<H>) -> EventDisposition + Send + Sync>;

/// Adapter-issued handle of an attached listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListenerId(pub u64);

/// Where a listener is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenerTarget<H> {
    /// A specific surface; events bubble to it from its descendants.
    Surface(H),
    /// The host viewport (window-level scroll and resize).
    Viewport,
}

/// The two layers of a backdrop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackdropSurfaces<H> {
    /// Outer full-coverage layer, appended to the container.
    pub backdrop: H,
    /// Inner layer the wrapper is inserted into.
    pub content_root: H,
}

impl<H: PartialEq> BackdropSurfaces<H> {
    /// Whether `surface` is one of the backdrop's own layers.
    pub fn is_layer(&self, surface: &H) -> bool {
        *surface == self.backdrop || *surface == self.content_root
    }
}

/// Surface adapter Trait
///
/// Bridges the modal engine to a host surface tree (a DOM, a retained-mode
/// GUI, an in-memory tree). All operations are synchronous; the only
/// asynchronous collaborator of the engine is the animation provider.
///
/// Platform implementation:
/// - In-memory: [`MemorySurfaceTree`](crate::adapters::MemorySurfaceTree)
///
/// The engine never holds its registry lock while calling these methods, so
/// an implementation may dispatch events synchronously from inside them.
pub trait SurfaceAdapter: Send + Sync + 'static {
    /// Handle of one surface. Equality must be identity.
    type Surface: AnimatedSurface + Clone + PartialEq + Debug + Send + Sync + 'static;

    /// Create the backdrop for a modal anchored to `container`.
    ///
    /// The backdrop is not attached yet; the engine appends it.
    fn create_backdrop(
        &self,
        container: &Self::Surface,
        z_index: u32,
        style: &ModalStyle,
    ) -> BackdropSurfaces<Self::Surface>;

    /// Create the wrapper that positions the content inside the backdrop.
    fn create_wrapper(&self, style: &ModalStyle) -> Self::Surface;

    /// Append `child` as the last child of `parent`.
    fn append(&self, parent: &Self::Surface, child: &Self::Surface);

    /// Detach `surface` from its parent, keeping it alive.
    fn detach(&self, surface: &Self::Surface);

    /// Detach and release `surface` and everything still inside it.
    fn release(&self, surface: &Self::Surface);

    /// Parent of `surface`, `None` for the root or a detached surface.
    fn parent(&self, surface: &Self::Surface) -> Option<Self::Surface>;

    /// Whether `surface` is the document root.
    fn is_root(&self, surface: &Self::Surface) -> bool;

    /// Scroll position of `surface` along `axis`.
    fn scroll_metrics(&self, surface: &Self::Surface, axis: Axis) -> ScrollMetrics;

    /// Current scroll offset of `surface` (of the viewport for the root).
    fn scroll_offset(&self, surface: &Self::Surface) -> Point;

    /// Position `surface` at `offset` within its parent.
    fn set_offset(&self, surface: &Self::Surface, offset: Point);

    /// Lock or unlock scrolling of `surface`.
    fn set_scroll_lock(&self, surface: &Self::Surface, locked: bool);

    /// Touch strategy this host needs when options leave it unset.
    fn preferred_touch_strategy(&self) -> TouchBlockStrategy {
        TouchBlockStrategy::ChainWalk
    }

    /// Attach `handler` for `category` events at `target`.
    fn attach_listener(
        &self,
        target: ListenerTarget<Self::Surface>,
        category: InputCategory,
        handler: InputHandler<Self::Surface>,
    ) -> ListenerId;

    /// Detach a listener. Unknown ids are ignored.
    fn detach_listener(&self, id: ListenerId);
}
