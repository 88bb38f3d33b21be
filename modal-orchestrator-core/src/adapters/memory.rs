//! In-memory surface tree
//!
//! A host-independent [`SurfaceAdapter`]: surfaces are nodes in a tree held in
//! memory, scroll geometry is set explicitly, and events are delivered with
//! [`MemorySurfaceTree::dispatch`]. Used by headless hosts and by the test
//! suite.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Weak};

use modal_orchestrator_animation::AnimatedSurface;
use parking_lot::Mutex;

use crate::traits::{BackdropSurfaces, InputHandler, ListenerId, ListenerTarget, SurfaceAdapter};
use crate::types::{
    Axis, EventDisposition, InputCategory, InputEvent, ModalStyle, Point, ScrollMetrics,
    TouchBlockStrategy,
};

/// Role of a node in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    Root,
    Element,
    Backdrop,
    BackdropContent,
    Wrapper,
}

/// Presentation state written by the engine and by animations.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceStyle {
    pub opacity: f64,
    pub translate: Point,
    pub scale: f64,
    pub z_index: Option<u32>,
    pub background: Option<String>,
    pub padding: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
    pub max_width: Option<String>,
    pub max_height: Option<String>,
}

impl Default for SurfaceStyle {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            translate: Point::default(),
            scale: 1.0,
            z_index: None,
            background: None,
            padding: None,
            width: None,
            height: None,
            max_width: None,
            max_height: None,
        }
    }
}

struct Node {
    kind: SurfaceKind,
    parent: Option<u64>,
    children: Vec<u64>,
    scroll: Point,
    max_scroll: Point,
    offset: Point,
    scroll_locked: bool,
    style: SurfaceStyle,
}

impl Node {
    fn new(kind: SurfaceKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            scroll: Point::default(),
            max_scroll: Point::default(),
            offset: Point::default(),
            scroll_locked: false,
            style: SurfaceStyle::default(),
        }
    }
}

struct Listener {
    target: ListenerTarget<MemorySurface>,
    category: InputCategory,
    handler: InputHandler<MemorySurface>,
}

#[derive(Default)]
struct TreeState {
    nodes: HashMap<u64, Node>,
    next_surface: u64,
    listeners: BTreeMap<ListenerId, Listener>,
    next_listener: u64,
    /// Every explicit `release` call, by surface id.
    release_log: Vec<u64>,
}

impl TreeState {
    fn insert(&mut self, kind: SurfaceKind) -> u64 {
        self.next_surface += 1;
        let id = self.next_surface;
        self.nodes.insert(id, Node::new(kind));
        id
    }

    fn detach(&mut self, id: u64) {
        let Some(parent) = self.nodes.get_mut(&id).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(parent) = self.nodes.get_mut(&parent) {
            parent.children.retain(|c| *c != id);
        }
    }

    fn append(&mut self, parent: u64, child: u64) {
        if !self.nodes.contains_key(&parent) || !self.nodes.contains_key(&child) {
            return;
        }
        self.detach(child);
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
    }

    fn remove_subtree(&mut self, id: u64) {
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                pending.extend(node.children);
            }
        }
    }

    /// Handlers for `category` attached to surface `surface_id`, or to the
    /// viewport when `None`.
    fn handlers_for(
        &self,
        category: InputCategory,
        surface_id: Option<u64>,
    ) -> Vec<InputHandler<MemorySurface>> {
        self.listeners
            .values()
            .filter(|l| l.category == category)
            .filter(|l| match (&l.target, surface_id) {
                (ListenerTarget::Surface(s), Some(id)) => s.id == id,
                (ListenerTarget::Viewport, None) => true,
                _ => false,
            })
            .map(|l| Arc::clone(&l.handler))
            .collect()
    }

    /// `id` followed by its ancestors, innermost first.
    fn path_to_root(&self, id: u64) -> Vec<u64> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let Some(node) = self.nodes.get(&node_id) else {
                break;
            };
            path.push(node_id);
            current = node.parent;
        }
        path
    }
}

/// Handle of a node in a [`MemorySurfaceTree`].
///
/// Equality is node identity. A handle outlives its node harmlessly: writes
/// through a handle whose node was released are ignored.
#[derive(Clone)]
pub struct MemorySurface {
    id: u64,
    tree: Weak<Mutex<TreeState>>,
}

impl MemorySurface {
    /// Node identifier, unique within its tree.
    pub const fn id(&self) -> u64 {
        self.id
    }

    fn with_node(&self, f: impl FnOnce(&mut Node)) {
        if let Some(tree) = self.tree.upgrade() {
            if let Some(node) = tree.lock().nodes.get_mut(&self.id) {
                f(node);
            }
        }
    }
}

impl PartialEq for MemorySurface {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && Weak::ptr_eq(&self.tree, &other.tree)
    }
}

impl Eq for MemorySurface {}

impl Hash for MemorySurface {
    fn hash<S: Hasher>(&self, state: &mut S) {
        self.id.hash(state);
    }
}

impl fmt::Debug for MemorySurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemorySurface({})", self.id)
    }
}

impl AnimatedSurface for MemorySurface {
    fn set_opacity(&self, opacity: f64) {
        self.with_node(|node| node.style.opacity = opacity);
    }

    fn set_translate(&self, x: f64, y: f64) {
        self.with_node(|node| node.style.translate = Point::new(x, y));
    }

    fn set_scale(&self, scale: f64) {
        self.with_node(|node| node.style.scale = scale);
    }
}

/// In-memory surface tree adapter
#[derive(Clone)]
pub struct MemorySurfaceTree {
    state: Arc<Mutex<TreeState>>,
    root: MemorySurface,
    touch_strategy: TouchBlockStrategy,
}

impl Default for MemorySurfaceTree {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySurfaceTree {
    /// Create a tree holding only the root surface.
    pub fn new() -> Self {
        let state = Arc::new(Mutex::new(TreeState::default()));
        let root_id = state.lock().insert(SurfaceKind::Root);
        let root = MemorySurface {
            id: root_id,
            tree: Arc::downgrade(&state),
        };
        Self {
            state,
            root,
            touch_strategy: TouchBlockStrategy::ChainWalk,
        }
    }

    /// Report `strategy` as this host's preferred touch strategy.
    #[must_use]
    pub fn with_touch_strategy(mut self, strategy: TouchBlockStrategy) -> Self {
        self.touch_strategy = strategy;
        self
    }

    pub fn root(&self) -> MemorySurface {
        self.root.clone()
    }

    fn handle(&self, id: u64) -> MemorySurface {
        MemorySurface {
            id,
            tree: Arc::downgrade(&self.state),
        }
    }

    /// Create a plain element appended to `parent`.
    pub fn create_element(&self, parent: &MemorySurface) -> MemorySurface {
        let mut state = self.state.lock();
        let id = state.insert(SurfaceKind::Element);
        state.append(parent.id, id);
        drop(state);
        self.handle(id)
    }

    /// Create a plain element that is not attached anywhere.
    pub fn create_detached(&self) -> MemorySurface {
        let id = self.state.lock().insert(SurfaceKind::Element);
        self.handle(id)
    }

    /// Set how far `surface` can scroll on each axis.
    ///
    /// The current offset is clamped into the new range.
    pub fn set_scroll_range(&self, surface: &MemorySurface, max: Point) {
        if let Some(node) = self.state.lock().nodes.get_mut(&surface.id) {
            node.max_scroll = Point::new(max.x.max(0.0), max.y.max(0.0));
            node.scroll = Point::new(
                node.scroll.x.clamp(0.0, node.max_scroll.x),
                node.scroll.y.clamp(0.0, node.max_scroll.y),
            );
        }
    }

    /// Scroll `surface` to `offset`, clamped to its range.
    pub fn scroll_to(&self, surface: &MemorySurface, offset: Point) {
        if let Some(node) = self.state.lock().nodes.get_mut(&surface.id) {
            node.scroll = Point::new(
                offset.x.clamp(0.0, node.max_scroll.x),
                offset.y.clamp(0.0, node.max_scroll.y),
            );
        }
    }

    pub fn kind(&self, surface: &MemorySurface) -> Option<SurfaceKind> {
        self.state.lock().nodes.get(&surface.id).map(|n| n.kind)
    }

    pub fn children(&self, surface: &MemorySurface) -> Vec<MemorySurface> {
        let children = self
            .state
            .lock()
            .nodes
            .get(&surface.id)
            .map(|n| n.children.clone())
            .unwrap_or_default();
        children.into_iter().map(|id| self.handle(id)).collect()
    }

    pub fn style(&self, surface: &MemorySurface) -> Option<SurfaceStyle> {
        self.state
            .lock()
            .nodes
            .get(&surface.id)
            .map(|n| n.style.clone())
    }

    /// Position set through [`SurfaceAdapter::set_offset`].
    pub fn offset(&self, surface: &MemorySurface) -> Option<Point> {
        self.state.lock().nodes.get(&surface.id).map(|n| n.offset)
    }

    pub fn is_scroll_locked(&self, surface: &MemorySurface) -> bool {
        self.state
            .lock()
            .nodes
            .get(&surface.id)
            .is_some_and(|n| n.scroll_locked)
    }

    /// Whether the node still exists (has not been released).
    pub fn is_alive(&self, surface: &MemorySurface) -> bool {
        self.state.lock().nodes.contains_key(&surface.id)
    }

    /// Whether `surface` is connected to the root.
    pub fn is_attached(&self, surface: &MemorySurface) -> bool {
        let state = self.state.lock();
        state
            .path_to_root(surface.id)
            .last()
            .is_some_and(|top| *top == self.root.id)
    }

    /// Number of `release` calls made for `surface`.
    pub fn release_calls(&self, surface: &MemorySurface) -> usize {
        self.state
            .lock()
            .release_log
            .iter()
            .filter(|id| **id == surface.id)
            .count()
    }

    pub fn listener_count(&self) -> usize {
        self.state.lock().listeners.len()
    }

    /// Number of listeners attached directly to `surface`.
    pub fn listeners_on(&self, surface: &MemorySurface) -> usize {
        self.state
            .lock()
            .listeners
            .values()
            .filter(|l| matches!(&l.target, ListenerTarget::Surface(s) if s == surface))
            .count()
    }

    /// Deliver `event` to every matching listener and merge their decisions.
    ///
    /// Scroll and resize go to listeners on the target itself (and to viewport
    /// listeners when the target is the root). Every other category bubbles
    /// from the target to the root, then reaches viewport listeners. Handlers
    /// run without the tree lock held, innermost first.
    pub fn dispatch(&self, event: &InputEvent<MemorySurface>) -> EventDisposition {
        let category = event.category();
        let target = event.target();

        let handlers: Vec<InputHandler<MemorySurface>> = {
            let state = self.state.lock();
            let path = match category {
                InputCategory::Scroll | InputCategory::Resize => vec![target.id],
                _ => state.path_to_root(target.id),
            };
            let reaches_viewport = match category {
                InputCategory::Scroll | InputCategory::Resize => target.id == self.root.id,
                _ => true,
            };

            let mut handlers = Vec::new();
            for id in &path {
                handlers.extend(state.handlers_for(category, Some(*id)));
            }
            if reaches_viewport {
                handlers.extend(state.handlers_for(category, None));
            }
            handlers
        };

        handlers
            .iter()
            .fold(EventDisposition::Pass, |acc, handler| acc.merge(handler(event)))
    }
}

impl SurfaceAdapter for MemorySurfaceTree {
    type Surface = MemorySurface;

    fn create_backdrop(
        &self,
        _container: &MemorySurface,
        z_index: u32,
        style: &ModalStyle,
    ) -> BackdropSurfaces<MemorySurface> {
        let mut state = self.state.lock();
        let backdrop = state.insert(SurfaceKind::Backdrop);
        let content_root = state.insert(SurfaceKind::BackdropContent);
        if let Some(node) = state.nodes.get_mut(&backdrop) {
            node.style.z_index = Some(z_index);
            node.style.background = Some(style.backdrop_color.clone());
        }
        if let Some(node) = state.nodes.get_mut(&content_root) {
            node.style.padding = Some(style.padding.clone());
        }
        state.append(backdrop, content_root);
        drop(state);

        BackdropSurfaces {
            backdrop: self.handle(backdrop),
            content_root: self.handle(content_root),
        }
    }

    fn create_wrapper(&self, style: &ModalStyle) -> MemorySurface {
        let mut state = self.state.lock();
        let wrapper = state.insert(SurfaceKind::Wrapper);
        if let Some(node) = state.nodes.get_mut(&wrapper) {
            node.style.width.clone_from(&style.width);
            node.style.height.clone_from(&style.height);
            node.style.max_width.clone_from(&style.max_width);
            node.style.max_height.clone_from(&style.max_height);
        }
        drop(state);
        self.handle(wrapper)
    }

    fn append(&self, parent: &MemorySurface, child: &MemorySurface) {
        self.state.lock().append(parent.id, child.id);
    }

    fn detach(&self, surface: &MemorySurface) {
        self.state.lock().detach(surface.id);
    }

    fn release(&self, surface: &MemorySurface) {
        let mut state = self.state.lock();
        state.release_log.push(surface.id);
        state.detach(surface.id);
        state.remove_subtree(surface.id);
    }

    fn parent(&self, surface: &MemorySurface) -> Option<MemorySurface> {
        let parent = self
            .state
            .lock()
            .nodes
            .get(&surface.id)
            .and_then(|n| n.parent)?;
        Some(self.handle(parent))
    }

    fn is_root(&self, surface: &MemorySurface) -> bool {
        *surface == self.root
    }

    fn scroll_metrics(&self, surface: &MemorySurface, axis: Axis) -> ScrollMetrics {
        self.state
            .lock()
            .nodes
            .get(&surface.id)
            .map(|n| ScrollMetrics::new(n.scroll.along(axis), n.max_scroll.along(axis)))
            .unwrap_or_default()
    }

    fn scroll_offset(&self, surface: &MemorySurface) -> Point {
        self.state
            .lock()
            .nodes
            .get(&surface.id)
            .map(|n| n.scroll)
            .unwrap_or_default()
    }

    fn set_offset(&self, surface: &MemorySurface, offset: Point) {
        if let Some(node) = self.state.lock().nodes.get_mut(&surface.id) {
            node.offset = offset;
        }
    }

    fn set_scroll_lock(&self, surface: &MemorySurface, locked: bool) {
        if let Some(node) = self.state.lock().nodes.get_mut(&surface.id) {
            node.scroll_locked = locked;
        }
    }

    fn preferred_touch_strategy(&self) -> TouchBlockStrategy {
        self.touch_strategy
    }

    fn attach_listener(
        &self,
        target: ListenerTarget<MemorySurface>,
        category: InputCategory,
        handler: InputHandler<MemorySurface>,
    ) -> ListenerId {
        let mut state = self.state.lock();
        state.next_listener += 1;
        let id = ListenerId(state.next_listener);
        state.listeners.insert(
            id,
            Listener {
                target,
                category,
                handler,
            },
        );
        id
    }

    fn detach_listener(&self, id: ListenerId) {
        self.state.lock().listeners.remove(&id);
    }
}
