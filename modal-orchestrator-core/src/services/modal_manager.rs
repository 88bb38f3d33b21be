//! Modal lifecycle management
//!
//! [`ModalManager`] owns the registry of open modals and drives each one
//! through `Opening → Open → Closing → Disposed`. Entry and exit phases run on
//! tasks spawned on the runtime captured at construction; the registry lock is
//! never held across an await, while user callbacks run, or while the host
//! adapter is called.

use std::fmt;
use std::sync::{Arc, Weak};

use futures::future::join;
use log::{debug, warn};
use parking_lot::{Mutex, ReentrantMutex};
use tokio::runtime::Handle;

use super::listeners::{ListenerRole, ListenerTable};
use super::position_sync::PositionSynchronizer;
use super::registry::{ModalRecord, Registry};
use super::scroll_intent::ScrollIntentResolver;
use crate::error::{ModalError, ModalResult};
use crate::traits::{BackdropSurfaces, ListenerTarget, SurfaceAdapter};
use crate::types::{
    signal, CloseOutcome, EventDisposition, InputCategory, InputEvent, Key, LifecycleCallbacks,
    ModalAnimations, ModalId, ModalOptions, ModalSnapshot, ModalState, MultiModalBehaviour,
    Signal, TouchBlockStrategy,
};

struct ManagerInner<S: SurfaceAdapter> {
    adapter: Arc<S>,
    root: S::Surface,
    runtime: Handle,
    registry: Mutex<Registry<S>>,
    /// Serialises mounting and tear-down, whose adapter calls depend on
    /// registry counts (z-index, scroll lock holders). Reentrant so a host
    /// that dispatches synchronously can reach `request_close`.
    surfaces: ReentrantMutex<()>,
}

/// What a phase task needs from its record, cloned out under the lock.
struct PhasePlan<H> {
    content: H,
    wrapper: H,
    backdrop: H,
    animations: ModalAnimations<H>,
    callbacks: LifecycleCallbacks<H>,
}

impl<S: SurfaceAdapter> ModalRecord<S> {
    fn phase_plan(&self) -> PhasePlan<S::Surface> {
        PhasePlan {
            content: self.content.clone(),
            wrapper: self.wrapper.clone(),
            backdrop: self.backdrop.backdrop.clone(),
            animations: self.options.animations.clone(),
            callbacks: self.options.callbacks.clone(),
        }
    }
}

/// Requests the close of one modal.
///
/// Handed to the content factory and held by the [`ModalReceipt`]. Holds the
/// manager weakly: once the manager is gone, closing reports
/// [`CloseOutcome::Unknown`].
pub struct CloseTrigger<S: SurfaceAdapter> {
    manager: Weak<ManagerInner<S>>,
    id: ModalId,
}

impl<S: SurfaceAdapter> CloseTrigger<S> {
    pub const fn id(&self) -> ModalId {
        self.id
    }

    /// Same as [`ModalManager::request_close`] for this modal.
    pub fn close(&self) -> CloseOutcome {
        self.manager
            .upgrade()
            .map_or(CloseOutcome::Unknown, |manager| manager.request_close(self.id))
    }
}

impl<S: SurfaceAdapter> Clone for CloseTrigger<S> {
    fn clone(&self) -> Self {
        Self {
            manager: Weak::clone(&self.manager),
            id: self.id,
        }
    }
}

impl<S: SurfaceAdapter> fmt::Debug for CloseTrigger<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloseTrigger").field("id", &self.id).finish()
    }
}

/// Handle returned by [`ModalManager::open`].
pub struct ModalReceipt<S: SurfaceAdapter> {
    pub id: ModalId,
    /// Fulfilled with the content once the entry animations have settled.
    pub opened: Signal<S::Surface>,
    /// Fulfilled with the content once the modal has been disposed.
    pub closed: Signal<S::Surface>,
    trigger: CloseTrigger<S>,
}

impl<S: SurfaceAdapter> ModalReceipt<S> {
    pub fn close(&self) -> CloseOutcome {
        self.trigger.close()
    }

    pub fn trigger(&self) -> CloseTrigger<S> {
        self.trigger.clone()
    }
}

impl<S: SurfaceAdapter> fmt::Debug for ModalReceipt<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalReceipt")
            .field("id", &self.id)
            .field("opened", &self.opened.is_fulfilled())
            .field("closed", &self.closed.is_fulfilled())
            .finish()
    }
}

/// Modal lifecycle manager
///
/// Cheap to clone; clones share one registry. Dropping the last clone (after
/// every running phase has finished) tears down the modals still registered
/// without animations or callbacks, and fulfils their `closed` signals.
pub struct ModalManager<S: SurfaceAdapter> {
    inner: Arc<ManagerInner<S>>,
}

impl<S: SurfaceAdapter> Clone for ModalManager<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: SurfaceAdapter> fmt::Debug for ModalManager<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalManager")
            .field("root", &self.inner.root)
            .field("modals", &self.len())
            .finish()
    }
}

impl<S: SurfaceAdapter> ModalManager<S> {
    /// Create a manager on the current Tokio runtime.
    ///
    /// `root` is the default container and the surface that scrolls with the
    /// viewport.
    pub fn new(adapter: Arc<S>, root: S::Surface) -> ModalResult<Self> {
        let runtime = Handle::try_current().map_err(|_| ModalError::RuntimeUnavailable)?;
        Ok(Self::with_runtime(adapter, root, runtime))
    }

    /// Create a manager that spawns its phase tasks on `runtime`.
    pub fn with_runtime(adapter: Arc<S>, root: S::Surface, runtime: Handle) -> Self {
        Self {
            inner: Arc::new(ManagerInner {
                adapter,
                root,
                runtime,
                registry: Mutex::new(Registry::default()),
                surfaces: ReentrantMutex::new(()),
            }),
        }
    }

    pub fn adapter(&self) -> &Arc<S> {
        &self.inner.adapter
    }

    pub fn root(&self) -> &S::Surface {
        &self.inner.root
    }

    /// Open a modal.
    ///
    /// `content_factory` receives the modal's [`CloseTrigger`] and returns the
    /// content to mount. `container` defaults to the root surface.
    ///
    /// Content handles are compared by identity: if the returned content is
    /// still mounted in a registered modal (including one that is closing),
    /// the open is rejected with [`ModalError::ContentAlreadyMounted`] and
    /// nothing changes.
    pub fn open<F>(
        &self,
        content_factory: F,
        options: ModalOptions<S::Surface>,
        container: Option<S::Surface>,
    ) -> ModalResult<ModalReceipt<S>>
    where
        F: FnOnce(CloseTrigger<S>) -> S::Surface,
    {
        let inner = &self.inner;
        let id = ModalId::next();
        let trigger = CloseTrigger {
            manager: Arc::downgrade(inner),
            id,
        };
        let content = content_factory(trigger.clone());
        let container = container.unwrap_or_else(|| inner.root.clone());

        let holder = inner.registry.lock().find_by_content(&content);
        if let Some(holder) = holder {
            return Err(rejected(id, holder));
        }

        let to_close = {
            let registry = inner.registry.lock();
            match options.multi_modal_behaviour {
                MultiModalBehaviour::OnTop => Vec::new(),
                MultiModalBehaviour::Exclusive => registry.ids(),
                MultiModalBehaviour::ExclusiveInContainer => registry.ids_in(&container),
            }
        };
        for other in to_close {
            inner.request_close(other);
        }

        let touch_strategy = options
            .touch_strategy
            .unwrap_or_else(|| inner.adapter.preferred_touch_strategy());
        let (opened_tx, opened) = signal();
        let (closed_tx, closed) = signal();

        let (plan, z_index) = {
            let _surfaces = inner.surfaces.lock();
            let (z_index, lock_container) = {
                let registry = inner.registry.lock();
                if let Some(holder) = registry.find_by_content(&content) {
                    return Err(rejected(id, holder));
                }
                (
                    registry.next_z_index(&container),
                    touch_strategy == TouchBlockStrategy::LockContainer
                        && registry.scroll_lock_holders(&container) == 0,
                )
            };

            let adapter = &*inner.adapter;
            let backdrop = adapter.create_backdrop(&container, z_index, &options.style);
            let wrapper = adapter.create_wrapper(&options.style);
            adapter.append(&backdrop.content_root, &wrapper);
            adapter.append(&wrapper, &content);
            adapter.append(&container, &backdrop.backdrop);

            if lock_container {
                adapter.set_scroll_lock(&container, true);
            }

            let position_sync = Arc::new(PositionSynchronizer::new(
                Arc::clone(&inner.adapter),
                container.clone(),
                backdrop.backdrop.clone(),
            ));
            position_sync.sync();
            let resolver = Arc::new(ScrollIntentResolver::new(
                Arc::clone(&inner.adapter),
                backdrop.clone(),
                options.scroll_safety_margin,
            ));
            let listeners = inner.bind_listeners(
                id,
                &backdrop,
                &position_sync,
                &resolver,
                &options,
                touch_strategy,
            );

            let record = ModalRecord {
                id,
                container,
                z_index,
                state: ModalState::Opening,
                close_queued: false,
                options,
                content,
                backdrop,
                wrapper,
                opened: opened_tx,
                closed: closed_tx,
                listeners,
                touch_strategy,
                _resolver: resolver,
                _position_sync: position_sync,
            };
            let plan = record.phase_plan();
            inner.registry.lock().insert(record);
            (plan, z_index)
        };

        debug!("Modal {id} opening (z-index {z_index}, touch strategy {touch_strategy:?})");
        LifecycleCallbacks::fire(plan.callbacks.before_open.as_ref(), &plan.content);
        inner.runtime.spawn(Arc::clone(inner).run_entry(id, plan));

        Ok(ModalReceipt {
            id,
            opened,
            closed,
            trigger,
        })
    }

    /// Ask a modal to close.
    ///
    /// A modal still opening closes once its entry animations settle; one
    /// already closing is left alone.
    pub fn request_close(&self, id: ModalId) -> CloseOutcome {
        self.inner.request_close(id)
    }

    /// Ask every registered modal to close. Returns the number of requests.
    pub fn close_all(&self) -> usize {
        let ids = self.inner.registry.lock().ids();
        for id in &ids {
            self.inner.request_close(*id);
        }
        ids.len()
    }

    /// Current state of a registered modal; `None` once disposed.
    pub fn state(&self, id: ModalId) -> Option<ModalState> {
        self.inner.registry.lock().get(id).map(|r| r.state)
    }

    pub fn get(&self, id: ModalId) -> Option<ModalSnapshot<S::Surface>> {
        self.inner.registry.lock().get(id).map(ModalRecord::snapshot)
    }

    /// Every registered modal, ordered by id.
    pub fn snapshot(&self) -> Vec<ModalSnapshot<S::Surface>> {
        self.inner.registry.lock().snapshot()
    }

    pub fn contains(&self, id: ModalId) -> bool {
        self.inner.registry.lock().get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.inner.registry.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Undo everything `open` did to the host for `record`, then fulfil `closed`.
///
/// `unlock` releases the container's scroll lock; callers pass it when no
/// other registered record still holds that lock.
fn tear_down<S: SurfaceAdapter>(adapter: &S, record: &mut ModalRecord<S>, unlock: bool) {
    record.listeners.detach_all(adapter);
    adapter.detach(&record.content);
    adapter.release(&record.wrapper);
    adapter.release(&record.backdrop.backdrop);
    if unlock {
        adapter.set_scroll_lock(&record.container, false);
    }
    record.state = ModalState::Disposed;
    record.closed.fulfill(record.content.clone());
}

fn rejected(id: ModalId, holder: ModalId) -> ModalError {
    let error = ModalError::ContentAlreadyMounted(holder);
    warn!("Rejected open of modal {id}: {error}");
    error
}

impl<S: SurfaceAdapter> ManagerInner<S> {
    fn request_close(self: &Arc<Self>, id: ModalId) -> CloseOutcome {
        let plan = {
            let mut registry = self.registry.lock();
            let Some(record) = registry.get_mut(id) else {
                debug!("Close requested for unknown modal {id}");
                return CloseOutcome::Unknown;
            };
            if !record.state.accepts_close() {
                debug!("Modal {id} is already closing");
                return CloseOutcome::AlreadyClosing;
            }
            if record.state == ModalState::Opening {
                if !record.close_queued {
                    debug!("Modal {id} is opening, close queued");
                }
                record.close_queued = true;
                return CloseOutcome::Queued;
            }
            record.state = ModalState::Closing;
            record.phase_plan()
        };

        debug!("Modal {id} closing");
        LifecycleCallbacks::fire(plan.callbacks.before_close.as_ref(), &plan.content);
        self.runtime.spawn(Arc::clone(self).run_exit(id, plan));
        CloseOutcome::Started
    }

    /// Entry phase. A close queued meanwhile runs inline right after.
    async fn run_entry(self: Arc<Self>, id: ModalId, plan: PhasePlan<S::Surface>) {
        join(
            plan.animations.modal_enter.animate(&plan.wrapper),
            plan.animations.backdrop_enter.animate(&plan.backdrop),
        )
        .await;
        LifecycleCallbacks::fire(plan.callbacks.after_open.as_ref(), &plan.content);

        let close_now = {
            let mut registry = self.registry.lock();
            let Some(record) = registry.get_mut(id) else {
                return;
            };
            record.state = ModalState::Open;
            record.opened.fulfill(plan.content.clone());
            if record.close_queued {
                record.state = ModalState::Closing;
                true
            } else {
                false
            }
        };
        debug!("Modal {id} open");

        if close_now {
            debug!("Modal {id} closing (queued while opening)");
            LifecycleCallbacks::fire(plan.callbacks.before_close.as_ref(), &plan.content);
            self.run_exit(id, plan).await;
        }
    }

    async fn run_exit(self: Arc<Self>, id: ModalId, plan: PhasePlan<S::Surface>) {
        join(
            plan.animations.modal_leave.animate(&plan.wrapper),
            plan.animations.backdrop_leave.animate(&plan.backdrop),
        )
        .await;
        LifecycleCallbacks::fire(plan.callbacks.after_close.as_ref(), &plan.content);
        self.dispose(id);
    }

    /// Tear a closed record down and fulfil its `closed` signal.
    fn dispose(&self, id: ModalId) {
        {
            let _surfaces = self.surfaces.lock();
            let removed = {
                let mut registry = self.registry.lock();
                registry.remove(id).map(|record| {
                    let unlock = record.holds_scroll_lock()
                        && registry.scroll_lock_holders(&record.container) == 0;
                    (record, unlock)
                })
            };
            let Some((mut record, unlock)) = removed else {
                return;
            };
            tear_down(&*self.adapter, &mut record, unlock);
        }
        debug!("Modal {id} disposed");
    }

    fn bind_listeners(
        self: &Arc<Self>,
        id: ModalId,
        backdrop: &BackdropSurfaces<S::Surface>,
        position_sync: &Arc<PositionSynchronizer<S>>,
        resolver: &Arc<ScrollIntentResolver<S>>,
        options: &ModalOptions<S::Surface>,
        touch_strategy: TouchBlockStrategy,
    ) -> ListenerTable {
        let adapter = &*self.adapter;
        let mut table = ListenerTable::new();
        let on_backdrop = || ListenerTarget::Surface(backdrop.backdrop.clone());

        let sync_target = position_sync.target();
        for category in [InputCategory::Scroll, InputCategory::Resize] {
            let sync = Arc::downgrade(position_sync);
            table.attach(
                adapter,
                ListenerRole::PositionSync,
                sync_target.clone(),
                category,
                Arc::new(move |_: &InputEvent<S::Surface>| {
                    if let Some(sync) = sync.upgrade() {
                        sync.sync();
                    }
                    EventDisposition::Pass
                }),
            );
        }

        let mut intent = vec![InputCategory::Wheel, InputCategory::KeyDown];
        if touch_strategy == TouchBlockStrategy::ChainWalk {
            intent.extend([InputCategory::TouchStart, InputCategory::TouchMove]);
        }
        for category in intent {
            let resolver = Arc::downgrade(resolver);
            table.attach(
                adapter,
                ListenerRole::ScrollIntent,
                on_backdrop(),
                category,
                Arc::new(move |event: &InputEvent<S::Surface>| {
                    resolver
                        .upgrade()
                        .map_or(EventDisposition::Pass, |resolver| resolver.resolve(event))
                }),
            );
        }

        if options.close_on_backdrop_click {
            let manager = Arc::downgrade(self);
            let layers = backdrop.clone();
            table.attach(
                adapter,
                ListenerRole::BackdropClick,
                on_backdrop(),
                InputCategory::Click,
                Arc::new(move |event: &InputEvent<S::Surface>| {
                    if layers.is_layer(event.target()) {
                        if let Some(manager) = manager.upgrade() {
                            manager.request_close(id);
                        }
                    }
                    EventDisposition::Pass
                }),
            );
        }

        if options.close_on_escape {
            let manager = Arc::downgrade(self);
            table.attach(
                adapter,
                ListenerRole::EscapeKey,
                on_backdrop(),
                InputCategory::KeyDown,
                Arc::new(move |event: &InputEvent<S::Surface>| {
                    if !matches!(event, InputEvent::KeyDown { key: Key::Escape, .. }) {
                        return EventDisposition::Pass;
                    }
                    if let Some(manager) = manager.upgrade() {
                        manager.request_close(id);
                    }
                    EventDisposition::Suppress
                }),
            );
        }

        table
    }
}

impl<S: SurfaceAdapter> Drop for ManagerInner<S> {
    fn drop(&mut self) {
        let registry = self.registry.get_mut();
        while let Some(mut record) = registry.pop_first() {
            let unlock =
                record.holds_scroll_lock() && registry.scroll_lock_holders(&record.container) == 0;
            tear_down(&*self.adapter, &mut record, unlock);
            debug!("Modal {} disposed with its manager", record.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MemorySurface, MemorySurfaceTree, SurfaceKind};
    use crate::traits::{InputHandler, ListenerId};
    use crate::types::{Axis, ModalStyle, Point, ScrollMetrics};
    use crate::test_utils::{
        create_test_manager, gated_options, settle, CallbackLog, GatedAnimation,
    };

    #[tokio::test]
    async fn open_builds_surfaces_and_fires_before_open() {
        let (tree, manager) = create_test_manager();
        let log = CallbackLog::new();
        let enter = GatedAnimation::new();
        let leave = GatedAnimation::new();
        let content = tree.create_detached();

        let receipt = manager
            .open(
                |_| content.clone(),
                log.hook(gated_options(&enter, &leave), "a"),
                None,
            )
            .unwrap();

        assert_eq!(log.entries(), vec!["a:before_open"]);
        assert_eq!(manager.state(receipt.id), Some(ModalState::Opening));

        let backdrop = tree.children(&tree.root()).pop().unwrap();
        assert_eq!(tree.kind(&backdrop), Some(SurfaceKind::Backdrop));
        let wrapper = tree.parent(&content).unwrap();
        assert_eq!(tree.kind(&wrapper), Some(SurfaceKind::Wrapper));
        assert!(tree.is_attached(&content));

        settle().await;
        assert_eq!(enter.started(), 2);
        enter.release_all();
        settle().await;

        assert_eq!(manager.state(receipt.id), Some(ModalState::Open));
        assert_eq!(receipt.opened.get(), Some(content));
        assert_eq!(log.entries(), vec!["a:before_open", "a:after_open"]);
    }

    #[tokio::test]
    async fn queued_close_waits_for_entry_then_runs_inline() {
        let (tree, manager) = create_test_manager();
        let enter = GatedAnimation::new();
        let leave = GatedAnimation::new();
        let content = tree.create_detached();
        let receipt = manager
            .open(|_| content, gated_options(&enter, &leave), None)
            .unwrap();

        assert_eq!(receipt.close(), CloseOutcome::Queued);
        assert_eq!(receipt.close(), CloseOutcome::Queued);
        settle().await;
        assert_eq!(leave.started(), 0);
        assert!(manager.get(receipt.id).unwrap().close_queued);

        enter.release_all();
        settle().await;
        assert!(receipt.opened.is_fulfilled());
        let snapshot = manager.get(receipt.id).unwrap();
        assert_eq!(snapshot.state, ModalState::Closing);
        assert!(snapshot.close_queued);
        assert_eq!(leave.started(), 2);

        leave.release_all();
        settle().await;
        assert!(receipt.closed.is_fulfilled());
        assert!(manager.is_empty());
    }

    #[tokio::test]
    async fn double_close_runs_one_exit() {
        let (tree, manager) = create_test_manager();
        let log = CallbackLog::new();
        let enter = GatedAnimation::new();
        let leave = GatedAnimation::new();
        enter.open_gate();
        let receipt = manager
            .open(
                |_| tree.create_detached(),
                log.hook(gated_options(&enter, &leave), "a"),
                None,
            )
            .unwrap();
        settle().await;

        assert_eq!(manager.request_close(receipt.id), CloseOutcome::Started);
        assert_eq!(manager.request_close(receipt.id), CloseOutcome::AlreadyClosing);
        settle().await;
        assert_eq!(leave.started(), 2);

        leave.release_all();
        settle().await;
        assert_eq!(manager.request_close(receipt.id), CloseOutcome::Unknown);
        assert_eq!(
            log.entries(),
            vec!["a:before_open", "a:after_open", "a:before_close", "a:after_close"]
        );
    }

    #[tokio::test]
    async fn content_factory_receives_working_trigger() {
        let (tree, manager) = create_test_manager();
        let enter = GatedAnimation::new();
        let leave = GatedAnimation::new();
        enter.open_gate();
        leave.open_gate();
        let mut captured = None;

        let receipt = manager
            .open(
                |trigger| {
                    captured = Some(trigger);
                    tree.create_detached()
                },
                gated_options(&enter, &leave),
                None,
            )
            .unwrap();
        let trigger = captured.unwrap();
        assert_eq!(trigger.id(), receipt.id);
        settle().await;

        assert_eq!(trigger.close(), CloseOutcome::Started);
        assert!(receipt.closed.wait().await.is_some());
    }

    #[tokio::test]
    async fn mounted_content_is_rejected_without_side_effects() {
        let (tree, manager) = create_test_manager();
        let enter = GatedAnimation::new();
        let leave = GatedAnimation::new();
        let content = tree.create_detached();
        let first = manager
            .open(|_| content.clone(), gated_options(&enter, &leave), None)
            .unwrap();
        let children_before = tree.children(&tree.root()).len();

        let err = manager
            .open(
                |_| content.clone(),
                gated_options(&enter, &leave).behaviour(MultiModalBehaviour::Exclusive),
                None,
            )
            .unwrap_err();

        assert!(matches!(err, ModalError::ContentAlreadyMounted(id) if id == first.id));
        assert_eq!(manager.len(), 1);
        assert!(!manager.get(first.id).unwrap().close_queued);
        assert_eq!(tree.children(&tree.root()).len(), children_before);
    }

    #[tokio::test]
    async fn z_index_stacks_per_container() {
        let (tree, manager) = create_test_manager();
        let enter = GatedAnimation::new();
        let leave = GatedAnimation::new();
        let side = tree.create_element(&tree.root());

        let open_in = |container: Option<_>| {
            manager
                .open(|_| tree.create_detached(), gated_options(&enter, &leave), container)
                .unwrap()
                .id
        };
        let a = open_in(None);
        let b = open_in(None);
        let c = open_in(Some(side.clone()));

        let z = |id| manager.get(id).unwrap().z_index;
        assert!(a < b && b < c);
        assert_eq!((z(a), z(b), z(c)), (1, 2, 1));
    }

    #[tokio::test]
    async fn listeners_follow_options() {
        let (tree, manager) = create_test_manager();
        let enter = GatedAnimation::new();
        let leave = GatedAnimation::new();

        manager
            .open(
                |_| tree.create_detached(),
                gated_options(&enter, &leave)
                    .close_on_backdrop_click(false)
                    .touch_strategy(TouchBlockStrategy::LockContainer),
                None,
            )
            .unwrap();
        // scroll, resize, wheel, keydown
        assert_eq!(tree.listener_count(), 4);
        assert!(tree.is_scroll_locked(&tree.root()));

        manager
            .open(
                |_| tree.create_detached(),
                gated_options(&enter, &leave).close_on_escape(true),
                None,
            )
            .unwrap();
        // + scroll, resize, wheel, keydown, touchstart, touchmove, click, escape
        assert_eq!(tree.listener_count(), 12);
    }

    /// Host that reports a click on every surface gaining a child, before
    /// `append` returns.
    struct ClickOnAppend {
        tree: MemorySurfaceTree,
    }

    impl SurfaceAdapter for ClickOnAppend {
        type Surface = MemorySurface;

        fn create_backdrop(
            &self,
            container: &MemorySurface,
            z_index: u32,
            style: &ModalStyle,
        ) -> BackdropSurfaces<MemorySurface> {
            self.tree.create_backdrop(container, z_index, style)
        }

        fn create_wrapper(&self, style: &ModalStyle) -> MemorySurface {
            self.tree.create_wrapper(style)
        }

        fn append(&self, parent: &MemorySurface, child: &MemorySurface) {
            self.tree.append(parent, child);
            self.tree.dispatch(&InputEvent::Click {
                target: parent.clone(),
            });
        }

        fn detach(&self, surface: &MemorySurface) {
            self.tree.detach(surface);
        }

        fn release(&self, surface: &MemorySurface) {
            self.tree.release(surface);
        }

        fn parent(&self, surface: &MemorySurface) -> Option<MemorySurface> {
            self.tree.parent(surface)
        }

        fn is_root(&self, surface: &MemorySurface) -> bool {
            self.tree.is_root(surface)
        }

        fn scroll_metrics(&self, surface: &MemorySurface, axis: Axis) -> ScrollMetrics {
            self.tree.scroll_metrics(surface, axis)
        }

        fn scroll_offset(&self, surface: &MemorySurface) -> Point {
            self.tree.scroll_offset(surface)
        }

        fn set_offset(&self, surface: &MemorySurface, offset: Point) {
            self.tree.set_offset(surface, offset);
        }

        fn set_scroll_lock(&self, surface: &MemorySurface, locked: bool) {
            self.tree.set_scroll_lock(surface, locked);
        }

        fn attach_listener(
            &self,
            target: ListenerTarget<MemorySurface>,
            category: InputCategory,
            handler: InputHandler<MemorySurface>,
        ) -> ListenerId {
            self.tree.attach_listener(target, category, handler)
        }

        fn detach_listener(&self, id: ListenerId) {
            self.tree.detach_listener(id);
        }
    }

    #[tokio::test]
    async fn synchronous_host_dispatch_reaches_close_handlers() {
        let host = Arc::new(ClickOnAppend {
            tree: MemorySurfaceTree::new(),
        });
        let manager = ModalManager::new(Arc::clone(&host), host.tree.root()).unwrap();
        let enter = GatedAnimation::new();
        let leave = GatedAnimation::new();
        enter.open_gate();

        let outer_content = host.tree.create_detached();
        let outer = manager
            .open(|_| outer_content.clone(), gated_options(&enter, &leave), None)
            .unwrap();
        settle().await;
        assert_eq!(manager.state(outer.id), Some(ModalState::Open));

        // Mounting into the outer backdrop's inner layer clicks that layer
        let wrapper = host.tree.parent(&outer_content).unwrap();
        let content_root = host.tree.parent(&wrapper).unwrap();
        let inner = manager
            .open(
                |_| host.tree.create_detached(),
                gated_options(&enter, &leave),
                Some(content_root),
            )
            .unwrap();

        assert_eq!(manager.state(outer.id), Some(ModalState::Closing));
        assert_eq!(manager.state(inner.id), Some(ModalState::Opening));

        leave.open_gate();
        settle().await;
        assert!(outer.closed.is_fulfilled());
        assert!(!host.tree.is_alive(&wrapper));
    }

    #[test]
    fn new_outside_runtime_is_an_error() {
        let tree = Arc::new(MemorySurfaceTree::new());
        let root = tree.root();
        let err = ModalManager::new(tree, root).unwrap_err();
        assert!(matches!(err, ModalError::RuntimeUnavailable));
    }
}
