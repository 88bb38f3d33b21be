//! Test helpers
//!
//! Provides controllable animations, a callback recorder and manager factories.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::adapters::{MemorySurface, MemorySurfaceTree};
use crate::services::ModalManager;
use crate::types::{AnimationProvider, ModalAnimations, ModalOptions};

// ===== GatedAnimation =====

/// Animation that settles only when the test releases it.
pub struct GatedAnimation {
    started: AtomicUsize,
    always_open: AtomicBool,
    gates: Mutex<Vec<oneshot::Sender<()>>>,
}

impl GatedAnimation {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            started: AtomicUsize::new(0),
            always_open: AtomicBool::new(false),
            gates: Mutex::new(Vec::new()),
        })
    }

    /// Number of `animate` calls so far.
    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    /// Settle every animation currently waiting.
    pub fn release_all(&self) -> usize {
        let gates: Vec<_> = self.gates.lock().drain(..).collect();
        let count = gates.len();
        for gate in gates {
            let _ = gate.send(());
        }
        count
    }

    /// Settle waiting animations and let later ones settle immediately.
    pub fn open_gate(&self) {
        self.always_open.store(true, Ordering::SeqCst);
        self.release_all();
    }
}

#[async_trait]
impl<H: Sync + ?Sized> AnimationProvider<H> for GatedAnimation {
    fn name(&self) -> &'static str {
        "gated"
    }

    async fn animate(&self, _surface: &H) {
        self.started.fetch_add(1, Ordering::SeqCst);
        if self.always_open.load(Ordering::SeqCst) {
            return;
        }
        let (tx, rx) = oneshot::channel();
        self.gates.lock().push(tx);
        let _ = rx.await;
    }
}

/// Options whose entry pair waits on `enter` and exit pair on `leave`.
pub fn gated_options(
    enter: &Arc<GatedAnimation>,
    leave: &Arc<GatedAnimation>,
) -> ModalOptions<MemorySurface> {
    let enter: Arc<dyn AnimationProvider<MemorySurface>> = enter.clone();
    let leave: Arc<dyn AnimationProvider<MemorySurface>> = leave.clone();
    ModalOptions::with_animations(ModalAnimations {
        modal_enter: Arc::clone(&enter),
        modal_leave: Arc::clone(&leave),
        backdrop_enter: enter,
        backdrop_leave: leave,
    })
}

// ===== CallbackLog =====

/// Records lifecycle callbacks as `"<label>:<hook>"`.
#[derive(Clone, Default)]
pub struct CallbackLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallbackLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hook all four callbacks of `options` into this log.
    pub fn hook(
        &self,
        options: ModalOptions<MemorySurface>,
        label: &str,
    ) -> ModalOptions<MemorySurface> {
        let record = |hook: &'static str| {
            let entries = Arc::clone(&self.entries);
            let entry = format!("{label}:{hook}");
            move |_: &MemorySurface| entries.lock().push(entry.clone())
        };
        options
            .on_before_open(record("before_open"))
            .on_after_open(record("after_open"))
            .on_before_close(record("before_close"))
            .on_after_close(record("after_close"))
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }
}

// ===== Factories =====

/// Manager over a fresh in-memory tree, on the current runtime.
pub fn create_test_manager() -> (Arc<MemorySurfaceTree>, ModalManager<MemorySurfaceTree>) {
    let tree = Arc::new(MemorySurfaceTree::new());
    let manager = ModalManager::new(Arc::clone(&tree), tree.root()).unwrap();
    (tree, manager)
}

/// Let spawned phase tasks run until they block.
pub async fn settle() {
    for _ in 0..32 {
        tokio::task::yield_now().await;
    }
}
