//! Shared scenario helpers

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use modal_orchestrator_core::traits::BackdropSurfaces;
use modal_orchestrator_core::types::ModalAnimations;
use modal_orchestrator_core::{
    AnimationProvider, MemorySurface, MemorySurfaceTree, ModalManager, ModalOptions,
    SurfaceAdapter,
};
use parking_lot::Mutex;

/// Ordered record of animation and callback events.
#[derive(Clone, Default)]
pub struct EventLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl EventLog {
    pub fn push(&self, entry: impl Into<String>) {
        self.entries.lock().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    /// Position of the first entry equal to `entry`.
    pub fn first(&self, entry: &str) -> Option<usize> {
        self.entries.lock().iter().position(|e| e == entry)
    }

    /// Position of the last entry equal to `entry`.
    pub fn last(&self, entry: &str) -> Option<usize> {
        self.entries.lock().iter().rposition(|e| e == entry)
    }

    pub fn count(&self, entry: &str) -> usize {
        self.entries.lock().iter().filter(|e| *e == entry).count()
    }
}

/// Animation that sleeps for a fixed time and logs start and end.
pub struct DelayAnimation {
    label: String,
    delay: Duration,
    log: EventLog,
}

#[async_trait]
impl<H: Sync + ?Sized> AnimationProvider<H> for DelayAnimation {
    fn name(&self) -> &'static str {
        "delay"
    }

    async fn animate(&self, _surface: &H) {
        self.log.push(format!("{}:start", self.label));
        tokio::time::sleep(self.delay).await;
        self.log.push(format!("{}:end", self.label));
    }
}

fn delay(label: String, millis: u64, log: &EventLog) -> Arc<dyn AnimationProvider<MemorySurface>> {
    Arc::new(DelayAnimation {
        label,
        delay: Duration::from_millis(millis),
        log: log.clone(),
    })
}

/// Options whose animations sleep for `enter_ms` / `leave_ms` and whose
/// animations and callbacks log under `name`.
pub fn timed_options(
    name: &str,
    enter_ms: u64,
    leave_ms: u64,
    log: &EventLog,
) -> ModalOptions<MemorySurface> {
    let animations = ModalAnimations {
        modal_enter: delay(format!("{name}:enter"), enter_ms, log),
        modal_leave: delay(format!("{name}:leave"), leave_ms, log),
        backdrop_enter: delay(format!("{name}:enter"), enter_ms, log),
        backdrop_leave: delay(format!("{name}:leave"), leave_ms, log),
    };

    let hook = |event: &str| {
        let log = log.clone();
        let entry = format!("{name}:{event}");
        move |_: &MemorySurface| log.push(entry.clone())
    };
    ModalOptions::with_animations(animations)
        .on_before_open(hook("before_open"))
        .on_after_open(hook("after_open"))
        .on_before_close(hook("before_close"))
        .on_after_close(hook("after_close"))
}

pub fn manager() -> (Arc<MemorySurfaceTree>, ModalManager<MemorySurfaceTree>) {
    let tree = Arc::new(MemorySurfaceTree::new());
    let manager = ModalManager::new(Arc::clone(&tree), tree.root()).unwrap();
    (tree, manager)
}

/// Surfaces the engine built around mounted `content`.
pub struct Layers {
    pub wrapper: MemorySurface,
    pub backdrop: BackdropSurfaces<MemorySurface>,
}

pub fn layers(tree: &MemorySurfaceTree, content: &MemorySurface) -> Layers {
    let wrapper = tree.parent(content).unwrap();
    let content_root = tree.parent(&wrapper).unwrap();
    let backdrop = tree.parent(&content_root).unwrap();
    Layers {
        wrapper,
        backdrop: BackdropSurfaces {
            backdrop,
            content_root,
        },
    }
}

/// Let spawned phase tasks run until they block.
pub async fn settle() {
    for _ in 0..32 {
        tokio::task::yield_now().await;
    }
}
