//! Scripted scenarios

use std::sync::Arc;

use modal_orchestrator_core::types::{
    EventDisposition, InputEvent, Key, ModalSnapshot, Point, ScrollDirection,
};
use modal_orchestrator_core::{
    MemorySurface, MemorySurfaceTree, ModalConfig, ModalId, ModalManager, ModalOptions,
    ModalReceipt, ModalState, MultiModalBehaviour,
};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::info;

type Receipt = ModalReceipt<MemorySurfaceTree>;

/// Outcome of one scenario, printed as JSON.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioReport {
    pub scenario: &'static str,
    /// Callbacks, close outcomes and input decisions, in order.
    pub events: Vec<String>,
    /// Registry contents at the scenario's checkpoint.
    pub modals: Vec<ModalSummary>,
    /// Modals still registered when the scenario ended.
    pub remaining: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalSummary {
    pub id: ModalId,
    pub container: u64,
    pub z_index: u32,
    pub state: ModalState,
    pub close_queued: bool,
}

impl From<ModalSnapshot<MemorySurface>> for ModalSummary {
    fn from(snapshot: ModalSnapshot<MemorySurface>) -> Self {
        Self {
            id: snapshot.id,
            container: snapshot.container.id(),
            z_index: snapshot.z_index,
            state: snapshot.state,
            close_queued: snapshot.close_queued,
        }
    }
}

struct Playground {
    tree: Arc<MemorySurfaceTree>,
    manager: ModalManager<MemorySurfaceTree>,
    config: ModalConfig,
    events: Arc<Mutex<Vec<String>>>,
    checkpoint: Vec<ModalSummary>,
}

impl Playground {
    fn new(config: ModalConfig) -> anyhow::Result<Self> {
        let tree = Arc::new(MemorySurfaceTree::new());
        let manager = ModalManager::new(Arc::clone(&tree), tree.root())?;
        Ok(Self {
            tree,
            manager,
            config,
            events: Arc::new(Mutex::new(Vec::new())),
            checkpoint: Vec::new(),
        })
    }

    fn record(&self, event: String) {
        info!("{event}");
        self.events.lock().push(event);
    }

    /// Configured options whose callbacks report under `label`.
    fn options(&self, label: &str) -> anyhow::Result<ModalOptions<MemorySurface>> {
        let hook = |name: &'static str| {
            let events = Arc::clone(&self.events);
            let entry = format!("{label}: {name}");
            move |_: &MemorySurface| {
                info!("{entry}");
                events.lock().push(entry.clone());
            }
        };
        Ok(ModalOptions::from_config(&self.config)?
            .on_before_open(hook("before_open"))
            .on_after_open(hook("after_open"))
            .on_before_close(hook("before_close"))
            .on_after_close(hook("after_close")))
    }

    fn open(
        &self,
        content: MemorySurface,
        options: ModalOptions<MemorySurface>,
        container: Option<MemorySurface>,
    ) -> anyhow::Result<Receipt> {
        let receipt = self.manager.open(|_| content, options, container)?;
        Ok(receipt)
    }

    fn checkpoint(&mut self) {
        self.checkpoint = self
            .manager
            .snapshot()
            .into_iter()
            .map(ModalSummary::from)
            .collect();
    }

    fn finish(self, scenario: &'static str) -> ScenarioReport {
        let events = self.events.lock().clone();
        ScenarioReport {
            scenario,
            events,
            modals: self.checkpoint,
            remaining: self.manager.len(),
        }
    }
}

async fn wait_closed(receipts: &[Receipt]) {
    for receipt in receipts {
        receipt.closed.wait().await;
    }
}

pub async fn stack(config: ModalConfig, count: usize) -> anyhow::Result<ScenarioReport> {
    let mut playground = Playground::new(config)?;

    let mut receipts = Vec::with_capacity(count);
    for i in 0..count {
        let options = playground.options(&format!("modal {i}"))?;
        let content = playground.tree.create_detached();
        receipts.push(playground.open(content, options, None)?);
    }
    for receipt in &receipts {
        receipt.opened.wait().await;
    }
    playground.checkpoint();

    let requested = playground.manager.close_all();
    playground.record(format!("close_all requested {requested} closes"));
    wait_closed(&receipts).await;

    Ok(playground.finish("stack"))
}

pub async fn exclusive(config: ModalConfig, in_container: bool) -> anyhow::Result<ScenarioReport> {
    let mut playground = Playground::new(config)?;
    let side = playground.tree.create_element(&playground.tree.root());

    let root_modal = playground.open(
        playground.tree.create_detached(),
        playground.options("root modal")?,
        None,
    )?;
    let side_modal = playground.open(
        playground.tree.create_detached(),
        playground.options("side modal")?,
        Some(side),
    )?;
    root_modal.opened.wait().await;
    side_modal.opened.wait().await;

    let behaviour = if in_container {
        MultiModalBehaviour::ExclusiveInContainer
    } else {
        MultiModalBehaviour::Exclusive
    };
    let exclusive = playground.open(
        playground.tree.create_detached(),
        playground.options("exclusive modal")?.behaviour(behaviour),
        None,
    )?;
    root_modal.closed.wait().await;
    if !in_container {
        side_modal.closed.wait().await;
    }
    exclusive.opened.wait().await;
    playground.checkpoint();

    playground.manager.close_all();
    wait_closed(&[root_modal, side_modal, exclusive]).await;
    Ok(playground.finish("exclusive"))
}

pub async fn queued_close(config: ModalConfig) -> anyhow::Result<ScenarioReport> {
    let mut playground = Playground::new(config)?;

    let receipt = playground.open(
        playground.tree.create_detached(),
        playground.options("modal")?,
        None,
    )?;
    let outcome = receipt.close();
    playground.record(format!("close while opening: {outcome:?}"));
    playground.checkpoint();

    receipt.opened.wait().await;
    receipt.closed.wait().await;
    Ok(playground.finish("queued-close"))
}

pub async fn scroll(config: ModalConfig) -> anyhow::Result<ScenarioReport> {
    let mut playground = Playground::new(config)?;
    let tree = Arc::clone(&playground.tree);

    let content = tree.create_detached();
    let list = tree.create_element(&content);
    tree.set_scroll_range(&list, Point::new(0.0, 600.0));

    let receipt = playground.open(content.clone(), playground.options("modal")?, None)?;
    receipt.opened.wait().await;
    playground.checkpoint();

    let report = |name: &str, disposition: EventDisposition| {
        playground.record(format!("{name}: {disposition:?}"));
    };
    let wheel = |direction: ScrollDirection| {
        let delta = match direction {
            ScrollDirection::Down => 40.0,
            _ => -40.0,
        };
        InputEvent::Wheel {
            target: list.clone(),
            delta_x: 0.0,
            delta_y: delta,
        }
    };

    report("wheel down at top", tree.dispatch(&wheel(ScrollDirection::Down)));
    report("wheel up at top", tree.dispatch(&wheel(ScrollDirection::Up)));
    tree.scroll_to(&list, Point::new(0.0, 600.0));
    report("wheel down at bottom", tree.dispatch(&wheel(ScrollDirection::Down)));

    tree.dispatch(&InputEvent::TouchStart {
        target: list.clone(),
        point: Point::new(100.0, 100.0),
    });
    report(
        "drag down",
        tree.dispatch(&InputEvent::TouchMove {
            target: list.clone(),
            point: Point::new(100.0, 140.0),
        }),
    );
    report(
        "drag sideways",
        tree.dispatch(&InputEvent::TouchMove {
            target: list.clone(),
            point: Point::new(40.0, 141.0),
        }),
    );
    report(
        "space on content",
        tree.dispatch(&InputEvent::KeyDown {
            target: list.clone(),
            key: Key::Space,
        }),
    );

    receipt.close();
    receipt.closed.wait().await;
    Ok(playground.finish("scroll"))
}
