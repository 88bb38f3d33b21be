//! Modal Orchestrator Core Library
//!
//! Lifecycle engine for stacked modal overlays:
//! - Modal Lifecycle Manager (`ModalManager`): registry, stacking order,
//!   entry/exit phases and multi-modal policy
//! - Scroll-Intent Resolver: keeps the page behind a modal from scrolling
//! - Position Synchronizer: keeps backdrops aligned with scrolled containers
//!
//! The engine is host-independent: surfaces are reached through the
//! [`SurfaceAdapter`] trait and transitions through the
//! [`AnimationProvider`] trait of `modal-orchestrator-animation`. An in-memory
//! adapter ([`MemorySurfaceTree`]) ships for headless hosts and tests.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use modal_orchestrator_core::{MemorySurfaceTree, ModalManager, ModalOptions};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tree = Arc::new(MemorySurfaceTree::new());
//!     let manager = ModalManager::new(Arc::clone(&tree), tree.root())?;
//!
//!     let receipt = manager.open(|_close| tree.create_detached(), ModalOptions::default(), None)?;
//!     receipt.opened.wait().await;
//!     receipt.close();
//!     receipt.closed.wait().await;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use adapters::{MemorySurface, MemorySurfaceTree};
pub use error::{ModalError, ModalResult};
pub use services::{CloseTrigger, ModalManager, ModalReceipt, ScrollIntentResolver};
pub use traits::{AnimatedSurface, AnimationProvider, SurfaceAdapter};
pub use types::{CloseOutcome, ModalConfig, ModalId, ModalOptions, ModalState, MultiModalBehaviour};
