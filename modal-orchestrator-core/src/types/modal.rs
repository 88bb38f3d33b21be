//! Modal state and policy types

use serde::{Deserialize, Serialize};

use super::ModalId;

/// Lifecycle state of a modal record.
///
/// Transitions only move forward: `Opening → Open → Closing → Disposed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModalState {
    /// Entry animations are running.
    Opening,
    /// Fully interactive.
    Open,
    /// Exit animations are running.
    Closing,
    /// Surfaces released, record gone from the registry.
    Disposed,
}

impl ModalState {
    /// Whether a close request can still start an exit sequence.
    #[must_use]
    pub const fn accepts_close(self) -> bool {
        matches!(self, Self::Opening | Self::Open)
    }
}

/// How opening a modal treats modals that are already registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MultiModalBehaviour {
    /// Stack above existing modals.
    #[default]
    OnTop,
    /// Close every registered modal, in any container.
    Exclusive,
    /// Close the modals registered in the target container only.
    ExclusiveInContainer,
}

/// How background scrolling is blocked for touch input.
///
/// Host engines disagree on which approach works: some honour cancelling
/// `touchmove`, others only stop scrolling when the container itself is
/// locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TouchBlockStrategy {
    /// Intercept touch moves and run the chain walk on each one.
    #[default]
    ChainWalk,
    /// Lock the container's scrolling while the modal is registered.
    LockContainer,
}

/// Result of a close request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CloseOutcome {
    /// The exit sequence started.
    Started,
    /// The modal is still opening; the close runs once entry settles.
    Queued,
    /// An exit sequence is already running.
    AlreadyClosing,
    /// No registered modal has this id.
    Unknown,
}

/// Read-only view of a registered modal.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalSnapshot<H> {
    pub id: ModalId,
    pub container: H,
    pub z_index: u32,
    pub state: ModalState,
    pub close_queued: bool,
}
