//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use modal_orchestrator_animation::AnimationError;

use crate::types::ModalId;

/// Core layer error type
///
/// Only configuration, manager construction and `open` return errors. Closing never fails: its
/// outcome is reported through [`CloseOutcome`](crate::types::CloseOutcome).
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum ModalError {
    /// The content handle returned by the factory is still mounted in another
    /// registered modal.
    #[error("Content is already mounted in modal {0}")]
    ContentAlreadyMounted(ModalId),

    /// Configuration could not be parsed or holds an out-of-range value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The manager was built outside a Tokio runtime.
    #[error("No Tokio runtime available to drive modal phases")]
    RuntimeUnavailable,

    /// An animation preset could not be built (converting from library)
    #[error("{0}")]
    Animation(#[from] AnimationError),
}

impl ModalError {
    /// Whether the error is an expected caller mistake, used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ContentAlreadyMounted(_)
            | Self::InvalidConfig(_)
            | Self::Animation(AnimationError::InvalidParameter { .. }) => true,
            Self::RuntimeUnavailable
            | Self::Animation(AnimationError::PresetDisabled { .. }) => false,
        }
    }
}

/// Core layer Result type alias
pub type ModalResult<T> = std::result::Result<T, ModalError>;
