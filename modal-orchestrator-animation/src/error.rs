use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for building animation providers.
///
/// Running an animation never fails; only turning a preset descriptor into a
/// provider can.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum AnimationError {
    /// The preset exists but its feature flag was not enabled at compile time.
    #[error("Animation preset '{preset}' is not enabled in this build")]
    PresetDisabled {
        /// Preset identifier as written in configuration.
        preset: String,
    },

    /// A preset parameter is out of range (negative distance, non-positive scale, ...).
    #[error("Invalid parameter for animation preset '{preset}': {detail}")]
    InvalidParameter {
        /// Preset identifier as written in configuration.
        preset: String,
        /// What is wrong with the parameter.
        detail: String,
    },
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, AnimationError>;
