//! # modal-orchestrator-animation
//!
//! Animation provider abstraction for modal overlays.
//!
//! An animation provider transitions one surface (a modal wrapper or its
//! backdrop) and resolves once the transition has finished. The modal
//! lifecycle only ever waits for completion; what a provider does to the
//! surface in the meantime is up to the provider.
//!
//! ## Built-in Presets
//!
//! | Preset | Feature Flag | Effect |
//! |--------|-------------|--------|
//! | [`Instant`] | *(always)* | Settles immediately, touches nothing |
//! | [`Fade`] | `fade` | Opacity transition |
//! | [`Slide`] | `slide` | Vertical translation combined with a fade |
//! | [`Zoom`] | `zoom` | Scale transition combined with a fade |
//!
//! ## Feature Flags
//!
//! - **`all-presets`** *(default)*: Enable every preset listed above.
//! - **`fade`**, **`slide`**, **`zoom`**: Enable a single preset.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use modal_orchestrator_animation::{create_animation, AnimatedSurface, AnimationPreset};
//!
//! struct Panel;
//!
//! impl AnimatedSurface for Panel {
//!     fn set_opacity(&self, _opacity: f64) {}
//!     fn set_translate(&self, _x: f64, _y: f64) {}
//!     fn set_scale(&self, _scale: f64) {}
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let preset: AnimationPreset = serde_json::from_str(r#"{"kind":"fadeIn","durationMs":150}"#)?;
//!     let animation = create_animation::<Panel>(&preset)?;
//!     animation.animate(&Panel).await;
//!     Ok(())
//! }
//! ```
//!
//! ## Contract
//!
//! [`AnimationProvider::animate`] must always settle. There is no timeout on
//! the consuming side: a provider that never resolves leaves its modal stuck
//! in a transitional state.

mod error;
mod factory;
mod presets;
mod traits;
mod tween;
mod types;

// Re-export error types
pub use error::{AnimationError, Result};

// Re-export factory functions
pub use factory::{create_animation, enabled_presets};

// Re-export core traits
pub use traits::{AnimatedSurface, AnimationProvider};

// Re-export types
pub use types::{AnimationPreset, Easing};

// Re-export concrete presets
pub use presets::Instant;

#[cfg(feature = "fade")]
pub use presets::Fade;

#[cfg(feature = "slide")]
pub use presets::Slide;

#[cfg(feature = "zoom")]
pub use presets::Zoom;
