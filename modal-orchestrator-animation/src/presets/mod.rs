//! Built-in animation presets

mod instant;

#[cfg(feature = "fade")]
mod fade;
#[cfg(feature = "slide")]
mod slide;
#[cfg(feature = "zoom")]
mod zoom;

pub use instant::Instant;

#[cfg(feature = "fade")]
pub use fade::Fade;
#[cfg(feature = "slide")]
pub use slide::Slide;
#[cfg(feature = "zoom")]
pub use zoom::Zoom;
