//! Animation factory functions.

use std::sync::Arc;

use crate::error::{AnimationError, Result};
use crate::presets::Instant;
use crate::traits::{AnimatedSurface, AnimationProvider};
use crate::types::AnimationPreset;

#[cfg(any(feature = "fade", feature = "slide", feature = "zoom"))]
use std::time::Duration;

#[cfg(feature = "fade")]
use crate::presets::Fade;
#[cfg(feature = "slide")]
use crate::presets::Slide;
#[cfg(feature = "zoom")]
use crate::presets::Zoom;

/// Creates an [`AnimationProvider`] from a preset descriptor.
///
/// The returned provider is wrapped in `Arc<dyn AnimationProvider<H>>` so a
/// single instance can be shared by every modal that uses the same options.
///
/// # Errors
///
/// - [`AnimationError::PresetDisabled`] when the preset's feature flag is off.
/// - [`AnimationError::InvalidParameter`] for a negative or non-finite slide
///   distance, or a non-positive or non-finite zoom scale.
///
/// # Examples
///
/// ```rust,no_run
/// # use modal_orchestrator_animation::{create_animation, AnimatedSurface, AnimationPreset};
/// # struct Panel;
/// # impl AnimatedSurface for Panel {
/// #     fn set_opacity(&self, _: f64) {}
/// #     fn set_translate(&self, _: f64, _: f64) {}
/// #     fn set_scale(&self, _: f64) {}
/// # }
/// let enter = create_animation::<Panel>(&AnimationPreset::fade_in()).unwrap();
/// assert_eq!(enter.name(), "fadeIn");
/// ```
pub fn create_animation<H>(preset: &AnimationPreset) -> Result<Arc<dyn AnimationProvider<H>>>
where
    H: AnimatedSurface + 'static,
{
    validate(preset)?;

    match *preset {
        AnimationPreset::None => Ok(Arc::new(Instant)),
        #[cfg(feature = "fade")]
        AnimationPreset::FadeIn {
            duration_ms,
            easing,
        } => Ok(Arc::new(Fade::fade_in(
            Duration::from_millis(duration_ms),
            easing,
        ))),
        #[cfg(feature = "fade")]
        AnimationPreset::FadeOut {
            duration_ms,
            easing,
        } => Ok(Arc::new(Fade::fade_out(
            Duration::from_millis(duration_ms),
            easing,
        ))),
        #[cfg(feature = "slide")]
        AnimationPreset::SlideIn {
            duration_ms,
            distance,
            easing,
        } => Ok(Arc::new(Slide::slide_in(
            distance,
            Duration::from_millis(duration_ms),
            easing,
        ))),
        #[cfg(feature = "slide")]
        AnimationPreset::SlideOut {
            duration_ms,
            distance,
            easing,
        } => Ok(Arc::new(Slide::slide_out(
            distance,
            Duration::from_millis(duration_ms),
            easing,
        ))),
        #[cfg(feature = "zoom")]
        AnimationPreset::ZoomIn {
            duration_ms,
            scale,
            easing,
        } => Ok(Arc::new(Zoom::zoom_in(
            scale,
            Duration::from_millis(duration_ms),
            easing,
        ))),
        #[cfg(feature = "zoom")]
        AnimationPreset::ZoomOut {
            duration_ms,
            scale,
            easing,
        } => Ok(Arc::new(Zoom::zoom_out(
            scale,
            Duration::from_millis(duration_ms),
            easing,
        ))),
        #[allow(unreachable_patterns)]
        _ => {
            log::warn!("Animation preset '{}' requested but not compiled in", preset.name());
            Err(AnimationError::PresetDisabled {
                preset: preset.name().to_string(),
            })
        }
    }
}

/// Returns the identifiers of every preset enabled via feature flags.
pub fn enabled_presets() -> Vec<&'static str> {
    vec![
        "none",
        #[cfg(feature = "fade")]
        "fadeIn",
        #[cfg(feature = "fade")]
        "fadeOut",
        #[cfg(feature = "slide")]
        "slideIn",
        #[cfg(feature = "slide")]
        "slideOut",
        #[cfg(feature = "zoom")]
        "zoomIn",
        #[cfg(feature = "zoom")]
        "zoomOut",
    ]
}

fn validate(preset: &AnimationPreset) -> Result<()> {
    let invalid = |detail: String| AnimationError::InvalidParameter {
        preset: preset.name().to_string(),
        detail,
    };

    match *preset {
        AnimationPreset::SlideIn { distance, .. } | AnimationPreset::SlideOut { distance, .. }
            if !distance.is_finite() || distance < 0.0 =>
        {
            Err(invalid(format!(
                "distance must be a finite non-negative number, got {distance}"
            )))
        }
        AnimationPreset::ZoomIn { scale, .. } | AnimationPreset::ZoomOut { scale, .. }
            if !scale.is_finite() || scale <= 0.0 =>
        {
            Err(invalid(format!(
                "scale must be a finite positive number, got {scale}"
            )))
        }
        _ => Ok(()),
    }
}
