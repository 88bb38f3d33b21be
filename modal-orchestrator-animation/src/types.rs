use serde::{Deserialize, Serialize};

/// Default transition length for presets that do not specify one.
pub(crate) const DEFAULT_DURATION_MS: u64 = 250;

/// Default travel distance of the slide presets, in device pixels.
pub(crate) const DEFAULT_SLIDE_DISTANCE: f64 = 40.0;

/// Default start scale of `zoomIn` and end scale of `zoomOut`.
pub(crate) const DEFAULT_ZOOM_SCALE: f64 = 0.9;

const fn default_duration_ms() -> u64 {
    DEFAULT_DURATION_MS
}

const fn default_slide_distance() -> f64 {
    DEFAULT_SLIDE_DISTANCE
}

const fn default_zoom_scale() -> f64 {
    DEFAULT_ZOOM_SCALE
}

// ============ Easing ============

/// Timing curve applied to normalized progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    Linear,
    /// Cubic ease-in.
    EaseIn,
    /// Cubic ease-out.
    #[default]
    EaseOut,
    /// Cubic ease-in-out.
    EaseInOut,
}

impl Easing {
    /// Map progress `t` in `0.0..=1.0` onto the curve.
    ///
    /// Input outside the range is clamped. Endpoints are exact: `apply(0.0) == 0.0`
    /// and `apply(1.0) == 1.0` for every curve.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t * t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
        }
    }
}

// ============ Presets ============

/// Serializable description of an animation, resolved into a provider by
/// [`create_animation`](crate::create_animation).
///
/// ```json
/// { "kind": "slideIn", "durationMs": 300, "distance": 60 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum AnimationPreset {
    /// Settle immediately.
    None,
    FadeIn {
        #[serde(default = "default_duration_ms")]
        duration_ms: u64,
        #[serde(default)]
        easing: Easing,
    },
    FadeOut {
        #[serde(default = "default_duration_ms")]
        duration_ms: u64,
        #[serde(default)]
        easing: Easing,
    },
    /// Drop in from `distance` pixels above while fading in.
    SlideIn {
        #[serde(default = "default_duration_ms")]
        duration_ms: u64,
        #[serde(default = "default_slide_distance")]
        distance: f64,
        #[serde(default)]
        easing: Easing,
    },
    /// Rise `distance` pixels while fading out.
    SlideOut {
        #[serde(default = "default_duration_ms")]
        duration_ms: u64,
        #[serde(default = "default_slide_distance")]
        distance: f64,
        #[serde(default)]
        easing: Easing,
    },
    /// Grow from `scale` to natural size while fading in.
    ZoomIn {
        #[serde(default = "default_duration_ms")]
        duration_ms: u64,
        #[serde(default = "default_zoom_scale")]
        scale: f64,
        #[serde(default)]
        easing: Easing,
    },
    /// Shrink from natural size to `scale` while fading out.
    ZoomOut {
        #[serde(default = "default_duration_ms")]
        duration_ms: u64,
        #[serde(default = "default_zoom_scale")]
        scale: f64,
        #[serde(default)]
        easing: Easing,
    },
}

impl AnimationPreset {
    /// Identifier as written in configuration.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::FadeIn { .. } => "fadeIn",
            Self::FadeOut { .. } => "fadeOut",
            Self::SlideIn { .. } => "slideIn",
            Self::SlideOut { .. } => "slideOut",
            Self::ZoomIn { .. } => "zoomIn",
            Self::ZoomOut { .. } => "zoomOut",
        }
    }

    #[must_use]
    pub fn fade_in() -> Self {
        Self::FadeIn {
            duration_ms: DEFAULT_DURATION_MS,
            easing: Easing::default(),
        }
    }

    #[must_use]
    pub fn fade_out() -> Self {
        Self::FadeOut {
            duration_ms: DEFAULT_DURATION_MS,
            easing: Easing::EaseIn,
        }
    }

    #[must_use]
    pub fn zoom_in() -> Self {
        Self::ZoomIn {
            duration_ms: DEFAULT_DURATION_MS,
            scale: DEFAULT_ZOOM_SCALE,
            easing: Easing::default(),
        }
    }

    #[must_use]
    pub fn zoom_out() -> Self {
        Self::ZoomOut {
            duration_ms: DEFAULT_DURATION_MS,
            scale: DEFAULT_ZOOM_SCALE,
            easing: Easing::EaseIn,
        }
    }
}
