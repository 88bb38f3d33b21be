use std::time::Duration;

use async_trait::async_trait;

use crate::traits::{AnimatedSurface, AnimationProvider};
use crate::tween::{self, lerp};
use crate::types::Easing;

/// Scale transition combined with a fade
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zoom {
    pub from_scale: f64,
    pub to_scale: f64,
    pub from_opacity: f64,
    pub to_opacity: f64,
    pub duration: Duration,
    pub easing: Easing,
}

impl Zoom {
    /// Grow from `scale` to natural size.
    pub fn zoom_in(scale: f64, duration: Duration, easing: Easing) -> Self {
        Self {
            from_scale: scale,
            to_scale: 1.0,
            from_opacity: 0.0,
            to_opacity: 1.0,
            duration,
            easing,
        }
    }

    /// Shrink from natural size to `scale`.
    pub fn zoom_out(scale: f64, duration: Duration, easing: Easing) -> Self {
        Self {
            from_scale: 1.0,
            to_scale: scale,
            from_opacity: 1.0,
            to_opacity: 0.0,
            duration,
            easing,
        }
    }
}

#[async_trait]
impl<H> AnimationProvider<H> for Zoom
where
    H: AnimatedSurface,
{
    fn name(&self) -> &'static str {
        if self.to_opacity >= self.from_opacity {
            "zoomIn"
        } else {
            "zoomOut"
        }
    }

    async fn animate(&self, surface: &H) {
        tween::run(self.duration, self.easing, |t| {
            surface.set_scale(lerp(self.from_scale, self.to_scale, t));
            surface.set_opacity(lerp(self.from_opacity, self.to_opacity, t));
        })
        .await;
    }
}
