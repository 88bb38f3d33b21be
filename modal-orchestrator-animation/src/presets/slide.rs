use std::time::Duration;

use async_trait::async_trait;

use crate::traits::{AnimatedSurface, AnimationProvider};
use crate::tween::{self, lerp};
use crate::types::Easing;

/// Vertical translation combined with a fade
///
/// Offsets are in device pixels relative to the laid-out position; negative
/// values are above it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slide {
    pub from_y: f64,
    pub to_y: f64,
    pub from_opacity: f64,
    pub to_opacity: f64,
    pub duration: Duration,
    pub easing: Easing,
}

impl Slide {
    /// Drop in from `distance` pixels above.
    pub fn slide_in(distance: f64, duration: Duration, easing: Easing) -> Self {
        Self {
            from_y: -distance,
            to_y: 0.0,
            from_opacity: 0.0,
            to_opacity: 1.0,
            duration,
            easing,
        }
    }

    /// Rise `distance` pixels and vanish.
    pub fn slide_out(distance: f64, duration: Duration, easing: Easing) -> Self {
        Self {
            from_y: 0.0,
            to_y: -distance,
            from_opacity: 1.0,
            to_opacity: 0.0,
            duration,
            easing,
        }
    }
}

#[async_trait]
impl<H> AnimationProvider<H> for Slide
where
    H: AnimatedSurface,
{
    fn name(&self) -> &'static str {
        if self.to_opacity >= self.from_opacity {
            "slideIn"
        } else {
            "slideOut"
        }
    }

    async fn animate(&self, surface: &H) {
        tween::run(self.duration, self.easing, |t| {
            surface.set_translate(0.0, lerp(self.from_y, self.to_y, t));
            surface.set_opacity(lerp(self.from_opacity, self.to_opacity, t));
        })
        .await;
    }
}
