use std::time::Duration;

use async_trait::async_trait;

use crate::traits::{AnimatedSurface, AnimationProvider};
use crate::tween::{self, lerp};
use crate::types::Easing;

/// Opacity transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    pub from: f64,
    pub to: f64,
    pub duration: Duration,
    pub easing: Easing,
}

impl Fade {
    pub fn fade_in(duration: Duration, easing: Easing) -> Self {
        Self {
            from: 0.0,
            to: 1.0,
            duration,
            easing,
        }
    }

    pub fn fade_out(duration: Duration, easing: Easing) -> Self {
        Self {
            from: 1.0,
            to: 0.0,
            duration,
            easing,
        }
    }
}

#[async_trait]
impl<H> AnimationProvider<H> for Fade
where
    H: AnimatedSurface,
{
    fn name(&self) -> &'static str {
        if self.to >= self.from {
            "fadeIn"
        } else {
            "fadeOut"
        }
    }

    async fn animate(&self, surface: &H) {
        tween::run(self.duration, self.easing, |t| {
            surface.set_opacity(lerp(self.from, self.to, t));
        })
        .await;
    }
}
