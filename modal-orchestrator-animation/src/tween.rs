//! Frame-stepped interpolation shared by the presets.

use std::time::Duration;

use tokio::time::{self, Instant, MissedTickBehavior};

use crate::types::Easing;

/// Frame interval, roughly 60 frames per second.
pub(crate) const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Linear interpolation between `from` and `to`. `t >= 1.0` yields `to` exactly.
pub(crate) fn lerp(from: f64, to: f64, t: f64) -> f64 {
    if t >= 1.0 {
        return to;
    }
    from + (to - from) * t
}

/// Drive `apply` with eased progress from `0.0` to `1.0` over `duration`.
///
/// The first frame is applied immediately and the final frame always sees
/// exactly `1.0`, so presets end on their target values even when frames are
/// skipped.
pub(crate) async fn run(duration: Duration, easing: Easing, mut apply: impl FnMut(f64) + Send) {
    if duration.is_zero() {
        apply(1.0);
        return;
    }

    let start = Instant::now();
    let mut ticker = time::interval(FRAME_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        let progress = (start.elapsed().as_secs_f64() / duration.as_secs_f64()).min(1.0);
        apply(easing.apply(progress));
        if progress >= 1.0 {
            break;
        }
    }
}
