//! Scroll intent resolution
//!
//! Decides, per raw input event, whether the page behind a modal would scroll
//! and must therefore have the event's default action suppressed.

use std::sync::Arc;

use log::trace;
use parking_lot::Mutex;

use crate::traits::{BackdropSurfaces, SurfaceAdapter};
use crate::types::{Axis, EventDisposition, InputEvent, Point, ScrollDirection, ScrollMetrics};

/// Scratch state of the touch gesture in progress.
#[derive(Debug, Default)]
struct GestureState {
    last: Option<Point>,
    locked_axis: Option<Axis>,
}

/// Scroll intent resolver, one per modal record.
///
/// Bound to the record's backdrop: the chain walk stops there, and keys
/// focused on the backdrop itself are suppressed outright.
pub struct ScrollIntentResolver<S: SurfaceAdapter> {
    adapter: Arc<S>,
    backdrop: BackdropSurfaces<S::Surface>,
    margin: f64,
    gesture: Mutex<GestureState>,
}

impl<S: SurfaceAdapter> ScrollIntentResolver<S> {
    pub fn new(adapter: Arc<S>, backdrop: BackdropSurfaces<S::Surface>, margin: f64) -> Self {
        Self {
            adapter,
            backdrop,
            margin,
            gesture: Mutex::new(GestureState::default()),
        }
    }

    /// Decide what to do with `event`.
    ///
    /// Categories other than wheel, touch and key input always pass.
    pub fn resolve(&self, event: &InputEvent<S::Surface>) -> EventDisposition {
        match event {
            InputEvent::Wheel {
                target,
                delta_x,
                delta_y,
            } => match wheel_direction(*delta_x, *delta_y) {
                Some(direction) => self.walk(target, direction),
                None => EventDisposition::Pass,
            },
            InputEvent::TouchStart { point, .. } => {
                *self.gesture.lock() = GestureState {
                    last: Some(*point),
                    locked_axis: None,
                };
                EventDisposition::Pass
            }
            InputEvent::TouchMove { target, point } => {
                let direction = {
                    let mut gesture = self.gesture.lock();
                    let Some(last) = gesture.last.replace(*point) else {
                        return EventDisposition::Pass;
                    };
                    let Some(direction) = touch_direction(last, *point) else {
                        return EventDisposition::Pass;
                    };
                    match gesture.locked_axis {
                        None => gesture.locked_axis = Some(direction.axis()),
                        Some(axis) if axis != direction.axis() => {
                            trace!("Suppressing cross-axis touch move ({direction:?}, locked to {axis:?})");
                            return EventDisposition::Suppress;
                        }
                        Some(_) => {}
                    }
                    direction
                };
                self.walk(target, direction)
            }
            InputEvent::KeyDown { target, key } => {
                if key.is_scroll_key() && self.backdrop.is_layer(target) {
                    trace!("Suppressing {key:?} focused on the backdrop");
                    EventDisposition::Suppress
                } else {
                    EventDisposition::Pass
                }
            }
            InputEvent::Scroll { .. } | InputEvent::Resize { .. } | InputEvent::Click { .. } => {
                EventDisposition::Pass
            }
        }
    }

    /// Walk from `target` up to the backdrop looking for a surface that can
    /// still scroll in `direction`.
    fn walk(&self, target: &S::Surface, direction: ScrollDirection) -> EventDisposition {
        let axis = direction.axis();
        let mut current = Some(target.clone());

        while let Some(surface) = current {
            let metrics = self.adapter.scroll_metrics(&surface, axis);
            if can_scroll(metrics, direction, self.margin) {
                return EventDisposition::Pass;
            }
            if surface == self.backdrop.backdrop {
                trace!("Suppressing {direction:?}: no surface up to the backdrop can scroll");
                return EventDisposition::Suppress;
            }
            if self.adapter.is_root(&surface) {
                break;
            }
            current = self.adapter.parent(&surface);
        }

        // The target is not inside this backdrop
        EventDisposition::Pass
    }
}

/// Whether a surface with `metrics` can still move in `direction`.
///
/// Offsets within `margin` of a boundary count as being at the boundary.
#[must_use]
pub fn can_scroll(metrics: ScrollMetrics, direction: ScrollDirection, margin: f64) -> bool {
    if metrics.max_offset <= 0.0 {
        return false;
    }
    if direction.is_toward_start() {
        metrics.offset > margin
    } else {
        metrics.offset < metrics.max_offset - margin
    }
}

/// Direction a wheel delta scrolls.
///
/// The larger magnitude wins; equal magnitudes go to the vertical axis. A
/// zero delta has no direction.
#[must_use]
pub fn wheel_direction(delta_x: f64, delta_y: f64) -> Option<ScrollDirection> {
    if !delta_x.is_finite() || !delta_y.is_finite() || (delta_x == 0.0 && delta_y == 0.0) {
        return None;
    }
    let direction = if delta_y.abs() >= delta_x.abs() {
        if delta_y > 0.0 {
            ScrollDirection::Down
        } else {
            ScrollDirection::Up
        }
    } else if delta_x > 0.0 {
        ScrollDirection::Right
    } else {
        ScrollDirection::Left
    };
    Some(direction)
}

/// Direction a finger moving from `last` to `current` scrolls.
///
/// Content follows the finger, so a finger moving down scrolls toward the
/// start (`Up`).
#[must_use]
pub fn touch_direction(last: Point, current: Point) -> Option<ScrollDirection> {
    wheel_direction(last.x - current.x, last.y - current.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MemorySurface, MemorySurfaceTree};
    use crate::types::{Key, ModalStyle, DEFAULT_SCROLL_SAFETY_MARGIN};

    struct Fixture {
        tree: Arc<MemorySurfaceTree>,
        resolver: ScrollIntentResolver<MemorySurfaceTree>,
        backdrop: BackdropSurfaces<MemorySurface>,
        /// Scrollable pane inside the content
        pane: MemorySurface,
        /// Leaf inside the pane
        leaf: MemorySurface,
    }

    fn fixture() -> Fixture {
        let tree = Arc::new(MemorySurfaceTree::new());
        let root = tree.root();
        let backdrop = tree.create_backdrop(&root, 1, &ModalStyle::default());
        tree.append(&root, &backdrop.backdrop);
        let wrapper = tree.create_wrapper(&ModalStyle::default());
        tree.append(&backdrop.content_root, &wrapper);
        let pane = tree.create_element(&wrapper);
        let leaf = tree.create_element(&pane);
        let resolver =
            ScrollIntentResolver::new(Arc::clone(&tree), backdrop.clone(), DEFAULT_SCROLL_SAFETY_MARGIN);
        Fixture {
            tree,
            resolver,
            backdrop,
            pane,
            leaf,
        }
    }

    fn wheel(target: &MemorySurface, delta_y: f64) -> InputEvent<MemorySurface> {
        InputEvent::Wheel {
            target: target.clone(),
            delta_x: 0.0,
            delta_y,
        }
    }

    #[test]
    fn boundary_margin_is_exclusive() {
        let margin = DEFAULT_SCROLL_SAFETY_MARGIN;
        assert!(!can_scroll(ScrollMetrics::new(5.0, 100.0), ScrollDirection::Up, margin));
        assert!(can_scroll(ScrollMetrics::new(5.5, 100.0), ScrollDirection::Up, margin));
        assert!(!can_scroll(ScrollMetrics::new(95.0, 100.0), ScrollDirection::Down, margin));
        assert!(can_scroll(ScrollMetrics::new(94.0, 100.0), ScrollDirection::Down, margin));
        assert!(!can_scroll(ScrollMetrics::new(0.0, 0.0), ScrollDirection::Down, margin));
    }

    #[test]
    fn wheel_picks_dominant_axis() {
        assert_eq!(wheel_direction(0.0, 10.0), Some(ScrollDirection::Down));
        assert_eq!(wheel_direction(0.0, -3.0), Some(ScrollDirection::Up));
        assert_eq!(wheel_direction(-8.0, 2.0), Some(ScrollDirection::Left));
        assert_eq!(wheel_direction(4.0, -4.0), Some(ScrollDirection::Up));
        assert_eq!(wheel_direction(0.0, 0.0), None);
    }

    #[test]
    fn finger_moving_down_scrolls_up() {
        assert_eq!(
            touch_direction(Point::new(10.0, 10.0), Point::new(10.0, 40.0)),
            Some(ScrollDirection::Up)
        );
        assert_eq!(
            touch_direction(Point::new(50.0, 10.0), Point::new(20.0, 12.0)),
            Some(ScrollDirection::Right)
        );
        assert_eq!(touch_direction(Point::new(1.0, 1.0), Point::new(1.0, 1.0)), None);
    }

    #[test]
    fn no_range_anywhere_suppresses() {
        let f = fixture();
        assert_eq!(f.resolver.resolve(&wheel(&f.leaf, 10.0)), EventDisposition::Suppress);
    }

    #[test]
    fn outermost_range_allows() {
        let f = fixture();
        f.tree.set_scroll_range(&f.backdrop.backdrop, Point::new(0.0, 500.0));
        assert_eq!(f.resolver.resolve(&wheel(&f.leaf, 10.0)), EventDisposition::Pass);
    }

    #[test]
    fn pane_at_top_blocks_upward_but_allows_downward() {
        let f = fixture();
        f.tree.set_scroll_range(&f.pane, Point::new(0.0, 300.0));
        assert_eq!(f.resolver.resolve(&wheel(&f.leaf, -10.0)), EventDisposition::Suppress);
        assert_eq!(f.resolver.resolve(&wheel(&f.leaf, 10.0)), EventDisposition::Pass);

        f.tree.scroll_to(&f.pane, Point::new(0.0, 300.0));
        assert_eq!(f.resolver.resolve(&wheel(&f.leaf, 10.0)), EventDisposition::Suppress);
    }

    #[test]
    fn zero_delta_passes() {
        let f = fixture();
        assert_eq!(f.resolver.resolve(&wheel(&f.leaf, 0.0)), EventDisposition::Pass);
    }

    #[test]
    fn target_outside_backdrop_passes() {
        let f = fixture();
        let outside = f.tree.create_element(&f.tree.root());
        assert_eq!(f.resolver.resolve(&wheel(&outside, 10.0)), EventDisposition::Pass);
    }

    #[test]
    fn touch_axis_locks_on_first_move() {
        let f = fixture();
        f.tree.set_scroll_range(&f.pane, Point::new(0.0, 300.0));
        f.tree.scroll_to(&f.pane, Point::new(0.0, 100.0));
        let target = f.leaf.clone();
        let touch = |x: f64, y: f64| InputEvent::TouchMove {
            target: target.clone(),
            point: Point::new(x, y),
        };

        f.resolver.resolve(&InputEvent::TouchStart {
            target: f.leaf.clone(),
            point: Point::new(100.0, 100.0),
        });
        // Vertical drag, pane can scroll both ways
        assert_eq!(f.resolver.resolve(&touch(100.0, 80.0)), EventDisposition::Pass);
        // Sideways drag in the same gesture
        assert_eq!(f.resolver.resolve(&touch(60.0, 81.0)), EventDisposition::Suppress);

        // A new gesture may pick the other axis; nothing scrolls sideways
        f.resolver.resolve(&InputEvent::TouchStart {
            target: f.leaf.clone(),
            point: Point::new(100.0, 100.0),
        });
        assert_eq!(f.resolver.resolve(&touch(60.0, 101.0)), EventDisposition::Suppress);
        assert_eq!(f.resolver.resolve(&touch(60.0, 120.0)), EventDisposition::Suppress);
    }

    #[test]
    fn scroll_keys_on_backdrop_are_suppressed() {
        let f = fixture();
        f.tree.set_scroll_range(&f.backdrop.backdrop, Point::new(0.0, 500.0));
        let key = |target: &MemorySurface, key: Key| InputEvent::KeyDown {
            target: target.clone(),
            key,
        };

        assert_eq!(
            f.resolver.resolve(&key(&f.backdrop.backdrop, Key::PageDown)),
            EventDisposition::Suppress
        );
        assert_eq!(
            f.resolver.resolve(&key(&f.backdrop.content_root, Key::Space)),
            EventDisposition::Suppress
        );
        assert_eq!(f.resolver.resolve(&key(&f.leaf, Key::Space)), EventDisposition::Pass);
        assert_eq!(
            f.resolver.resolve(&key(&f.backdrop.backdrop, Key::Other("a".to_string()))),
            EventDisposition::Pass
        );
    }
}
