//! Raw input events and scroll geometry

use serde::{Deserialize, Serialize};

/// Scroll axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

/// Normalized scroll intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    Up,
    Down,
    Left,
    Right,
}

impl ScrollDirection {
    /// Axis the direction scrolls along.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Up | Self::Down => Axis::Y,
            Self::Left | Self::Right => Axis::X,
        }
    }

    /// Whether the direction moves toward offset zero.
    #[must_use]
    pub const fn is_toward_start(self) -> bool {
        matches!(self, Self::Up | Self::Left)
    }
}

/// Keys that scroll a focused region.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    PageUp,
    PageDown,
    Home,
    End,
    Space,
    Escape,
    /// Any other key, by its name.
    Other(String),
}

impl Key {
    /// Direction the key would scroll, or `None` for keys that do not scroll.
    #[must_use]
    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        match self {
            Self::ArrowUp | Self::PageUp | Self::Home => Some(ScrollDirection::Up),
            Self::ArrowDown | Self::PageDown | Self::End | Self::Space => {
                Some(ScrollDirection::Down)
            }
            Self::ArrowLeft => Some(ScrollDirection::Left),
            Self::ArrowRight => Some(ScrollDirection::Right),
            Self::Escape | Self::Other(_) => None,
        }
    }

    #[must_use]
    pub fn is_scroll_key(&self) -> bool {
        self.scroll_direction().is_some()
    }
}

/// 2D point or offset in device pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component along `axis`.
    #[must_use]
    pub const fn along(self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

/// Scroll position of one surface along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollMetrics {
    /// Current scroll offset.
    pub offset: f64,
    /// Largest reachable offset (`scroll size - client size`); zero when the
    /// surface does not overflow.
    pub max_offset: f64,
}

impl ScrollMetrics {
    #[must_use]
    pub const fn new(offset: f64, max_offset: f64) -> Self {
        Self { offset, max_offset }
    }
}

/// Input categories a listener can be attached for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputCategory {
    Scroll,
    Resize,
    Wheel,
    TouchStart,
    TouchMove,
    KeyDown,
    Click,
}

/// A raw input event as delivered by the surface adapter.
///
/// `target` is the innermost surface the event was dispatched to (the
/// focused surface for key events).
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent<H> {
    Scroll { target: H },
    Resize { target: H },
    Wheel { target: H, delta_x: f64, delta_y: f64 },
    TouchStart { target: H, point: Point },
    TouchMove { target: H, point: Point },
    KeyDown { target: H, key: Key },
    Click { target: H },
}

impl<H> InputEvent<H> {
    #[must_use]
    pub const fn category(&self) -> InputCategory {
        match self {
            Self::Scroll { .. } => InputCategory::Scroll,
            Self::Resize { .. } => InputCategory::Resize,
            Self::Wheel { .. } => InputCategory::Wheel,
            Self::TouchStart { .. } => InputCategory::TouchStart,
            Self::TouchMove { .. } => InputCategory::TouchMove,
            Self::KeyDown { .. } => InputCategory::KeyDown,
            Self::Click { .. } => InputCategory::Click,
        }
    }

    #[must_use]
    pub const fn target(&self) -> &H {
        match self {
            Self::Scroll { target }
            | Self::Resize { target }
            | Self::Wheel { target, .. }
            | Self::TouchStart { target, .. }
            | Self::TouchMove { target, .. }
            | Self::KeyDown { target, .. }
            | Self::Click { target } => target,
        }
    }
}

/// What a listener decided about an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventDisposition {
    /// Let the event continue to its default action.
    #[default]
    Pass,
    /// Cancel the default action (the page behind the modal must not scroll).
    Suppress,
}

impl EventDisposition {
    #[must_use]
    pub const fn is_suppressed(self) -> bool {
        matches!(self, Self::Suppress)
    }

    /// Combine two decisions; suppression wins.
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        if self.is_suppressed() || other.is_suppressed() {
            Self::Suppress
        } else {
            Self::Pass
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_directions() {
        assert_eq!(Key::Home.scroll_direction(), Some(ScrollDirection::Up));
        assert_eq!(Key::Space.scroll_direction(), Some(ScrollDirection::Down));
        assert_eq!(Key::ArrowLeft.scroll_direction(), Some(ScrollDirection::Left));
        assert!(!Key::Escape.is_scroll_key());
        assert!(!Key::Other("a".to_string()).is_scroll_key());
    }

    #[test]
    fn direction_axes() {
        assert_eq!(ScrollDirection::Up.axis(), Axis::Y);
        assert_eq!(ScrollDirection::Right.axis(), Axis::X);
        assert!(ScrollDirection::Left.is_toward_start());
        assert!(!ScrollDirection::Down.is_toward_start());
    }

    #[test]
    fn suppression_wins_when_merging() {
        assert_eq!(
            EventDisposition::Pass.merge(EventDisposition::Suppress),
            EventDisposition::Suppress
        );
        assert_eq!(
            EventDisposition::Pass.merge(EventDisposition::Pass),
            EventDisposition::Pass
        );
    }
}
