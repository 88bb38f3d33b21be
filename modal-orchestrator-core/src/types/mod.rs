//! Type definition module

mod id;
mod input;
mod modal;
mod options;
mod signal;

pub use id::ModalId;
pub use input::{
    Axis, EventDisposition, InputCategory, InputEvent, Key, Point, ScrollDirection, ScrollMetrics,
};
pub use modal::{CloseOutcome, ModalSnapshot, ModalState, MultiModalBehaviour, TouchBlockStrategy};
pub use options::{
    AnimationConfig, LifecycleCallback, LifecycleCallbacks, ModalAnimations, ModalConfig,
    ModalOptions, ModalStyle, StyleConfig, DEFAULT_SCROLL_SAFETY_MARGIN,
};
pub use signal::Signal;

pub(crate) use signal::{signal, SignalSender};

// Re-export the animation library's public types
pub use modal_orchestrator_animation::{AnimatedSurface, AnimationPreset, AnimationProvider, Easing};
