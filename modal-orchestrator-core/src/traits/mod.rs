//! Host abstraction trait definitions

mod surface_adapter;

pub use surface_adapter::{
    BackdropSurfaces, InputHandler, ListenerId, ListenerTarget, SurfaceAdapter,
};

// The animation side of the host boundary lives in its own crate
pub use modal_orchestrator_animation::{AnimatedSurface, AnimationProvider};
