//! Surface adapter implementations

mod memory;

pub use memory::{MemorySurface, MemorySurfaceTree, SurfaceKind, SurfaceStyle};
