//! Modal engine services

mod listeners;
mod modal_manager;
mod position_sync;
mod registry;
mod scroll_intent;

pub use listeners::{ListenerBinding, ListenerRole, ListenerTable};
pub use modal_manager::{CloseTrigger, ModalManager, ModalReceipt};
pub use position_sync::PositionSynchronizer;
pub use scroll_intent::{can_scroll, touch_direction, wheel_direction, ScrollIntentResolver};
