//! Modal identifiers

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Process-wide counter; identifiers are never reused.
static NEXT_MODAL_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier of a modal record.
///
/// Allocated from a process-wide counter, so identifiers strictly increase in
/// allocation order across every manager in the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModalId(u64);

impl ModalId {
    /// Allocate the next identifier.
    pub(crate) fn next() -> Self {
        Self(NEXT_MODAL_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw identifier value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ModalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
