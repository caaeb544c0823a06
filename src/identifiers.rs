//! Type-safe identifiers for transport instances.
//!
//! Every transport instance receives a process-unique [`InstanceId`] at
//! construction. The id exists for exactly one purpose: locating the legacy
//! DOM surrogate element by its `id` attribute. Two simultaneously open
//! legacy-mode instances must therefore never share an id within one page
//! context.
//!
//! Ids are drawn from a process-wide monotonic counter. The counter is
//! initialized at load, never reset, and lives for the process lifetime.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

// ============================================================================
// Counter
// ============================================================================

/// Process-wide source of unique instance ids.
static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(0);

// ============================================================================
// InstanceId
// ============================================================================

/// Process-unique identity of one transport instance.
///
/// Renders as `EventSource_{n}`, which is also the DOM id the legacy
/// surrogate element is registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(u64);

impl InstanceId {
    /// Returns the next unused instance id.
    ///
    /// Pure "next identity" operation backed by an atomic counter, so
    /// concurrent construction never produces duplicates.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw counter value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns the DOM id string for the legacy surrogate element.
    #[inline]
    #[must_use]
    pub fn dom_id(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventSource_{}", self.0)
    }
}

// ============================================================================
// Tests
// ============================================================================
