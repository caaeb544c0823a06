//! Process-wide transport registry.
//!
//! The framework's transport selection walks a list of registered transport
//! names and consults each transport's capability queries before
//! constructing an instance. Registration is idempotent and the list lives
//! for the process lifetime.

// ============================================================================
// Imports
// ============================================================================

use parking_lot::Mutex;
use tracing::debug;

// ============================================================================
// Registry
// ============================================================================

static REGISTRY: Mutex<Vec<&'static str>> = Mutex::new(Vec::new());

/// Adds a transport name to the process-wide list.
///
/// Registering the same name twice is a no-op; order of first registration
/// is preserved.
pub fn register(name: &'static str) {
    let mut registry = REGISTRY.lock();
    if !registry.contains(&name) {
        registry.push(name);
        debug!(transport = name, "Transport registered");
    }
}

/// Returns the registered transport names, in registration order.
#[must_use]
pub fn names() -> Vec<&'static str> {
    REGISTRY.lock().clone()
}

/// Returns `true` if the named transport is registered.
#[must_use]
pub fn is_registered(name: &str) -> bool {
    REGISTRY.lock().iter().any(|entry| *entry == name)
}

// ============================================================================
// Tests
// ============================================================================
