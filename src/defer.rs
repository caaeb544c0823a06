//! Next-tick scheduling.
//!
//! Some hosts keep showing a page-loading indicator when connection
//! readiness is signaled synchronously in the same execution turn as page
//! load. Deferring the readiness callback by one task-queue iteration avoids
//! that visible side effect; transports route their `ready` signaling
//! through here.

// ============================================================================
// Imports
// ============================================================================

use tokio::task::yield_now;

// ============================================================================
// next_tick
// ============================================================================

/// Runs `f` on the next iteration of the task queue.
///
/// Must be called within a tokio runtime. The callback is assumed not to
/// panic; no completion signal is provided.
pub fn next_tick<F>(f: F)
where
    F: FnOnce() + Send + 'static,
{
    tokio::spawn(async move {
        yield_now().await;
        f();
    });
}

// ============================================================================
// Tests
// ============================================================================
