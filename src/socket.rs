//! Owning-socket seam.
//!
//! A transport never drives its owner's lifecycle; it only reports. The
//! [`Socket`] trait is the intake surface the higher-level session object
//! exposes to its transports: one method per notification, called from the
//! host event loop as the underlying mechanism delivers.

// ============================================================================
// Imports
// ============================================================================

use crate::error::Error;

// ============================================================================
// Socket
// ============================================================================

/// Intake surface of the session object that owns a transport.
///
/// The transport holds a non-owning `Arc<dyn Socket>` back-reference and
/// forwards every delivery unchanged. Implementations must tolerate
/// notifications arriving after the transport self-reports closed: the host
/// may have queued events before teardown, and a trailing delivery is
/// benign.
pub trait Socket: Send + Sync {
    /// Called once for every message payload, in delivery order.
    ///
    /// Payloads are opaque strings; parsing is the owner's concern.
    fn on_data(&self, payload: String);

    /// Called once for every error from the underlying mechanism.
    ///
    /// The error value is forwarded verbatim; retry and fallback policy
    /// live in the surrounding framework.
    fn on_error(&self, error: Error);
}

// ============================================================================
// Test Support
// ============================================================================
