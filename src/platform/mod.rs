//! Host-environment adapter for the streaming mechanisms.
//!
//! The transport's lifecycle logic is host-agnostic; everything that touches
//! the actual environment (probing for the streaming APIs, opening a native
//! stream, manipulating the document for the legacy surrogate) goes through
//! the [`Platform`] trait. A browser-backed host implements it against the
//! real APIs; the crate's own tests use an in-memory implementation.
//!
//! # Strategy Selection
//!
//! | Host capability | Connection strategy |
//! |-----------------|---------------------|
//! | Standard API | [`Platform::open_stream`] native handle |
//! | Legacy draft API only | Surrogate element injected via [`Document`] |
//!
//! Both strategies deliver payloads and errors through the same callback
//! pair, so the transport normalizes them into one relay path.

// ============================================================================
// Submodules
// ============================================================================

#[cfg(test)]
pub(crate) mod mock;

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use url::Url;

use crate::error::{Error, Result};
use crate::identifiers::InstanceId;

// ============================================================================
// Callbacks
// ============================================================================

/// Callback invoked with each payload delivered by the underlying mechanism.
///
/// Payloads are opaque strings handed upward unchanged.
pub type DataCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Callback invoked with each error reported by the underlying mechanism.
pub type ErrorCallback = Arc<dyn Fn(Error) + Send + Sync>;

// ============================================================================
// StreamHandle
// ============================================================================

/// Handle to an open native streaming connection.
///
/// Ownership is exclusive to the transport instance that opened it. Closing
/// releases the underlying mechanism; events the host already queued before
/// the close may still fire afterwards and are treated as benign.
pub trait StreamHandle: Send + Sync {
    /// Closes the underlying streaming connection.
    fn close(&self);
}

// ============================================================================
// ElementRef
// ============================================================================

/// Opaque reference to an element in the host document.
///
/// Only meaningful to the [`Document`] that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementRef(pub u64);

// ============================================================================
// Document
// ============================================================================

/// Document surface needed by the legacy surrogate strategy.
///
/// The legacy draft mechanism cannot be driven through script-constructed
/// objects; payload delivery only works when an `<event-source>` element is
/// injected into the live document via markup. These primitives are the
/// minimum the transport needs to perform and later undo that injection.
///
/// All access happens on the host's single-threaded event loop; the trait
/// requires `Send + Sync` only so adapters can be shared behind an `Arc`.
pub trait Document: Send + Sync {
    /// Creates a detached, non-visible container element.
    fn create_container(&self) -> ElementRef;

    /// Appends the container to the document body.
    fn append_to_body(&self, container: ElementRef);

    /// Injects an `<event-source>` element into the container via markup.
    ///
    /// The element is tagged with the stream `url` as its source and the
    /// instance `id` as its DOM id.
    fn inject_event_source(&self, container: ElementRef, url: &Url, id: InstanceId);

    /// Looks up an element by its DOM id.
    fn element_by_id(&self, id: &str) -> Option<ElementRef>;

    /// Attaches a named custom-event listener to an element.
    fn add_event_listener(&self, element: ElementRef, event: &str, callback: DataCallback);

    /// Installs the error handler for an element's stream.
    fn set_error_handler(&self, element: ElementRef, callback: ErrorCallback);

    /// Returns the parent of an element, if attached.
    fn parent(&self, element: ElementRef) -> Option<ElementRef>;

    /// Removes an element (and its subtree) from the document.
    fn remove(&self, element: ElementRef);

    /// Closes the stream owned by an `<event-source>` element.
    fn close_stream(&self, element: ElementRef);
}

// ============================================================================
// Platform
// ============================================================================

/// Host-environment adapter.
///
/// Capability probes are assumed stable for the process lifetime; the
/// transport captures their result once at construction.
pub trait Platform: Send + Sync {
    /// Returns `true` if the standard streaming API is available.
    fn has_standard_api(&self) -> bool;

    /// Returns `true` if the legacy draft API is available.
    fn has_legacy_api(&self) -> bool;

    /// Opens a native streaming connection against `url`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] at the point of use if the standard
    /// API is absent from the host. The transport performs no defensive
    /// pre-validation; consulting the capability probe first is the
    /// caller's responsibility.
    fn open_stream(
        &self,
        url: &Url,
        on_data: DataCallback,
        on_error: ErrorCallback,
    ) -> Result<Box<dyn StreamHandle>>;

    /// Returns the document surface for the legacy strategy.
    ///
    /// `None` on hosts without a document. Hosts reporting
    /// [`has_legacy_api`](Platform::has_legacy_api) must return `Some`.
    fn document(&self) -> Option<&dyn Document> {
        None
    }
}
