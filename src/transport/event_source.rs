//! EventSource streaming transport.
//!
//! Creates a streaming, read-only connection with the server, a technique
//! also known as Server-Sent Events (SSE). Two incompatible host mechanisms
//! exist: the standard streaming API, and a legacy draft implementation that
//! only delivers payloads through an `<event-source>` element injected into
//! the live document and requires a different server-side wire encoding.
//!
//! The transport probes the host once at construction, opens the matching
//! strategy, normalizes both mechanisms' event delivery into the owning
//! socket's intake methods, and undoes all host side effects on close.
//!
//! # Event Flow
//!
//! ```text
//! ┌────────────┐  payload/error   ┌───────────────────────┐   on_data
//! │   Server   │ ───────────────► │ EventSourceTransport  │ ──────────► Socket
//! └────────────┘   (host event    │  standard │ legacy    │   on_error
//!                     loop)       └───────────────────────┘
//! ```
//!
//! No transformation, buffering, or reordering happens in between: the
//! transport is a pure relay and delivery order is whatever the underlying
//! mechanism's own FIFO contract provides.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace};
use url::Url;

use crate::base::{BaseTransport, TransportOptions};
use crate::capability::Capability;
use crate::defer;
use crate::error::{Error, Result};
use crate::identifiers::InstanceId;
use crate::platform::{DataCallback, ElementRef, ErrorCallback, Platform, StreamHandle};
use crate::registry;
use crate::socket::Socket;

// ============================================================================
// Constants
// ============================================================================

/// Event name the legacy draft mechanism delivers payloads under.
///
/// Distinct from `"message"`: the draft API surfaces payloads as a custom
/// event type on the surrogate element.
const LEGACY_EVENT: &str = "io";

/// Query pair telling the server to emit the legacy-draft wire encoding.
const LEGACY_QUERY_KEY: &str = "l";
const LEGACY_QUERY_VALUE: &str = "1";

// ============================================================================
// ConnectionHandle
// ============================================================================

/// Exclusive handle to the active underlying mechanism.
///
/// Present only between a successful `open` and the subsequent `close`.
enum ConnectionHandle {
    /// Native streaming handle (standard branch).
    Stream(Box<dyn StreamHandle>),
    /// DOM-injected surrogate element (legacy branch).
    Surrogate(ElementRef),
}

// ============================================================================
// EventSourceTransport
// ============================================================================

/// Streaming, receive-only transport over Server-Sent Events.
///
/// One instance serves one connection attempt: `open`, relay for the
/// connection's lifetime, `close`. Cross-origin connections are
/// categorically unsupported per the streaming specification's same-origin
/// restriction.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use eventsource_transport::{EventSourceTransport, TransportOptions};
///
/// if EventSourceTransport::check(&*platform) {
///     let transport =
///         EventSourceTransport::new(socket, platform, TransportOptions::default());
///     transport.open()?;
///     // ... payloads arrive on socket.on_data ...
///     transport.close();
/// }
/// ```
pub struct EventSourceTransport {
    /// Process-unique identity; names the legacy surrogate element.
    identity: InstanceId,
    /// Host capability, probed once at construction.
    capability: Capability,
    /// Shared base-transport behavior (URL building, close bookkeeping).
    base: BaseTransport,
    /// Non-owning back-reference to the owning socket.
    socket: Arc<dyn Socket>,
    /// Host-environment adapter.
    platform: Arc<dyn Platform>,
    /// Active connection handle, if open.
    handle: Mutex<Option<ConnectionHandle>>,
}

impl EventSourceTransport {
    /// Transport name in the process-wide registry.
    pub const NAME: &'static str = "event-source";

    /// Creates a transport for one connection attempt.
    ///
    /// Probes the host capability once; the result is never re-evaluated
    /// for this instance.
    #[must_use]
    pub fn new(
        socket: Arc<dyn Socket>,
        platform: Arc<dyn Platform>,
        options: TransportOptions,
    ) -> Self {
        let identity = InstanceId::next();
        let capability = Capability::probe(&*platform);

        debug!(%identity, %capability, "EventSource transport created");

        Self {
            identity,
            capability,
            base: BaseTransport::new(options),
            socket,
            platform,
            handle: Mutex::new(None),
        }
    }

    /// Registers this transport's name in the process-wide registry.
    pub fn register() {
        registry::register(Self::NAME);
    }

    /// Returns `true` if the host supports either streaming mechanism.
    ///
    /// Consulted by the framework's transport selection before ever
    /// constructing an instance.
    #[must_use]
    pub fn check(platform: &dyn Platform) -> bool {
        Capability::probe(platform).supports_streaming()
    }

    /// Returns `true` if cross-origin connections are supported.
    ///
    /// Always `false`, unconditionally of environment: the streaming
    /// specification restricts connections to the same origin.
    #[inline]
    #[must_use]
    pub const fn supports_cross_origin() -> bool {
        false
    }

    /// Returns this instance's process-unique identity.
    #[inline]
    #[must_use]
    pub fn identity(&self) -> InstanceId {
        self.identity
    }

    /// Returns the capability probed at construction.
    #[inline]
    #[must_use]
    pub fn capability(&self) -> Capability {
        self.capability
    }

    /// Returns the shared base-transport behavior.
    #[inline]
    #[must_use]
    pub fn base(&self) -> &BaseTransport {
        &self.base
    }

    /// Returns `true` if a connection handle is currently held.
    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.handle.lock().is_some()
    }

    // ========================================================================
    // URL Preparation
    // ========================================================================

    /// Builds the connection URL.
    ///
    /// Extends the base transport's construction with the `l=1` query pair
    /// when and only when the legacy branch is active, so the server knows
    /// which wire encoding to emit. This is the single coupling point
    /// between client-side capability detection and server-side response
    /// formatting.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Url`] if the configured endpoint is invalid.
    pub fn prepare_url(&self) -> Result<Url> {
        let mut url = self.base.prepare_url(Self::NAME)?;

        if self.capability.is_legacy() {
            url.query_pairs_mut()
                .append_pair(LEGACY_QUERY_KEY, LEGACY_QUERY_VALUE);
        }

        Ok(url)
    }

    // ========================================================================
    // Open
    // ========================================================================

    /// Opens the streaming connection.
    ///
    /// Branches on the capability probed at construction: the standard
    /// branch creates a native streaming handle, the legacy branch injects
    /// a surrogate `<event-source>` element into the host document. Both
    /// wire their deliveries to the same relay callbacks.
    ///
    /// Returns immediately; connection establishment and first delivery are
    /// asynchronous. No explicit "connected" transition is signaled; the
    /// first data delivery implicitly indicates liveness.
    ///
    /// Precondition: the caller consulted [`check`](Self::check). Nothing
    /// is pre-validated here; an absent host API surfaces as an error at
    /// the point of use.
    ///
    /// # Errors
    ///
    /// - [`Error::Unsupported`] if the required host API is absent
    /// - [`Error::SurrogateInjection`] if the legacy element cannot be
    ///   located after injection
    /// - [`Error::Url`] if the endpoint configuration is invalid
    pub fn open(&self) -> Result<&Self> {
        let url = self.prepare_url()?;
        let (on_data, on_error) = self.relay_callbacks();

        let handle = if self.capability.is_legacy() {
            self.open_surrogate(&url, on_data, on_error)?
        } else {
            debug!(identity = %self.identity, %url, "Opening native stream");
            ConnectionHandle::Stream(self.platform.open_stream(&url, on_data, on_error)?)
        };

        *self.handle.lock() = Some(handle);
        Ok(self)
    }

    /// Opens the legacy branch by injecting a surrogate element.
    fn open_surrogate(
        &self,
        url: &Url,
        on_data: DataCallback,
        on_error: ErrorCallback,
    ) -> Result<ConnectionHandle> {
        debug!(identity = %self.identity, %url, "Injecting legacy surrogate");

        let document = self
            .platform
            .document()
            .ok_or_else(|| Error::unsupported(self.capability))?;

        // Script-constructed objects do not work with the draft API; the
        // element has to enter the document through markup injection inside
        // a wrapper.
        let wrapper = document.create_container();
        document.append_to_body(wrapper);
        document.inject_event_source(wrapper, url, self.identity);

        let element = document
            .element_by_id(&self.identity.dom_id())
            .ok_or_else(|| Error::surrogate_injection(self.identity))?;

        document.add_event_listener(element, LEGACY_EVENT, on_data);
        document.set_error_handler(element, on_error);

        Ok(ConnectionHandle::Surrogate(element))
    }

    /// Builds the relay pair both branches wire their deliveries to.
    ///
    /// Pure forwards into the owning socket: payloads unchanged and in
    /// delivery order, errors verbatim with no retry or suppression.
    fn relay_callbacks(&self) -> (DataCallback, ErrorCallback) {
        let identity = self.identity;

        let socket = Arc::clone(&self.socket);
        let on_data: DataCallback = Arc::new(move |payload: String| {
            trace!(%identity, bytes = payload.len(), "Payload relayed");
            socket.on_data(payload);
        });

        let socket = Arc::clone(&self.socket);
        let on_error: ErrorCallback = Arc::new(move |error: Error| {
            debug!(%identity, %error, "Stream error relayed");
            socket.on_error(error);
        });

        (on_data, on_error)
    }

    // ========================================================================
    // Close
    // ========================================================================

    /// Closes the connection and undoes host side effects.
    ///
    /// Idempotent: a no-op for the connection handle when none is present,
    /// including before any `open`. The legacy branch removes the wrapper
    /// element it appended, fully undoing the document mutation. The base
    /// transport's close bookkeeping always runs, whichever branch was
    /// taken.
    ///
    /// Events the host queued before teardown may still relay afterwards;
    /// the owning socket must tolerate such trailing notifications. After
    /// close the instance is unusable for further delivery; re-opening
    /// requires a new instance.
    pub fn close(&self) -> &Self {
        if let Some(handle) = self.handle.lock().take() {
            match handle {
                ConnectionHandle::Stream(stream) => {
                    debug!(identity = %self.identity, "Closing native stream");
                    stream.close();
                }
                ConnectionHandle::Surrogate(element) => {
                    debug!(identity = %self.identity, "Removing legacy surrogate");
                    if let Some(document) = self.platform.document() {
                        let wrapper = document.parent(element);
                        document.close_stream(element);
                        if let Some(wrapper) = wrapper {
                            document.remove(wrapper);
                        }
                    }
                }
            }
        }

        self.base.close();
        self
    }

    // ========================================================================
    // Readiness
    // ========================================================================

    /// Signals readiness on the next task-queue iteration.
    ///
    /// Some hosts keep showing a page-loading indicator when readiness is
    /// signaled synchronously in the load turn, so the callback is deferred
    /// one tick and invoked with this transport as its context. The socket
    /// parameter follows the framework's calling convention and is not
    /// consumed here.
    pub fn ready<F>(self: Arc<Self>, _socket: &dyn Socket, callback: F)
    where
        F: FnOnce(Arc<Self>) + Send + 'static,
    {
        defer::next_tick(move || callback(self));
    }
}

impl std::fmt::Debug for EventSourceTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSourceTransport")
            .field("identity", &self.identity)
            .field("capability", &self.capability)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
