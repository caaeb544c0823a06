//! EventSource transport for a multi-transport real-time client.
//!
//! This crate implements one concrete transport: a unidirectional,
//! server-to-client streaming connection (Server-Sent-Events style) that
//! feeds received messages into a shared socket abstraction. The framework
//! around it handles transport selection, retry policy, and message framing;
//! this crate handles the transport's lifecycle and compatibility state
//! machine.
//!
//! # Architecture
//!
//! Two incompatible streaming mechanisms exist in the wild:
//!
//! - **Standard**: the streaming API constructs a native handle directly
//! - **Legacy draft**: payloads only flow through an `<event-source>`
//!   element injected into the live document, and the server must emit a
//!   different wire encoding
//!
//! The host is probed once through the [`Platform`](platform::Platform)
//! adapter; the probed [`Capability`] selects the connection strategy and
//! the wire-encoding marker in the prepared URL. Both strategies normalize
//! their deliveries into the owning [`Socket`]'s intake methods, and
//! `close` fully undoes any document mutation the legacy branch performed.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use eventsource_transport::{EventSourceTransport, TransportOptions};
//!
//! EventSourceTransport::register();
//!
//! if EventSourceTransport::check(&*platform) {
//!     let transport = EventSourceTransport::new(
//!         socket,
//!         platform,
//!         TransportOptions {
//!             host: "example.com".to_string(),
//!             port: 8080,
//!             ..TransportOptions::default()
//!         },
//!     );
//!     transport.open()?;
//!     // payloads arrive on socket.on_data, errors on socket.on_error
//!     transport.close();
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`base`] | Shared base-transport behavior (URL building, close bookkeeping) |
//! | [`capability`] | Host capability detection |
//! | [`defer`] | Next-tick scheduling for readiness signaling |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Process-unique instance identities |
//! | [`platform`] | Host-environment adapter traits |
//! | [`registry`] | Process-wide transport name list |
//! | [`socket`] | Owning-socket intake seam |
//! | [`transport`] | Transport implementations |

// ============================================================================
// Modules
// ============================================================================

/// Shared base-transport behavior.
///
/// Held by composition: URL construction from [`TransportOptions`] and the
/// generic close bookkeeping every transport invokes on teardown.
pub mod base;

/// Host capability detection.
///
/// A pure probe against the platform adapter, captured once per instance.
pub mod capability;

/// Next-tick scheduling.
pub mod defer;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Process-unique instance identities.
///
/// Each instance's id names its legacy DOM surrogate element.
pub mod identifiers;

/// Host-environment adapter traits.
///
/// Everything that touches the actual host (capability probes, native
/// streams, document manipulation) goes through these seams.
pub mod platform;

/// Process-wide transport registry.
pub mod registry;

/// Owning-socket intake seam.
pub mod socket;

/// Transport implementations.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Transport types
pub use transport::EventSourceTransport;

// Base transport types
pub use base::{BaseTransport, TransportOptions};

// Capability types
pub use capability::Capability;

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::InstanceId;

// Seam traits
pub use platform::Platform;
pub use socket::Socket;
