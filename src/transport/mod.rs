//! Transport implementations.
//!
//! Each transport is one concrete mechanism for moving real-time data
//! between client and server, selected by the framework through capability
//! negotiation against the process-wide [`registry`](crate::registry).
//!
//! # Lifecycle
//!
//! 1. Framework consults the transport's static capability queries
//! 2. One instance is constructed per connection attempt
//! 3. `open` connects via the strategy the capability probe selected
//! 4. Data and errors relay asynchronously to the owning socket
//! 5. `close` releases the connection and undoes any host side effects
//!
//! Re-opening after close requires a new instance.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `event_source` | Server-Sent-Events style streaming transport |

// ============================================================================
// Submodules
// ============================================================================

/// EventSource (SSE) streaming transport.
pub mod event_source;

// ============================================================================
// Re-exports
// ============================================================================

pub use event_source::EventSourceTransport;
