//! Error types for the EventSource transport.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use eventsource_transport::{EventSourceTransport, Result};
//!
//! fn example(transport: &EventSourceTransport) -> Result<()> {
//!     transport.open()?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Capability | [`Error::Unsupported`] |
//! | Streaming | [`Error::Stream`], [`Error::SurrogateInjection`] |
//! | Configuration | [`Error::Config`], [`Error::Url`], [`Error::Json`] |
//! | External | [`Error::Io`] |
//!
//! Streaming errors are never interpreted by this crate: the transport is a
//! pure relay, and delivery errors from the underlying mechanism are
//! forwarded verbatim to the owning socket.

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use thiserror::Error;

use crate::capability::Capability;
use crate::identifiers::InstanceId;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Capability Errors
    // ========================================================================
    /// Event streaming is not available in the host environment.
    ///
    /// Returned when `open` reaches the point of use of an API the host
    /// does not expose. Callers are expected to consult
    /// `EventSourceTransport::check` before constructing an instance; this
    /// variant is the point-of-use failure, not a defensive guard.
    #[error("Event streaming unsupported in this environment (capability: {capability})")]
    Unsupported {
        /// Capability detected for the host environment.
        capability: Capability,
    },

    // ========================================================================
    // Streaming Errors
    // ========================================================================
    /// Delivery error reported by the underlying streaming mechanism.
    ///
    /// Carried opaquely: the transport forwards it verbatim to the owning
    /// socket without retry, suppression, or classification.
    #[error("Stream error: {message}")]
    Stream {
        /// Error description from the underlying mechanism.
        message: String,
    },

    /// Legacy surrogate element could not be located after injection.
    ///
    /// Returned when the injected `<event-source>` element is not found in
    /// the document under the instance's id.
    #[error("Surrogate element not found: {id}")]
    SurrogateInjection {
        /// Instance id the surrogate was injected under.
        id: InstanceId,
    },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when transport options are invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// URL construction error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// JSON error while reading transport options.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error from a platform adapter.
    #[error("IO error: {0}")]
    Io(#[from] IoError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates an unsupported-environment error.
    #[inline]
    pub fn unsupported(capability: Capability) -> Self {
        Self::Unsupported { capability }
    }

    /// Creates a stream delivery error.
    #[inline]
    pub fn stream(message: impl Into<String>) -> Self {
        Self::Stream {
            message: message.into(),
        }
    }

    /// Creates a surrogate injection error.
    #[inline]
    pub fn surrogate_injection(id: InstanceId) -> Self {
        Self::SurrogateInjection { id }
    }

    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a capability error.
    #[inline]
    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }

    /// Returns `true` if this is a streaming error.
    #[inline]
    #[must_use]
    pub fn is_stream_error(&self) -> bool {
        matches!(self, Self::Stream { .. } | Self::SurrogateInjection { .. })
    }

    /// Returns `true` if this is a configuration error.
    #[inline]
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::Config { .. } | Self::Url(_) | Self::Json(_))
    }
}

// ============================================================================
// Tests
// ============================================================================
