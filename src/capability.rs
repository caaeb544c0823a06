//! Host-environment capability detection.
//!
//! Two incompatible streaming mechanisms exist in the wild: the standard
//! EventSource API and an older draft implementation that delivers payloads
//! through DOM-injected `<event-source>` elements and requires a different
//! server-side wire encoding. Which one the host exposes can only be
//! detected on the client.
//!
//! Detection is a pure probe against the [`Platform`] adapter. Environment
//! capability is assumed static for the process lifetime, so the transport
//! captures the probed value once at construction and never re-evaluates it.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use crate::platform::Platform;

// ============================================================================
// Capability
// ============================================================================

/// Streaming capability of the host environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// The standard streaming API is available.
    Standard,
    /// Only the legacy draft API is available.
    Legacy,
    /// Neither streaming mechanism is available.
    Unsupported,
}

impl Capability {
    /// Probes the host environment for streaming support.
    ///
    /// The standard API is preferred when both mechanisms are present; the
    /// legacy branch is used only when it is the sole option.
    #[must_use]
    pub fn probe(platform: &dyn Platform) -> Self {
        if platform.has_standard_api() {
            Self::Standard
        } else if platform.has_legacy_api() {
            Self::Legacy
        } else {
            Self::Unsupported
        }
    }

    /// Returns `true` if either streaming mechanism is available.
    ///
    /// This is the capability query the framework's transport selection
    /// consults before constructing an instance.
    #[inline]
    #[must_use]
    pub const fn supports_streaming(self) -> bool {
        !matches!(self, Self::Unsupported)
    }

    /// Returns `true` if the legacy draft branch is active.
    ///
    /// Selects both the DOM surrogate connection strategy and the legacy
    /// wire-encoding marker in the prepared URL.
    #[inline]
    #[must_use]
    pub const fn is_legacy(self) -> bool {
        matches!(self, Self::Legacy)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Standard => "standard",
            Self::Legacy => "legacy",
            Self::Unsupported => "unsupported",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Tests
// ============================================================================
