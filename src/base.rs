//! Shared base-transport behavior.
//!
//! The framework's transports share two pieces of machinery: URL
//! construction from the configured endpoint, and generic close bookkeeping.
//! Rather than a class hierarchy, each concrete transport holds a
//! [`BaseTransport`] by composition and extends its URL where needed.

// ============================================================================
// Imports
// ============================================================================

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::Result;

// ============================================================================
// TransportOptions
// ============================================================================

/// Endpoint configuration shared by all transports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportOptions {
    /// Use `https` instead of `http`.
    #[serde(default)]
    pub secure: bool,

    /// Server host.
    pub host: String,

    /// Server port.
    pub port: u16,

    /// Resource path prefix under which transports are mounted.
    #[serde(default = "TransportOptions::default_resource")]
    pub resource: String,

    /// Extra query pairs appended to every prepared URL.
    #[serde(default)]
    pub query: Vec<(String, String)>,
}

impl TransportOptions {
    fn default_resource() -> String {
        "socket.io".to_string()
    }
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            secure: false,
            host: "localhost".to_string(),
            port: 80,
            resource: Self::default_resource(),
            query: Vec::new(),
        }
    }
}

// ============================================================================
// BaseTransport
// ============================================================================

/// Shared URL construction and close bookkeeping.
///
/// Concrete transports invoke [`close`](BaseTransport::close) unconditionally
/// as part of their own teardown, whichever connection strategy was active.
pub struct BaseTransport {
    options: TransportOptions,
    /// Times the shared close bookkeeping has run.
    closes: AtomicU64,
}

impl BaseTransport {
    /// Creates the shared behavior for one transport instance.
    #[must_use]
    pub fn new(options: TransportOptions) -> Self {
        Self {
            options,
            closes: AtomicU64::new(0),
        }
    }

    /// Returns the configured endpoint options.
    #[inline]
    #[must_use]
    pub fn options(&self) -> &TransportOptions {
        &self.options
    }

    /// Builds the endpoint URL for the named transport.
    ///
    /// Format: `scheme://host:port/{resource}/{transport_name}/` plus the
    /// configured query pairs.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Url`] if the configured endpoint does not
    /// form a valid URL.
    pub fn prepare_url(&self, transport_name: &str) -> Result<Url> {
        let scheme = if self.options.secure { "https" } else { "http" };
        let mut url = Url::parse(&format!(
            "{scheme}://{host}:{port}/{resource}/{transport_name}/",
            host = self.options.host,
            port = self.options.port,
            resource = self.options.resource,
        ))?;

        if !self.options.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.options.query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Runs the generic close bookkeeping.
    ///
    /// Safe to invoke any number of times, including before any open.
    pub fn close(&self) {
        let closes = self.closes.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(closes, "Base transport close bookkeeping");
    }

    /// Number of times the close bookkeeping has run.
    #[inline]
    #[must_use]
    pub fn close_count(&self) -> u64 {
        self.closes.load(Ordering::SeqCst)
    }
}

// ============================================================================
// Tests
// ============================================================================
