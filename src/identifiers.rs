//! Type-safe identifiers for bridge correlation.
//!
//! Callback ids are opaque strings on the wire; the newtype keeps them
//! from being confused with handler names or payloads.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::protocol::wire;

// ============================================================================
// CallbackId
// ============================================================================

/// Token correlating a request with its eventual response.
///
/// Generated ids follow the `JAVA_CB_<counter>_<millis>` wire format. Ids
/// received from the companion script are accepted verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallbackId(String);

impl CallbackId {
    /// Wraps an existing id string.
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the id, returning the inner string.
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CallbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CallbackId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for CallbackId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl AsRef<str> for CallbackId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// CallbackIdGenerator
// ============================================================================

/// Per-bridge source of unique callback ids.
///
/// Combines a monotonically increasing counter with a millisecond
/// timestamp. The counter alone guarantees uniqueness within one
/// generator's lifetime.
#[derive(Debug, Default)]
pub struct CallbackIdGenerator {
    counter: u64,
}

impl CallbackIdGenerator {
    /// Creates a generator starting at counter zero.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { counter: 0 }
    }

    /// Allocates the next callback id.
    pub fn next_id(&mut self) -> CallbackId {
        self.counter += 1;
        CallbackId(wire::format_callback_id(self.counter, now_millis()))
    }

    /// Number of ids allocated so far.
    #[inline]
    #[must_use]
    pub fn issued(&self) -> u64 {
        self.counter
    }
}

/// Wall-clock milliseconds since the Unix epoch (zero if the clock is
/// set before it).
fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

// ============================================================================
// Tests
// ============================================================================
