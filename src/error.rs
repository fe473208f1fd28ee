//! Error types for the web-view bridge.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! Fallible operations return [`Result<T>`] which uses [`Error`]. The
//! bridge entry points themselves (`send_to_web`, `call_handler`) are
//! fire-and-forget and never surface errors to their callers; decode
//! failures on the inbound path are logged and swallowed at the bridge
//! boundary.
//!
//! ```ignore
//! use webview_bridge::{Result, remote::decrypt_payload};
//!
//! fn example(blob: &str, key: &[u8]) -> Result<()> {
//!     let json = decrypt_payload(blob, key)?;
//!     println!("{json}");
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Wire | [`Error::Protocol`], [`Error::Decode`] |
//! | Host | [`Error::Asset`] |
//! | Configuration | [`Error::Config`], [`Error::Crypto`] |
//! | Network | [`Error::Network`], [`Error::Http`] |
//! | External | [`Error::Io`], [`Error::Json`], [`Error::Base64`], [`Error::Url`] |

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use base64::DecodeError as Base64Error;
use thiserror::Error;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Wire Errors
    // ========================================================================
    /// Malformed payload received from the companion script.
    ///
    /// Returned when a fetched message queue is not a JSON list of messages.
    #[error("Protocol error: {message}")]
    Protocol {
        /// Description of the protocol violation.
        message: String,
    },

    /// Percent-decoding or UTF-8 decoding failed.
    #[error("Decode error: {message}")]
    Decode {
        /// Description of the decode failure.
        message: String,
    },

    // ========================================================================
    // Host Errors
    // ========================================================================
    /// A host asset could not be read.
    ///
    /// Returned when the companion script is missing from the host context.
    #[error("Asset '{name}' unavailable: {message}")]
    Asset {
        /// Asset name that was requested.
        name: String,
        /// Description of the failure.
        message: String,
    },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Configuration blob could not be decrypted.
    #[error("Crypto error: {message}")]
    Crypto {
        /// Description of the decryption failure.
        message: String,
    },

    // ========================================================================
    // Network Errors
    // ========================================================================
    /// Remote endpoint answered with an unusable response.
    #[error("Network error: {message}")]
    Network {
        /// Description of the network failure.
        message: String,
    },

    /// HTTP client error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Base64 decoding error.
    #[error("Base64 error: {0}")]
    Base64(#[from] Base64Error),

    /// URL parse error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a protocol error.
    #[inline]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Creates a decode error.
    #[inline]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates an asset error.
    #[inline]
    pub fn asset(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Asset {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a crypto error.
    #[inline]
    pub fn crypto(message: impl Into<String>) -> Self {
        Self::Crypto {
            message: message.into(),
        }
    }

    /// Creates a network error.
    #[inline]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this error came from decoding wire data.
    #[inline]
    #[must_use]
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Self::Protocol { .. } | Self::Decode { .. } | Self::Json(_) | Self::Base64(_)
        )
    }

    /// Returns `true` if this is a network error.
    #[inline]
    #[must_use]
    pub fn is_network_error(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Http(_))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::ErrorKind;

    #[test]
    fn test_error_display() {
        let err = Error::protocol("queue is not a list");
        assert_eq!(err.to_string(), "Protocol error: queue is not a list");
    }

    #[test]
    fn test_asset_error_display() {
        let err = Error::asset("WebViewJavascriptBridge.js", "not found");
        assert_eq!(
            err.to_string(),
            "Asset 'WebViewJavascriptBridge.js' unavailable: not found"
        );
    }

    #[test]
    fn test_is_decode_error() {
        let json_err = serde_json::from_str::<String>("invalid").unwrap_err();

        assert!(Error::decode("bad escape").is_decode_error());
        assert!(Error::from(json_err).is_decode_error());
        assert!(!Error::config("missing endpoint").is_decode_error());
    }

    #[test]
    fn test_is_network_error() {
        assert!(Error::network("no data field").is_network_error());
        assert!(!Error::crypto("short block").is_network_error());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = IoError::new(ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_from_url_error() {
        let url_err = url::Url::parse("not a url").unwrap_err();
        let err: Error = url_err.into();
        assert!(matches!(err, Error::Url(_)));
    }
}
