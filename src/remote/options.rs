//! Remote configuration options.
//!
//! # Example
//!
//! ```ignore
//! use webview_bridge::remote::RemoteConfigOptions;
//!
//! let options = RemoteConfigOptions::new("https://config.example/api/gameid")
//!     .with_app_code("W11")
//!     .with_package("dev.example.game")
//!     .with_key(key_bytes);
//!
//! options.validate()?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

use super::crypto::KEY_LEN;

// ============================================================================
// Constants
// ============================================================================

/// Default HTTP timeout for the configuration request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

// ============================================================================
// RemoteConfigOptions
// ============================================================================

/// Where and how to fetch the game configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct RemoteConfigOptions {
    /// Configuration endpoint.
    pub endpoint: String,

    /// Application code sent as `appid`.
    pub app_code: String,

    /// Application package name sent as `package`.
    pub package: String,

    /// Pre-shared AES-256 key.
    pub key: Vec<u8>,

    /// HTTP request timeout.
    pub timeout: Duration,
}

// ============================================================================
// Constructors
// ============================================================================

impl RemoteConfigOptions {
    /// Creates options for `endpoint` with empty identity and key.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            app_code: String::new(),
            package: String::new(),
            key: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl RemoteConfigOptions {
    /// Sets the application code.
    #[inline]
    #[must_use]
    pub fn with_app_code(mut self, app_code: impl Into<String>) -> Self {
        self.app_code = app_code.into();
        self
    }

    /// Sets the package name.
    #[inline]
    #[must_use]
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    /// Sets the decryption key.
    #[inline]
    #[must_use]
    pub fn with_key(mut self, key: impl Into<Vec<u8>>) -> Self {
        self.key = key.into();
        self
    }

    /// Sets the HTTP timeout.
    #[inline]
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// ============================================================================
// Validation
// ============================================================================

impl RemoteConfigOptions {
    /// Checks that the options can produce a request and decrypt its reply.
    ///
    /// # Errors
    ///
    /// - [`Error::Url`] if the endpoint is not an absolute URL
    /// - [`Error::Config`] if the key is not 32 bytes or the timeout is zero
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.endpoint)?;

        if self.key.len() != KEY_LEN {
            return Err(Error::config(format!(
                "decryption key must be {KEY_LEN} bytes, got {}",
                self.key.len()
            )));
        }

        if self.timeout.is_zero() {
            return Err(Error::config("timeout must be non-zero"));
        }

        Ok(())
    }

    /// Endpoint URL with the `appid` and `package` query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Url`] if the endpoint is not an absolute URL.
    pub fn request_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.endpoint)?;
        url.query_pairs_mut()
            .append_pair("appid", &self.app_code)
            .append_pair("package", &self.package);
        Ok(url)
    }
}

impl fmt::Debug for RemoteConfigOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteConfigOptions")
            .field("endpoint", &self.endpoint)
            .field("app_code", &self.app_code)
            .field("package", &self.package)
            .field("key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> RemoteConfigOptions {
        RemoteConfigOptions::new("https://config.example/api/gameid")
            .with_app_code("W11")
            .with_package("dev.example.game")
            .with_key(vec![7u8; KEY_LEN])
    }

    #[test]
    fn test_valid_options() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_request_url_query() {
        let url = valid().request_url().expect("url");
        assert_eq!(
            url.as_str(),
            "https://config.example/api/gameid?appid=W11&package=dev.example.game"
        );
    }

    #[test]
    fn test_rejects_short_key() {
        let err = valid().with_key(vec![1u8; 16]).validate().unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_rejects_relative_endpoint() {
        let err = RemoteConfigOptions::new("/api/gameid")
            .with_key(vec![1u8; KEY_LEN])
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::Url(_)));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let err = valid().with_timeout(Duration::ZERO).validate().unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_debug_redacts_key() {
        let debug = format!("{:?}", valid());
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("[7, 7"));
    }
}
