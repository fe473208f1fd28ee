//! Fetching the game configuration.

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};

use super::crypto::decrypt_payload;
use super::options::RemoteConfigOptions;

// ============================================================================
// GameConfig
// ============================================================================

/// Decrypted configuration.
///
/// # Format
///
/// ```json
/// { "gameURL": "https://game.example/play" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    /// URL of the hosted game.
    #[serde(rename = "gameURL")]
    pub game_url: String,
}

impl GameConfig {
    /// Parses decrypted configuration JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if `gameURL` is missing.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The game URL, parsed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Url`] if the URL is not absolute.
    pub fn url(&self) -> Result<Url> {
        Ok(Url::parse(&self.game_url)?)
    }
}

// ============================================================================
// ConfigSource
// ============================================================================

/// Source of the game configuration.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Fetches and decrypts the configuration.
    async fn fetch_game_config(&self) -> Result<GameConfig>;
}

// ============================================================================
// RemoteConfigClient
// ============================================================================

/// HTTP client for the configuration endpoint.
///
/// Issues `GET <endpoint>?appid=..&package=..` and expects a JSON object
/// whose `data` field holds the encrypted blob.
#[derive(Debug, Clone)]
pub struct RemoteConfigClient {
    http: reqwest::Client,
    options: RemoteConfigOptions,
}

impl RemoteConfigClient {
    /// Creates a client after validating `options`.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] / [`Error::Url`] if the options are invalid
    /// - [`Error::Http`] if the HTTP client cannot be built
    pub fn new(options: RemoteConfigOptions) -> Result<Self> {
        options.validate()?;

        let http = reqwest::Client::builder()
            .timeout(options.timeout)
            .build()?;

        Ok(Self { http, options })
    }

    /// Creates a client around a preconfigured HTTP client.
    ///
    /// The options' timeout is ignored in favor of the client's own.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] / [`Error::Url`] if the options are invalid.
    pub fn with_http_client(options: RemoteConfigOptions, http: reqwest::Client) -> Result<Self> {
        options.validate()?;
        Ok(Self { http, options })
    }

    /// Options this client was built with.
    #[inline]
    #[must_use]
    pub fn options(&self) -> &RemoteConfigOptions {
        &self.options
    }
}

#[async_trait]
impl ConfigSource for RemoteConfigClient {
    async fn fetch_game_config(&self) -> Result<GameConfig> {
        let url = self.options.request_url()?;
        debug!(%url, "Fetching remote configuration");

        let body: Value = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let blob = body
            .get("data")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::network("configuration response has no `data` string"))?;

        let decrypted = decrypt_payload(blob, &self.options.key)?;
        let config = GameConfig::from_json(&decrypted)?;

        debug!(game_url = %config.game_url, "Remote configuration resolved");
        Ok(config)
    }
}

// ============================================================================
// Tests
// ============================================================================
