//! Builder pattern for bridge configuration.
//!
//! # Example
//!
//! ```ignore
//! use webview_bridge::{Bridge, Responder};
//!
//! let bridge = Bridge::builder()
//!     .companion_asset("js/bridge.js")
//!     .handler("submitFromWeb", |data: Option<String>, responder: Responder| {
//!         responder.respond("submitFromWeb response");
//!     })
//!     .build(host);
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use rustc_hash::FxHashMap;

use crate::host::HostBinding;

use super::core::Bridge;
use super::handler::{BridgeHandler, DefaultHandler};

// ============================================================================
// Constants
// ============================================================================

/// Asset name of the companion script shipped with the host.
pub const DEFAULT_COMPANION_ASSET: &str = "WebViewJavascriptBridge.js";

// ============================================================================
// BridgeBuilder
// ============================================================================

/// Builder for configuring a [`Bridge`].
pub struct BridgeBuilder {
    /// Companion script asset name.
    companion_asset: String,
    /// Handlers registered at construction.
    handlers: FxHashMap<String, Box<dyn BridgeHandler>>,
    /// Handler for unnamed requests.
    default_handler: Option<Box<dyn BridgeHandler>>,
}

impl Default for BridgeBuilder {
    fn default() -> Self {
        Self {
            companion_asset: DEFAULT_COMPANION_ASSET.to_string(),
            handlers: FxHashMap::default(),
            default_handler: Some(Box::new(DefaultHandler)),
        }
    }
}

// ============================================================================
// BridgeBuilder Implementation
// ============================================================================

impl BridgeBuilder {
    /// Creates a builder with the default companion asset and
    /// [`DefaultHandler`].
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the companion script asset name.
    #[inline]
    #[must_use]
    pub fn companion_asset(mut self, name: impl Into<String>) -> Self {
        self.companion_asset = name.into();
        self
    }

    /// Registers a named handler.
    #[must_use]
    pub fn handler(
        mut self,
        name: impl Into<String>,
        handler: impl BridgeHandler + 'static,
    ) -> Self {
        self.handlers.insert(name.into(), Box::new(handler));
        self
    }

    /// Sets the handler for requests without a handler name.
    #[must_use]
    pub fn default_handler(mut self, handler: impl BridgeHandler + 'static) -> Self {
        self.default_handler = Some(Box::new(handler));
        self
    }

    /// Leaves unnamed requests unhandled.
    #[inline]
    #[must_use]
    pub fn without_default_handler(mut self) -> Self {
        self.default_handler = None;
        self
    }

    /// Builds a bridge bound to `host`, in the buffering state.
    #[must_use]
    pub fn build<H: HostBinding>(self, host: H) -> Bridge<H> {
        Bridge::from_parts(host, self.companion_asset, self.handlers, self.default_handler)
    }
}

impl fmt::Debug for BridgeBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeBuilder")
            .field("companion_asset", &self.companion_asset)
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .field("default_handler", &self.default_handler.is_some())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
