//! Native/web-content message bridge.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Bridge`] | Owns the pending callback table, handler registry and startup buffer |
//! | [`BridgeBuilder`] | Fluent configuration builder |
//! | [`BridgeHandle`] | `Send` handle posting work onto the owning context |
//! | [`BridgeHandler`] | Processor for inbound web requests |
//! | [`Responder`] | Response sink handed to handlers |
//!
//! # Example
//!
//! ```ignore
//! use webview_bridge::{Bridge, Responder};
//!
//! let mut bridge = Bridge::new(host);
//! bridge.register_handler("submitFromWeb", |data: Option<String>, responder: Responder| {
//!     responder.respond("submitFromWeb response");
//! });
//!
//! // Buffered until the page signals readiness.
//! bridge.call_handler("functionInJs", "hello", |response| {
//!     println!("web answered: {response:?}");
//! });
//!
//! // From the web view's page-finished and navigation hooks:
//! bridge.on_page_finished();
//! let consumed = bridge.should_override_url_loading(url);
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Fluent builder for bridge configuration.
pub mod builder;

/// Bridge core implementation.
pub mod core;

/// Cross-thread handle.
pub mod handle;

/// Inbound request handlers.
pub mod handler;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::{BridgeBuilder, DEFAULT_COMPANION_ASSET};
pub use core::{Bridge, BridgeState};
pub use handle::BridgeHandle;
pub use handler::{BridgeHandler, DEFAULT_RESPONSE, DefaultHandler, Responder, ResponseCallback};
