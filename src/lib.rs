//! Web-view bridge - Bidirectional messaging between native code and
//! hosted web content.
//!
//! This library implements the native side of the `WebViewJavascriptBridge`
//! protocol: a companion script injected into the page queues messages and
//! signals them by navigating to reserved `yy://` URLs, while native code
//! delivers messages by executing `javascript:` commands.
//!
//! # Architecture
//!
//! - **Native side (Rust)**: [`Bridge`] owns the handler registry, the
//!   pending-callback table and the startup buffer
//! - **Web side (companion script)**: queues outbound messages and calls
//!   registered JavaScript handlers
//! - **Host**: a [`HostBinding`] executes script and forwards page
//!   lifecycle and navigation hooks to the bridge
//!
//! Key design principles:
//!
//! - The bridge lives on the host's UI thread; other threads post work
//!   through a [`BridgeHandle`]
//! - Messages sent before the first page finishes loading are buffered and
//!   replayed in order
//! - Every callback is invoked at most once
//!
//! # Quick Start
//!
//! ```ignore
//! use webview_bridge::{Bridge, Responder};
//!
//! let mut bridge = Bridge::new(host);
//!
//! bridge.register_handler("submitFromWeb", |data: Option<String>, responder: Responder| {
//!     println!("web says {data:?}");
//!     responder.respond("ok");
//! });
//!
//! bridge.call_handler("functionInJs", "hello", |reply| {
//!     println!("web replied {reply:?}");
//! });
//!
//! // From the host's web-view callbacks:
//! bridge.on_page_finished();
//! let consumed = bridge.should_override_url_loading("yy://__QUEUE_MESSAGE__/");
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`bridge`] | Bridge core, handlers, builder and cross-thread handle |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`host`] | Host binding traits and asset sources |
//! | [`identifiers`] | Callback ids and their generator |
//! | [`launch`] | Splash, reachability and game URL resolution |
//! | [`protocol`] | Message model, escaping and wire constants |
//! | [`remote`] | Encrypted remote configuration |

// ============================================================================
// Modules
// ============================================================================

/// Bridge core and handler registry.
///
/// - [`Bridge`] - Message routing between native code and the page
/// - [`BridgeHandle`] - Thread-safe entry point
/// - [`Responder`] - Reply capability handed to handlers
pub mod bridge;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Host web-view binding.
pub mod host;

/// Callback identifiers.
pub mod identifiers;

/// Application launch flow.
pub mod launch;

/// Wire protocol shared with the companion script.
pub mod protocol;

/// Remote configuration fetch and decryption.
pub mod remote;

// ============================================================================
// Re-exports
// ============================================================================

// Bridge types
pub use bridge::{
    Bridge, BridgeBuilder, BridgeHandle, BridgeHandler, BridgeState, DefaultHandler, Responder,
    ResponseCallback,
};

// Error types
pub use error::{Error, Result};

// Host types
pub use host::{AssetDir, HostBinding, HostContext, StaticAssets};

// Identifier types
pub use identifiers::{CallbackId, CallbackIdGenerator};

// Launch types
pub use launch::{GameUrlSlot, LaunchDecision, LaunchOptions, Launcher, TcpProbe};

// Protocol types
pub use protocol::{Message, MessageKind};

// Remote configuration types
pub use remote::{ConfigSource, GameConfig, RemoteConfigClient, RemoteConfigOptions};
