//! Remote game configuration.
//!
//! The hosted game's URL is not bundled with the application. At startup
//! the host asks a configuration endpoint for an encrypted blob, decrypts
//! it with a pre-shared key and reads the target URL from the resulting
//! JSON.
//!
//! # Blob Format
//!
//! ```text
//! base64( IV[16] || AES-256-CBC(key, IV, json zero-padded to 16) )
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `client` | HTTP fetch and [`ConfigSource`] |
//! | `crypto` | Blob decryption |
//! | `options` | Endpoint, app identity and key |

// ============================================================================
// Submodules
// ============================================================================

/// Configuration fetching.
pub mod client;

/// Configuration blob decryption.
pub mod crypto;

/// Remote configuration options.
pub mod options;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::{ConfigSource, GameConfig, RemoteConfigClient};
pub use crypto::{decrypt_payload, encrypt_payload};
pub use options::RemoteConfigOptions;
