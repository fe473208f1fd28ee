//! Host web-view binding.
//!
//! The bridge never talks to a web view directly. It delegates script
//! execution and asset lookup to a [`HostBinding`], and the host forwards
//! its page lifecycle and navigation hooks back to the bridge.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`HostBinding`] | Script execution in hosted content |
//! | [`HostContext`] | Resource lookup (companion script asset) |
//! | [`AssetDir`] | Assets read from a directory |
//! | [`StaticAssets`] | Assets held in memory |

// ============================================================================
// Submodules
// ============================================================================

/// Asset sources.
pub mod assets;

/// Host binding traits.
pub mod binding;

// ============================================================================
// Re-exports
// ============================================================================

pub use assets::{AssetDir, StaticAssets};
pub use binding::{HostBinding, HostContext};
