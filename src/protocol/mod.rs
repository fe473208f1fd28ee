//! Wire protocol shared with the companion script.
//!
//! This module defines the message envelope and the frozen conventions
//! used to move it between native code and web content.
//!
//! # Protocol Overview
//!
//! | Direction | Transport |
//! |-----------|-----------|
//! | Native → Web | `javascript:` command carrying an escaped message |
//! | Web → Native | Navigation to a reserved `yy://` URL |
//!
//! Web content never pushes messages directly: it navigates to the
//! override scheme, native code answers with the fetch-queue command and
//! the companion replies with its whole queue on a return-data URL.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `escape` | Script-literal encoder/decoder pair |
//! | `message` | Message envelope |
//! | `wire` | URL schemes, command templates, callback-id format |

// ============================================================================
// Submodules
// ============================================================================

/// Script-literal escaping.
pub mod escape;

/// Message envelope.
pub mod message;

/// Frozen wire constants and parsers.
pub mod wire;

// ============================================================================
// Re-exports
// ============================================================================

pub use escape::{decode_script_literal, encode_script_literal};
pub use message::{Message, MessageKind};
pub use wire::{ReturnData, UrlKind};
