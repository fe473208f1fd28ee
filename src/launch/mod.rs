//! Application launch flow.
//!
//! Mirrors what the host application does before the bridge exists:
//! show a splash for a fixed delay, check that the network is reachable,
//! and resolve the game URL from the remote configuration.
//!
//! # Flow
//!
//! ```text
//! splash delay ─┬─► unreachable ─► Offline
//!               └─► reachable ─► fetch config ─┬─► Game(url)
//!                                              └─► Unresolved (logged)
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Launch decision logic.
pub mod launcher;

/// Network reachability probing.
pub mod reachability;

// ============================================================================
// Re-exports
// ============================================================================

pub use launcher::{GameUrlSlot, LaunchDecision, LaunchOptions, Launcher};
pub use reachability::{ReachabilityProbe, TcpProbe};
