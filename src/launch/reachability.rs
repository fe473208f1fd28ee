//! Network reachability probing.

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

// ============================================================================
// Constants
// ============================================================================

/// Default probe target (public DNS over TCP).
pub const DEFAULT_PROBE_TARGET: &str = "8.8.8.8:53";

/// Default probe timeout.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

// ============================================================================
// ReachabilityProbe
// ============================================================================

/// Answers whether the network is usable.
#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    /// Returns `true` if the network is reachable.
    async fn is_reachable(&self) -> bool;
}

// ============================================================================
// TcpProbe
// ============================================================================

/// Reports reachable when a TCP connection to the target succeeds within
/// the timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcpProbe {
    target: String,
    timeout: Duration,
}

impl TcpProbe {
    /// Creates a probe for `target` (`host:port`).
    #[must_use]
    pub fn new(target: impl Into<String>, timeout: Duration) -> Self {
        Self {
            target: target.into(),
            timeout,
        }
    }

    /// Probe target.
    #[inline]
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }
}

impl Default for TcpProbe {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_TARGET, DEFAULT_PROBE_TIMEOUT)
    }
}

#[async_trait]
impl ReachabilityProbe for TcpProbe {
    async fn is_reachable(&self) -> bool {
        match timeout(self.timeout, TcpStream::connect(&self.target)).await {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                debug!(target = %self.target, error = %e, "Reachability probe failed");
                false
            }
            Err(_) => {
                debug!(target = %self.target, "Reachability probe timed out");
                false
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
