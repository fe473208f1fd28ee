//! Launch decision: splash, reachability, game URL.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::time::sleep;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::Result;
use crate::remote::ConfigSource;

use super::reachability::ReachabilityProbe;

// ============================================================================
// Constants
// ============================================================================

/// Default time the splash stays up before the first decision.
pub const DEFAULT_SPLASH_DELAY: Duration = Duration::from_millis(1800);

/// Default wait given to the game URL before handing off.
pub const DEFAULT_GAME_LOAD_DELAY: Duration = Duration::from_millis(1000);

// ============================================================================
// LaunchOptions
// ============================================================================

/// Timings of the launch flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchOptions {
    /// Minimum splash duration.
    pub splash_delay: Duration,
    /// Minimum wait while the game URL is resolved.
    pub game_load_delay: Duration,
}

impl LaunchOptions {
    /// Creates options with the default timings.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the splash delay.
    #[inline]
    #[must_use]
    pub fn with_splash_delay(mut self, delay: Duration) -> Self {
        self.splash_delay = delay;
        self
    }

    /// Sets the game-load delay.
    #[inline]
    #[must_use]
    pub fn with_game_load_delay(mut self, delay: Duration) -> Self {
        self.game_load_delay = delay;
        self
    }

    /// Zero delays, for tests and headless runs.
    #[inline]
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            splash_delay: Duration::ZERO,
            game_load_delay: Duration::ZERO,
        }
    }
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            splash_delay: DEFAULT_SPLASH_DELAY,
            game_load_delay: DEFAULT_GAME_LOAD_DELAY,
        }
    }
}

// ============================================================================
// GameUrlSlot
// ============================================================================

/// Shared slot holding the resolved game URL.
///
/// Written once by the launcher and read by whatever loads the game.
#[derive(Debug, Clone, Default)]
pub struct GameUrlSlot {
    inner: Arc<RwLock<Option<Url>>>,
}

impl GameUrlSlot {
    /// Creates an empty slot.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the URL, replacing any previous one.
    pub fn set(&self, url: Url) {
        *self.inner.write() = Some(url);
    }

    /// Returns a copy of the stored URL.
    #[must_use]
    pub fn get(&self) -> Option<Url> {
        self.inner.read().clone()
    }

    /// Returns `true` if a URL has been stored.
    #[inline]
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.inner.read().is_some()
    }
}

// ============================================================================
// LaunchDecision
// ============================================================================

/// Outcome of [`Launcher::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchDecision {
    /// The network is unreachable; show the offline experience.
    Offline,
    /// Load the game at this URL.
    Game(Url),
    /// Online, but the game URL could not be resolved.
    Unresolved,
}

impl LaunchDecision {
    /// Returns the game URL, if one was resolved.
    #[must_use]
    pub fn game_url(&self) -> Option<&Url> {
        match self {
            Self::Game(url) => Some(url),
            _ => None,
        }
    }
}

// ============================================================================
// Launcher
// ============================================================================

/// Drives the launch flow.
pub struct Launcher<P, S> {
    probe: P,
    source: S,
    slot: GameUrlSlot,
    options: LaunchOptions,
}

impl<P, S> Launcher<P, S>
where
    P: ReachabilityProbe,
    S: ConfigSource,
{
    /// Creates a launcher with default timings and a fresh slot.
    #[must_use]
    pub fn new(probe: P, source: S) -> Self {
        Self {
            probe,
            source,
            slot: GameUrlSlot::new(),
            options: LaunchOptions::default(),
        }
    }

    /// Overrides the timings.
    #[must_use]
    pub fn with_options(mut self, options: LaunchOptions) -> Self {
        self.options = options;
        self
    }

    /// Shares an existing slot instead of a fresh one.
    #[must_use]
    pub fn with_slot(mut self, slot: GameUrlSlot) -> Self {
        self.slot = slot;
        self
    }

    /// Slot the resolved URL is written to.
    #[inline]
    #[must_use]
    pub fn slot(&self) -> &GameUrlSlot {
        &self.slot
    }

    /// Runs the launch flow.
    ///
    /// The splash delay and the reachability probe run concurrently, as do
    /// the configuration fetch and the game-load delay. Resolution failures
    /// are logged and reported as [`LaunchDecision::Unresolved`].
    pub async fn run(&self) -> LaunchDecision {
        let ((), reachable) = tokio::join!(
            sleep(self.options.splash_delay),
            self.probe.is_reachable()
        );

        if !reachable {
            info!("Network unreachable, launching offline");
            return LaunchDecision::Offline;
        }

        let (resolved, ()) = tokio::join!(self.resolve(), sleep(self.options.game_load_delay));

        match resolved {
            Ok(url) => {
                info!(%url, "Launching game");
                LaunchDecision::Game(url)
            }
            Err(e) => {
                warn!(error = %e, "Failed to resolve game URL");
                LaunchDecision::Unresolved
            }
        }
    }

    async fn resolve(&self) -> Result<Url> {
        let config = self.source.fetch_game_config().await?;
        let url = config.url()?;

        debug!(%url, "Game URL stored");
        self.slot.set(url.clone());
        Ok(url)
    }
}

impl<P, S> std::fmt::Debug for Launcher<P, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Launcher")
            .field("slot", &self.slot)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
