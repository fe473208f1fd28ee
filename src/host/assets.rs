//! Asset sources for the companion script.
//!
//! The companion script ships with the host application. [`AssetDir`]
//! reads it from an asset directory on disk; [`StaticAssets`] serves
//! assets embedded in the binary.

// ============================================================================
// Imports
// ============================================================================

use std::fs;
use std::path::{Component, Path, PathBuf};

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::error::{Error, Result};

use super::HostContext;

// ============================================================================
// AssetDir
// ============================================================================

/// Assets stored as files under a root directory.
#[derive(Debug, Clone)]
pub struct AssetDir {
    root: PathBuf,
}

impl AssetDir {
    /// Creates an asset source rooted at `root`.
    #[inline]
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl HostContext for AssetDir {
    fn read_asset(&self, name: &str) -> Result<String> {
        let relative = Path::new(name);
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(Error::asset(name, "asset name must be a relative path"));
        }

        let path = self.root.join(relative);
        trace!(path = %path.display(), "Reading asset");

        fs::read_to_string(&path).map_err(|e| Error::asset(name, e.to_string()))
    }
}

// ============================================================================
// StaticAssets
// ============================================================================

/// In-memory assets keyed by name.
#[derive(Debug, Clone, Default)]
pub struct StaticAssets {
    assets: FxHashMap<String, String>,
}

impl StaticAssets {
    /// Creates an empty asset set.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an asset.
    #[must_use]
    pub fn with_asset(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.assets.insert(name.into(), content.into());
        self
    }
}

impl HostContext for StaticAssets {
    fn read_asset(&self, name: &str) -> Result<String> {
        self.assets
            .get(name)
            .cloned()
            .ok_or_else(|| Error::asset(name, "not found"))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_dir_reads_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("bridge.js"), "window.x = 1;").expect("write");

        let assets = AssetDir::new(dir.path());
        assert_eq!(assets.read_asset("bridge.js").expect("read"), "window.x = 1;");
    }

    #[test]
    fn test_asset_dir_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = AssetDir::new(dir.path()).read_asset("missing.js").unwrap_err();

        assert!(matches!(err, Error::Asset { ref name, .. } if name == "missing.js"));
    }

    #[test]
    fn test_asset_dir_rejects_traversal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let assets = AssetDir::new(dir.path());

        assert!(assets.read_asset("../secret").is_err());
        assert!(assets.read_asset("/etc/passwd").is_err());
    }

    #[test]
    fn test_static_assets() {
        let assets = StaticAssets::new().with_asset("bridge.js", "1");

        assert_eq!(assets.read_asset("bridge.js").expect("read"), "1");
        assert!(assets.read_asset("other.js").is_err());
    }
}
