//! Asset manifest: what gets cached at install time, and under which
//! generation tag.

use serde::{Deserialize, Serialize};

/// Generation tag of the stock manifest.
pub const DEFAULT_GENERATION: &str = "sport-pwa-v1";

/// Assets of the stock manifest.
pub const DEFAULT_ASSETS: [&str; 5] = ["/", "/index.html", "/style.css", "/app.js", "/manifest.json"];

/// Ordered list of asset paths plus the cache generation they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Cache generation tag; also the bucket name
    pub generation: String,
    /// Asset paths, in install order
    pub assets: Vec<String>,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            generation: DEFAULT_GENERATION.to_string(),
            assets: DEFAULT_ASSETS.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl AssetManifest {
    /// Create a manifest. Repeated paths are kept once, first occurrence wins.
    pub fn new(generation: impl Into<String>, assets: Vec<String>) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(assets.len());
        for asset in assets {
            if !unique.contains(&asset) {
                unique.push(asset);
            }
        }

        Self {
            generation: generation.into(),
            assets: unique,
        }
    }

    /// Check whether a path is part of the manifest.
    pub fn contains(&self, path: &str) -> bool {
        self.assets.iter().any(|a| a == path)
    }
}
