//! Asset cache lifecycle: install, activate, fetch.
//!
//! The worker holds the lifecycle state and the generation currently
//! serving requests. `install` and `activate` take `&mut self`, so the
//! phases of one worker never overlap.

use futures::future::try_join_all;
use serde::Serialize;

use super::fetcher::AssetFetcher;
use super::manifest::AssetManifest;
use super::storage::{BucketInfo, CacheStorage};
use super::{Asset, CacheError};

/// Lifecycle state. Each variant except `Uninstalled` names the generation
/// it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "generation")]
pub enum WorkerState {
    /// Nothing installed yet
    Uninstalled,
    /// Fetching and storing a manifest
    Installing(String),
    /// Generation stored and ready to activate (or already active)
    Installed(String),
    /// Pruning every other generation
    Activating(String),
}

impl std::fmt::Display for WorkerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkerState::Uninstalled => write!(f, "uninstalled"),
            WorkerState::Installing(g) => write!(f, "installing {}", g),
            WorkerState::Installed(g) => write!(f, "installed {}", g),
            WorkerState::Activating(g) => write!(f, "activating {}", g),
        }
    }
}

/// Where a served asset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetSource {
    Cache,
    Network,
}

/// Response to an intercepted request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServedAsset {
    pub asset: Asset,
    pub source: AssetSource,
}

/// Snapshot of the worker and its buckets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStatus {
    pub state: WorkerState,
    pub active: Option<String>,
    pub buckets: Vec<BucketInfo>,
}

/// Versioned offline cache of a fixed asset manifest.
pub struct AssetCacheWorker<'a, F> {
    storage: CacheStorage<'a>,
    fetcher: F,
    state: WorkerState,
    active: Option<String>,
}

impl<'a, F: AssetFetcher> AssetCacheWorker<'a, F> {
    /// Create an uninstalled worker.
    pub fn new(storage: CacheStorage<'a>, fetcher: F) -> Self {
        Self {
            storage,
            fetcher,
            state: WorkerState::Uninstalled,
            active: None,
        }
    }

    /// Re-attach to the cache left by an earlier run.
    ///
    /// The active generation is the one recorded by the last successful
    /// `activate`, whatever `generation` is. The worker starts installed
    /// with `generation` if its bucket exists (an install that was not
    /// activated yet), otherwise with the active generation, otherwise
    /// uninstalled.
    pub fn resume(storage: CacheStorage<'a>, fetcher: F, generation: &str) -> Result<Self, CacheError> {
        let mut worker = Self::new(storage, fetcher);
        worker.active = storage.active_bucket()?;

        if storage.has_bucket(generation)? {
            worker.state = WorkerState::Installed(generation.to_string());
        } else if let Some(active) = &worker.active {
            worker.state = WorkerState::Installed(active.clone());
        }

        tracing::debug!(
            "Resumed asset cache: {}, active {}",
            worker.state,
            worker.active.as_deref().unwrap_or("none")
        );

        Ok(worker)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> &WorkerState {
        &self.state
    }

    /// Generation serving requests, if any.
    pub fn active_generation(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Fetch every manifest entry and store it in the manifest's bucket.
    ///
    /// If any fetch fails nothing is stored, the worker returns to its
    /// previous state and the active generation keeps serving. Returns the
    /// number of stored assets.
    pub async fn install(&mut self, manifest: &AssetManifest) -> Result<usize, CacheError> {
        if let WorkerState::Installing(g) | WorkerState::Activating(g) = &self.state {
            return Err(CacheError::InvalidState(format!(
                "cannot install {} while {} is in progress",
                manifest.generation, g
            )));
        }

        let generation = manifest.generation.clone();
        let previous = std::mem::replace(&mut self.state, WorkerState::Installing(generation.clone()));
        tracing::info!(
            "Installing asset cache {} ({} assets)",
            generation,
            manifest.assets.len()
        );

        let fetched = try_join_all(manifest.assets.iter().map(|path| self.fetcher.fetch(path))).await;

        let assets = match fetched {
            Ok(assets) => assets,
            Err(e) => {
                tracing::warn!("Install of {} aborted: {}", generation, e);
                self.state = previous;
                return Err(e);
            }
        };

        if let Err(e) = self.storage.put_all(&generation, &assets) {
            tracing::warn!("Install of {} aborted: {}", generation, e);
            self.state = previous;
            return Err(e.into());
        }

        self.state = WorkerState::Installed(generation.clone());
        tracing::info!("Installed asset cache {}", generation);

        Ok(assets.len())
    }

    /// Make the installed generation active and delete every other bucket.
    ///
    /// The switch and the deletions are committed together, and the active
    /// generation is persisted for `resume`. Returns the names of the
    /// deleted buckets.
    pub async fn activate(&mut self) -> Result<Vec<String>, CacheError> {
        let generation = match &self.state {
            WorkerState::Installed(g) => g.clone(),
            other => {
                return Err(CacheError::InvalidState(format!("cannot activate while {}", other)));
            }
        };

        self.state = WorkerState::Activating(generation.clone());
        let result = self.storage.activate_bucket(&generation);
        self.state = WorkerState::Installed(generation.clone());

        let Some(deleted) = result? else {
            return Err(CacheError::InvalidState(format!(
                "bucket {} no longer exists",
                generation
            )));
        };

        for name in &deleted {
            tracing::debug!("Deleted stale cache bucket {}", name);
        }

        self.active = Some(generation.clone());
        tracing::info!(
            "Activated asset cache {} (removed {} stale generations)",
            generation,
            deleted.len()
        );

        Ok(deleted)
    }

    /// Serve a request: the active bucket first, the network otherwise.
    ///
    /// Network responses are not written back to the cache.
    pub async fn fetch(&self, path: &str) -> Result<ServedAsset, CacheError> {
        if let Some(generation) = &self.active {
            if let Some(asset) = self.storage.match_entry(generation, path)? {
                tracing::debug!("Cache hit for {} in {}", path, generation);
                return Ok(ServedAsset {
                    asset,
                    source: AssetSource::Cache,
                });
            }
        }

        let asset = self.fetcher.fetch(path).await?;
        Ok(ServedAsset {
            asset,
            source: AssetSource::Network,
        })
    }

    /// Current state, active generation and bucket summary.
    pub fn status(&self) -> Result<CacheStatus, CacheError> {
        Ok(CacheStatus {
            state: self.state.clone(),
            active: self.active.clone(),
            buckets: self.storage.buckets()?,
        })
    }
}
