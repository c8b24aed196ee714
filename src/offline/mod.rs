//! Offline asset cache.
//!
//! Keeps a versioned copy of the app's static assets:
//! - Install stores a fixed manifest under a generation tag
//! - Activate deletes every other generation
//! - Fetch serves from the active generation, falling back to the network

pub mod fetcher;
pub mod manifest;
pub mod storage;
pub mod worker;

use thiserror::Error;

use crate::storage::DatabaseError;

// Re-export main types
pub use fetcher::{AssetFetcher, HttpFetcher};
pub use manifest::AssetManifest;
pub use storage::{BucketInfo, CacheStorage};
pub use worker::{AssetCacheWorker, AssetSource, CacheStatus, ServedAsset, WorkerState};

/// A stored or fetched response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// Request path the response answers
    pub path: String,
    /// HTTP status code
    pub status: u16,
    /// Content-Type header, if any
    pub content_type: Option<String>,
    /// Response body
    pub body: Vec<u8>,
}

/// Asset cache errors
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("HTTP client setup failed: {0}")]
    ClientSetup(String),

    #[error("Fetch of {path} failed: {reason}")]
    FetchFailed { path: String, reason: String },

    #[error("Fetch of {path} returned status {status}")]
    BadStatus { path: String, status: u16 },

    #[error("Invalid lifecycle transition: {0}")]
    InvalidState(String),

    #[error("Storage error: {0}")]
    Storage(#[from] DatabaseError),
}
