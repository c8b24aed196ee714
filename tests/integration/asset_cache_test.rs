//! Integration tests for the offline asset cache lifecycle.
//!
//! Uses an in-memory origin whose contents can change between installs,
//! the way a redeployed site would.

use std::collections::HashMap;
use std::sync::Mutex;

use tempfile::tempdir;
use trainplan::offline::{
    Asset, AssetCacheWorker, AssetFetcher, AssetManifest, AssetSource, CacheError, CacheStorage,
    WorkerState,
};
use trainplan::storage::Database;

/// Origin serving whatever was last deployed to it.
#[derive(Default)]
struct MockOrigin {
    files: Mutex<HashMap<String, String>>,
}

impl MockOrigin {
    fn deploy(&self, version: &str, paths: &[&str]) {
        let mut files = self.files.lock().unwrap();
        files.clear();
        for path in paths {
            files.insert(path.to_string(), format!("{} {}", version, path));
        }
    }
}

impl AssetFetcher for MockOrigin {
    async fn fetch(&self, path: &str) -> Result<Asset, CacheError> {
        let body = self.files.lock().unwrap().get(path).cloned();
        match body {
            Some(body) => Ok(Asset {
                path: path.to_string(),
                status: 200,
                content_type: Some("text/plain".to_string()),
                body: body.into_bytes(),
            }),
            None => Err(CacheError::BadStatus {
                path: path.to_string(),
                status: 404,
            }),
        }
    }
}

const FILES: [&str; 3] = ["/", "/index.html", "/app.js"];

fn manifest(generation: &str) -> AssetManifest {
    AssetManifest::new(generation, FILES.iter().map(|p| p.to_string()).collect())
}

#[tokio::test]
async fn test_new_generation_replaces_old() {
    let db = Database::open_in_memory().unwrap();
    let storage = CacheStorage::new(db.connection());
    let origin = MockOrigin::default();
    origin.deploy("v1", &FILES);

    let mut worker = AssetCacheWorker::new(storage, origin);
    worker.install(&manifest("sport-pwa-v1")).await.unwrap();
    worker.activate().await.unwrap();

    let mut worker = AssetCacheWorker::resume(storage, MockOrigin::default(), "sport-pwa-v1").unwrap();
    // The origin is empty now; only the cache can answer
    let served = worker.fetch("/app.js").await.unwrap();
    assert_eq!(served.source, AssetSource::Cache);
    assert_eq!(served.asset.body, b"v1 /app.js");

    // Install v2 from a fresh worker against a redeployed origin
    let origin = MockOrigin::default();
    origin.deploy("v2", &FILES);
    worker = AssetCacheWorker::resume(storage, origin, "sport-pwa-v1").unwrap();
    worker.install(&manifest("sport-pwa-v2")).await.unwrap();

    // Both generations exist until activation; v1 still serves
    assert_eq!(storage.bucket_names().unwrap().len(), 2);
    let served = worker.fetch("/app.js").await.unwrap();
    assert_eq!(served.asset.body, b"v1 /app.js");

    let deleted = worker.activate().await.unwrap();
    assert_eq!(deleted, vec!["sport-pwa-v1".to_string()]);
    assert_eq!(storage.bucket_names().unwrap(), vec!["sport-pwa-v2".to_string()]);

    let served = worker.fetch("/app.js").await.unwrap();
    assert_eq!(served.source, AssetSource::Cache);
    assert_eq!(served.asset.body, b"v2 /app.js");
}

#[tokio::test]
async fn test_failed_install_keeps_previous_generation() {
    let db = Database::open_in_memory().unwrap();
    let storage = CacheStorage::new(db.connection());
    let origin = MockOrigin::default();
    origin.deploy("v1", &FILES);

    let mut worker = AssetCacheWorker::new(storage, origin);
    worker.install(&manifest("sport-pwa-v1")).await.unwrap();
    worker.activate().await.unwrap();

    // Half-deployed origin: app.js is missing
    let origin = MockOrigin::default();
    origin.deploy("v2", &["/", "/index.html"]);
    let mut worker = AssetCacheWorker::resume(storage, origin, "sport-pwa-v1").unwrap();

    let result = worker.install(&manifest("sport-pwa-v2")).await;
    assert!(matches!(result, Err(CacheError::BadStatus { status: 404, .. })));
    assert_eq!(
        worker.state(),
        &WorkerState::Installed("sport-pwa-v1".to_string())
    );
    assert!(!storage.has_bucket("sport-pwa-v2").unwrap());

    let served = worker.fetch("/app.js").await.unwrap();
    assert_eq!(served.source, AssetSource::Cache);
    assert_eq!(served.asset.body, b"v1 /app.js");
}

#[tokio::test]
async fn test_cache_persists_on_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("trainplan.db");

    {
        let db = Database::open(&path).unwrap();
        let origin = MockOrigin::default();
        origin.deploy("v1", &FILES);
        let mut worker = AssetCacheWorker::new(CacheStorage::new(db.connection()), origin);
        assert_eq!(worker.install(&manifest("sport-pwa-v1")).await.unwrap(), 3);
        worker.activate().await.unwrap();
    }

    let db = Database::open(&path).unwrap();
    let storage = CacheStorage::new(db.connection());
    let worker = AssetCacheWorker::resume(storage, MockOrigin::default(), "sport-pwa-v1").unwrap();

    let status = worker.status().unwrap();
    assert_eq!(status.active.as_deref(), Some("sport-pwa-v1"));
    assert_eq!(status.buckets[0].entries, 3);

    // Uncached paths go to the network, which is empty here
    let miss = worker.fetch("/style.css").await;
    assert!(matches!(miss, Err(CacheError::BadStatus { .. })));
}

#[tokio::test]
async fn test_restart_between_install_and_activate() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("trainplan.db");

    // Run 1: v1 installed and activated
    {
        let db = Database::open(&path).unwrap();
        let origin = MockOrigin::default();
        origin.deploy("v1", &FILES);
        let mut worker = AssetCacheWorker::new(CacheStorage::new(db.connection()), origin);
        worker.install(&manifest("sport-pwa-v1")).await.unwrap();
        worker.activate().await.unwrap();
    }

    // Run 2: config now names v2, nothing installed for it yet
    {
        let db = Database::open(&path).unwrap();
        let storage = CacheStorage::new(db.connection());
        let origin = MockOrigin::default();
        origin.deploy("v2", &FILES);
        let mut worker = AssetCacheWorker::resume(storage, origin, "sport-pwa-v2").unwrap();
        assert_eq!(worker.active_generation(), Some("sport-pwa-v1"));

        let served = worker.fetch("/app.js").await.unwrap();
        assert_eq!(served.source, AssetSource::Cache);
        assert_eq!(served.asset.body, b"v1 /app.js");

        worker.install(&manifest("sport-pwa-v2")).await.unwrap();
    }

    // Run 3: v2 installed but not activated; v1 keeps serving
    {
        let db = Database::open(&path).unwrap();
        let storage = CacheStorage::new(db.connection());
        let mut worker =
            AssetCacheWorker::resume(storage, MockOrigin::default(), "sport-pwa-v2").unwrap();
        assert_eq!(
            worker.state(),
            &WorkerState::Installed("sport-pwa-v2".to_string())
        );
        assert_eq!(worker.active_generation(), Some("sport-pwa-v1"));

        let served = worker.fetch("/app.js").await.unwrap();
        assert_eq!(served.asset.body, b"v1 /app.js");

        let deleted = worker.activate().await.unwrap();
        assert_eq!(deleted, vec!["sport-pwa-v1".to_string()]);
    }

    // Run 4: the activation was persisted
    let db = Database::open(&path).unwrap();
    let storage = CacheStorage::new(db.connection());
    let worker = AssetCacheWorker::resume(storage, MockOrigin::default(), "sport-pwa-v2").unwrap();
    assert_eq!(worker.active_generation(), Some("sport-pwa-v2"));

    let served = worker.fetch("/app.js").await.unwrap();
    assert_eq!(served.source, AssetSource::Cache);
    assert_eq!(served.asset.body, b"v2 /app.js");
}
