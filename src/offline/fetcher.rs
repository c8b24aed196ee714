//! Network side of the asset cache.

use std::time::Duration;

use super::{Asset, CacheError};

/// Trait for asset sources
pub trait AssetFetcher: Send + Sync {
    /// Fetch one asset by path.
    ///
    /// A non-success HTTP status is an error.
    fn fetch(&self, path: &str) -> impl std::future::Future<Output = Result<Asset, CacheError>> + Send;
}

/// Fetches assets over HTTP from a fixed origin.
pub struct HttpFetcher {
    /// HTTP client
    http: reqwest::Client,
    /// Origin the asset paths are resolved against
    origin: String,
}

impl HttpFetcher {
    /// Create a fetcher for an origin such as `http://localhost:8080`.
    pub fn new(origin: impl Into<String>) -> Result<Self, CacheError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| CacheError::ClientSetup(e.to_string()))?;

        Ok(Self {
            http,
            origin: origin.into(),
        })
    }

    /// Full URL of an asset path.
    pub fn url_for(&self, path: &str) -> String {
        let origin = self.origin.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", origin, path)
        } else {
            format!("{}/{}", origin, path)
        }
    }
}

impl AssetFetcher for HttpFetcher {
    async fn fetch(&self, path: &str) -> Result<Asset, CacheError> {
        let url = self.url_for(path);
        tracing::debug!("Fetching {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| CacheError::FetchFailed {
                path: path.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CacheError::BadStatus {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response.bytes().await.map_err(|e| CacheError::FetchFailed {
            path: path.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Asset {
            path: path.to_string(),
            status: status.as_u16(),
            content_type,
            body: body.to_vec(),
        })
    }
}
