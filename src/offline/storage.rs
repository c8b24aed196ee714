//! SQLite-backed cache buckets.
//!
//! A bucket holds the responses of one cache generation, keyed by the
//! exact request path.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;

use crate::storage::DatabaseError;

use super::Asset;

/// Bucket name and number of stored entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketInfo {
    pub name: String,
    pub entries: usize,
}

/// Cache bucket storage over a database connection.
#[derive(Clone, Copy)]
pub struct CacheStorage<'a> {
    conn: &'a Connection,
}

impl<'a> CacheStorage<'a> {
    /// Create a cache storage with a database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Names of every existing bucket.
    pub fn bucket_names(&self) -> Result<Vec<String>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM cache_buckets ORDER BY created_at, name")
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| row.get(0))
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        rows.collect::<Result<Vec<String>, _>>()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))
    }

    /// Check whether a bucket exists.
    pub fn has_bucket(&self, name: &str) -> Result<bool, DatabaseError> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM cache_buckets WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        Ok(count > 0)
    }

    /// Store a batch of assets in a bucket, all or nothing.
    ///
    /// The bucket is created if needed. Its previous entries are dropped, so
    /// after a reinstall the bucket holds exactly `assets`.
    pub fn put_all(&self, bucket: &str, assets: &[Asset]) -> Result<(), DatabaseError> {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        let now = Utc::now().to_rfc3339();

        tx.execute(
            "INSERT OR IGNORE INTO cache_buckets (name, created_at) VALUES (?1, ?2)",
            params![bucket, now],
        )
        .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        tx.execute("DELETE FROM cache_entries WHERE bucket = ?1", params![bucket])
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        for asset in assets {
            tx.execute(
                "INSERT OR REPLACE INTO cache_entries
                 (bucket, path, status, content_type, body, cached_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    bucket,
                    asset.path,
                    asset.status,
                    asset.content_type,
                    asset.body,
                    now,
                ],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        }

        tx.commit()
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))
    }

    /// Exact-path lookup in one bucket.
    pub fn match_entry(&self, bucket: &str, path: &str) -> Result<Option<Asset>, DatabaseError> {
        self.conn
            .query_row(
                "SELECT path, status, content_type, body FROM cache_entries
                 WHERE bucket = ?1 AND path = ?2",
                params![bucket, path],
                |row| {
                    Ok(Asset {
                        path: row.get(0)?,
                        status: row.get(1)?,
                        content_type: row.get(2)?,
                        body: row.get(3)?,
                    })
                },
            )
            .optional()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))
    }

    /// Number of entries in a bucket.
    pub fn entry_count(&self, bucket: &str) -> Result<usize, DatabaseError> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM cache_entries WHERE bucket = ?1",
                params![bucket],
                |row| row.get(0),
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        Ok(count as usize)
    }

    /// Every bucket with its entry count.
    pub fn buckets(&self) -> Result<Vec<BucketInfo>, DatabaseError> {
        self.bucket_names()?
            .into_iter()
            .map(|name| {
                let entries = self.entry_count(&name)?;
                Ok(BucketInfo { name, entries })
            })
            .collect()
    }

    /// Name of the bucket marked active, if any.
    pub fn active_bucket(&self) -> Result<Option<String>, DatabaseError> {
        self.conn
            .query_row(
                "SELECT name FROM cache_buckets WHERE active = 1 ORDER BY name LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))
    }

    /// Mark a bucket active and delete every other bucket with its entries,
    /// in one transaction.
    ///
    /// Returns the names of the deleted buckets, or `None` (with nothing
    /// changed) when the bucket does not exist.
    pub fn activate_bucket(&self, name: &str) -> Result<Option<Vec<String>>, DatabaseError> {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        let marked = tx
            .execute(
                "UPDATE cache_buckets SET active = (name = ?1)",
                params![name],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let stale: Vec<String> = {
            let mut stmt = tx
                .prepare("SELECT name FROM cache_buckets WHERE name != ?1 ORDER BY created_at, name")
                .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
            let rows = stmt
                .query_map(params![name], |row| row.get(0))
                .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
            let names = rows
                .collect::<Result<Vec<String>, _>>()
                .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
            names
        };

        if marked == stale.len() {
            // Dropping the transaction rolls the flag update back
            return Ok(None);
        }

        tx.execute("DELETE FROM cache_entries WHERE bucket != ?1", params![name])
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        tx.execute("DELETE FROM cache_buckets WHERE name != ?1", params![name])
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        tx.commit()
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        Ok(Some(stale))
    }
}
