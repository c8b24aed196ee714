//! JSON key-value store over the `kv_store` table.
//!
//! Every ledger in the tracker persists through this adapter. Keys are
//! built from [`StoreKey`] only, and values are JSON documents. A value
//! that no longer parses as the requested type is treated as absent so
//! callers fall back to their defaults instead of failing.

use std::fmt;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{de::DeserializeOwned, Serialize};

use crate::program::types::OverrideKey;
use crate::storage::database::DatabaseError;

/// Typed key for every value the tracker persists.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StoreKey {
    /// Set of vacation day indices.
    Vacations,
    /// Program pointer: next day index to present as today.
    ProgramDay,
    /// Completion flag of one day index.
    Done(u32),
    /// Manual prescription for one exercise in one week.
    ManualOverride(OverrideKey),
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKey::Vacations => write!(f, "vacances"),
            StoreKey::ProgramDay => write!(f, "programDay"),
            StoreKey::Done(index) => write!(f, "done-{}", index),
            StoreKey::ManualOverride(key) => {
                write!(f, "manual-{}-week-{}", key.exercise.name(), key.week)
            }
        }
    }
}

/// Borrowing view over the key-value table.
#[derive(Clone, Copy)]
pub struct KvStore<'a> {
    conn: &'a Connection,
}

impl<'a> KvStore<'a> {
    /// Create a store over an open connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Read the raw JSON text stored under a key.
    pub fn get_raw(&self, key: &StoreKey) -> Result<Option<String>, DatabaseError> {
        self.conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key.to_string()],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))
    }

    /// Write raw text under a key, replacing any previous value.
    pub fn set_raw(&self, key: &StoreKey, value: &str) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key.to_string(), value, Utc::now().to_rfc3339()],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        Ok(())
    }

    /// Load and decode a value.
    ///
    /// Returns `None` when the key is missing or its value does not decode
    /// as `T`.
    pub fn load<T: DeserializeOwned>(&self, key: &StoreKey) -> Result<Option<T>, DatabaseError> {
        let Some(raw) = self.get_raw(key)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!("Ignoring malformed value under '{}': {}", key, e);
                Ok(None)
            }
        }
    }

    /// Load a value, substituting `fallback` when it is absent or malformed.
    pub fn load_or<T: DeserializeOwned>(&self, key: &StoreKey, fallback: T) -> Result<T, DatabaseError> {
        Ok(self.load(key)?.unwrap_or(fallback))
    }

    /// Encode and store a value.
    pub fn save<T: Serialize + ?Sized>(&self, key: &StoreKey, value: &T) -> Result<(), DatabaseError> {
        let json = serde_json::to_string(value)
            .map_err(|e| DatabaseError::SerializationError(e.to_string()))?;
        self.set_raw(key, &json)
    }

    /// Delete a key. Returns whether a value was present.
    pub fn remove(&self, key: &StoreKey) -> Result<bool, DatabaseError> {
        let deleted = self
            .conn
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key.to_string()])
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        Ok(deleted > 0)
    }
}
