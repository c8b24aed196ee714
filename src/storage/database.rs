//! Database operations using rusqlite.
//!
//! Owns the SQLite connection, creates the schema and runs migrations.
//! Higher-level stores (`KvStore`, `CacheStorage`) borrow the connection.

use crate::storage::schema::{
    CURRENT_VERSION, MIGRATION_V1_TO_V2, MIGRATION_V2_TO_V3, SCHEMA, SCHEMA_VERSION_TABLE,
};
use rusqlite::{Connection, Result as SqliteResult};
use std::path::Path;
use thiserror::Error;

/// Database wrapper for SQLite operations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create a database at the given path.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DatabaseError::IoError(e.to_string()))?;
        }

        let conn =
            Connection::open(path).map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        let db = Self { conn };
        db.initialize()?;

        tracing::debug!("Opened database at {}", path.display());
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        let db = Self { conn };
        db.initialize()?;

        Ok(db)
    }

    /// Initialize the database schema.
    fn initialize(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(SCHEMA_VERSION_TABLE)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

        let current_version = self.schema_version()?;

        if current_version < CURRENT_VERSION {
            self.migrate(current_version)?;
        }

        Ok(())
    }

    /// Get the current schema version.
    pub fn schema_version(&self) -> Result<i32, DatabaseError> {
        let result: SqliteResult<i32> = self.conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        );

        match result {
            Ok(version) => Ok(version),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
            Err(e) => Err(DatabaseError::QueryFailed(e.to_string())),
        }
    }

    /// Run database migrations.
    fn migrate(&self, from_version: i32) -> Result<(), DatabaseError> {
        if from_version < 1 {
            self.apply_migration(1, SCHEMA)?;
        }

        if from_version < 2 {
            self.apply_migration(2, MIGRATION_V1_TO_V2)?;
        }

        if from_version < 3 {
            self.apply_migration(3, MIGRATION_V2_TO_V3)?;
        }

        Ok(())
    }

    fn apply_migration(&self, version: i32, sql: &str) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(sql)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

        self.conn
            .execute(
                "INSERT INTO schema_version (version, applied_at) VALUES (?, datetime('now'))",
                [version],
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

        tracing::info!("Database migrated to version {}", version);
        Ok(())
    }

    /// Get a reference to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

/// Database errors.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}
