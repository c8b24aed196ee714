//! Database schema definitions for trainplan.

/// SQL schema for the key-value store backing the training ledgers.
pub const SCHEMA: &str = r#"
-- Key-value table: every value is a JSON document
CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;

/// SQL for the schema version table.
pub const SCHEMA_VERSION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL
);
"#;

/// Current schema version
pub const CURRENT_VERSION: i32 = 3;

/// SQL for migration from v1 to v2 (offline asset cache tables)
pub const MIGRATION_V1_TO_V2: &str = r#"
-- One row per cache generation
CREATE TABLE IF NOT EXISTS cache_buckets (
    name TEXT PRIMARY KEY,
    created_at TEXT NOT NULL
);

-- Stored responses, keyed by bucket and exact request path
CREATE TABLE IF NOT EXISTS cache_entries (
    bucket TEXT NOT NULL REFERENCES cache_buckets(name),
    path TEXT NOT NULL,
    status INTEGER NOT NULL,
    content_type TEXT,
    body BLOB NOT NULL,
    cached_at TEXT NOT NULL,
    PRIMARY KEY (bucket, path)
);

CREATE INDEX IF NOT EXISTS idx_cache_entries_bucket ON cache_entries(bucket);
"#;

/// SQL for migration from v2 to v3 (persisted active cache generation)
pub const MIGRATION_V2_TO_V3: &str = r#"
-- At most one bucket has active = 1
ALTER TABLE cache_buckets ADD COLUMN active INTEGER NOT NULL DEFAULT 0;
"#;
