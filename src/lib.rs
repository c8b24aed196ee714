//! trainplan - Offline-first progressive training planner
//!
//! Generates a 52-week bodyweight and running program with automatic
//! week-over-week progression, per-week manual overrides, vacation
//! skipping and per-day completion tracking, all persisted locally. An
//! offline asset cache keeps a versioned copy of the app's static files.

pub mod offline;
pub mod program;
pub mod schedule;
pub mod storage;
pub mod tracker;

// Re-export commonly used types
pub use offline::{AssetCacheWorker, AssetManifest, CacheStorage, HttpFetcher};
pub use program::{DayPlan, Exercise, ProgramGenerator, WeekPrescription};
pub use schedule::{DayCoordinate, IndexMode, MonthCursor, MonthView};
pub use storage::{AppConfig, Database, KvStore};
pub use tracker::{DayStatus, FinishOutcome, Today, Tracker};
