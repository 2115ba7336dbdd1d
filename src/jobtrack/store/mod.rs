//! # Storage Layer
//!
//! Two pieces, split the same way as "what" and "how":
//!
//! - [`RecordStore`]: owns the in-memory collection and implements the record
//!   operations (create, update, delete, lookup).
//! - [`StorageBackend`]: raw persistence of the whole collection. The store never
//!   reads from it after [`RecordStore::initialize`]; every mutation rewrites it.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: a single JSON file, written atomically
//!   (temp file in the same directory, `fsync`, rename).
//! - [`mem_backend::MemBackend`]: in-memory, for tests. Can simulate write errors.
//!
//! ## Storage Layout
//!
//! ```text
//! <data-dir>/database/
//! ├── job-tracker.json    # JSON array of records, newest first
//! └── config.json         # JobTrackConfig
//! ```
//!
//! ## Consistency
//!
//! Mutations are write-then-commit: the next collection is built aside, persisted,
//! and only swapped into memory once the write succeeded. A failed write leaves
//! memory and disk as they were.

use crate::error::Result;
use crate::model::JobApplication;

pub mod fs_backend;
pub mod mem_backend;
pub mod record_store;

pub use record_store::RecordStore;

/// Whole-collection persistence.
pub trait StorageBackend {
    /// Load the persisted collection. `Ok(None)` if nothing has been written yet.
    /// Fails with `StorageUnavailable` if it exists but cannot be read or parsed.
    fn load(&self) -> Result<Option<Vec<JobApplication>>>;

    /// Replace the persisted collection. Fails with `PersistenceFailure`.
    fn save(&self, records: &[JobApplication]) -> Result<()>;

    /// Where the data lives, for logs and messages.
    fn location(&self) -> String;
}
