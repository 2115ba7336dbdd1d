//! Where the database lives.
//!
//! ```text
//! <platform data dir>/database/job-tracker.json    # e.g. ~/.local/share/job-tracker/database
//! ~/.job-tracker/job-tracker.json                  # fallback when no data dir is known
//! <--data-dir>/job-tracker.json                    # explicit override
//! ```

use crate::config::JobTrackConfig;
use crate::error::{JobTrackError, Result};
use crate::store::fs_backend::{FsBackend, DB_FILENAME};
use crate::store::RecordStore;
use directories::{BaseDirs, ProjectDirs};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    pub data_dir: PathBuf,
}

impl StorePaths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Resolve the data directory, preferring an explicit override.
    pub fn resolve(override_dir: Option<&Path>) -> Result<Self> {
        if let Some(dir) = override_dir {
            return Ok(Self::new(dir));
        }
        if let Some(dirs) = ProjectDirs::from("com", "jobtrack", "job-tracker") {
            return Ok(Self::new(dirs.data_dir().join("database")));
        }
        if let Some(base) = BaseDirs::new() {
            let fallback = base.home_dir().join(".job-tracker");
            tracing::warn!(path = %fallback.display(), "no platform data dir, using home fallback");
            return Ok(Self::new(fallback));
        }
        Err(JobTrackError::storage_unavailable(
            DB_FILENAME,
            "could not determine a data directory",
        ))
    }

    pub fn db_file(&self) -> PathBuf {
        self.data_dir.join(DB_FILENAME)
    }

    pub fn load_config(&self) -> Result<JobTrackConfig> {
        JobTrackConfig::load(&self.data_dir)
    }

    /// An uninitialized store over the file backend, configured from `config`.
    pub fn open_store(&self, config: &JobTrackConfig) -> RecordStore<FsBackend> {
        RecordStore::new(FsBackend::new(&self.data_dir).with_pretty(config.pretty_json))
    }
}
