use super::StorageBackend;
use crate::error::{JobTrackError, Result};
use crate::model::JobApplication;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const DB_FILENAME: &str = "job-tracker.json";

pub struct FsBackend {
    root: PathBuf,
    pretty: bool,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            pretty: true,
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn db_path(&self) -> PathBuf {
        self.root.join(DB_FILENAME)
    }

    fn ensure_dir(&self) -> io::Result<()> {
        if !self.root.is_dir() {
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }

    fn write_atomic(&self, target: &Path, bytes: &[u8]) -> io::Result<()> {
        self.ensure_dir()?;
        let tmp = self.root.join(format!(".job-tracker-{}.tmp", Uuid::new_v4()));
        let result = write_then_rename(&tmp, target, bytes);
        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        result
    }
}

fn write_then_rename(tmp: &Path, target: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(tmp)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    drop(file);
    fs::rename(tmp, target)
}

impl StorageBackend for FsBackend {
    fn load(&self) -> Result<Option<Vec<JobApplication>>> {
        self.ensure_dir()
            .map_err(|e| JobTrackError::storage_unavailable(&self.root, e))?;

        let path = self.db_path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(JobTrackError::storage_unavailable(&path, e)),
        };
        let records: Vec<JobApplication> = serde_json::from_str(&content)
            .map_err(|e| JobTrackError::storage_unavailable(&path, e))?;
        Ok(Some(records))
    }

    fn save(&self, records: &[JobApplication]) -> Result<()> {
        let path = self.db_path();
        let content = if self.pretty {
            serde_json::to_string_pretty(records)
        } else {
            serde_json::to_string(records)
        }
        .map_err(|e| JobTrackError::persistence_failure(&path, e))?;

        self.write_atomic(&path, content.as_bytes())
            .map_err(|e| JobTrackError::persistence_failure(&path, e))?;
        tracing::debug!(path = %path.display(), records = records.len(), "wrote records");
        Ok(())
    }

    fn location(&self) -> String {
        self.db_path().display().to_string()
    }
}
