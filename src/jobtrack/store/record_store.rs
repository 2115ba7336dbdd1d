use super::StorageBackend;
use crate::error::{JobTrackError, Result};
use crate::model::{JobApplication, JobApplicationPatch, NewJobApplication};

/// The in-memory collection of job applications, mirrored to a backend.
///
/// Reads are served from memory only. Every mutation rewrites the whole collection
/// through the backend before it becomes visible in memory.
pub struct RecordStore<B: StorageBackend> {
    backend: B,
    records: Vec<JobApplication>,
    loaded: bool,
}

impl<B: StorageBackend> RecordStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            records: Vec::new(),
            loaded: false,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn is_initialized(&self) -> bool {
        self.loaded
    }

    /// Load the persisted collection, or create an empty one if there is none.
    ///
    /// Safe to call repeatedly. A file that exists but cannot be parsed is reported
    /// as `StorageUnavailable` and left untouched.
    pub fn initialize(&mut self) -> Result<()> {
        match self.backend.load()? {
            Some(records) => {
                tracing::info!(
                    location = %self.backend.location(),
                    records = records.len(),
                    "loaded job applications"
                );
                self.records = records;
            }
            None => {
                self.backend.save(&[]).map_err(into_unavailable)?;
                tracing::info!(location = %self.backend.location(), "created empty database");
                self.records = Vec::new();
            }
        }
        self.loaded = true;
        Ok(())
    }

    /// Drop the in-memory state. Call `initialize` again to reload.
    pub fn close(&mut self) {
        self.records.clear();
        self.loaded = false;
    }

    pub fn list_all(&self) -> &[JobApplication] {
        &self.records
    }

    pub fn get_by_id(&self, id: &str) -> Option<&JobApplication> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Prepend a new record and persist. Returns the generated id.
    pub fn create(&mut self, fields: NewJobApplication) -> Result<String> {
        self.ensure_loaded()?;
        let mut record = JobApplication::new(fields);
        while self.get_by_id(&record.id).is_some() {
            record.id = crate::model::new_record_id();
        }
        let id = record.id.clone();

        let mut next = Vec::with_capacity(self.records.len() + 1);
        next.push(record);
        next.extend(self.records.iter().cloned());
        self.commit(next)?;

        tracing::debug!(%id, "created job application");
        Ok(id)
    }

    /// Merge `patch` into the record with `id`. `Ok(None)` if there is no such record.
    pub fn update(
        &mut self,
        id: &str,
        patch: &JobApplicationPatch,
    ) -> Result<Option<JobApplication>> {
        self.ensure_loaded()?;
        let Some(position) = self.records.iter().position(|record| record.id == id) else {
            tracing::debug!(%id, "update skipped, no such record");
            return Ok(None);
        };

        let mut next = self.records.clone();
        next[position].apply(patch);
        let updated = next[position].clone();
        self.commit(next)?;

        tracing::debug!(%id, "updated job application");
        Ok(Some(updated))
    }

    /// Remove the record with `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        self.ensure_loaded()?;
        if self.get_by_id(id).is_none() {
            return Ok(false);
        }

        let next: Vec<JobApplication> = self
            .records
            .iter()
            .filter(|record| record.id != id)
            .cloned()
            .collect();
        self.commit(next)?;

        tracing::debug!(%id, "deleted job application");
        Ok(true)
    }

    fn commit(&mut self, next: Vec<JobApplication>) -> Result<()> {
        if let Err(e) = self.backend.save(&next) {
            tracing::error!(error = %e, "write failed, in-memory records unchanged");
            return Err(e);
        }
        self.records = next;
        Ok(())
    }

    fn ensure_loaded(&self) -> Result<()> {
        if self.loaded {
            Ok(())
        } else {
            Err(JobTrackError::storage_unavailable(
                self.backend.location(),
                "store has not been initialized",
            ))
        }
    }
}

fn into_unavailable(err: JobTrackError) -> JobTrackError {
    match err {
        JobTrackError::PersistenceFailure { path, source } => {
            JobTrackError::StorageUnavailable { path, source }
        }
        other => other,
    }
}
