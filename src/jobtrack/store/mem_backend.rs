use super::StorageBackend;
use crate::error::{JobTrackError, Result};
use crate::model::JobApplication;
use std::cell::RefCell;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the store is single-threaded,
/// which lets `StorageBackend` keep `&self` on every method.
#[derive(Default)]
pub struct MemBackend {
    records: RefCell<Option<Vec<JobApplication>>>,
    simulate_write_error: RefCell<bool>,
    simulate_read_error: RefCell<bool>,
    writes: RefCell<usize>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that already holds a persisted collection.
    pub fn with_records(records: Vec<JobApplication>) -> Self {
        let backend = Self::default();
        *backend.records.borrow_mut() = Some(records);
        backend
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Make `load` fail as if the backing file were unreadable.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        *self.simulate_read_error.borrow_mut() = simulate;
    }

    /// What a fresh process would read back.
    pub fn persisted(&self) -> Option<Vec<JobApplication>> {
        self.records.borrow().clone()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        *self.writes.borrow()
    }
}

impl StorageBackend for MemBackend {
    fn load(&self) -> Result<Option<Vec<JobApplication>>> {
        if *self.simulate_read_error.borrow() {
            return Err(JobTrackError::storage_unavailable(
                self.location(),
                "Simulated read error",
            ));
        }
        Ok(self.records.borrow().clone())
    }

    fn save(&self, records: &[JobApplication]) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(JobTrackError::persistence_failure(
                self.location(),
                "Simulated write error",
            ));
        }
        *self.records.borrow_mut() = Some(records.to_vec());
        *self.writes.borrow_mut() += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "memory://job-tracker.json".to_string()
    }
}
