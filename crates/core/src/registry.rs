// crates/core/src/registry.rs
//! Thread-safe store of export jobs.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::error::RegistryError;
use crate::job::{ExportJob, JobSnapshot};

/// Shared map from job id to job record.
///
/// One registry-wide mutex guards every operation. Job counts are small
/// and hold times are O(map operation); the converter call never runs
/// under this lock.
#[derive(Default)]
pub struct JobRegistry {
    jobs: Mutex<HashMap<String, ExportJob>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, ExportJob>> {
        match self.jobs.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                // Single-writer discipline keeps per-job state consistent
                // even if a holder panicked mid-operation.
                tracing::error!("job registry mutex poisoned; recovering");
                poisoned.into_inner()
            }
        }
    }

    /// Add a new job keyed by its identity.
    pub fn insert(&self, job: ExportJob) -> Result<(), RegistryError> {
        let mut jobs = self.lock();
        if jobs.contains_key(&job.job_id) {
            return Err(RegistryError::DuplicateId(job.job_id.clone()));
        }
        jobs.insert(job.job_id.clone(), job);
        Ok(())
    }

    /// Immutable copy of a job's current state; never a reference into
    /// mutable storage.
    pub fn get(&self, job_id: &str) -> Option<JobSnapshot> {
        self.lock().get(job_id).map(ExportJob::snapshot)
    }

    /// Snapshots of every job. Iteration order is unspecified.
    pub fn list_all(&self) -> Vec<JobSnapshot> {
        self.lock().values().map(ExportJob::snapshot).collect()
    }

    /// Apply a mutation to one job, atomically with respect to concurrent
    /// reads. The sole mutation entry point. Returns false when the id is
    /// unknown.
    pub fn update<F>(&self, job_id: &str, mutate: F) -> bool
    where
        F: FnOnce(&mut ExportJob),
    {
        let mut jobs = self.lock();
        match jobs.get_mut(job_id) {
            Some(job) => {
                mutate(job);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::JobStatus;
    use crate::options::ExportOptions;
    use std::sync::Arc;

    fn job(id: &str) -> ExportJob {
        ExportJob::new(id, "/weights/best.pt", "onnx", ExportOptions::new())
    }

    #[test]
    fn test_insert_and_get() {
        let registry = JobRegistry::new();
        registry.insert(job("a")).unwrap();

        let snap = registry.get("a").unwrap();
        assert_eq!(snap.job_id, "a");
        assert_eq!(snap.status, JobStatus::Pending);
        assert!(registry.get("b").is_none());
    }

    #[test]
    fn test_insert_duplicate_id() {
        let registry = JobRegistry::new();
        registry.insert(job("a")).unwrap();
        let err = registry.insert(job("a")).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateId("a".to_string()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_update_mutates_stored_job() {
        let registry = JobRegistry::new();
        registry.insert(job("a")).unwrap();

        assert!(registry.update("a", |j| j.mark_running()));
        assert_eq!(registry.get("a").unwrap().status, JobStatus::Running);
        assert!(!registry.update("missing", |j| j.mark_running()));
    }

    #[test]
    fn test_snapshots_are_copies() {
        let registry = JobRegistry::new();
        registry.insert(job("a")).unwrap();

        let before = registry.get("a").unwrap();
        registry.update("a", |j| j.mark_running());
        // The earlier snapshot is unaffected by later mutation.
        assert_eq!(before.status, JobStatus::Pending);
    }

    #[test]
    fn test_list_all() {
        let registry = JobRegistry::new();
        assert!(registry.is_empty());
        registry.insert(job("a")).unwrap();
        registry.insert(job("b")).unwrap();

        let mut ids: Vec<String> = registry.list_all().into_iter().map(|s| s.job_id).collect();
        ids.sort();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn test_concurrent_insert_and_read() {
        let registry = Arc::new(JobRegistry::new());
        let mut handles = Vec::new();

        for i in 0..8 {
            let registry = Arc::clone(&registry);
            handles.push(std::thread::spawn(move || {
                let id = format!("job_{i}");
                registry.insert(job(&id)).unwrap();
                for _ in 0..100 {
                    registry.update(&id, |j| j.set_progress(50));
                    let _ = registry.list_all();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.len(), 8);
        for snap in registry.list_all() {
            assert_eq!(snap.progress, 50);
        }
    }
}
