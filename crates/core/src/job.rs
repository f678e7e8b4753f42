// crates/core/src/job.rs
//! Export job record, state machine, and read-side snapshots.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{self, FormatInfo};
use crate::options::ExportOptions;

/// Lifecycle status of an export job.
///
/// `pending → running → {completed | failed}`. The terminal states are
/// final: no field of a completed or failed job is ever mutated again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

/// One submitted conversion request. The registry owns the canonical
/// record; only the job's background task mutates it, and only through
/// the registry's update entry point.
#[derive(Debug, Clone)]
pub struct ExportJob {
    pub job_id: String,
    pub model_path: PathBuf,
    pub format: String,
    pub options: ExportOptions,
    pub status: JobStatus,
    pub progress: u8,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub error: Option<String>,
    pub output_path: Option<PathBuf>,
    pub output_size: Option<u64>,
}

impl ExportJob {
    pub fn new(
        job_id: impl Into<String>,
        model_path: impl Into<PathBuf>,
        format: impl Into<String>,
        options: ExportOptions,
    ) -> Self {
        Self {
            job_id: job_id.into(),
            model_path: model_path.into(),
            format: format.into(),
            options,
            status: JobStatus::Pending,
            progress: 0,
            start_time: None,
            end_time: None,
            error: None,
            output_path: None,
            output_size: None,
        }
    }

    /// `pending → running`: records the start time and the initial
    /// progress checkpoint signaling "accepted and began work".
    pub fn mark_running(&mut self) {
        if self.status.is_terminal() {
            return;
        }
        self.status = JobStatus::Running;
        self.start_time = Some(Utc::now());
        self.set_progress(10);
    }

    /// Raise progress; never lowers it.
    pub fn set_progress(&mut self, pct: u8) {
        if pct > self.progress {
            self.progress = pct.min(100);
        }
    }

    /// `running → completed`. Progress is forced to 100. The output
    /// fields stay unset when no artifact was found on disk, a defined
    /// non-failing outcome.
    pub fn mark_completed(&mut self, output: Option<(PathBuf, u64)>) {
        if self.status.is_terminal() {
            return;
        }
        self.status = JobStatus::Completed;
        self.progress = 100;
        if let Some((path, size)) = output {
            self.output_path = Some(path);
            self.output_size = Some(size);
        }
        self.finish();
    }

    /// Transition to `failed`, recording the error text verbatim.
    /// Progress keeps whatever value it last held.
    pub fn mark_failed(&mut self, error: impl Into<String>) {
        if self.status.is_terminal() {
            return;
        }
        self.status = JobStatus::Failed;
        self.error = Some(error.into());
        self.finish();
    }

    // End time is recorded exactly once, on whichever terminal
    // transition occurs.
    fn finish(&mut self) {
        if self.end_time.is_none() {
            self.end_time = Some(Utc::now());
        }
    }

    /// Immutable copy of the current state with the format metadata
    /// resolved, safe to hand to a caller.
    pub fn snapshot(&self) -> JobSnapshot {
        JobSnapshot {
            job_id: self.job_id.clone(),
            model_path: self.model_path.clone(),
            format: self.format.clone(),
            format_info: catalog::describe(&self.format).copied(),
            options: self.options.clone(),
            status: self.status,
            progress: self.progress,
            start_time: self.start_time,
            end_time: self.end_time,
            error: self.error.clone(),
            output_path: self.output_path.clone(),
            output_size: self.output_size,
        }
    }
}

/// Point-in-time copy of a job's state, plus the resolved format metadata
/// so callers can display a job without a second catalog lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSnapshot {
    pub job_id: String,
    pub model_path: PathBuf,
    pub format: String,
    pub format_info: Option<FormatInfo>,
    pub options: ExportOptions,
    pub status: JobStatus,
    pub progress: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_size: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> ExportJob {
        ExportJob::new("export_1_0", "/weights/best.pt", "onnx", ExportOptions::new())
    }

    #[test]
    fn test_new_job_is_pending() {
        let job = job();
        assert_eq!(job.status, JobStatus::Pending);
        assert_eq!(job.progress, 0);
        assert!(job.start_time.is_none());
        assert!(job.end_time.is_none());
        assert!(job.error.is_none());
        assert!(job.output_path.is_none());
        assert!(job.output_size.is_none());
    }

    #[test]
    fn test_lifecycle_completed() {
        let mut job = job();
        job.mark_running();
        assert_eq!(job.status, JobStatus::Running);
        assert_eq!(job.progress, 10);
        assert!(job.start_time.is_some());

        job.set_progress(50);
        job.mark_completed(Some((PathBuf::from("/weights/best.onnx"), 1024)));
        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(job.progress, 100);
        assert_eq!(job.output_path.as_deref(), Some(std::path::Path::new("/weights/best.onnx")));
        assert_eq!(job.output_size, Some(1024));
        assert!(job.end_time.unwrap() >= job.start_time.unwrap());
    }

    #[test]
    fn test_lifecycle_failed_keeps_progress() {
        let mut job = job();
        job.mark_running();
        job.set_progress(50);
        job.mark_failed("conversion blew up");
        assert_eq!(job.status, JobStatus::Failed);
        assert_eq!(job.progress, 50);
        assert_eq!(job.error.as_deref(), Some("conversion blew up"));
        assert!(job.output_path.is_none());
    }

    #[test]
    fn test_progress_is_monotone() {
        let mut job = job();
        job.mark_running();
        job.set_progress(50);
        job.set_progress(30);
        assert_eq!(job.progress, 50);
        job.set_progress(255);
        assert_eq!(job.progress, 100);
    }

    #[test]
    fn test_terminal_state_is_final() {
        let mut job = job();
        job.mark_running();
        job.mark_failed("first");
        let end = job.end_time;

        job.mark_completed(Some((PathBuf::from("/x"), 1)));
        job.mark_failed("second");
        assert_eq!(job.status, JobStatus::Failed);
        assert_eq!(job.error.as_deref(), Some("first"));
        assert_eq!(job.end_time, end);
    }

    #[test]
    fn test_completed_without_output_is_valid() {
        let mut job = job();
        job.mark_running();
        job.mark_completed(None);
        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(job.progress, 100);
        assert!(job.output_path.is_none());
        assert!(job.output_size.is_none());
    }

    #[test]
    fn test_snapshot_resolves_format_info() {
        let snap = job().snapshot();
        assert_eq!(snap.format_info.unwrap().name, "ONNX");

        let unknown = ExportJob::new("id", "/m.pt", "gguf", ExportOptions::new());
        assert!(unknown.snapshot().format_info.is_none());
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let json = serde_json::to_value(job().snapshot()).unwrap();
        assert_eq!(json["jobId"], "export_1_0");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["formatInfo"]["requiresGpu"], false);
        // Unset optionals are omitted, not null.
        assert!(json.get("error").is_none());
        assert!(json.get("outputPath").is_none());
    }
}
