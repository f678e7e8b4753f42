// crates/core/src/manager.rs
//! Export job orchestration: submission, background execution, polling.

use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use futures::FutureExt;
use serde::Serialize;

use crate::catalog::{self, FormatInfo};
use crate::converter::Converter;
use crate::error::SubmitError;
use crate::hardware::HardwareProbe;
use crate::job::{ExportJob, JobSnapshot};
use crate::options::{ConvertArgs, ExportOptions};
use crate::registry::JobRegistry;

/// Catalog entry paired with its availability on this host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatAvailability {
    #[serde(flatten)]
    pub info: FormatInfo,
    pub available: bool,
}

/// Orchestrates export jobs: validates submissions, owns the registry,
/// and spawns one detached background task per job.
///
/// No worker cap or queue. Export jobs are rare and interactively
/// triggered.
pub struct ExportManager {
    registry: Arc<JobRegistry>,
    converter: Arc<dyn Converter>,
    probe: Arc<dyn HardwareProbe>,
    next_seq: AtomicU64,
}

impl ExportManager {
    pub fn new(converter: Arc<dyn Converter>, probe: Arc<dyn HardwareProbe>) -> Self {
        Self {
            registry: Arc::new(JobRegistry::new()),
            converter,
            probe,
            next_seq: AtomicU64::new(0),
        }
    }

    /// Validate and register a new export job, then launch its background
    /// task. Returns the job id as soon as the registry insert completes;
    /// the task runs detached. No job record exists when validation
    /// fails.
    pub async fn submit(
        &self,
        model_path: impl Into<PathBuf>,
        format_id: &str,
        options: ExportOptions,
    ) -> Result<String, SubmitError> {
        let model_path = model_path.into();

        if catalog::describe(format_id).is_none() {
            return Err(SubmitError::UnknownFormat(format_id.to_string()));
        }
        if !tokio::fs::try_exists(&model_path).await.unwrap_or(false) {
            return Err(SubmitError::ModelNotFound(model_path));
        }

        let job_id = self.next_job_id();
        let job = ExportJob::new(
            job_id.clone(),
            model_path.clone(),
            format_id,
            options.clone(),
        );
        self.registry.insert(job)?;

        tracing::info!(
            job_id = %job_id,
            model = %model_path.display(),
            format = format_id,
            "export job submitted"
        );

        let registry = Arc::clone(&self.registry);
        let converter = Arc::clone(&self.converter);
        let probe = Arc::clone(&self.probe);
        let id = job_id.clone();
        let format = format_id.to_string();
        tokio::spawn(async move {
            let run = run_export(
                &registry,
                converter.as_ref(),
                probe.as_ref(),
                &id,
                &model_path,
                &format,
                &options,
            );
            // Hard containment boundary: any panic in the unit becomes a
            // failed terminal state for this job only.
            if let Err(panic) = AssertUnwindSafe(run).catch_unwind().await {
                let message = panic_message(panic.as_ref());
                tracing::error!(job_id = %id, error = %message, "export task panicked");
                registry.update(&id, |job| {
                    job.mark_failed(format!("Export task panicked: {message}"))
                });
            }
        });

        Ok(job_id)
    }

    // Millisecond timestamp plus a process-wide counter: unique within
    // the process lifetime even for simultaneous submissions.
    fn next_job_id(&self) -> String {
        let millis = Utc::now().timestamp_millis();
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        format!("export_{millis}_{seq}")
    }

    /// Snapshot of one job; `None` for an unknown id.
    pub fn status(&self, job_id: &str) -> Option<JobSnapshot> {
        self.registry.get(job_id)
    }

    /// Snapshots of every job.
    pub fn list(&self) -> Vec<JobSnapshot> {
        self.registry.list_all()
    }

    /// Every catalog entry with its availability on this host.
    pub fn list_available_formats(&self) -> Vec<FormatAvailability> {
        catalog::list_all()
            .iter()
            .map(|info| FormatAvailability {
                info: *info,
                available: !info.requires_gpu || self.probe.accelerator_present(),
            })
            .collect()
    }

    /// Advisory dependency report for one format: `None` for an unknown
    /// id, empty when everything is satisfied. Never blocks `submit`; a
    /// submission missing a dependency simply fails in the background
    /// with the converter's message.
    pub async fn check_dependencies(&self, format_id: &str) -> Option<Vec<String>> {
        let info = catalog::describe(format_id)?;
        let mut issues = self.converter.check_dependencies(format_id).await;
        if info.requires_gpu && !self.probe.accelerator_present() {
            issues.push(format!("CUDA not available - {} requires NVIDIA GPU", info.name));
        }
        Some(issues)
    }
}

/// Drive one job from `pending` to a terminal state. Runs entirely
/// outside the registry lock; writes back through short atomic updates.
async fn run_export(
    registry: &JobRegistry,
    converter: &dyn Converter,
    probe: &dyn HardwareProbe,
    job_id: &str,
    model_path: &Path,
    format_id: &str,
    options: &ExportOptions,
) {
    registry.update(job_id, ExportJob::mark_running);
    tracing::info!(
        job_id,
        model = %model_path.display(),
        format = format_id,
        converter = converter.name(),
        "starting export"
    );

    // The source model must still be readable when the job starts.
    if let Err(e) = tokio::fs::metadata(model_path).await {
        fail(
            registry,
            job_id,
            format!("Failed to load model {}: {e}", model_path.display()),
        );
        return;
    }
    registry.update(job_id, |job| job.set_progress(30));

    let args = ConvertArgs::from_options(options, format_id);

    // Hardware precondition: fail without ever invoking the converter.
    let info = catalog::describe(format_id);
    if info.is_some_and(|f| f.requires_gpu) && !probe.accelerator_present() {
        let name = info.map(|f| f.name).unwrap_or(format_id);
        fail(
            registry,
            job_id,
            format!("{name} export requires NVIDIA GPU with CUDA support"),
        );
        return;
    }
    registry.update(job_id, |job| job.set_progress(50));

    match converter.convert(model_path, format_id, &args).await {
        Ok(reported) => {
            registry.update(job_id, |job| job.set_progress(90));
            let output = resolve_output(model_path, format_id, &reported).await;
            match &output {
                Some((path, size)) => {
                    tracing::info!(job_id, output = %path.display(), size, "export completed");
                }
                None => {
                    tracing::warn!(job_id, "export completed but no artifact found on disk");
                }
            }
            registry.update(job_id, |job| job.mark_completed(output));
        }
        Err(e) => fail(registry, job_id, e.to_string()),
    }
}

fn fail(registry: &JobRegistry, job_id: &str, message: String) {
    tracing::error!(job_id, error = %message, "export job failed");
    registry.update(job_id, move |job| job.mark_failed(message));
}

/// Output artifact resolution: the converter-reported path when it exists
/// on disk, else the deterministic fallback next to the source model.
/// `None` when neither exists; the job still completes.
async fn resolve_output(
    model_path: &Path,
    format_id: &str,
    reported: &Path,
) -> Option<(PathBuf, u64)> {
    if let Some(found) = stat_artifact(reported).await {
        return Some(found);
    }
    let fallback = catalog::expected_artifact_path(model_path, format_id);
    stat_artifact(&fallback).await
}

async fn stat_artifact(path: &Path) -> Option<(PathBuf, u64)> {
    match tokio::fs::metadata(path).await {
        Ok(meta) => Some((path.to_path_buf(), meta.len())),
        Err(_) => None,
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
