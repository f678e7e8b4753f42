// crates/core/src/artifacts.rs
//! On-disk scan for previously exported artifacts.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::catalog;

/// One exported model found on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedArtifact {
    pub filename: String,
    pub path: PathBuf,
    pub format: String,
    pub format_name: String,
    pub size: u64,
}

/// List entries of `dir` whose names match a catalog format's suffix.
///
/// The first matching format in declaration order wins. Directory entries
/// (OpenVINO exports are directories) are reported with size 0. A missing
/// or unreadable directory yields an empty list.
pub async fn scan_exported_models(dir: &Path) -> Vec<ExportedArtifact> {
    let mut found = Vec::new();
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(dir = %dir.display(), error = %e, "artifact scan: directory unreadable");
            return found;
        }
    };

    while let Ok(Some(entry)) = entries.next_entry().await {
        let filename = entry.file_name().to_string_lossy().into_owned();
        let Some(info) = catalog::FORMATS
            .iter()
            .find(|f| matches_suffix(&filename, f.extension))
        else {
            continue;
        };

        let size = match entry.metadata().await {
            Ok(meta) if meta.is_file() => meta.len(),
            _ => 0,
        };
        found.push(ExportedArtifact {
            filename,
            path: entry.path(),
            format: info.id.to_string(),
            format_name: info.name.to_string(),
            size,
        });
    }
    found
}

/// Suffix match, including `_model`-style directory suffixes: an OpenVINO
/// export matches any name containing `_openvino`.
fn matches_suffix(filename: &str, extension: &str) -> bool {
    if filename.ends_with(extension) {
        return true;
    }
    extension
        .strip_suffix("_model")
        .is_some_and(|stem| filename.contains(stem))
}
