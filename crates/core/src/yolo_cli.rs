// crates/core/src/yolo_cli.rs
//! Converter adapter that spawns the ultralytics `yolo` CLI.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command as TokioCommand;

use crate::catalog;
use crate::converter::{ConvertError, Converter};
use crate::options::ConvertArgs;

/// Environment variable overriding the `yolo` binary path.
pub const YOLO_BIN_ENV: &str = "EXPORTD_YOLO_BIN";

/// Converter that runs `yolo export model=… format=…`.
///
/// The CLI writes its artifact next to the source model; `convert`
/// reports that deterministic location and leaves existence confirmation
/// to the caller's output-resolution step.
pub struct YoloCliConverter {
    binary: String,
}

impl YoloCliConverter {
    /// Use the binary from `EXPORTD_YOLO_BIN`, falling back to `yolo` on
    /// the PATH.
    pub fn new() -> Self {
        Self {
            binary: std::env::var(YOLO_BIN_ENV).unwrap_or_else(|_| "yolo".to_string()),
        }
    }

    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn build_args(source: &Path, format_id: &str, args: &ConvertArgs) -> Vec<String> {
        // The CLI parses Python-style booleans.
        fn py_bool(v: bool) -> &'static str {
            if v {
                "True"
            } else {
                "False"
            }
        }

        let mut cli = vec![
            "export".to_string(),
            format!("model={}", source.display()),
            format!("format={format_id}"),
        ];
        if let Some(v) = args.imgsz {
            cli.push(format!("imgsz={v}"));
        }
        if let Some(v) = args.half {
            cli.push(format!("half={}", py_bool(v)));
        }
        if let Some(v) = args.dynamic {
            cli.push(format!("dynamic={}", py_bool(v)));
        }
        if let Some(v) = args.simplify {
            cli.push(format!("simplify={}", py_bool(v)));
        }
        if let Some(v) = args.opset {
            cli.push(format!("opset={v}"));
        }
        cli
    }
}

impl Default for YoloCliConverter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Converter for YoloCliConverter {
    async fn convert(
        &self,
        source: &Path,
        format_id: &str,
        args: &ConvertArgs,
    ) -> Result<PathBuf, ConvertError> {
        let cli_args = Self::build_args(source, format_id, args);
        tracing::info!(binary = %self.binary, args = ?cli_args, "yolo CLI: spawning export");

        let output = TokioCommand::new(&self.binary)
            .args(&cli_args)
            // Null stdin so the child never blocks waiting for input.
            .stdin(std::process::Stdio::null())
            .output()
            .await
            .map_err(|e| ConvertError::SpawnFailed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = stderr.trim();
            let message = if detail.is_empty() {
                format!("yolo export exited with {}", output.status)
            } else {
                detail.to_string()
            };
            tracing::error!(exit_code = ?output.status.code(), "yolo CLI: export failed");
            return Err(ConvertError::Failed(message));
        }

        Ok(catalog::expected_artifact_path(source, format_id))
    }

    async fn check_dependencies(&self, format_id: &str) -> Vec<String> {
        let _ = format_id;
        let mut issues = Vec::new();

        let probe = TokioCommand::new(&self.binary)
            .arg("--version")
            .stdin(std::process::Stdio::null())
            .output()
            .await;
        let present = matches!(&probe, Ok(out) if out.status.success());
        if !present {
            issues.push(format!(
                "ultralytics CLI not found ({}). Install with: pip install ultralytics",
                self.binary
            ));
        }
        issues
    }

    fn name(&self) -> &str {
        "yolo-cli"
    }
}
