// crates/core/src/converter.rs
//! Converter contract: the external routine that performs the actual
//! model conversion.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

use crate::options::ConvertArgs;

/// Errors raised by a converter. The message of a `Failed` error is
/// recorded on the failed job verbatim.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Failed to spawn converter: {0}")]
    SpawnFailed(String),

    #[error("{0}")]
    Failed(String),
}

/// Opaque external converter.
///
/// Implementations include:
/// - `YoloCliConverter`, which spawns the ultralytics `yolo` CLI
/// - mock converters in tests
#[async_trait]
pub trait Converter: Send + Sync {
    /// Convert the model at `source` into `format_id`, returning the path
    /// of the produced artifact. Argument values are passed through
    /// unvalidated; value ranges are the converter's concern.
    async fn convert(
        &self,
        source: &Path,
        format_id: &str,
        args: &ConvertArgs,
    ) -> Result<PathBuf, ConvertError>;

    /// Advisory check of the external support a format needs; empty means
    /// satisfied. Never consulted on the submit path.
    async fn check_dependencies(&self, format_id: &str) -> Vec<String> {
        let _ = format_id;
        Vec::new()
    }

    /// Converter name for logging.
    fn name(&self) -> &str;
}
