// crates/core/src/error.rs
use std::path::PathBuf;

use thiserror::Error;

/// Synchronous submission failures. No job record exists when one of
/// these is returned.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Unsupported export format: {0}")]
    UnknownFormat(String),

    #[error("Model not found: {}", .0.display())]
    ModelNotFound(PathBuf),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Registry invariant violations. `DuplicateId` is a programming-error
/// class fault: the identity generator never reuses an id.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Duplicate job id: {0}")]
    DuplicateId(String),
}
