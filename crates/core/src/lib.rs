// crates/core/src/lib.rs
pub mod artifacts;
pub mod catalog;
pub mod converter;
pub mod error;
pub mod hardware;
pub mod job;
pub mod manager;
pub mod options;
pub mod registry;
pub mod yolo_cli;

pub use artifacts::*;
pub use converter::*;
pub use error::*;
pub use hardware::*;
pub use job::*;
pub use manager::*;
pub use options::*;
pub use registry::*;
pub use yolo_cli::*;
