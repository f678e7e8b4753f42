// crates/core/src/catalog.rs
//! Static catalog of supported export formats.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::hardware::HardwareProbe;

/// Descriptive metadata for one export format. Defined at process start,
/// never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatInfo {
    pub id: &'static str,
    pub name: &'static str,
    /// Output file suffix, or a `_model`-style directory suffix pattern.
    pub extension: &'static str,
    pub description: &'static str,
    pub requires_gpu: bool,
}

/// Supported export formats, in declaration order.
pub const FORMATS: &[FormatInfo] = &[
    FormatInfo {
        id: "onnx",
        name: "ONNX",
        extension: ".onnx",
        description: "Open Neural Network Exchange - Cross-platform compatibility",
        requires_gpu: false,
    },
    FormatInfo {
        id: "engine",
        name: "TensorRT",
        extension: ".engine",
        description: "NVIDIA TensorRT - Optimized for NVIDIA GPUs",
        requires_gpu: true,
    },
    FormatInfo {
        id: "torchscript",
        name: "TorchScript",
        extension: ".torchscript",
        description: "PyTorch TorchScript - Portable PyTorch model",
        requires_gpu: false,
    },
    FormatInfo {
        id: "openvino",
        name: "OpenVINO",
        extension: "_openvino_model",
        description: "Intel OpenVINO - Optimized for Intel hardware",
        requires_gpu: false,
    },
    FormatInfo {
        id: "coreml",
        name: "CoreML",
        extension: ".mlpackage",
        description: "Apple CoreML - Optimized for Apple devices",
        requires_gpu: false,
    },
    FormatInfo {
        id: "tflite",
        name: "TensorFlow Lite",
        extension: ".tflite",
        description: "TensorFlow Lite - Mobile and edge devices",
        requires_gpu: false,
    },
];

/// Look up a format by identifier.
pub fn describe(format_id: &str) -> Option<&'static FormatInfo> {
    FORMATS.iter().find(|f| f.id == format_id)
}

/// All formats in declaration order, stable across calls.
pub fn list_all() -> &'static [FormatInfo] {
    FORMATS
}

/// Whether a format can run on this host: true unless the format requires
/// a GPU and the probe reports none. Unknown ids are unavailable.
pub fn is_available(format_id: &str, probe: &dyn HardwareProbe) -> bool {
    match describe(format_id) {
        Some(info) => !info.requires_gpu || probe.accelerator_present(),
        None => false,
    }
}

/// Deterministic artifact location for a source model: same directory,
/// same base name, the format's suffix.
///
/// Known weak spot inherited from the toolchain's conventions: a
/// similarly named pre-existing file is indistinguishable from fresh
/// output.
pub fn expected_artifact_path(source: &Path, format_id: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = describe(format_id).map(|f| f.extension).unwrap_or("");
    source.with_file_name(format!("{stem}{ext}"))
}
