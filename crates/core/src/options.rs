// crates/core/src/options.rs
//! Export option handling and converter-argument assembly.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

/// Caller-supplied export options, keyed by option name.
///
/// Only the recognized keys (`imgsz`, `half`, `dynamic`, `simplify`,
/// `opset`) ever reach the converter; everything else is ignored.
pub type ExportOptions = HashMap<String, Value>;

/// Typed argument set passed to the converter: the filtered subset of a
/// job's options relevant to its target format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConvertArgs {
    pub imgsz: Option<u32>,
    pub half: Option<bool>,
    pub dynamic: Option<bool>,
    /// ONNX only.
    pub simplify: Option<bool>,
    /// ONNX only.
    pub opset: Option<u32>,
}

impl ConvertArgs {
    /// Merge the recognized option keys for `format_id`, silently ignoring
    /// unrecognized keys and ill-typed values. Value-range validation is
    /// the converter's responsibility.
    pub fn from_options(options: &ExportOptions, format_id: &str) -> Self {
        let as_u32 = |key: &str| options.get(key).and_then(Value::as_u64).map(|n| n as u32);
        let as_bool = |key: &str| options.get(key).and_then(Value::as_bool);

        let onnx = format_id == "onnx";
        Self {
            imgsz: as_u32("imgsz"),
            half: as_bool("half"),
            dynamic: as_bool("dynamic"),
            simplify: if onnx { as_bool("simplify") } else { None },
            opset: if onnx { as_u32("opset") } else { None },
        }
    }
}
