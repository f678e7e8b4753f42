// crates/core/src/hardware.rs
//! Hardware accelerator probing.

use std::process::Command;
use std::sync::OnceLock;

/// Boolean query for accelerator presence.
///
/// Consulted by the execution precondition check (a GPU-only format
/// submitted without a GPU fails before the converter is invoked) and by
/// format-availability listing.
pub trait HardwareProbe: Send + Sync {
    /// True when a compatible accelerator (NVIDIA GPU with CUDA) is present.
    fn accelerator_present(&self) -> bool;
}

/// Probe that detects NVIDIA GPUs by running `nvidia-smi -L`.
///
/// The answer is cached for the process lifetime; hardware does not come
/// and go between export jobs.
#[derive(Debug, Default)]
pub struct NvidiaSmiProbe {
    cached: OnceLock<bool>,
}

impl NvidiaSmiProbe {
    pub fn new() -> Self {
        Self::default()
    }

    fn probe() -> bool {
        Command::new("nvidia-smi")
            .arg("-L")
            .output()
            .map(|out| out.status.success() && !out.stdout.is_empty())
            .unwrap_or(false)
    }
}

impl HardwareProbe for NvidiaSmiProbe {
    fn accelerator_present(&self) -> bool {
        *self.cached.get_or_init(Self::probe)
    }
}

/// Probe with a fixed answer, for tests and CPU-only deployments.
#[derive(Debug, Clone, Copy)]
pub struct StaticProbe(pub bool);

impl HardwareProbe for StaticProbe {
    fn accelerator_present(&self) -> bool {
        self.0
    }
}
