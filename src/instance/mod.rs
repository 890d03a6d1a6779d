//! Instance-type classification
//!
//! Decides which accelerator overlay, if any, a worker instance type needs.

mod accelerator;

pub use accelerator::{inferentia_resources, AcceleratorResources, HUGEPAGES_2MI_PER_CHIP};

/// Instance family prefixes for NVIDIA GPU instances (g4dn, p3, ...).
const GPU_PREFIXES: &[&str] = &["g", "p"];

/// Instance family prefix for AWS Inferentia instances.
const INFERENTIA_PREFIX: &str = "inf";

/// Accelerator class of an instance type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceClass {
    /// No accelerator overlay
    General,
    /// NVIDIA GPU instance
    Gpu,
    /// AWS Inferentia (custom ASIC) instance
    Inferentia,
}

impl InstanceClass {
    /// Classify an instance type by its family prefix.
    ///
    /// The prefix tables must not overlap; the first matching class wins.
    pub fn of(instance_type: &str) -> Self {
        debug_assert!(
            !(is_gpu(instance_type) && is_inferentia(instance_type)),
            "instance type {} matches more than one accelerator class",
            instance_type
        );

        if is_gpu(instance_type) {
            Self::Gpu
        } else if is_inferentia(instance_type) {
            Self::Inferentia
        } else {
            Self::General
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Gpu => "gpu",
            Self::Inferentia => "inferentia",
        }
    }
}

/// True for GPU instance families
pub fn is_gpu(instance_type: &str) -> bool {
    GPU_PREFIXES.iter().any(|p| instance_type.starts_with(p))
}

/// True for Inferentia instance families
pub fn is_inferentia(instance_type: &str) -> bool {
    instance_type.starts_with(INFERENTIA_PREFIX)
}
