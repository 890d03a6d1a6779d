//! Inferentia chip counts and hugepage reservations

/// 2Mi hugepages reserved per Inferentia chip.
pub const HUGEPAGES_2MI_PER_CHIP: u32 = 128;

/// Chips per Inferentia instance size.
const INFERENTIA_CHIPS: &[(&str, u32)] = &[
    ("inf1.xlarge", 1),
    ("inf1.2xlarge", 1),
    ("inf1.6xlarge", 4),
    ("inf1.24xlarge", 16),
];

/// Accelerator resources advertised to the cluster autoscaler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceleratorResources {
    pub chips: u32,
    /// Hugepage memory as a Kubernetes quantity (e.g. "512Mi")
    pub hugepages: String,
}

/// Look up the accelerator resources of an Inferentia instance type.
///
/// Sizes missing from the table resolve to zero chips and "0Mi".
pub fn inferentia_resources(instance_type: &str) -> AcceleratorResources {
    let chips = match INFERENTIA_CHIPS.iter().find(|(t, _)| *t == instance_type) {
        Some((_, chips)) => *chips,
        None => {
            tracing::warn!(
                instance_type,
                "unknown Inferentia instance size, advertising 0 chips"
            );
            0
        }
    };

    AcceleratorResources {
        chips,
        hugepages: format!("{}Mi", HUGEPAGES_2MI_PER_CHIP * chips),
    }
}
