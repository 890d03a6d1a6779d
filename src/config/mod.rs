//! Cluster configmap and node-group defaults
//!
//! The configmap is the only input document. Node groups start from the
//! compiled-in baseline template and are specialized by overlays derived
//! from the configmap.

mod configmap;
mod defaults;

pub use configmap::{ClusterConfig, ConfigError, MaxPrice, SpotConfig};
pub use defaults::{NodeGroupDefaults, ReservedResources};
