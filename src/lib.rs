//! eksgen - eksctl cluster config generator
//!
//! Turns a cluster configmap (instance type, scaling bounds, spot settings)
//! into an eksctl `ClusterConfig` document. Node groups are built by merging
//! overlays onto a baseline template; see [`cluster`] for the order.

pub mod cluster;
pub mod config;
pub mod error;
pub mod instance;
pub mod nodegroup;
pub mod render;

pub use cluster::{generate, generate_with_defaults, ClusterDescriptor};
pub use config::{ClusterConfig, ConfigError, NodeGroupDefaults, SpotConfig};
pub use error::{Error, Result};
pub use instance::InstanceClass;
pub use nodegroup::NodeGroup;

use std::path::Path;

/// Load a configmap from `path` and render its cluster config as YAML
pub fn generate_eks(path: &Path) -> Result<String> {
    let config = ClusterConfig::from_file(path)?;
    let descriptor = generate(&config)?;
    render::to_yaml(&descriptor)
}
