//! YAML output
//!
//! eksctl does not resolve YAML anchors in every field, so repeated
//! structures (zone lists shared by several node groups) must be written out
//! in full. `serde_yaml` never emits anchors or aliases.

use crate::cluster::ClusterDescriptor;
use crate::error::Result;

/// Render a cluster descriptor as a YAML document
pub fn to_yaml(descriptor: &ClusterDescriptor) -> Result<String> {
    Ok(serde_yaml::to_string(descriptor)?)
}
