//! Node-group descriptors
//!
//! A node group is an owned eksctl `nodeGroups[]` entry. It is created from
//! the baseline template and specialized by consuming overlays, so two node
//! groups never share storage.

pub mod overlays;

use eksgen_overlay::{apply_overlays, deep_merge};
use serde::Serialize;
use serde_json::Value;

use crate::config::NodeGroupDefaults;

/// One eksctl node group
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NodeGroup(Value);

impl NodeGroup {
    /// Start a node group from a fresh copy of the baseline template
    pub fn from_defaults(defaults: &NodeGroupDefaults) -> Self {
        Self(defaults.to_value())
    }

    /// Merge an overlay into this node group
    pub fn overlay(self, overlay: Value) -> Self {
        Self(deep_merge(self.0, overlay))
    }

    /// Merge overlays in order; later overlays win
    pub fn overlay_all<I>(self, overlays: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Self(apply_overlays(self.0, overlays))
    }

    /// Merge an overlay only when `overlay` is present
    pub fn overlay_opt(self, overlay: Option<Value>) -> Self {
        match overlay {
            Some(overlay) => self.overlay(overlay),
            None => self,
        }
    }

    /// Node group name, once an overlay has set one
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(|v| v.as_str())
    }

    /// Top-level setting by eksctl key (e.g. "minSize")
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Top-level integer setting
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(|v| v.as_u64())
    }

    /// Entry of a nested map such as "labels", "taints" or "tags".
    ///
    /// Entry keys often contain dots and slashes ("nvidia.com/gpu"), so the
    /// map and entry are addressed separately.
    pub fn entry(&self, map: &str, key: &str) -> Option<&str> {
        self.0.get(map)?.get(key)?.as_str()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}
