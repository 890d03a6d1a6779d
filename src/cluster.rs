//! Cluster assembly
//!
//! Builds the node groups from the configmap and wraps them in an eksctl
//! `ClusterConfig` document:
//! - operator: baseline + fixed single-node settings
//! - worker: baseline + worker + scaling (+ spot) (+ accelerator)
//! - backup (spot with `on_demand_backup` only): the on-demand worker,
//!   scaled to zero so the autoscaler can fall back to it

use serde::Serialize;

use crate::config::{ClusterConfig, NodeGroupDefaults};
use crate::error::Result;
use crate::instance::InstanceClass;
use crate::nodegroup::{overlays, NodeGroup};

pub const API_VERSION: &str = "eksctl.io/v1alpha5";
pub const KIND: &str = "ClusterConfig";

/// Kubernetes version of the control plane
pub const KUBERNETES_VERSION: &str = "1.16";

/// Control-plane log types sent to CloudWatch
const CLUSTER_LOG_TYPES: &[&str] = &["*"];

/// eksctl `ClusterConfig` document
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterDescriptor {
    pub api_version: String,
    pub kind: String,
    pub metadata: ClusterMetadata,
    pub vpc: VpcConfig,
    pub availability_zones: Vec<String>,
    pub cloud_watch: CloudWatchConfig,
    /// Operator first, then the worker, then the optional backup
    pub node_groups: Vec<NodeGroup>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClusterMetadata {
    pub name: String,
    pub region: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VpcConfig {
    pub nat: NatConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct NatConfig {
    pub gateway: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudWatchConfig {
    pub cluster_logging: ClusterLogging,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterLogging {
    pub enable_types: Vec<String>,
}

impl ClusterDescriptor {
    pub fn operator(&self) -> Option<&NodeGroup> {
        self.node_groups.first()
    }

    pub fn worker(&self) -> Option<&NodeGroup> {
        self.node_groups.get(1)
    }

    pub fn backup(&self) -> Option<&NodeGroup> {
        self.node_groups.get(2)
    }
}

/// Generate the cluster descriptor using the built-in node-group template
pub fn generate(config: &ClusterConfig) -> Result<ClusterDescriptor> {
    generate_with_defaults(config, &NodeGroupDefaults::default())
}

/// Generate the cluster descriptor from a custom node-group template
pub fn generate_with_defaults(
    config: &ClusterConfig,
    defaults: &NodeGroupDefaults,
) -> Result<ClusterDescriptor> {
    let class = InstanceClass::of(&config.instance_type);
    tracing::debug!(
        instance_type = %config.instance_type,
        class = class.as_str(),
        spot = config.spot,
        "classified worker instance type"
    );

    let mut node_groups = vec![
        operator_nodegroup(config, defaults),
        worker_nodegroup(config, defaults)?,
    ];

    if config.wants_on_demand_backup() {
        node_groups.push(backup_nodegroup(config, defaults));
    }

    for ng in &node_groups {
        tracing::info!(
            name = ng.name().unwrap_or_default(),
            min = ng.get_u64("minSize"),
            max = ng.get_u64("maxSize"),
            desired = ng.get_u64("desiredCapacity"),
            "assembled node group"
        );
    }

    Ok(ClusterDescriptor {
        api_version: API_VERSION.to_string(),
        kind: KIND.to_string(),
        metadata: ClusterMetadata {
            name: config.cluster_name.clone(),
            region: config.region.clone(),
            version: KUBERNETES_VERSION.to_string(),
        },
        vpc: VpcConfig {
            nat: NatConfig {
                gateway: "Disable".to_string(),
            },
        },
        availability_zones: config.availability_zones.clone(),
        cloud_watch: CloudWatchConfig {
            cluster_logging: ClusterLogging {
                enable_types: CLUSTER_LOG_TYPES.iter().map(|s| s.to_string()).collect(),
            },
        },
        node_groups,
    })
}

fn operator_nodegroup(config: &ClusterConfig, defaults: &NodeGroupDefaults) -> NodeGroup {
    NodeGroup::from_defaults(defaults).overlay(overlays::operator(config))
}

/// Worker group on the on-demand market, before any spot settings
fn on_demand_worker(config: &ClusterConfig, defaults: &NodeGroupDefaults) -> NodeGroup {
    tracing::debug!(overlays = "worker,scaling", "building worker node group");
    NodeGroup::from_defaults(defaults)
        .overlay_all([overlays::worker(), overlays::scaling(config)])
}

fn worker_nodegroup(config: &ClusterConfig, defaults: &NodeGroupDefaults) -> Result<NodeGroup> {
    let mut ng = on_demand_worker(config, defaults);

    if config.spot {
        tracing::debug!("applying spot overlay");
        ng = ng.overlay(overlays::spot(config)?);
    }

    Ok(ng.overlay_opt(overlays::accelerator(&config.instance_type)))
}

fn backup_nodegroup(config: &ClusterConfig, defaults: &NodeGroupDefaults) -> NodeGroup {
    on_demand_worker(config, defaults)
        .overlay_opt(overlays::accelerator(&config.instance_type))
        .overlay(overlays::scale_to_zero())
}
