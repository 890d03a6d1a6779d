//! Node-group overlays
//!
//! Each function returns a partial eksctl node-group document to be merged
//! with [`NodeGroup::overlay`](super::NodeGroup::overlay).

use serde_json::{json, Map, Value};

use crate::config::{ClusterConfig, ConfigError};
use crate::instance::{inferentia_resources, InstanceClass};

pub const OPERATOR_NODEGROUP_NAME: &str = "ng-cortex-operator";
pub const WORKER_NODEGROUP_NAME: &str = "ng-cortex-worker-on-demand";
pub const SPOT_NODEGROUP_NAME: &str = "ng-cortex-worker-spot";

/// Instance type of the operator node group
pub const OPERATOR_INSTANCE_TYPE: &str = "t3.medium";

/// eksctl instance type for a mixed instances policy
pub const MIXED_INSTANCE_TYPE: &str = "mixed";

/// EKS-compatible image for Inferentia nodes.
// TODO: revert to "auto" once eksctl resolves an EKS-optimized AMI for inf
// instances (aws/containers-roadmap#619).
pub const INFERENTIA_AMI: &str = "ami-07a7b48058cfe1a73";

const AUTOSCALER_ENABLED_TAG: &str = "k8s.io/cluster-autoscaler/enabled";
const NODE_TEMPLATE_TAG_PREFIX: &str = "k8s.io/cluster-autoscaler/node-template";

const WORKLOAD_KEY: &str = "workload";
const GPU_RESOURCE: &str = "nvidia.com/gpu";
const INFERENTIA_RESOURCE: &str = "aws.amazon.com/infa";

const NO_SCHEDULE: &str = "true:NoSchedule";

/// Autoscaler discovery tag for a node-template label, taint or resource
fn node_template_tag(kind: &str, name: &str) -> String {
    format!("{}/{}/{}", NODE_TEMPLATE_TAG_PREFIX, kind, name)
}

fn tag_map<const N: usize>(entries: [(String, String); N]) -> Value {
    Value::Object(
        entries
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect::<Map<String, Value>>(),
    )
}

/// Single-node, non-scaling group running the cluster operator
pub fn operator(config: &ClusterConfig) -> Value {
    json!({
        "name": OPERATOR_NODEGROUP_NAME,
        "instanceType": OPERATOR_INSTANCE_TYPE,
        "availabilityZones": config.availability_zones,
        "minSize": 1,
        "maxSize": 1,
        "desiredCapacity": 1
    })
}

/// Workload label and taint, plus autoscaler discovery tags
pub fn worker() -> Value {
    json!({
        "name": WORKER_NODEGROUP_NAME,
        "labels": { WORKLOAD_KEY: "true" },
        "taints": { WORKLOAD_KEY: NO_SCHEDULE },
        "tags": tag_map([
            (AUTOSCALER_ENABLED_TAG.to_string(), "true".to_string()),
            (node_template_tag("label", WORKLOAD_KEY), "true".to_string()),
        ])
    })
}

/// Instance type, placement, volume and scaling bounds from the configmap
pub fn scaling(config: &ClusterConfig) -> Value {
    json!({
        "instanceType": config.instance_type,
        "availabilityZones": config.availability_zones,
        "volumeSize": config.instance_volume_size,
        "minSize": config.min_instances,
        "maxSize": config.max_instances,
        "desiredCapacity": config.desired_capacity()
    })
}

/// Mixed instances policy backed by the spot market
pub fn spot(config: &ClusterConfig) -> Result<Value, ConfigError> {
    let spot_config = config.spot_config()?;

    Ok(json!({
        "name": SPOT_NODEGROUP_NAME,
        "instanceType": MIXED_INSTANCE_TYPE,
        "instancesDistribution": {
            "instanceTypes": spot_config.instance_distribution()?,
            "onDemandBaseCapacity": spot_config.on_demand_base_capacity()?,
            "onDemandPercentageAboveBaseCapacity":
                spot_config.on_demand_percentage_above_base_capacity()?,
            "maxPrice": Value::from(spot_config.max_price()?),
            "spotInstancePools": spot_config.instance_pools()?
        },
        "labels": { "lifecycle": "Ec2Spot" }
    }))
}

/// Dedicate the group to GPU workloads
pub fn gpu() -> Value {
    json!({
        "tags": tag_map([
            (node_template_tag("label", GPU_RESOURCE), "true".to_string()),
            (
                node_template_tag("taint", "dedicated"),
                format!("{}=true", GPU_RESOURCE),
            ),
        ]),
        "labels": { GPU_RESOURCE: "true" },
        "taints": { GPU_RESOURCE: NO_SCHEDULE }
    })
}

/// Dedicate the group to Inferentia workloads and advertise its chips
pub fn inferentia(instance_type: &str) -> Value {
    let resources = inferentia_resources(instance_type);

    json!({
        "ami": INFERENTIA_AMI,
        "tags": tag_map([
            (node_template_tag("label", INFERENTIA_RESOURCE), "true".to_string()),
            (
                node_template_tag("taint", "dedicated"),
                format!("{}=true", INFERENTIA_RESOURCE),
            ),
            (
                node_template_tag("resources", INFERENTIA_RESOURCE),
                resources.chips.to_string(),
            ),
            (node_template_tag("resources", "hugepages-2Mi"), resources.hugepages),
        ]),
        "labels": { INFERENTIA_RESOURCE: "true" },
        "taints": { INFERENTIA_RESOURCE: NO_SCHEDULE }
    })
}

/// Accelerator overlay for the instance type, if its class needs one
pub fn accelerator(instance_type: &str) -> Option<Value> {
    match InstanceClass::of(instance_type) {
        InstanceClass::Gpu => Some(gpu()),
        InstanceClass::Inferentia => Some(inferentia(instance_type)),
        InstanceClass::General => None,
    }
}

/// Dormant standby: no nodes until the autoscaler scales it up
pub fn scale_to_zero() -> Value {
    json!({
        "minSize": 0,
        "desiredCapacity": 0
    })
}
