//! Baseline node-group template
//!
//! Every node group starts from a fresh copy of these settings. Kubelet
//! field names follow the kubelet config schema (k8s.io/kubelet/config/v1beta1).

/// Resources reserved on each node for Kubernetes or system daemons
#[derive(Debug, Clone)]
pub struct ReservedResources {
    pub cpu: String,
    pub memory: String,
    pub ephemeral_storage: String,
}

impl Default for ReservedResources {
    fn default() -> Self {
        Self {
            cpu: "150m".to_string(),
            memory: "300Mi".to_string(),
            ephemeral_storage: "1Gi".to_string(),
        }
    }
}

impl ReservedResources {
    fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "cpu": self.cpu,
            "memory": self.memory,
            "ephemeral-storage": self.ephemeral_storage
        })
    }
}

/// Settings shared by every node group
#[derive(Debug, Clone)]
pub struct NodeGroupDefaults {
    /// Machine image (default: "auto", resolved by eksctl)
    pub ami: String,

    /// Attach the cluster-autoscaler IAM addon policy (default: true)
    pub autoscaler_policy: bool,

    pub kube_reserved: ReservedResources,

    /// Cgroup for Kubernetes daemons (default: "/kube-reserved")
    pub kube_reserved_cgroup: String,

    pub system_reserved: ReservedResources,

    /// Hard eviction threshold for available memory (default: "200Mi")
    pub eviction_memory_available: String,

    /// Hard eviction threshold for node filesystem (default: "5%")
    pub eviction_nodefs_available: String,
}

impl Default for NodeGroupDefaults {
    fn default() -> Self {
        Self {
            ami: "auto".to_string(),
            autoscaler_policy: true,
            kube_reserved: ReservedResources::default(),
            kube_reserved_cgroup: "/kube-reserved".to_string(),
            system_reserved: ReservedResources::default(),
            eviction_memory_available: "200Mi".to_string(),
            eviction_nodefs_available: "5%".to_string(),
        }
    }
}

impl NodeGroupDefaults {
    /// Convert to the eksctl node-group shape for merging
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "ami": self.ami,
            "iam": {
                "withAddonPolicies": {
                    "autoScaler": self.autoscaler_policy
                }
            },
            "kubeletExtraConfig": {
                "kubeReserved": self.kube_reserved.to_value(),
                "kubeReservedCgroup": self.kube_reserved_cgroup,
                "systemReserved": self.system_reserved.to_value(),
                "evictionHard": {
                    "memory.available": self.eviction_memory_available,
                    "nodefs.available": self.eviction_nodefs_available
                }
            }
        })
    }
}
