//! Cluster configmap (the generator's input document)
//!
//! Only the keys the generator reads are modeled; anything else in the
//! configmap is ignored. Spot settings are only looked up when `spot` is
//! enabled, so a partial `spot_config` is accepted until then.

use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

/// Error types for configmap operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configmap: {0}")]
    IoError(#[from] io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Missing required key: {0}")]
    MissingKey(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Spot price ceiling, passed through to eksctl exactly as written.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MaxPrice {
    Amount(serde_json::Number),
    Text(String),
}

impl From<&MaxPrice> for serde_json::Value {
    fn from(price: &MaxPrice) -> Self {
        match price {
            MaxPrice::Amount(n) => serde_json::Value::Number(n.clone()),
            MaxPrice::Text(s) => serde_json::Value::String(s.clone()),
        }
    }
}

/// Spot fleet settings (`spot_config`)
///
/// Every key except `on_demand_backup` is required once `spot` is true; the
/// accessors report the first missing one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpotConfig {
    /// Candidate instance types for the mixed fleet
    pub instance_distribution: Option<Vec<String>>,

    /// On-demand instances kept before any spot capacity is used
    pub on_demand_base_capacity: Option<u64>,

    /// Percentage of capacity above the base that is on-demand (0-100)
    pub on_demand_percentage_above_base_capacity: Option<u64>,

    /// Maximum hourly spot price
    pub max_price: Option<MaxPrice>,

    /// Number of spot pools to spread capacity across
    pub instance_pools: Option<u64>,

    /// Add a dormant on-demand node group the autoscaler can fall back to
    #[serde(default)]
    pub on_demand_backup: bool,
}

fn required<'a, T>(value: &'a Option<T>, key: &str) -> Result<&'a T, ConfigError> {
    value
        .as_ref()
        .ok_or_else(|| ConfigError::MissingKey(format!("spot_config.{}", key)))
}

impl SpotConfig {
    pub fn instance_distribution(&self) -> Result<&Vec<String>, ConfigError> {
        required(&self.instance_distribution, "instance_distribution")
    }

    pub fn on_demand_base_capacity(&self) -> Result<u64, ConfigError> {
        required(&self.on_demand_base_capacity, "on_demand_base_capacity").copied()
    }

    pub fn on_demand_percentage_above_base_capacity(&self) -> Result<u64, ConfigError> {
        required(
            &self.on_demand_percentage_above_base_capacity,
            "on_demand_percentage_above_base_capacity",
        )
        .copied()
    }

    pub fn max_price(&self) -> Result<&MaxPrice, ConfigError> {
        required(&self.max_price, "max_price")
    }

    pub fn instance_pools(&self) -> Result<u64, ConfigError> {
        required(&self.instance_pools, "instance_pools").copied()
    }
}

/// Cluster configmap
#[derive(Debug, Clone, Deserialize)]
pub struct ClusterConfig {
    pub cluster_name: String,

    pub region: String,

    /// Zones shared by the cluster and every node group
    pub availability_zones: Vec<String>,

    /// Worker instance type (e.g. "m5.large", "p2.xlarge", "inf1.xlarge")
    pub instance_type: String,

    /// Worker root volume size in GiB
    pub instance_volume_size: u64,

    pub min_instances: u64,

    pub max_instances: u64,

    pub spot: bool,

    /// Required when `spot` is true
    #[serde(default)]
    pub spot_config: Option<SpotConfig>,
}

impl FromStr for ClusterConfig {
    type Err = ConfigError;

    /// Parse a configmap from a YAML string
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: ClusterConfig = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

impl ClusterConfig {
    /// Load and parse a configmap from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let bytes = fs::read(path)?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let digest = hex::encode(hasher.finalize());

        let config: ClusterConfig = serde_yaml::from_slice(&bytes)?;
        config.validate()?;

        tracing::info!(
            path = %path.display(),
            sha256 = %digest,
            cluster = %config.cluster_name,
            "loaded cluster configmap"
        );
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// Only the on-demand percentage has a declared range, and it is checked
    /// only when the spot settings are in use. Scaling bounds are left to
    /// eksctl.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.spot {
            return Ok(());
        }

        if let Some(percentage) = self
            .spot_config
            .as_ref()
            .and_then(|s| s.on_demand_percentage_above_base_capacity)
        {
            if percentage > 100 {
                return Err(ConfigError::ValidationError(format!(
                    "'on_demand_percentage_above_base_capacity' must be in [0, 100], got {}",
                    percentage
                )));
            }
        }

        Ok(())
    }

    /// Spot settings, required once `spot` is enabled
    pub fn spot_config(&self) -> Result<&SpotConfig, ConfigError> {
        self.spot_config
            .as_ref()
            .ok_or_else(|| ConfigError::MissingKey("spot_config".to_string()))
    }

    /// Initial size of the worker group.
    ///
    /// An autoscaling group cannot bootstrap from zero nodes, so a minimum of
    /// 0 still starts one instance.
    pub fn desired_capacity(&self) -> u64 {
        if self.min_instances == 0 {
            1
        } else {
            self.min_instances
        }
    }

    /// Whether a scaled-to-zero on-demand backup group should be generated
    pub fn wants_on_demand_backup(&self) -> bool {
        self.spot
            && self
                .spot_config
                .as_ref()
                .map(|s| s.on_demand_backup)
                .unwrap_or(false)
    }
}
