//! Overlay merge
//!
//! The destination is consumed and the merged document returned, so a caller
//! that still needs the original has to clone it first.

use serde_json::Value;

/// Merge `overlay` into `base`.
///
/// Merge semantics:
/// - Both objects: every key from both sides is kept; shared keys merge recursively
/// - Arrays: REPLACE (overlay wins entirely, no concatenation)
/// - Scalars, or an object meeting a non-object: overlay wins
///
/// Merging never fails.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value,
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }

        (_, overlay) => overlay,
    }
}

/// Apply overlays to `base` in order; later overlays take precedence.
pub fn apply_overlays<I>(base: Value, overlays: I) -> Value
where
    I: IntoIterator<Item = Value>,
{
    overlays.into_iter().fold(base, deep_merge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_override() {
        let base = json!({"instanceType": "t3.medium"});
        let overlay = json!({"instanceType": "mixed"});
        let result = deep_merge(base, overlay);
        assert_eq!(result["instanceType"], "mixed");
    }

    #[test]
    fn test_nested_keys_preserved() {
        let base = json!({
            "labels": {"workload": "true"}
        });
        let overlay = json!({
            "labels": {"lifecycle": "Ec2Spot"}
        });
        let result = deep_merge(base, overlay);

        assert_eq!(result["labels"]["workload"], "true");
        assert_eq!(result["labels"]["lifecycle"], "Ec2Spot");
    }

    #[test]
    fn test_array_replaced() {
        let base = json!({"availabilityZones": ["us-west-2a", "us-west-2b", "us-west-2c"]});
        let overlay = json!({"availabilityZones": ["us-east-1a"]});
        let result = deep_merge(base, overlay);

        assert_eq!(result["availabilityZones"], json!(["us-east-1a"]));
    }

    #[test]
    fn test_new_key_added() {
        let result = deep_merge(json!({"minSize": 1}), json!({"maxSize": 5}));

        assert_eq!(result["minSize"], 1);
        assert_eq!(result["maxSize"], 5);
    }

    #[test]
    fn test_object_replaced_by_scalar() {
        let base = json!({"ami": {"id": "ami-123"}});
        let overlay = json!({"ami": "auto"});
        let result = deep_merge(base, overlay);

        assert_eq!(result["ami"], "auto");
    }

    #[test]
    fn test_scalar_replaced_by_object() {
        let base = json!({"taints": "none"});
        let overlay = json!({"taints": {"workload": "true:NoSchedule"}});
        let result = deep_merge(base, overlay);

        assert_eq!(result["taints"]["workload"], "true:NoSchedule");
    }

    #[test]
    fn test_deeply_nested_merge() {
        let base = json!({
            "kubeletExtraConfig": {
                "kubeReserved": {"cpu": "150m", "memory": "300Mi"}
            }
        });
        let overlay = json!({
            "kubeletExtraConfig": {
                "kubeReserved": {"memory": "500Mi", "ephemeral-storage": "1Gi"}
            }
        });
        let result = deep_merge(base, overlay);

        let reserved = &result["kubeletExtraConfig"]["kubeReserved"];
        assert_eq!(reserved["cpu"], "150m");
        assert_eq!(reserved["memory"], "500Mi");
        assert_eq!(reserved["ephemeral-storage"], "1Gi");
    }

    #[test]
    fn test_merge_is_idempotent() {
        let base = json!({
            "name": "ng",
            "tags": {"a": "1"}
        });
        let overlay = json!({
            "tags": {"b": "2"},
            "minSize": 0
        });

        let once = deep_merge(base.clone(), overlay.clone());
        let twice = deep_merge(once.clone(), overlay);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_apply_overlays_in_order() {
        let base = json!({"name": "base", "labels": {}});
        let overlays = vec![
            json!({"name": "worker", "labels": {"workload": "true"}}),
            json!({"name": "spot"}),
        ];

        let result = apply_overlays(base, overlays);

        assert_eq!(result["name"], "spot");
        assert_eq!(result["labels"]["workload"], "true");
    }

    #[test]
    fn test_apply_no_overlays_is_identity() {
        let base = json!({"ami": "auto"});
        let result = apply_overlays(base.clone(), Vec::new());
        assert_eq!(result, base);
    }
}
