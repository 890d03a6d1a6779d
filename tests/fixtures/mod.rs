//! Test fixtures for end-to-end generation
//!
//! Configmaps live under `tests/fixtures/configmaps/`.

use std::path::{Path, PathBuf};

/// Path to a configmap fixture by file name
pub fn configmap_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/configmaps")
        .join(name)
}

/// Generate from a fixture and parse the YAML output back into a tree
pub fn generate_fixture(name: &str) -> serde_json::Value {
    let yaml = eksgen::generate_eks(&configmap_path(name))
        .unwrap_or_else(|e| panic!("generation failed for {}: {}", name, e));
    serde_yaml::from_str(&yaml).expect("generated YAML should parse")
}
