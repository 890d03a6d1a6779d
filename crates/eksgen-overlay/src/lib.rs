//! Recursive overlay merge for nested settings documents.
//!
//! A settings document is a `serde_json::Value` tree. Overlays are merged
//! into a destination key by key:
//! - Objects: deep-merge by key
//! - Arrays: REPLACE (last wins)
//! - Scalars: override (last wins)

mod merge;

pub use merge::{apply_overlays, deep_merge};
