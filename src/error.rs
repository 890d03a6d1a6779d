//! Error types for descriptor generation

use thiserror::Error;

use crate::config::ConfigError;

/// Generation errors
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to render cluster config: {0}")]
    Render(#[from] serde_yaml::Error),
}

/// Result type for generation
pub type Result<T> = std::result::Result<T, Error>;
