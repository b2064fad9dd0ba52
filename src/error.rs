use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the simulation core and its resource loaders.
#[derive(Debug, Error)]
pub enum SimError {
    /// A vector handed to the policy does not match its shape.
    #[error("invalid argument: expected {expected} values, got {actual}")]
    InvalidArgument { expected: usize, actual: usize },
    /// Sprite image missing or undecodable.
    #[error("failed to load resource {path}: {source}")]
    ResourceLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to read config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigSource,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

#[derive(Debug, Error)]
pub enum ConfigSource {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
