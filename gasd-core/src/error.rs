//! Error types for gasd

use thiserror::Error;

/// Main error type for gasd operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Input point cloud is empty")]
    EmptyInput,

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type alias for gasd operations
pub type Result<T> = std::result::Result<T, Error>;
