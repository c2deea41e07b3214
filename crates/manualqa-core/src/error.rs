//! Error types for manualqa

use thiserror::Error;

/// Result type alias using ManualQaError
pub type Result<T> = std::result::Result<T, ManualQaError>;

/// Error type alias for convenience
pub type Error = ManualQaError;

/// Exit codes for CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NOT_FOUND: i32 = 2;
    pub const INVALID_INPUT: i32 = 3;
}

/// Main error type for manualqa
#[derive(Debug, Error)]
pub enum ManualQaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Vector index error: {0}")]
    VectorIndex(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Fixture not found: {0}")]
    FixtureNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("External service error: {0}")]
    ExternalError(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl ManualQaError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FixtureNotFound(_) => exit_codes::NOT_FOUND,
            Self::InvalidInput(_) | Self::Config(_) => exit_codes::INVALID_INPUT,
            _ => exit_codes::GENERAL_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            ManualQaError::Config("bad floor".into()).exit_code(),
            exit_codes::INVALID_INPUT
        );
        assert_eq!(
            ManualQaError::FixtureNotFound("x.json".into()).exit_code(),
            exit_codes::NOT_FOUND
        );
        assert_eq!(
            ManualQaError::Llm("down".into()).exit_code(),
            exit_codes::GENERAL_ERROR
        );
    }
}
