//! Error types for the `nlsolve` command line driver.

use thiserror::Error;

/// Configuration loading and validation failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid precision: {0}. Must be a positive finite number")]
    InvalidEpsilon(String),

    #[error("Invalid iteration cap: {0}. Must be a positive integer")]
    InvalidMaxIterations(String),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Invalid configuration:\n  {}", .0.join("\n  "))]
    Validation(Vec<String>),
}

/// Top-level CLI error.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the CLI.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_every_problem() {
        let err = ConfigError::Validation(vec![
            "problem 'a': bad".to_string(),
            "problem 'b': worse".to_string(),
        ]);
        let msg = err.to_string();
        assert!(msg.starts_with("Invalid configuration:"));
        assert!(msg.contains("problem 'a': bad"));
        assert!(msg.contains("problem 'b': worse"));
    }

    #[test]
    fn test_config_error_converts_transparently() {
        let err: CliError = ConfigError::InvalidLogLevel("loud".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Invalid log level: loud. Must be one of: trace, debug, info, warn, error"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "stdin closed");
        let err: CliError = io.into();
        assert!(matches!(err, CliError::Io(_)));
        assert!(err.to_string().contains("stdin closed"));
    }
}
