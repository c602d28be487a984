//! Error types for loading filter configuration.

use thiserror::Error;

/// Errors that can occur while reading a filter configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration is not valid JSON, or a required parameter is missing
    #[error("Invalid config {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for configuration Results
pub type Result<T> = std::result::Result<T, ConfigError>;
