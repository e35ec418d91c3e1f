//! Domain errors for configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building and validating the cluster configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required field is missing or empty in the final merged config.
    #[error("Missing required configuration: {0}")]
    MissingRequiredConfig(String),

    /// A declared field holds a value of the wrong type.
    #[error("Invalid type for {path}: expected {expected}, got {actual}")]
    InvalidConfigType {
        /// Dotted path of the offending field.
        path: String,
        /// Expected type name.
        expected: &'static str,
        /// Actual value, rendered for the error message.
        actual: String,
    },

    /// The compiled-in defaults failed to parse. Build-time asset problem.
    #[error("Compiled-in defaults are invalid: {0}")]
    InvalidDefaults(String),

    /// A legacy configuration file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A legacy configuration file is not valid YAML.
    #[error("Invalid YAML in {}: {source}", path.display())]
    InvalidYaml {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_yaml::Error,
    },

    /// The settings store was installed twice.
    #[error("Configuration has already been installed for this process")]
    AlreadyInstalled,
}

/// Result alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
