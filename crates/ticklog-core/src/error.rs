//! Core error types.

use std::path::PathBuf;

use thiserror::Error;

/// Core-related errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Plugin error.
    #[error("plugin error: {0}")]
    Plugin(#[from] ticklog_plugin::PluginError),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] ticklog_config::ConfigError),

    /// Version parsing error.
    #[error("invalid version {input:?}: {source}")]
    Version {
        /// The rejected version string.
        input: String,
        /// The underlying semver error.
        #[source]
        source: semver::Error,
    },

    /// The package manifest is not valid JSON or has unexpected fields.
    #[error("invalid package manifest {path}: {source}")]
    Manifest {
        /// The manifest file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
