//! Plugin error types.

use thiserror::Error;

/// Plugin-related errors.
#[derive(Debug, Error)]
pub enum PluginError {
    /// Plugin not found.
    #[error("plugin not found: {0}")]
    NotFound(String),

    /// Configuration error.
    #[error("plugin configuration error: {0}")]
    ConfigError(String),

    /// Invalid pattern in the commit grammar.
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// The regex compilation error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for plugin operations.
pub type PluginResult<T> = Result<T, PluginError>;
