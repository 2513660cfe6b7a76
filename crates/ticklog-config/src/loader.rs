//! Configuration loader.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{Config, ConfigError, ConfigResult};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "ticklog.toml";

/// Loads and validates the configuration at `path`.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable, not valid TOML or
/// fails [`Config::validate`].
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<Config> {
    let path = path.as_ref();
    debug!(?path, "loading configuration");

    if !path.is_file() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;

    debug!(
        parser = %config.parser.name,
        transform = %config.transform.name,
        formatter = %config.formatter.name,
        "configuration loaded"
    );
    Ok(config)
}

/// Finds and loads configuration from the current directory or parents.
///
/// # Errors
///
/// Returns an error if no configuration file is found or it cannot be loaded.
pub fn find_and_load_config() -> ConfigResult<Config> {
    let current_dir = std::env::current_dir()?;
    find_and_load_config_from(&current_dir)
}

/// Returns the nearest `ticklog.toml` in `start_dir` or one of its parents.
#[must_use]
pub fn find_config_file(start_dir: impl AsRef<Path>) -> Option<PathBuf> {
    start_dir
        .as_ref()
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// Finds and loads configuration starting from the given directory.
///
/// Walks up the directory tree until a configuration file is found.
///
/// # Errors
///
/// Returns an error if no configuration file is found or it cannot be loaded.
pub fn find_and_load_config_from(start_dir: impl AsRef<Path>) -> ConfigResult<Config> {
    let start_dir = start_dir.as_ref();
    match find_config_file(start_dir) {
        Some(path) => load_config(path),
        None => Err(ConfigError::NotFound(start_dir.join(CONFIG_FILE_NAME))),
    }
}
