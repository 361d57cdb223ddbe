// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{AmplifyError, Result};

/// Environment variable overriding `[api].base_url`.
pub const API_URL_ENV: &str = "AMPLIFY_API";

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; use [`load_and_validate`] for the
/// semantic checks.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and validate it.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Resolve the configuration the CLI runs with.
///
/// - An explicit `path` must exist and be valid.
/// - Otherwise [`default_config_path`] is used if present.
/// - Otherwise built-in defaults apply.
pub fn load_or_default(path: Option<&Path>) -> Result<ConfigFile> {
    if let Some(path) = path {
        debug!(?path, "loading config");
        return load_and_validate(path);
    }

    let default_path = default_config_path();
    if default_path.is_file() {
        debug!(path = ?default_path, "loading default config");
        return load_and_validate(default_path);
    }

    debug!("no config file; using defaults");
    Ok(ConfigFile::default())
}

/// Apply environment overrides, reading variables through `lookup`.
///
/// Empty values are ignored.
pub fn apply_env_overrides<F>(cfg: &mut ConfigFile, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
        debug!(%url, "base URL taken from {API_URL_ENV}");
        cfg.api.base_url = url.trim().to_string();
    }
}

/// Apply the `--api-url` flag on top of file and environment settings.
///
/// A blank value is rejected rather than falling back to the origin.
pub fn apply_cli_override(cfg: &mut ConfigFile, api_url: Option<&str>) -> Result<()> {
    let Some(url) = api_url else {
        return Ok(());
    };
    let url = url.trim();
    if url.is_empty() {
        return Err(AmplifyError::ConfigError(
            "--api-url must not be empty".to_string(),
        ));
    }
    debug!(%url, "base URL taken from --api-url");
    cfg.api.base_url = url.to_string();
    Ok(())
}

/// Full resolution: config file, then `AMPLIFY_API`, then `--api-url`.
pub fn resolve_config<F>(path: Option<&Path>, api_url: Option<&str>, lookup: F) -> Result<ConfigFile>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = load_or_default(path)?;
    apply_env_overrides(&mut cfg, lookup);
    apply_cli_override(&mut cfg, api_url)?;
    Ok(cfg)
}

/// `amplify.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("amplify.toml")
}
