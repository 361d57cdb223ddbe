// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile, is_absolute};
use crate::errors::{AmplifyError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::AmplifyError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.api, raw.list, raw.panel))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_api(cfg)?;
    validate_list(cfg)?;
    validate_panels(cfg)?;
    Ok(())
}

fn validate_api(cfg: &RawConfigFile) -> Result<()> {
    let api = &cfg.api;
    if api.base_url.trim().is_empty() {
        return Err(AmplifyError::ConfigError(
            "[api].base_url must not be empty".to_string(),
        ));
    }
    if !is_absolute(&api.base_url) && !is_absolute(&api.origin) {
        return Err(AmplifyError::ConfigError(format!(
            "[api].origin must be an http(s) URL when base_url is relative (got '{}')",
            api.origin
        )));
    }
    if api.timeout_secs == Some(0) {
        return Err(AmplifyError::ConfigError(
            "[api].timeout_secs must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_list(cfg: &RawConfigFile) -> Result<()> {
    if cfg.list.per_page == 0 {
        return Err(AmplifyError::ConfigError(
            "[list].per_page must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_panels(cfg: &RawConfigFile) -> Result<()> {
    for (i, panel) in cfg.panel.iter().enumerate() {
        if panel.resource.trim().is_empty() {
            return Err(AmplifyError::ConfigError(format!(
                "panel #{} ('{}') has an empty resource",
                i + 1,
                panel.title
            )));
        }
        if panel.per_page == 0 {
            return Err(AmplifyError::ConfigError(format!(
                "panel '{}' must have per_page >= 1 (got 0)",
                panel.title
            )));
        }
        if panel.sort_field.as_deref().is_some_and(|f| f.trim().is_empty()) {
            return Err(AmplifyError::ConfigError(format!(
                "panel '{}' has an empty sort_field",
                panel.title
            )));
        }
    }
    Ok(())
}
