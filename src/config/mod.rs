// src/config/mod.rs

//! Configuration loading and validation.
//!
//! - [`model`] defines the TOML-backed data model.
//! - [`loader`] reads a config file and applies environment overrides.
//! - [`validate`] turns a raw file into a validated [`ConfigFile`].

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{
    apply_cli_override, apply_env_overrides, load_and_validate, load_from_path, load_or_default,
    resolve_config,
};
pub use model::{ApiSection, ConfigFile, ListSection, PanelConfig, RawConfigFile};
