// src/config/model.rs

use serde::Deserialize;

use crate::provider::{DEFAULT_PER_PAGE, ListParams};
use crate::types::{Sort, SortOrder};

/// Base URL used when neither the config file, `AMPLIFY_API` nor
/// `--api-url` provide one.
pub const DEFAULT_BASE_URL: &str = "/api/v0";

/// Origin that relative base URLs are resolved against.
pub const DEFAULT_ORIGIN: &str = "http://localhost:8080";

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [api]
/// base_url = "/api/v0"
/// origin = "http://localhost:8080"
///
/// [list]
/// per_page = 10
///
/// [[panel]]
/// title = "Content types"
/// resource = "analytics/results/content-type"
/// sort_field = "meta.count"
/// sort_order = "desc"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub api: ApiSection,

    #[serde(default)]
    pub list: ListSection,

    /// Dashboard panels from `[[panel]]`.
    #[serde(default = "default_panels")]
    pub panel: Vec<PanelConfig>,
}

impl Default for RawConfigFile {
    fn default() -> Self {
        Self {
            api: ApiSection::default(),
            list: ListSection::default(),
            panel: default_panels(),
        }
    }
}

/// Validated configuration. Only constructible via `TryFrom<RawConfigFile>`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub api: ApiSection,
    pub list: ListSection,
    pub panel: Vec<PanelConfig>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(api: ApiSection, list: ListSection, panel: Vec<PanelConfig>) -> Self {
        Self { api, list, panel }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        let raw = RawConfigFile::default();
        Self::new_unchecked(raw.api, raw.list, raw.panel)
    }
}

/// `[api]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSection {
    /// Absolute URL, or a path resolved against `origin`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_origin")]
    pub origin: String,

    /// Per-request timeout; unset keeps the HTTP client's default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_origin() -> String {
    DEFAULT_ORIGIN.to_string()
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            origin: default_origin(),
            timeout_secs: None,
        }
    }
}

impl ApiSection {
    /// Absolute base URL the provider should use.
    pub fn resolved_base_url(&self) -> String {
        if is_absolute(&self.base_url) {
            return self.base_url.trim_end_matches('/').to_string();
        }
        format!(
            "{}/{}",
            self.origin.trim_end_matches('/'),
            self.base_url.trim_matches('/')
        )
    }
}

pub(crate) fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// `[list]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ListSection {
    /// Default page size for `list`.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

impl Default for ListSection {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
        }
    }
}

/// `[[panel]]` entry: one table on the dashboard overview.
#[derive(Debug, Clone, Deserialize)]
pub struct PanelConfig {
    pub title: String,

    pub resource: String,

    #[serde(default)]
    pub sort_field: Option<String>,

    #[serde(default)]
    pub sort_order: SortOrder,

    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl PanelConfig {
    pub fn new(title: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            resource: resource.into(),
            sort_field: None,
            sort_order: SortOrder::Asc,
            per_page: default_per_page(),
        }
    }

    pub fn sorted_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_field = Some(field.into());
        self.sort_order = order;
        self
    }

    /// First page of the panel's resource, sorted as configured.
    pub fn list_params(&self) -> ListParams {
        let params = ListParams::new(1, self.per_page);
        match &self.sort_field {
            Some(field) => params.with_sort(Sort::new(field.clone(), self.sort_order)),
            None => params,
        }
    }
}

/// The analytics tables shown when the config does not list any panels.
pub fn default_panels() -> Vec<PanelConfig> {
    vec![
        PanelConfig::new("Content types", "analytics/results/content-type")
            .sorted_by("meta.count", SortOrder::Desc),
        PanelConfig::new(
            "Content classifications",
            "analytics/results/content-classification",
        )
        .sorted_by("meta.count", SortOrder::Desc),
        PanelConfig::new("Text summaries", "analytics/recent-results/summary_text")
            .sorted_by("meta.created_at", SortOrder::Desc),
    ]
}
