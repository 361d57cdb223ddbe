// tests/config_loading.rs

use std::io::Write;

use amplify_dash::config::model::{DEFAULT_BASE_URL, DEFAULT_ORIGIN};
use amplify_dash::config::{
    ConfigFile, apply_cli_override, apply_env_overrides, load_and_validate, resolve_config,
};
use amplify_dash::errors::AmplifyError;
use amplify_dash::types::{Sort, SortOrder};
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn full_config_file_is_loaded() {
    let file = write_config(
        r#"
[api]
base_url = "https://amplify.example.org/api/v0/"
timeout_secs = 15

[list]
per_page = 25

[[panel]]
title = "Recent summaries"
resource = "analytics/recent-results/summary_text"
sort_field = "meta.created_at"
sort_order = "desc"
per_page = 5
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.api.resolved_base_url(), "https://amplify.example.org/api/v0");
    assert_eq!(cfg.api.timeout_secs, Some(15));
    assert_eq!(cfg.list.per_page, 25);
    assert_eq!(cfg.panel.len(), 1);

    let params = cfg.panel[0].list_params();
    assert_eq!(params.page, 1);
    assert_eq!(params.per_page, 5);
    assert_eq!(params.sort, Some(Sort::desc("meta.created_at")));
}

#[test]
fn empty_file_uses_defaults_and_default_panels() {
    let file = write_config("");
    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.api.base_url, DEFAULT_BASE_URL);
    assert_eq!(cfg.api.origin, DEFAULT_ORIGIN);
    assert_eq!(cfg.api.resolved_base_url(), "http://localhost:8080/api/v0");
    assert_eq!(cfg.list.per_page, 10);

    let resources: Vec<&str> = cfg.panel.iter().map(|p| p.resource.as_str()).collect();
    assert_eq!(
        resources,
        vec![
            "analytics/results/content-type",
            "analytics/results/content-classification",
            "analytics/recent-results/summary_text",
        ]
    );
    assert!(cfg.panel.iter().all(|p| p.sort_order == SortOrder::Desc));
}

#[test]
fn relative_base_url_is_joined_to_origin() {
    let file = write_config(
        r#"
[api]
base_url = "proxy/api/v1"
origin = "http://dash.internal:9000/"
"#,
    );
    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.api.resolved_base_url(), "http://dash.internal:9000/proxy/api/v1");
}

#[test]
fn env_variable_overrides_file_base_url() {
    let mut cfg = ConfigFile::default();

    apply_env_overrides(&mut cfg, |key| {
        (key == "AMPLIFY_API").then(|| " http://api.test/v0 ".to_string())
    });

    assert_eq!(cfg.api.resolved_base_url(), "http://api.test/v0");
}

#[test]
fn empty_env_variable_is_ignored() {
    let mut cfg = ConfigFile::default();

    apply_env_overrides(&mut cfg, |_| Some("   ".to_string()));

    assert_eq!(cfg.api.base_url, DEFAULT_BASE_URL);
}

#[test]
fn cli_url_beats_env_which_beats_file() {
    let file = write_config("[api]\nbase_url = \"http://file.test/api/v0\"\n");
    let env = |key: &str| (key == "AMPLIFY_API").then(|| "http://env.test/api/v0".to_string());
    let no_env = |_: &str| None;

    let cfg = resolve_config(Some(file.path()), Some("http://cli.test/api/v0"), env).unwrap();
    assert_eq!(cfg.api.resolved_base_url(), "http://cli.test/api/v0");

    let cfg = resolve_config(Some(file.path()), None, env).unwrap();
    assert_eq!(cfg.api.resolved_base_url(), "http://env.test/api/v0");

    let cfg = resolve_config(Some(file.path()), None, no_env).unwrap();
    assert_eq!(cfg.api.resolved_base_url(), "http://file.test/api/v0");
}

#[test]
fn relative_cli_url_is_joined_to_origin() {
    let mut cfg = ConfigFile::default();

    apply_cli_override(&mut cfg, Some("/proxy/api")).unwrap();

    assert_eq!(cfg.api.resolved_base_url(), "http://localhost:8080/proxy/api");
}

#[test]
fn blank_cli_url_is_rejected() {
    let file = write_config("");

    let err = resolve_config(Some(file.path()), Some("  "), |_| None).unwrap_err();
    assert!(matches!(err, AmplifyError::ConfigError(ref m) if m.contains("--api-url")));

    let mut cfg = ConfigFile::default();
    assert!(apply_cli_override(&mut cfg, Some("")).is_err());
    assert_eq!(cfg.api.base_url, DEFAULT_BASE_URL);
}

#[test]
fn zero_page_size_is_rejected() {
    let file = write_config("[list]\nper_page = 0\n");

    match load_and_validate(file.path()) {
        Err(AmplifyError::ConfigError(msg)) => assert!(msg.contains("per_page")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn panel_without_resource_is_rejected() {
    let file = write_config(
        r#"
[[panel]]
title = "Broken"
resource = " "
"#,
    );

    match load_and_validate(file.path()) {
        Err(AmplifyError::ConfigError(msg)) => {
            assert!(msg.contains("Broken"));
            assert!(msg.contains("empty resource"));
        }
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn relative_base_url_needs_an_http_origin() {
    let file = write_config(
        r#"
[api]
base_url = "/api/v0"
origin = "localhost:8080"
"#,
    );

    let err = load_and_validate(file.path()).unwrap_err();
    assert!(matches!(err, AmplifyError::ConfigError(ref m) if m.contains("origin")));
}

#[test]
fn unknown_sort_order_is_a_toml_error() {
    let file = write_config(
        r#"
[[panel]]
title = "Odd"
resource = "jobs"
sort_field = "id"
sort_order = "sideways"
"#,
    );

    let err = load_and_validate(file.path()).unwrap_err();
    assert!(matches!(err, AmplifyError::TomlError(_)), "{err:?}");
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_and_validate("/definitely/not/here/amplify.toml").unwrap_err();
    assert!(matches!(err, AmplifyError::IoError(_)));
}
