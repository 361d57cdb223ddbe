// src/commands.rs

//! CLI subcommands.
//!
//! Each command talks to the API through a [`DataProvider`] and returns the
//! text to print, so commands can be exercised with a fake transport.

use std::fmt::Write;

use serde_json::{Map, Value, json};
use tracing::info;

use crate::config::PanelConfig;
use crate::dashboard::{PanelResult, fetch_panels};
use crate::errors::{AmplifyError, Result};
use crate::graph::{NodeRecord, assemble_forest, render_forest};
use crate::provider::{DataProvider, HttpTransport, ListPage, ListParams};

/// Output flavour selected by `--json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

pub async fn list<T: HttpTransport>(
    provider: &DataProvider<T>,
    resource: &str,
    params: &ListParams,
    format: OutputFormat,
) -> Result<String> {
    let page: ListPage<Value> = provider.list(resource, params).await?;

    match format {
        OutputFormat::Json => pretty(&json!({
            "items": page.items,
            "total": page.total,
        })),
        OutputFormat::Text => {
            let mut out = String::new();
            for item in &page.items {
                let _ = writeln!(out, "{}", summarize(item));
            }
            let _ = writeln!(
                out,
                "-- {} of {} (page {}, {} per page)",
                page.items.len(),
                page.total,
                params.page,
                params.per_page
            );
            Ok(out)
        }
    }
}

pub async fn get<T: HttpTransport>(
    provider: &DataProvider<T>,
    resource: &str,
    id: &str,
    format: OutputFormat,
) -> Result<String> {
    let record: Value = provider.get(resource, id).await?;
    match format {
        OutputFormat::Json => pretty(&record),
        OutputFormat::Text => Ok(format!("{}\n", summarize(&record))),
    }
}

/// Build the attribute map for `create` from `--data` and `--attr` flags.
pub fn create_attributes(
    data: Option<&str>,
    attrs: &[(String, String)],
) -> Result<Map<String, Value>> {
    let mut attributes = match data {
        Some(raw) => match serde_json::from_str::<Value>(raw)? {
            Value::Object(map) => map,
            other => {
                return Err(AmplifyError::ConfigError(format!(
                    "--data must be a JSON object, got {other}"
                )));
            }
        },
        None => Map::new(),
    };
    for (key, value) in attrs {
        attributes.insert(key.clone(), Value::String(value.clone()));
    }
    Ok(attributes)
}

pub async fn create<T: HttpTransport>(
    provider: &DataProvider<T>,
    resource: &str,
    attributes: Map<String, Value>,
    format: OutputFormat,
) -> Result<String> {
    let record: Value = provider.create(resource, attributes).await?;
    if let Some(id) = record.get("id").and_then(Value::as_str) {
        info!(resource, id, "record created");
    }
    match format {
        OutputFormat::Json => pretty(&record),
        OutputFormat::Text => Ok(format!("created {resource}: {}\n", summarize(&record))),
    }
}

/// Collect the whole `graph` resource and print one tree per root.
pub async fn graph<T: HttpTransport>(
    provider: &DataProvider<T>,
    per_page: u32,
    format: OutputFormat,
) -> Result<String> {
    let page: ListPage<NodeRecord> = provider
        .list_all("graph", &ListParams::new(1, per_page))
        .await?;
    let forest = assemble_forest(&page.items)?;
    info!(nodes = page.items.len(), trees = forest.len(), "graph assembled");

    match format {
        OutputFormat::Json => pretty(&forest),
        OutputFormat::Text if forest.is_empty() => Ok("no root nodes found\n".to_string()),
        OutputFormat::Text => Ok(render_forest(&forest)),
    }
}

pub async fn dashboard<T: HttpTransport + 'static>(
    provider: &DataProvider<T>,
    panels: &[PanelConfig],
    format: OutputFormat,
) -> Result<String> {
    let results = fetch_panels(provider, panels).await;

    match format {
        OutputFormat::Json => {
            let panels: Vec<Value> = results.iter().map(panel_json).collect();
            pretty(&panels)
        }
        OutputFormat::Text => {
            let mut out = String::new();
            for result in &results {
                render_panel(result, &mut out);
            }
            Ok(out)
        }
    }
}

fn panel_json(result: &PanelResult) -> Value {
    match &result.outcome {
        Ok(page) => json!({
            "title": result.title,
            "resource": result.resource,
            "items": page.items,
            "total": page.total,
        }),
        Err(e) => json!({
            "title": result.title,
            "resource": result.resource,
            "error": e.to_string(),
            "status": e.status(),
        }),
    }
}

fn render_panel(result: &PanelResult, out: &mut String) {
    let _ = writeln!(out, "== {} ({})", result.title, result.resource);
    match &result.outcome {
        Ok(page) => {
            for item in &page.items {
                let _ = writeln!(out, "  {}", summarize(item));
            }
            let _ = writeln!(out, "  -- {} of {}", page.items.len(), page.total);
        }
        Err(e) => {
            let _ = writeln!(out, "  error: {e}");
        }
    }
}

/// One-line view of a record: its id followed by the remaining fields.
fn summarize(item: &Value) -> String {
    let Some(obj) = item.as_object() else {
        return item.to_string();
    };
    let id = match obj.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "-".to_string(),
    };
    let rest: Map<String, Value> = obj
        .iter()
        .filter(|(k, _)| k.as_str() != "id" && k.as_str() != "links")
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    if rest.is_empty() {
        id
    } else {
        format!("{id}\t{}", Value::Object(rest))
    }
}

fn pretty<S: serde::Serialize>(value: &S) -> Result<String> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}
