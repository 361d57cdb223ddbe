// src/lib.rs

pub mod cli;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod graph;
pub mod logging;
pub mod provider;
pub mod types;

use std::time::Duration;

use anyhow::Result;
use tracing::info;

use crate::cli::{CliArgs, Command};
use crate::commands::OutputFormat;
use crate::config::{ConfigFile, resolve_config};
use crate::provider::{DataProvider, ListParams, ReqwestTransport};
use crate::types::Sort;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (file, `AMPLIFY_API`, `--api-url`)
/// - the HTTP transport and data provider
/// - the selected subcommand
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = resolve_config(args.config.as_deref(), args.api_url.as_deref(), |key| {
        std::env::var(key).ok()
    })?;
    let provider = build_provider(&cfg)?;
    info!(base_url = provider.base_url(), "using API");

    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let output = match args.command {
        Command::List {
            resource,
            page,
            per_page,
            sort,
            order,
            filters,
        } => {
            let mut params = ListParams::new(page, per_page.unwrap_or(cfg.list.per_page));
            if let Some(field) = sort {
                params = params.with_sort(Sort::new(field, order));
            }
            for (key, value) in filters {
                params = params.with_filter(key, value);
            }
            commands::list(&provider, &resource, &params, format).await?
        }
        Command::Get { resource, id } => commands::get(&provider, &resource, &id, format).await?,
        Command::Create {
            resource,
            attrs,
            data,
        } => {
            let attributes = commands::create_attributes(data.as_deref(), &attrs)?;
            commands::create(&provider, &resource, attributes, format).await?
        }
        Command::Graph { per_page } => commands::graph(&provider, per_page, format).await?,
        Command::Dashboard => commands::dashboard(&provider, &cfg.panel, format).await?,
    };

    print!("{output}");
    Ok(())
}

/// Build the production provider for a resolved config.
pub fn build_provider(cfg: &ConfigFile) -> crate::errors::Result<DataProvider<ReqwestTransport>> {
    let timeout = cfg.api.timeout_secs.map(Duration::from_secs);
    let transport = ReqwestTransport::new(timeout)?;
    Ok(DataProvider::new(cfg.api.resolved_base_url(), transport))
}
