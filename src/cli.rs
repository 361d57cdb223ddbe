// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::types::SortOrder;

/// Command-line arguments for `amplify-dash`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "amplify-dash",
    version,
    about = "Inspect jobs, queue items and the processing graph of an Amplify pipeline.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `amplify.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// API base URL; overrides `AMPLIFY_API` and the config file.
    #[arg(long, value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `AMPLIFY_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List one page of a resource.
    List {
        /// Resource name, e.g. `jobs`, `queue` or `analytics/results/content-type`.
        resource: String,

        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Page size; defaults to `[list].per_page`.
        #[arg(long)]
        per_page: Option<u32>,

        /// Field to sort by.
        #[arg(long, value_name = "FIELD")]
        sort: Option<String>,

        #[arg(long, value_enum, default_value = "asc")]
        order: SortOrder,

        /// Filter, repeatable: `--filter status=done`.
        #[arg(long = "filter", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        filters: Vec<(String, String)>,
    },

    /// Show a single record.
    Get { resource: String, id: String },

    /// Create a record under a new id, e.g. `create queue --attr cid=<cid>`.
    Create {
        resource: String,

        /// String attribute, repeatable.
        #[arg(long = "attr", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        attrs: Vec<(String, String)>,

        /// Attributes as a JSON object; `--attr` entries are merged on top.
        #[arg(long, value_name = "JSON")]
        data: Option<String>,
    },

    /// Print the processing graph as one tree per root node.
    Graph {
        /// Page size used while collecting the graph.
        #[arg(long, default_value_t = 100)]
        per_page: u32,
    },

    /// Fetch every dashboard panel concurrently.
    Dashboard,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Parse `key=value`; the value may itself contain `=`.
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
