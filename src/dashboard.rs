// src/dashboard.rs

//! Dashboard overview: every configured panel fetched concurrently.
//!
//! Each panel runs as its own task on a `JoinSet`. A failing panel only
//! affects its own entry; results are reported in configuration order
//! regardless of completion order.

use serde_json::Value;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::config::PanelConfig;
use crate::errors::{AmplifyError, Result};
use crate::provider::{DataProvider, HttpTransport, ListPage};

/// Outcome of fetching one panel.
#[derive(Debug)]
pub struct PanelResult {
    pub title: String,
    pub resource: String,
    pub outcome: Result<ListPage<Value>>,
}

impl PanelResult {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Fetch the first page of every panel at once.
pub async fn fetch_panels<T>(provider: &DataProvider<T>, panels: &[PanelConfig]) -> Vec<PanelResult>
where
    T: HttpTransport + 'static,
{
    let mut set = JoinSet::new();
    for (idx, panel) in panels.iter().enumerate() {
        let provider = provider.clone();
        let resource = panel.resource.clone();
        let params = panel.list_params();
        set.spawn(async move {
            let outcome = provider.list::<Value>(&resource, &params).await;
            (idx, outcome)
        });
    }

    let mut outcomes: Vec<Option<Result<ListPage<Value>>>> =
        std::iter::repeat_with(|| None).take(panels.len()).collect();

    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((idx, outcome)) => {
                if let Err(e) = &outcome {
                    warn!(panel = %panels[idx].title, error = %e, "panel fetch failed");
                }
                outcomes[idx] = Some(outcome);
            }
            Err(e) => warn!(error = %e, "panel task did not complete"),
        }
    }
    debug!(panels = panels.len(), "dashboard fetch complete");

    panels
        .iter()
        .zip(outcomes)
        .map(|(panel, outcome)| PanelResult {
            title: panel.title.clone(),
            resource: panel.resource.clone(),
            outcome: outcome.unwrap_or_else(|| {
                Err(AmplifyError::Other(anyhow::anyhow!(
                    "panel task for '{}' aborted",
                    panel.resource
                )))
            }),
        })
        .collect()
}
