//! Command execution logic

use super::commands::{Cli, Commands, OutputFormat, PageArgs};
use crate::client::ApiClient;
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::ops::{
    DescribeClusterRequest, DescribeNotebookExecutionRequest, DescribeStepRequest,
    ListBootstrapActionsRequest, ListClustersRequest, ListNotebookExecutionsRequest,
    ListStepsRequest, ModifyClusterRequest, Operation,
};
use crate::output::JsonLineSink;
use crate::pager::{
    items_selector, CancelToken, OutcomeSink, PageDriver, PageOutcome, PageRequest, PageResponse,
    PagerOptions, Selector, StopReason,
};
use serde_json::Value;
use tracing::{debug, info};

/// Executes CLI commands against the control plane
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner from parsed arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Execute the selected command
    pub async fn run(&self) -> Result<()> {
        let mut config = ApiConfig::load(self.cli.config.as_deref())?;
        if let Some(endpoint) = &self.cli.endpoint {
            config.endpoint = endpoint.clone();
        }
        let client = ApiClient::new(config)?;

        match &self.cli.command {
            Commands::ListClusters {
                states,
                created_after,
                created_before,
                page,
            } => {
                let request = ListClustersRequest {
                    cluster_states: states.clone(),
                    created_after: *created_after,
                    created_before: *created_before,
                    marker: None,
                };
                self.run_list(&client, request, page).await
            }

            Commands::DescribeCluster { cluster_id } => {
                self.run_single(
                    &client,
                    DescribeClusterRequest {
                        cluster_id: cluster_id.clone(),
                    },
                )
                .await
            }

            Commands::ModifyCluster {
                cluster_id,
                step_concurrency,
                termination_protected,
            } => {
                self.run_single(
                    &client,
                    ModifyClusterRequest {
                        cluster_id: cluster_id.clone(),
                        step_concurrency_level: *step_concurrency,
                        termination_protected: *termination_protected,
                    },
                )
                .await
            }

            Commands::ListSteps {
                cluster_id,
                states,
                page,
            } => {
                let request = ListStepsRequest {
                    cluster_id: cluster_id.clone(),
                    step_states: states.clone(),
                    marker: None,
                };
                self.run_list(&client, request, page).await
            }

            Commands::DescribeStep {
                cluster_id,
                step_id,
            } => {
                self.run_single(
                    &client,
                    DescribeStepRequest {
                        cluster_id: cluster_id.clone(),
                        step_id: step_id.clone(),
                    },
                )
                .await
            }

            Commands::ListBootstrapActions { cluster_id, page } => {
                let request = ListBootstrapActionsRequest {
                    cluster_id: cluster_id.clone(),
                    marker: None,
                };
                self.run_list(&client, request, page).await
            }

            Commands::ListNotebookExecutions {
                editor_id,
                status,
                started_after,
                started_before,
                page,
            } => {
                let request = ListNotebookExecutionsRequest {
                    editor_id: editor_id.clone(),
                    status: *status,
                    started_after: *started_after,
                    started_before: *started_before,
                    marker: None,
                };
                self.run_list(&client, request, page).await
            }

            Commands::DescribeNotebookExecution { execution_id } => {
                self.run_single(
                    &client,
                    DescribeNotebookExecutionRequest {
                        execution_id: execution_id.clone(),
                    },
                )
                .await
            }
        }
    }

    /// Drive a list operation through the page driver, streaming each page
    /// to stdout.
    async fn run_list<O>(&self, client: &ApiClient, request: O, page: &PageArgs) -> Result<()>
    where
        O: Operation + PageRequest + 'static,
        O::Output: PageResponse + 'static,
    {
        let options = PagerOptions::new()
            .with_no_auto_iteration(page.no_paginate)
            .with_starting_token(page.starting_token.clone());

        let cancel = CancelToken::new();
        spawn_cancel_watcher(cancel.clone());

        let mut driver = PageDriver::<O::Output>::new(O::NAME, options)
            .with_selector(selector_for::<O::Output>(page))
            .with_cancel_token(cancel);
        if page.raw {
            driver = driver.raw_passthrough();
        }

        let mut sink = JsonLineSink::stdout(self.pretty());
        let report = driver.run(client, request, &mut sink).await;

        debug!(
            operation = O::NAME,
            pages = report.pages_fetched,
            items = report.items_seen,
            stop_reason = ?report.stop_reason,
            "run finished"
        );

        match report.stop_reason {
            StopReason::Failed => Err(Error::other(format!(
                "{} failed after {} page(s)",
                O::NAME,
                report.pages_fetched
            ))),
            StopReason::SinglePage => {
                if let Some(token) = &report.resume_token {
                    info!(
                        operation = O::NAME,
                        "more data available; resume with --starting-token {token}"
                    );
                }
                Ok(())
            }
            StopReason::Drained | StopReason::Cancelled => Ok(()),
        }
    }

    /// Invoke a single-result operation and emit its response
    async fn run_single<O>(&self, client: &ApiClient, request: O) -> Result<()>
    where
        O: Operation,
        O::Output: serde::Serialize,
    {
        let response = client.invoke(&request).await?;
        let mut sink = JsonLineSink::stdout(self.pretty());
        sink.emit(PageOutcome::Page(serde_json::to_value(&response)?));
        Ok(())
    }

    fn pretty(&self) -> bool {
        self.cli.format == OutputFormat::Pretty
    }
}

/// Build the projection for a run: a JSON-pointer selector when `--select`
/// was given, otherwise the default item-collection projection.
///
/// The pointer is applied to the whole serialized response; on the synthetic
/// raw-passthrough call it is applied to the run context instead. A pointer
/// that matches nothing yields `null` rather than an error.
fn selector_for<R: PageResponse + 'static>(page: &PageArgs) -> Selector<R> {
    match &page.select {
        Some(pointer) => {
            let pointer = pointer.clone();
            Box::new(move |response, context| {
                let doc = match response {
                    Some(resp) => serde_json::to_value(resp).unwrap_or(Value::Null),
                    None => serde_json::to_value(context).unwrap_or(Value::Null),
                };
                doc.pointer(&pointer).cloned().unwrap_or(Value::Null)
            })
        }
        None => items_selector(),
    }
}

/// Flip the cancel token on Ctrl-C. The driver observes it between pages;
/// the in-flight call is never aborted.
fn spawn_cancel_watcher(cancel: CancelToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, stopping after the current page");
            cancel.cancel();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{ClusterSummary, ListClustersResponse};
    use crate::pager::CallContext;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample_page() -> ListClustersResponse {
        ListClustersResponse {
            clusters: vec![ClusterSummary {
                id: "c-1".to_string(),
                name: "etl".to_string(),
                state: crate::ops::ClusterState::Running,
                created_at: None,
            }],
            marker: Some("T1".to_string()),
        }
    }

    #[test]
    fn test_selector_defaults_to_items() {
        let selector = selector_for::<ListClustersResponse>(&PageArgs::default());
        let context = CallContext::new("ListClusters");

        let value = selector(Some(&sample_page()), &context);
        assert_eq!(
            value,
            json!([{"id": "c-1", "name": "etl", "state": "RUNNING"}])
        );
    }

    #[test]
    fn test_selector_applies_json_pointer() {
        let page = PageArgs {
            select: Some("/marker".to_string()),
            ..Default::default()
        };
        let selector = selector_for::<ListClustersResponse>(&page);
        let context = CallContext::new("ListClusters");

        assert_eq!(selector(Some(&sample_page()), &context), json!("T1"));
    }

    #[test]
    fn test_selector_pointer_miss_yields_null() {
        let page = PageArgs {
            select: Some("/nope".to_string()),
            ..Default::default()
        };
        let selector = selector_for::<ListClustersResponse>(&page);
        let context = CallContext::new("ListClusters");

        assert_eq!(
            selector(Some(&sample_page()), &context),
            serde_json::Value::Null
        );
    }

    #[test]
    fn test_selector_pointer_targets_context_without_response() {
        let page = PageArgs {
            select: Some("/operation".to_string()),
            ..Default::default()
        };
        let selector = selector_for::<ListClustersResponse>(&page);
        let context = CallContext::new("ListClusters");

        assert_eq!(selector(None, &context), json!("ListClusters"));
    }
}
