//! Notebook execution operations

use super::Operation;
use crate::pager::{PageRequest, PageResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a notebook execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotebookExecutionStatus {
    StartPending,
    Starting,
    Running,
    Finishing,
    Finished,
    Failing,
    Failed,
    StopPending,
    Stopping,
    Stopped,
}

/// One notebook execution as returned by list operations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotebookExecutionSummary {
    pub id: String,
    pub editor_id: String,
    pub status: NotebookExecutionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
}

/// Full notebook execution record as returned by describe
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotebookExecutionDetail {
    pub id: String,
    pub editor_id: String,
    pub status: NotebookExecutionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_state_change_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
}

// ============================================================================
// ListNotebookExecutions
// ============================================================================

/// Request for the ListNotebookExecutions operation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNotebookExecutionsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<NotebookExecutionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_after: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_before: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
}

/// Response page for the ListNotebookExecutions operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNotebookExecutionsResponse {
    #[serde(default)]
    pub notebook_executions: Vec<NotebookExecutionSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
}

impl Operation for ListNotebookExecutionsRequest {
    type Output = ListNotebookExecutionsResponse;
    const NAME: &'static str = "ListNotebookExecutions";
}

impl PageRequest for ListNotebookExecutionsRequest {
    fn set_continuation_token(&mut self, token: Option<String>) {
        self.marker = token;
    }
}

impl PageResponse for ListNotebookExecutionsResponse {
    type Item = NotebookExecutionSummary;

    fn continuation_token(&self) -> Option<&str> {
        self.marker.as_deref()
    }

    fn items(&self) -> &[NotebookExecutionSummary] {
        &self.notebook_executions
    }
}

// ============================================================================
// DescribeNotebookExecution
// ============================================================================

/// Request for the DescribeNotebookExecution operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeNotebookExecutionRequest {
    pub execution_id: String,
}

/// Response for the DescribeNotebookExecution operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeNotebookExecutionResponse {
    pub notebook_execution: NotebookExecutionDetail,
}

impl Operation for DescribeNotebookExecutionRequest {
    type Output = DescribeNotebookExecutionResponse;
    const NAME: &'static str = "DescribeNotebookExecution";
}
