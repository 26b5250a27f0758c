//! Step operations
//!
//! List and describe the work steps submitted to a cluster.

use super::Operation;
use crate::pager::{PageRequest, PageResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepState {
    Pending,
    Running,
    Completed,
    Cancelled,
    Failed,
    Interrupted,
}

/// One step as returned by list operations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepSummary {
    pub id: String,
    pub name: String,
    pub state: StepState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Full step record as returned by describe
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDetail {
    pub id: String,
    pub name: String,
    pub state: StepState,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
}

// ============================================================================
// ListSteps
// ============================================================================

/// Request for the ListSteps operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListStepsRequest {
    pub cluster_id: String,
    /// Restrict results to steps in these states
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub step_states: Vec<StepState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
}

/// Response page for the ListSteps operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListStepsResponse {
    #[serde(default)]
    pub steps: Vec<StepSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
}

impl Operation for ListStepsRequest {
    type Output = ListStepsResponse;
    const NAME: &'static str = "ListSteps";
}

impl PageRequest for ListStepsRequest {
    fn set_continuation_token(&mut self, token: Option<String>) {
        self.marker = token;
    }
}

impl PageResponse for ListStepsResponse {
    type Item = StepSummary;

    fn continuation_token(&self) -> Option<&str> {
        self.marker.as_deref()
    }

    fn items(&self) -> &[StepSummary] {
        &self.steps
    }
}

// ============================================================================
// DescribeStep
// ============================================================================

/// Request for the DescribeStep operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeStepRequest {
    pub cluster_id: String,
    pub step_id: String,
}

/// Response for the DescribeStep operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeStepResponse {
    pub step: StepDetail,
}

impl Operation for DescribeStepRequest {
    type Output = DescribeStepResponse;
    const NAME: &'static str = "DescribeStep";
}
