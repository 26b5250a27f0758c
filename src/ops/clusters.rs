//! Cluster operations
//!
//! List/describe/modify clusters and list their bootstrap actions.

use super::Operation;
use crate::pager::{PageRequest, PageResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Cluster Types
// ============================================================================

/// Lifecycle state of a cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClusterState {
    Starting,
    Bootstrapping,
    Running,
    Waiting,
    Terminating,
    Terminated,
    TerminatedWithErrors,
}

/// One cluster as returned by list operations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSummary {
    /// Cluster identifier
    pub id: String,
    /// Human-readable cluster name
    pub name: String,
    /// Current lifecycle state
    pub state: ClusterState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Full cluster record as returned by describe
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterDetail {
    pub id: String,
    pub name: String,
    pub state: ClusterState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_concurrency_level: Option<u32>,
    #[serde(default)]
    pub termination_protected: bool,
    #[serde(default)]
    pub auto_terminate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
}

/// A bootstrap action configured on a cluster
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BootstrapAction {
    pub name: String,
    pub script_path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

// ============================================================================
// ListClusters
// ============================================================================

/// Request for the ListClusters operation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListClustersRequest {
    /// Restrict results to clusters in these states
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cluster_states: Vec<ClusterState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_after: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_before: Option<DateTime<Utc>>,
    /// Continuation token; owned by the page driver
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
}

/// Response page for the ListClusters operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListClustersResponse {
    #[serde(default)]
    pub clusters: Vec<ClusterSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
}

impl Operation for ListClustersRequest {
    type Output = ListClustersResponse;
    const NAME: &'static str = "ListClusters";
}

impl PageRequest for ListClustersRequest {
    fn set_continuation_token(&mut self, token: Option<String>) {
        self.marker = token;
    }
}

impl PageResponse for ListClustersResponse {
    type Item = ClusterSummary;

    fn continuation_token(&self) -> Option<&str> {
        self.marker.as_deref()
    }

    fn items(&self) -> &[ClusterSummary] {
        &self.clusters
    }
}

// ============================================================================
// DescribeCluster
// ============================================================================

/// Request for the DescribeCluster operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeClusterRequest {
    pub cluster_id: String,
}

/// Response for the DescribeCluster operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeClusterResponse {
    pub cluster: ClusterDetail,
}

impl Operation for DescribeClusterRequest {
    type Output = DescribeClusterResponse;
    const NAME: &'static str = "DescribeCluster";
}

// ============================================================================
// ModifyCluster
// ============================================================================

/// Request for the ModifyCluster operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyClusterRequest {
    pub cluster_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_concurrency_level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub termination_protected: Option<bool>,
}

/// Response for the ModifyCluster operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyClusterResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_concurrency_level: Option<u32>,
}

impl Operation for ModifyClusterRequest {
    type Output = ModifyClusterResponse;
    const NAME: &'static str = "ModifyCluster";
}

// ============================================================================
// ListBootstrapActions
// ============================================================================

/// Request for the ListBootstrapActions operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBootstrapActionsRequest {
    pub cluster_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
}

/// Response page for the ListBootstrapActions operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBootstrapActionsResponse {
    #[serde(default)]
    pub bootstrap_actions: Vec<BootstrapAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
}

impl Operation for ListBootstrapActionsRequest {
    type Output = ListBootstrapActionsResponse;
    const NAME: &'static str = "ListBootstrapActions";
}

impl PageRequest for ListBootstrapActionsRequest {
    fn set_continuation_token(&mut self, token: Option<String>) {
        self.marker = token;
    }
}

impl PageResponse for ListBootstrapActionsResponse {
    type Item = BootstrapAction;

    fn continuation_token(&self) -> Option<&str> {
        self.marker.as_deref()
    }

    fn items(&self) -> &[BootstrapAction] {
        &self.bootstrap_actions
    }
}
