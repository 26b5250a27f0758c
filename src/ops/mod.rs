//! Control-plane operation shapes
//!
//! Typed request/response structs for the Gridworks control-plane API, one
//! pair per remote operation, serde-mapped to the service's JSON wire shapes.
//! List-style pairs additionally implement the pager's
//! [`PageRequest`](crate::pager::PageRequest)/
//! [`PageResponse`](crate::pager::PageResponse) adapter traits; single-result
//! operations (describe/modify) never engage the pager.

mod clusters;
mod notebooks;
mod steps;

pub use clusters::{
    BootstrapAction, ClusterDetail, ClusterState, ClusterSummary, DescribeClusterRequest,
    DescribeClusterResponse, ListBootstrapActionsRequest, ListBootstrapActionsResponse,
    ListClustersRequest, ListClustersResponse, ModifyClusterRequest, ModifyClusterResponse,
};
pub use notebooks::{
    DescribeNotebookExecutionRequest, DescribeNotebookExecutionResponse,
    ListNotebookExecutionsRequest, ListNotebookExecutionsResponse, NotebookExecutionDetail,
    NotebookExecutionStatus, NotebookExecutionSummary,
};
pub use steps::{
    DescribeStepRequest, DescribeStepResponse, ListStepsRequest, ListStepsResponse, StepDetail,
    StepState, StepSummary,
};

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A remote control-plane operation: its wire name and response type.
///
/// The client posts the serialized request to `v1/{NAME}` and decodes the
/// response as `Output`.
pub trait Operation: Serialize + Send + Sync {
    /// Response type for this operation
    type Output: DeserializeOwned + Send;

    /// Wire name of the operation
    const NAME: &'static str;
}
