//! CLI commands and argument parsing

use crate::ops::{ClusterState, NotebookExecutionStatus, StepState};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Gridworks control-plane CLI
#[derive(Parser, Debug)]
#[command(name = "gridctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Control-plane endpoint URL (overrides config file and environment)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Configuration file (JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Pagination flags shared by all list commands
#[derive(Args, Debug, Clone, Default)]
pub struct PageArgs {
    /// Return a single page instead of draining all pages
    #[arg(long)]
    pub no_paginate: bool,

    /// Continuation token from a previous single-page invocation; implies a
    /// single page
    #[arg(long)]
    pub starting_token: Option<String>,

    /// JSON pointer applied to each response before emission
    /// (e.g. "/clusters" or "/marker")
    #[arg(long)]
    pub select: Option<String>,

    /// Suppress per-page output; emit one final document describing the run
    #[arg(long)]
    pub raw: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List clusters visible to the caller
    ListClusters {
        /// Restrict to clusters in these states (comma-separated)
        #[arg(long, value_delimiter = ',')]
        states: Vec<ClusterState>,

        /// Only clusters created after this RFC 3339 timestamp
        #[arg(long)]
        created_after: Option<DateTime<Utc>>,

        /// Only clusters created before this RFC 3339 timestamp
        #[arg(long)]
        created_before: Option<DateTime<Utc>>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Show one cluster in full
    DescribeCluster {
        /// Cluster identifier
        #[arg(long)]
        cluster_id: String,
    },

    /// Change mutable settings on a running cluster
    ModifyCluster {
        /// Cluster identifier
        #[arg(long)]
        cluster_id: String,

        /// Number of steps the cluster runs concurrently
        #[arg(long)]
        step_concurrency: Option<u32>,

        /// Enable or disable termination protection
        #[arg(long)]
        termination_protected: Option<bool>,
    },

    /// List the steps submitted to a cluster
    ListSteps {
        /// Cluster identifier
        #[arg(long)]
        cluster_id: String,

        /// Restrict to steps in these states (comma-separated)
        #[arg(long, value_delimiter = ',')]
        states: Vec<StepState>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Show one step in full
    DescribeStep {
        /// Cluster identifier
        #[arg(long)]
        cluster_id: String,

        /// Step identifier
        #[arg(long)]
        step_id: String,
    },

    /// List the bootstrap actions configured on a cluster
    ListBootstrapActions {
        /// Cluster identifier
        #[arg(long)]
        cluster_id: String,

        #[command(flatten)]
        page: PageArgs,
    },

    /// List notebook executions
    ListNotebookExecutions {
        /// Restrict to executions of this notebook editor
        #[arg(long)]
        editor_id: Option<String>,

        /// Restrict to executions with this status
        #[arg(long)]
        status: Option<NotebookExecutionStatus>,

        /// Only executions started after this RFC 3339 timestamp
        #[arg(long)]
        started_after: Option<DateTime<Utc>>,

        /// Only executions started before this RFC 3339 timestamp
        #[arg(long)]
        started_before: Option<DateTime<Utc>>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Show one notebook execution in full
    DescribeNotebookExecution {
        /// Execution identifier
        #[arg(long)]
        execution_id: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One JSON document per line
    Json,
    /// Indented JSON for human consumption
    Pretty,
}
