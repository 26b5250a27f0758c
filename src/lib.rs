// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # gridctl
//!
//! A command-line client for the Gridworks compute-cluster control plane.
//!
//! The heart of the crate is a generic paged list-operation driver: list
//! operations that return results in marker-delimited pages are drained
//! through one shared driver instead of per-operation pagination loops.
//! Pages stream to the output pipeline as they arrive.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gridctl::client::ApiClient;
//! use gridctl::config::ApiConfig;
//! use gridctl::ops::ListClustersRequest;
//! use gridctl::output::CollectSink;
//! use gridctl::pager::{PageDriver, PagerOptions};
//!
//! #[tokio::main]
//! async fn main() -> gridctl::Result<()> {
//!     let config = ApiConfig::load(None)?;
//!     let client = ApiClient::new(config)?;
//!
//!     let driver = PageDriver::new("ListClusters", PagerOptions::new());
//!     let mut sink = CollectSink::new();
//!     let report = driver
//!         .run(&client, ListClustersRequest::default(), &mut sink)
//!         .await;
//!
//!     println!("fetched {} pages", report.pages_fetched);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Client configuration
pub mod config;

/// The paged list-operation driver
pub mod pager;

/// Control-plane operation shapes
pub mod ops;

/// HTTP client for the control-plane API
pub mod client;

/// Pipeline output sinks
pub mod output;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
