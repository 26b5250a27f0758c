//! Generic paginated list-operation driver
//!
//! Every list-style operation in the control-plane API follows the same
//! shape: a request with a continuation-token field, a response with an item
//! collection and an optional next token. This module implements that loop
//! once; each operation plugs in through the [`PageRequest`]/[`PageResponse`]
//! adapter traits.
//!
//! # Overview
//!
//! - [`PageDriver`] - the driver: token propagation, per-page emission,
//!   single-page mode, cancellation, failure handling
//! - [`PageClient`] - the injected client-call capability
//! - [`OutcomeSink`] - downstream consumer of per-page outcomes
//! - [`token_is_present`] - the single continuation-token presence predicate

mod driver;
mod types;

pub use driver::{OutputMode, PageClient, PageDriver};
pub use types::{
    items_selector, token_is_present, CallContext, CancelToken, OutcomeSink, PageOutcome,
    PageRequest, PageResponse, PagerOptions, PagerReport, PaginationState, Selector, StopReason,
};
