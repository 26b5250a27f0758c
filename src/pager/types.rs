//! Pagination types and traits
//!
//! Defines the abstractions the page driver is built on: the request/response
//! adapter traits, per-run state, selectors, and the outcome sink.

use crate::error::Error;
use serde::Serialize;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The crate-wide continuation-token presence predicate.
///
/// A token is present iff it is `Some` and contains at least one
/// non-whitespace character. Empty and whitespace-only strings signal
/// end-of-sequence, exactly like a missing field. Every token check in the
/// crate goes through this function.
pub fn token_is_present(token: Option<&str>) -> bool {
    matches!(token, Some(s) if !s.trim().is_empty())
}

/// A list-operation request the driver can thread a continuation token through.
///
/// The caller pre-populates all filter fields; the driver owns the token field
/// and overwrites it before every call.
pub trait PageRequest: Clone + Send + Sync {
    /// Set (or clear) the continuation-token field.
    fn set_continuation_token(&mut self, token: Option<String>);
}

/// A list-operation response page.
pub trait PageResponse: Serialize + Send + Sync {
    /// The per-page result item type.
    type Item: Serialize;

    /// Continuation token for the next page, if the service reported more data.
    fn continuation_token(&self) -> Option<&str>;

    /// The result items carried by this page.
    fn items(&self) -> &[Self::Item];
}

// ============================================================================
// Pager Options
// ============================================================================

/// Caller-facing pagination controls for one driver run
#[derive(Debug, Clone, Default)]
pub struct PagerOptions {
    /// Continuation token to resume from (absent = start from the beginning)
    pub starting_token: Option<String>,
    /// Stop after one page even if more data remains
    pub no_auto_iteration: bool,
}

impl PagerOptions {
    /// Create default options (auto-iterate from the beginning)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting continuation token
    #[must_use]
    pub fn with_starting_token(mut self, token: Option<String>) -> Self {
        self.starting_token = token;
        self
    }

    /// Set single-page mode
    #[must_use]
    pub fn with_no_auto_iteration(mut self, no_auto_iteration: bool) -> Self {
        self.no_auto_iteration = no_auto_iteration;
        self
    }

    /// Whether the caller controls paging for this run.
    ///
    /// True when single-page mode was requested or a starting token was
    /// supplied; either way the driver issues exactly one call.
    pub fn user_controls_paging(&self) -> bool {
        self.no_auto_iteration || token_is_present(self.starting_token.as_deref())
    }
}

// ============================================================================
// Pagination State
// ============================================================================

/// Per-run pagination state.
///
/// Owned exclusively by one driver run, mutated once per page, never shared
/// across runs and never persisted.
#[derive(Debug, Clone)]
pub struct PaginationState {
    token: Option<String>,
    user_controlling_paging: bool,
}

impl PaginationState {
    /// Create state for one run. The `user_controlling_paging` flag is fixed
    /// here and never changes for the life of the run.
    pub fn new(options: &PagerOptions) -> Self {
        Self {
            token: options
                .starting_token
                .clone()
                .filter(|t| token_is_present(Some(t))),
            user_controlling_paging: options.user_controls_paging(),
        }
    }

    /// The current continuation token (normalized: blank means absent)
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Replace the token with the one from the latest response
    pub fn advance(&mut self, next: Option<&str>) {
        self.token = next
            .filter(|t| token_is_present(Some(t)))
            .map(str::to_string);
    }

    /// Whether the service reported more data
    pub fn has_more(&self) -> bool {
        token_is_present(self.token.as_deref())
    }

    /// Whether this run stops after exactly one page
    pub fn user_controls_paging(&self) -> bool {
        self.user_controlling_paging
    }
}

// ============================================================================
// Selectors
// ============================================================================

/// Invocation context passed to selectors alongside each response.
///
/// Accumulates as the run progresses; in raw-passthrough mode the final
/// synthetic selector call sees the fully-accumulated context (notably the
/// resume token) with no response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallContext {
    /// Remote operation name
    pub operation: String,
    /// Pages fetched so far
    pub pages_fetched: usize,
    /// Result items seen so far
    pub items_seen: usize,
    /// Continuation token left over for manual resumption
    pub resume_token: Option<String>,
}

impl CallContext {
    /// Create a fresh context for one run
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            pages_fetched: 0,
            items_seen: 0,
            resume_token: None,
        }
    }
}

/// A pure projection from a response page (or, for the raw-passthrough
/// synthetic call, no page at all) to the value emitted downstream.
pub type Selector<R> = Box<dyn Fn(Option<&R>, &CallContext) -> Value + Send + Sync>;

/// The default selector: project the item collection of each page.
///
/// For the synthetic raw-passthrough call (no response) it serializes the
/// accumulated context instead; it never touches response fields there.
pub fn items_selector<R: PageResponse>() -> Selector<R> {
    Box::new(|response, context| match response {
        Some(resp) => serde_json::to_value(resp.items()).unwrap_or(Value::Null),
        None => serde_json::to_value(context).unwrap_or(Value::Null),
    })
}

// ============================================================================
// Outcomes and Sinks
// ============================================================================

/// One unit of pipeline output: a projected page value or an explicit
/// per-page failure
#[derive(Debug)]
pub enum PageOutcome {
    /// A successfully projected page (or the raw-passthrough synthetic value)
    Page(Value),
    /// The call for this page failed; iteration stops after this outcome
    Failed(Error),
}

impl PageOutcome {
    /// Check if this is a successful page
    pub fn is_page(&self) -> bool {
        matches!(self, Self::Page(_))
    }

    /// Check if this is a failure outcome
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Downstream consumer of per-page outcomes.
///
/// The driver calls `emit` once per page as soon as the page resolves
/// (streaming; pages are never buffered), plus once for the synthetic
/// raw-passthrough value.
pub trait OutcomeSink: Send {
    /// Accept one outcome
    fn emit(&mut self, outcome: PageOutcome);
}

// ============================================================================
// Cancellation
// ============================================================================

/// Cooperative cancellation signal, polled by the driver between pages.
///
/// Cancelling never aborts an in-flight call; the driver simply declines to
/// issue the next one.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a new, uncancelled token
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Check whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

// ============================================================================
// Run Report
// ============================================================================

/// Why a driver run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// No more data: the last response carried no continuation token
    Drained,
    /// The caller controls paging; exactly one page was fetched
    SinglePage,
    /// Cancellation was observed before the next call
    Cancelled,
    /// A call failed; the failure was emitted to the sink
    Failed,
}

/// Summary of one driver run
#[derive(Debug, Clone)]
pub struct PagerReport {
    /// Pages successfully fetched
    pub pages_fetched: usize,
    /// Result items seen across all pages
    pub items_seen: usize,
    /// Continuation token left over for manual resumption, if any
    pub resume_token: Option<String>,
    /// Why the run stopped
    pub stop_reason: StopReason,
}

impl PagerReport {
    /// Whether the run drained the full result sequence
    pub fn completed(&self) -> bool {
        self.stop_reason == StopReason::Drained
    }
}
