//! The paged list-operation driver
//!
//! Turns a single "list X" remote operation into a fully-drained or
//! single-page sequence of pipeline outputs, advancing a continuation token
//! between calls.

use super::types::{
    items_selector, CallContext, CancelToken, OutcomeSink, PageOutcome, PageRequest, PageResponse,
    PagerOptions, PagerReport, PaginationState, Selector, StopReason,
};
use crate::error::Result;
use async_trait::async_trait;
use tracing::{debug, warn};

/// Output mode for a driver run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Apply the selector to each page and emit one output per page
    #[default]
    Projected,
    /// Suppress per-page emission; emit one synthetic output after the run,
    /// produced by invoking the selector with no response
    RawPassthrough,
}

/// The client-call capability: one remote list call, resolved fully
/// (or failed) before the driver considers the next page.
///
/// Injected into the driver explicitly; the driver never reaches into
/// process-wide client state. Retry policy, if any, lives behind this trait.
#[async_trait]
pub trait PageClient<Req, Resp>: Send + Sync
where
    Req: PageRequest,
    Resp: PageResponse,
{
    /// Issue one call. A failure here is an explicit result branch, not an
    /// exception path.
    async fn call(&self, request: Req) -> Result<Resp>;
}

/// Drives a sequence of remote list calls using a continuation token,
/// streaming projected outputs to a sink.
///
/// One driver instance performs one run and is consumed by it. Pages are
/// fetched strictly sequentially; page N+1 depends on the token returned by
/// page N.
pub struct PageDriver<Resp: PageResponse> {
    operation: String,
    options: PagerOptions,
    mode: OutputMode,
    selector: Selector<Resp>,
    cancel: CancelToken,
}

impl<Resp: PageResponse> PageDriver<Resp> {
    /// Create a driver with the default item-collection selector
    pub fn new(operation: impl Into<String>, options: PagerOptions) -> Self {
        Self {
            operation: operation.into(),
            options,
            mode: OutputMode::Projected,
            selector: items_selector(),
            cancel: CancelToken::new(),
        }
    }

    /// Override the projection applied to each page
    #[must_use]
    pub fn with_selector(mut self, selector: Selector<Resp>) -> Self {
        self.selector = selector;
        self
    }

    /// Switch to raw-passthrough output mode
    #[must_use]
    pub fn raw_passthrough(mut self) -> Self {
        self.mode = OutputMode::RawPassthrough;
        self
    }

    /// Attach an external cancellation signal
    #[must_use]
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Run the operation to completion.
    ///
    /// `template` carries the caller's filter fields; its continuation-token
    /// field is overwritten before every call. Each resolved page is emitted
    /// to `sink` immediately. A failed call emits an explicit failure outcome
    /// and halts iteration; pages already emitted stay delivered.
    pub async fn run<Req, C, S>(self, client: &C, template: Req, sink: &mut S) -> PagerReport
    where
        Req: PageRequest,
        C: PageClient<Req, Resp>,
        S: OutcomeSink,
    {
        let mut state = PaginationState::new(&self.options);
        let mut context = CallContext::new(&self.operation);
        context.resume_token = state.token().map(str::to_string);

        let stop_reason = loop {
            // Cancellation is checked only at the inter-page boundary.
            if self.cancel.is_cancelled() {
                debug!(operation = %self.operation, "cancellation observed, stopping");
                break StopReason::Cancelled;
            }

            let mut request = template.clone();
            request.set_continuation_token(state.token().map(str::to_string));

            match client.call(request).await {
                Ok(response) => {
                    context.pages_fetched += 1;
                    context.items_seen += response.items().len();
                    state.advance(response.continuation_token());
                    context.resume_token = state.token().map(str::to_string);

                    debug!(
                        operation = %self.operation,
                        page = context.pages_fetched,
                        items = response.items().len(),
                        has_more = state.has_more(),
                        "page fetched"
                    );

                    if self.mode == OutputMode::Projected {
                        sink.emit(PageOutcome::Page((self.selector)(Some(&response), &context)));
                    }

                    if state.user_controls_paging() {
                        break StopReason::SinglePage;
                    }
                    if !state.has_more() {
                        break StopReason::Drained;
                    }
                }
                Err(err) => {
                    warn!(
                        operation = %self.operation,
                        page = context.pages_fetched + 1,
                        error = %err,
                        "page call failed, stopping"
                    );
                    sink.emit(PageOutcome::Failed(err));
                    break StopReason::Failed;
                }
            }
        };

        // The synthetic raw-passthrough output fires on any clean stop,
        // never after a failure.
        if self.mode == OutputMode::RawPassthrough && stop_reason != StopReason::Failed {
            sink.emit(PageOutcome::Page((self.selector)(None, &context)));
        }

        PagerReport {
            pages_fetched: context.pages_fetched,
            items_seen: context.items_seen,
            resume_token: context.resume_token,
            stop_reason,
        }
    }
}
