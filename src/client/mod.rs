//! Control-plane API client
//!
//! `ApiClient` posts JSON operation requests to `{endpoint}/v1/{Operation}`,
//! authenticates with a static bearer token, and retries transport failures
//! and retryable statuses (429/5xx) with exponential backoff. Retry lives
//! here, beneath the page driver: from the driver's perspective a call either
//! resolves or fails once.

use crate::config::ApiConfig;
use crate::error::{is_retryable_status, Error, Result};
use crate::ops::Operation;
use crate::pager::{PageClient, PageRequest, PageResponse};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Service error body returned by the control plane on non-2xx responses
#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for the control-plane API
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Create a client from validated configuration
    pub fn new(config: ApiConfig) -> Result<Self> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()
            .map_err(Error::Http)?;
        Ok(Self { http, config })
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Invoke one operation, retrying retryable failures up to the
    /// configured budget.
    pub async fn invoke<O: Operation>(&self, request: &O) -> Result<O::Output> {
        let url = self.operation_url(O::NAME);
        let max_retries = self.config.max_retries;

        let mut last_error = None;
        let mut attempt = 0;

        while attempt <= max_retries {
            let mut req = self.http.post(&url).json(request);
            if let Some(token) = &self.config.auth_token {
                req = req.bearer_auth(token);
            }

            match req.send().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        debug!(operation = O::NAME, status = status.as_u16(), "call succeeded");
                        let body = response.text().await.map_err(Error::Http)?;
                        return serde_json::from_str(&body).map_err(|e| {
                            Error::decode(format!("invalid {} response: {e}", O::NAME))
                        });
                    }

                    let body = response.text().await.unwrap_or_default();
                    let err = parse_service_error(status.as_u16(), &body);

                    if is_retryable_status(status.as_u16()) && attempt < max_retries {
                        let delay = self.backoff(attempt);
                        warn!(
                            operation = O::NAME,
                            status = status.as_u16(),
                            attempt = attempt + 1,
                            "retryable status, retrying in {delay:?}"
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        last_error = Some(err);
                        continue;
                    }

                    return Err(err);
                }
                Err(e) => {
                    if (e.is_timeout() || e.is_connect()) && attempt < max_retries {
                        let delay = self.backoff(attempt);
                        warn!(
                            operation = O::NAME,
                            attempt = attempt + 1,
                            error = %e,
                            "transport error, retrying in {delay:?}"
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        last_error = Some(Error::Http(e));
                        continue;
                    }
                    return Err(Error::Http(e));
                }
            }
        }

        Err(last_error.unwrap_or(Error::MaxRetriesExceeded { max_retries }))
    }

    /// Build the URL for an operation
    fn operation_url(&self, name: &str) -> String {
        format!("{}/v1/{name}", self.config.endpoint.trim_end_matches('/'))
    }

    /// Exponential backoff delay for a given attempt, capped at the maximum
    fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt);
        let delay_ms = self.config.initial_backoff_ms.saturating_mul(factor);
        Duration::from_millis(delay_ms.min(self.config.max_backoff_ms))
    }
}

/// Parse a non-2xx response body into a service error.
///
/// The control plane reports errors as `{"code": ..., "message": ...}`;
/// anything else becomes the raw body.
fn parse_service_error(status: u16, body: &str) -> Error {
    match serde_json::from_str::<ServiceErrorBody>(body) {
        Ok(parsed) => Error::service(
            status,
            parsed.code,
            parsed.message.unwrap_or_else(|| body.to_string()),
        ),
        Err(_) => Error::service(status, None, body),
    }
}

// The client-call capability: any operation whose request/response pair
// implements the pager adapters can be driven directly through ApiClient.
#[async_trait]
impl<O> PageClient<O, O::Output> for ApiClient
where
    O: Operation + PageRequest + 'static,
    O::Output: PageResponse + 'static,
{
    async fn call(&self, request: O) -> Result<O::Output> {
        self.invoke(&request).await
    }
}
