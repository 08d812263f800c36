//! Retrying JSON GET client shared by the venue catalog and weather services.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::retry::{with_retry, RetryConfig, RetryDecision, Retryable};

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("sportlocate/", env!("CARGO_PKG_VERSION"));

/// Errors surfaced by [`ApiClient`] once retries are done.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure or non-2xx status on every attempt.
    #[error("{url} unavailable after {attempts} attempt(s): {message}")]
    Unavailable {
        url: String,
        attempts: u32,
        message: String,
    },

    /// The server answered 2xx but the body was not JSON.
    #[error("Invalid response from {url}: {message}")]
    Parse { url: String, message: String },

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to create HTTP client: {0}")]
    Client(String),
}

impl ApiError {
    /// True when the remote service could not be reached at all.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ApiError::Unavailable { .. })
    }
}

/// Failure of a single attempt, before the retry policy has spoken.
#[derive(Debug)]
enum AttemptError {
    Transport(reqwest::Error),
    Status(StatusCode),
    Body(String),
}

impl std::fmt::Display for AttemptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttemptError::Transport(e) => write!(f, "transport error: {}", e),
            AttemptError::Status(status) => write!(f, "HTTP status {}", status),
            AttemptError::Body(msg) => write!(f, "malformed body: {}", msg),
        }
    }
}

impl Retryable for AttemptError {
    fn retry_decision(&self) -> RetryDecision {
        // A body that never decodes still ends up as `ApiError::Parse`
        match self {
            AttemptError::Transport(_) | AttemptError::Status(_) | AttemptError::Body(_) => {
                RetryDecision::Retry
            }
        }
    }
}

/// Per-client HTTP settings.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

/// JSON API client bound to one base URL.
///
/// No response caching happens here; callers own their caches.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Arc<Client>,
    retry: RetryConfig,
}

impl ApiClient {
    /// Create a client with default timeout and user agent.
    pub fn new(base_url: &str, retry: RetryConfig) -> Result<Self, ApiError> {
        Self::with_options(base_url, retry, ClientOptions::default())
    }

    pub fn with_options(
        base_url: &str,
        retry: RetryConfig,
        options: ClientOptions,
    ) -> Result<Self, ApiError> {
        let parsed = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ApiError::InvalidUrl(format!(
                "unsupported scheme: {}",
                parsed.scheme()
            )));
        }

        let client = Client::builder()
            .timeout(options.timeout)
            .user_agent(options.user_agent)
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Arc::new(client),
            retry,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    /// Full URL for an endpoint path such as `/categories`.
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// GET `path` with optional query parameters and decode the JSON body.
    ///
    /// # Errors
    /// [`ApiError::Unavailable`] after the retry budget is spent,
    /// [`ApiError::Parse`] when a successful response is not JSON.
    pub async fn get(
        &self,
        path: &str,
        params: Option<&[(&str, &str)]>,
    ) -> Result<Value, ApiError> {
        let url = self.endpoint(path);
        let target = url.as_str();

        with_retry(&self.retry, || self.fetch_once(target, params))
            .await
            .map_err(|e| match e {
                AttemptError::Body(message) => ApiError::Parse {
                    url: url.clone(),
                    message,
                },
                other => ApiError::Unavailable {
                    url: url.clone(),
                    attempts: self.retry.effective_attempts(),
                    message: other.to_string(),
                },
            })
    }

    async fn fetch_once(
        &self,
        url: &str,
        params: Option<&[(&str, &str)]>,
    ) -> Result<Value, AttemptError> {
        tracing::debug!("GET {} {:?}", url, params);

        let mut request = self.client.get(url);
        if let Some(params) = params {
            request = request.query(params);
        }

        let response = request.send().await.map_err(AttemptError::Transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(AttemptError::Status(status));
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_decode() {
                AttemptError::Body(e.to_string())
            } else {
                AttemptError::Transport(e)
            }
        })
    }
}
