use std::time::Duration;

use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use skoo_domain::SkooError;
use tracing::{debug, warn};

use crate::errors::http_error;

const USER_AGENT: &str = concat!("skoo-backend/", env!("CARGO_PKG_VERSION"));

/// Outbound HTTP client shared by the gateway, Supabase and Google clients.
///
/// Only transient failures are retried: 5xx answers and connect/timeout
/// errors, with exponential backoff. A 4xx answer (including the gateway's
/// 429 and 402) goes straight back to the caller so it can be classified.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    max_attempts: usize,
    base_backoff: Duration,
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Client with the default timeout (30s) and three attempts.
    pub fn new() -> Result<Self, SkooError> {
        Self::builder().build()
    }

    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Send `builder`, replaying it on transient failures.
    ///
    /// The body must be clonable (JSON and form bodies are); streaming
    /// bodies are rejected up front.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, SkooError> {
        let mut attempt = 1;
        loop {
            let request = builder
                .try_clone()
                .ok_or_else(|| SkooError::Internal("request body cannot be replayed".into()))?
                .build()
                .map_err(http_error)?;
            let method = request.method().clone();
            let url = request.url().clone();
            let last_attempt = attempt >= self.max_attempts;

            match self.client.execute(request).await {
                Ok(response) if response.status().is_server_error() && !last_attempt => {
                    warn!(attempt, %method, %url, status = %response.status(), "retrying after server error");
                }
                Ok(response) => {
                    debug!(attempt, %method, %url, status = %response.status(), "http response");
                    return Ok(response);
                }
                Err(err) if is_transient(&err) && !last_attempt => {
                    warn!(attempt, %method, %url, error = %err, "retrying after transport error");
                }
                Err(err) => return Err(http_error(err)),
            }

            tokio::time::sleep(self.backoff_for(attempt)).await;
            attempt += 1;
        }
    }

    /// Delay before retry number `attempt` (1-based): base, 2x base, 4x base...
    fn backoff_for(&self, attempt: usize) -> Duration {
        let exponent = u32::try_from(attempt.saturating_sub(1).min(8)).unwrap_or(8);
        self.base_backoff.saturating_mul(1 << exponent)
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    max_attempts: usize,
    base_backoff: Duration,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_attempts: 3,
            base_backoff: Duration::from_millis(200),
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Total attempts, first try included. Values below 1 mean 1.
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    pub fn build(self) -> Result<HttpClient, SkooError> {
        let client = ReqwestClient::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .no_proxy()
            .build()
            .map_err(http_error)?;

        Ok(HttpClient {
            client,
            max_attempts: self.max_attempts.max(1),
            base_backoff: self.base_backoff,
        })
    }
}

/// Decode a JSON response body, turning non-2xx statuses into errors.
///
/// 401/403 map to `SkooError::Auth`; any other failure status maps to
/// `SkooError::Upstream` carrying `service`, the status and the body.
pub async fn decode_json<T>(response: Response, service: &str) -> Result<T, SkooError>
where
    T: DeserializeOwned,
{
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!(service, status = status.as_u16(), "upstream returned an error status");
        return Err(match status.as_u16() {
            401 | 403 => SkooError::Auth(format!("{service} rejected the credentials ({status})")),
            code => SkooError::Upstream(format!("{service} returned {code}: {body}")),
        });
    }

    response.json::<T>().await.map_err(http_error)
}

fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request()
}
