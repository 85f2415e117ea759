//! HTTP client and clock abstractions for testability

use std::time::Duration;

use async_trait::async_trait;

/// HTTP response from a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Abstraction over HTTP client for dependency injection
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait HttpClient: Send + Sync {
    /// Send a GET request to the given URL.
    ///
    /// Errors and logs carry the URL with its query string redacted.
    async fn get(&self, url: &str) -> crate::Result<HttpResponse>;

    /// Send a GET request with URL-encoded query parameters.
    ///
    /// The URL is never logged or echoed into errors, since callers may carry
    /// credentials in it.
    async fn get_query(&self, url: &str, params: &[(&str, &str)])
        -> crate::Result<HttpResponse>;
}

/// Production HTTP client using reqwest
#[derive(Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Build a client whose requests (connect + transfer) are bounded by `timeout`
    pub fn with_timeout(timeout: Duration) -> crate::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| crate::SentinelError::Http(format!("Building HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str) -> crate::Result<HttpResponse> {
        let shown = redact_query(url);
        tracing::debug!("GET {}", shown);
        let response =
            self.client.get(url).send().await.map_err(|e| {
                crate::SentinelError::Http(format!("GET {} failed: {}", shown, describe(e)))
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            crate::SentinelError::Http(format!("Reading response body: {}", describe(e)))
        })?;

        tracing::debug!("GET {} -> {} ({} bytes)", shown, status, body.len());
        Ok(HttpResponse { status, body })
    }

    async fn get_query(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> crate::Result<HttpResponse> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                crate::SentinelError::Http(format!("GET request failed: {}", describe(e)))
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            crate::SentinelError::Http(format!("Reading response body: {}", describe(e)))
        })?;

        tracing::debug!("GET (query) -> {} ({} bytes)", status, body.len());
        Ok(HttpResponse { status, body })
    }
}

/// Strip the query string and fragment from a URL, which may hold API keys.
pub fn redact_query(url: &str) -> String {
    match url.find(['?', '#']) {
        Some(cut) => format!("{}?<redacted>", &url[..cut]),
        None => url.to_string(),
    }
}

/// Render a reqwest error with its source chain, without the request URL.
fn describe(error: reqwest::Error) -> String {
    let error = error.without_url();
    let mut text = error.to_string();
    let mut source = std::error::Error::source(&error);
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

/// Time source for the monitoring loop
#[async_trait]
pub trait Clock: Send + Sync {
    /// Milliseconds on a monotonic timeline; only differences are meaningful
    fn now_ms(&self) -> u64;

    /// Suspend the caller for `duration`
    async fn sleep(&self, duration: Duration);
}

/// Monotonic clock backed by `tokio::time::Instant`, counting from creation.
///
/// Wall-clock steps do not affect it, so reminder intervals stay accurate.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: tokio::time::Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: tokio::time::Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
