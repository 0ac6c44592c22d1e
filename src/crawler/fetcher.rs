//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the archiver, including:
//! - Building the proxied HTTP client with the static browser header set
//! - The `Transport` seam performing exactly one GET
//! - Retry logic: transport errors are retried after a fixed wait,
//!   HTTP status failures are returned at once

use crate::config::{NetworkConfig, SessionConfig};
use crate::ArchiveError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Proxy, StatusCode};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Failure below the HTTP layer (connect, DNS, timeout, truncated body)
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Connection failed: {0}")]
    Connection(String),
}

/// Status and body of one completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    /// Body text; left empty for non-200 responses
    pub body: String,
}

/// Performs a single GET with no retry
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn get(&self, url: &Url) -> Result<RawResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    async fn get(&self, url: &Url) -> Result<RawResponse, TransportError> {
        (**self).get(url).await
    }
}

/// `reqwest`-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<RawResponse, TransportError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if status != StatusCode::OK {
            return Ok(RawResponse {
                status: status.as_u16(),
                body: String::new(),
            });
        }

        let body = response.text().await?;
        Ok(RawResponse {
            status: status.as_u16(),
            body,
        })
    }
}

/// How transport errors are retried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Fixed wait between attempts
    pub wait: Duration,
    /// Total attempts allowed; None retries forever
    pub max_attempts: Option<u32>,
}

impl RetryPolicy {
    /// Retry forever with a fixed wait
    pub fn unbounded(wait: Duration) -> Self {
        Self {
            wait,
            max_attempts: None,
        }
    }

    pub fn from_config(config: &NetworkConfig) -> Self {
        Self {
            wait: Duration::from_secs(config.retry_wait_secs),
            max_attempts: config.max_attempts,
        }
    }

    fn exhausted(&self, attempts: u32) -> bool {
        self.max_attempts.is_some_and(|max| attempts >= max)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::unbounded(Duration::from_secs(30))
    }
}

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// HTTP 200 with the page body
    Page(String),

    /// Any other HTTP status; the resource is skipped
    HttpStatus { status: u16 },

    /// Transport errors outlasted a bounded retry policy
    GaveUp { attempts: u32, error: String },
}

impl FetchResult {
    /// The page body, or None when the resource is unavailable
    pub fn into_page(self) -> Option<String> {
        match self {
            Self::Page(body) => Some(body),
            _ => None,
        }
    }

    pub fn is_page(&self) -> bool {
        matches!(self, Self::Page(_))
    }
}

/// Fetches pages through a transport, applying the retry policy
#[derive(Debug, Clone)]
pub struct Fetcher<T> {
    transport: T,
    policy: RetryPolicy,
}

impl<T: Transport> Fetcher<T> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Fetches a URL, retrying transport errors per the policy
    ///
    /// # Retry Logic
    ///
    /// | Condition | Action |
    /// |-----------|--------|
    /// | HTTP 200 | Return the page |
    /// | Any other status | Immediate → HttpStatus, no retry |
    /// | Transport error | Wait, then retry the same URL (forever by default) |
    pub async fn fetch(&self, url: &Url) -> FetchResult {
        let mut attempts = 0u32;

        loop {
            attempts += 1;

            match self.transport.get(url).await {
                Ok(response) => return classify(url, response),
                Err(e) => {
                    tracing::warn!("Error fetching {} (attempt {}): {}", url, attempts, e);

                    if self.policy.exhausted(attempts) {
                        tracing::error!("Giving up on {} after {} attempts", url, attempts);
                        return FetchResult::GaveUp {
                            attempts,
                            error: e.to_string(),
                        };
                    }

                    tracing::info!(
                        "Waiting {}s before retrying {}",
                        self.policy.wait.as_secs(),
                        url
                    );
                    tokio::time::sleep(self.policy.wait).await;
                }
            }
        }
    }

    /// Fetches a URL exactly once; transport errors are not retried
    pub async fn fetch_once(&self, url: &Url) -> FetchResult {
        match self.transport.get(url).await {
            Ok(response) => classify(url, response),
            Err(e) => {
                tracing::warn!("Error fetching {}: {}", url, e);
                FetchResult::GaveUp {
                    attempts: 1,
                    error: e.to_string(),
                }
            }
        }
    }
}

fn classify(url: &Url, response: RawResponse) -> FetchResult {
    if response.status == StatusCode::OK.as_u16() {
        FetchResult::Page(response.body)
    } else {
        tracing::warn!("Received status code {} for URL: {}", response.status, url);
        FetchResult::HttpStatus {
            status: response.status,
        }
    }
}

/// Builds the static request header set sent with every request
///
/// Browser-like defaults plus the phpBB session cookies
/// (`<prefix>_u`, `<prefix>_k`, `<prefix>_sid`); entries from
/// `network.headers` replace defaults of the same name.
pub fn build_headers(
    network: &NetworkConfig,
    session: &SessionConfig,
    referer: &Url,
) -> Result<HeaderMap, ArchiveError> {
    let prefix = &session.cookie_prefix;
    let cookie = format!(
        "{prefix}_u={}; {prefix}_k={}; {prefix}_sid={}",
        session.user_id, session.k_id, session.session_id
    );

    let defaults = [
        ("User-Agent", network.user_agent.as_str()),
        (
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
        ),
        ("Accept-Language", "en-US,en;q=0.5"),
        ("Referer", referer.as_str()),
        ("Connection", "keep-alive"),
        ("Cookie", cookie.as_str()),
        ("Upgrade-Insecure-Requests", "1"),
        ("Sec-Fetch-Dest", "document"),
        ("Sec-Fetch-Mode", "navigate"),
        ("Sec-Fetch-Site", "same-origin"),
        ("Sec-Fetch-User", "?1"),
    ];

    let mut headers = HeaderMap::new();
    let overrides = network.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()));

    for (name, value) in defaults.into_iter().chain(overrides) {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| ArchiveError::InvalidHeader {
                name: name.to_string(),
                message: e.to_string(),
            })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| ArchiveError::InvalidHeader {
            name: name.to_string(),
            message: e.to_string(),
        })?;
        headers.insert(header_name, header_value);
    }

    Ok(headers)
}

/// Builds an HTTP client with proper configuration
///
/// Every request goes through `network.proxy` when one is configured.
///
/// # Example
///
/// ```no_run
/// use phpbb_archiver::config::{NetworkConfig, SessionConfig};
/// use phpbb_archiver::crawler::{build_headers, build_http_client};
/// use url::Url;
///
/// let network = NetworkConfig::default();
/// let referer = Url::parse("http://board.example/").unwrap();
/// let headers = build_headers(&network, &SessionConfig::default(), &referer).unwrap();
/// let client = build_http_client(&network, headers).unwrap();
/// ```
pub fn build_http_client(network: &NetworkConfig, headers: HeaderMap) -> Result<Client, ArchiveError> {
    let mut builder = Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(network.timeout_secs))
        .gzip(true)
        .brotli(true);

    if let Some(proxy) = &network.proxy {
        builder = builder.proxy(Proxy::all(proxy.as_str())?);
    }

    Ok(builder.build()?)
}
