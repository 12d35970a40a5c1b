//! HTTP fetcher implementation
//!
//! One GET per URL with a bounded timeout and the crawler's identifying
//! User-Agent. Redirects are followed by the client. There are no retries:
//! any failure is final for that URL within a crawl.

use crate::config::UserAgentConfig;
use reqwest::{redirect::Policy, Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Maximum redirect hops followed per request
pub const MAX_REDIRECTS: usize = 10;

/// Connect-phase timeout, separate from the total request timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// A page body returned with HTTP 200
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL the body was served from, after redirects
    pub final_url: Url,
    pub body: String,
}

/// Reasons a URL is unavailable
#[derive(Debug, Error)]
pub enum FetchFailure {
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("failed to read body: {0}")]
    Body(String),
}

/// Outcome of a single fetch
pub type FetchResult = std::result::Result<FetchedPage, FetchFailure>;

/// Builds an HTTP client with the crawler's configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Total per-request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use site_intel::config::UserAgentConfig;
/// use site_intel::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(30)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(timeout)
        .connect_timeout(CONNECT_TIMEOUT.min(timeout))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 200 | `Ok(FetchedPage)` |
/// | any other status | `HttpStatus` |
/// | timeout | `Timeout` |
/// | connection refused, DNS or TLS failure | `Connect` |
/// | redirect loop or other client error | `Transport` |
/// | body could not be read | `Body` |
pub async fn fetch_url(client: &Client, url: &Url) -> FetchResult {
    let response = client
        .get(url.as_str())
        .send()
        .await
        .map_err(classify_error)?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(FetchFailure::HttpStatus(status.as_u16()));
    }

    let final_url = response.url().clone();
    let body = response.text().await.map_err(|e| {
        if e.is_timeout() {
            FetchFailure::Timeout
        } else {
            FetchFailure::Body(e.to_string())
        }
    })?;

    Ok(FetchedPage { final_url, body })
}

fn classify_error(error: reqwest::Error) -> FetchFailure {
    if error.is_timeout() {
        FetchFailure::Timeout
    } else if error.is_connect() {
        FetchFailure::Connect(error.to_string())
    } else {
        FetchFailure::Transport(error.to_string())
    }
}
