//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with a bounded timeout
//! - The breadth-first frontier with dedup and depth limiting
//! - Worker pool coordination and cancellation

mod coordinator;
mod fetcher;
mod frontier;

pub use coordinator::{run_crawl, Coordinator, CrawlOutcome, Termination};
pub use fetcher::{build_http_client, fetch_url, FetchFailure, FetchResult, FetchedPage, MAX_REDIRECTS};
pub use frontier::{Frontier, QueuedUrl};

use crate::config::Config;
use crate::model::{build_site_model, SiteModel};
use crate::url::{extract_domain, seed_url};
use crate::Result;
use chrono::Utc;
use tokio_util::sync::CancellationToken;

/// Crawls a website and builds its site model
///
/// This is the main entry point for a crawl. It will:
/// 1. Derive the seed URL from `domain`
/// 2. Crawl breadth-first up to the configured page and depth limits
/// 3. Build the site model over whatever pages were gathered
///
/// A root that cannot be fetched, a page cap and a cancellation all still
/// produce a model; only a bad domain or an unusable HTTP client is an
/// error.
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `domain` - Bare domain (`example.com`) or origin URL
/// * `cancel` - Token that stops the crawl early
///
/// # Returns
///
/// * `Ok(SiteModel)` - The model, possibly empty or partial
/// * `Err(IntelError)` - The crawl could not start
pub async fn crawl_website(
    config: &Config,
    domain: &str,
    cancel: CancellationToken,
) -> Result<SiteModel> {
    let seed = seed_url(domain)?;
    let site = extract_domain(&seed).unwrap_or_else(|| domain.trim().to_string());

    let outcome = run_crawl(config, seed, cancel).await?;
    if outcome.pages.is_empty() {
        tracing::warn!("No pages could be analyzed for {}", site);
    }

    Ok(build_site_model(
        &site,
        outcome.pages,
        config.crawler.max_depth,
        Utc::now(),
    ))
}
