//! Crawler coordinator - main crawl orchestration logic
//!
//! The coordinator task is the single owner of the frontier and the visited
//! set. Fetch + analyze work runs on a bounded `JoinSet` of worker tasks,
//! whose results flow back to the coordinator, which records pages and
//! enqueues newly discovered links. Dedup and the page cap are therefore
//! enforced in one place.

use crate::analyzer::{analyze_page_with_base, AnalyzeError};
use crate::config::{Config, CrawlerConfig};
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchFailure};
use crate::crawler::frontier::{Frontier, QueuedUrl};
use crate::model::PageRecord;
use crate::state::CrawlState;
use crate::Result;
use chrono::Utc;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Why a crawl stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The frontier ran dry
    Exhausted,

    /// `max_pages` URLs were visited
    Capped,

    /// The cancellation token fired
    Cancelled,
}

/// Pages gathered by a crawl, in the order they finished
#[derive(Debug)]
pub struct CrawlOutcome {
    pub pages: Vec<PageRecord>,
    pub termination: Termination,
}

/// Per-page failure; never fatal to the crawl
#[derive(Debug, Error)]
enum PageError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchFailure),

    #[error("analysis failed: {0}")]
    Analyze(#[from] AnalyzeError),
}

/// What a worker hands back to the coordinator
struct PageOutput {
    queued: QueuedUrl,
    result: std::result::Result<PageRecord, PageError>,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: CrawlerConfig,
    client: Client,
    seed: Url,
    state: CrawlState,
    cancel: CancellationToken,
}

impl Coordinator {
    /// Creates a new coordinator for one crawl session
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `seed` - Normalized root URL, crawled at depth 0
    /// * `cancel` - Token that stops the crawl early
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(IntelError)` - The HTTP client could not be built
    pub fn new(config: &Config, seed: Url, cancel: CancellationToken) -> Result<Self> {
        let client = build_http_client(
            &config.user_agent,
            Duration::from_secs(config.crawler.request_timeout_secs),
        )?;

        Ok(Self {
            config: config.crawler.clone(),
            client,
            seed,
            state: CrawlState::Idle,
            cancel,
        })
    }

    pub fn state(&self) -> CrawlState {
        self.state
    }

    /// Runs the crawl to completion
    ///
    /// Fetch and analysis failures are logged and skipped. Cancellation
    /// aborts in-flight workers and returns what was gathered so far. A
    /// coordinator runs once; a second call fails with an invalid state
    /// transition.
    pub async fn run(&mut self) -> Result<CrawlOutcome> {
        self.state.transition_to(CrawlState::Running)?;
        tracing::info!(
            "Starting crawl of {} (max pages {}, max depth {}, concurrency {})",
            self.seed,
            self.config.max_pages,
            self.config.max_depth,
            self.config.concurrency
        );

        let max_pages = self.config.max_pages as usize;
        let concurrency = self.config.concurrency.max(1) as usize;

        let mut frontier = Frontier::new(self.seed.clone(), self.config.max_depth);
        let mut pages = Vec::new();
        let mut workers: JoinSet<PageOutput> = JoinSet::new();

        let termination = loop {
            if self.cancel.is_cancelled() {
                workers.abort_all();
                break Termination::Cancelled;
            }

            while workers.len() < concurrency && frontier.visited_count() < max_pages {
                let Some(queued) = frontier.pop() else {
                    break;
                };
                tracing::debug!("Dispatching {} (depth {})", queued.url, queued.depth);
                workers.spawn(process_page(self.client.clone(), queued));
            }

            if workers.is_empty() {
                break if frontier.visited_count() >= max_pages {
                    Termination::Capped
                } else {
                    Termination::Exhausted
                };
            }

            tokio::select! {
                biased;

                _ = self.cancel.cancelled() => {
                    workers.abort_all();
                    break Termination::Cancelled;
                }

                joined = workers.join_next() => match joined {
                    Some(Ok(output)) => {
                        if let Some(page) = self.handle_output(output, &mut frontier) {
                            pages.push(page);
                        }
                    }
                    Some(Err(e)) => tracing::error!("Page worker failed: {}", e),
                    None => {}
                },
            }
        };

        self.state.transition_to(CrawlState::Completed)?;
        tracing::info!(
            "Crawl of {} finished: {} pages, {} visited ({:?})",
            self.seed,
            pages.len(),
            frontier.visited_count(),
            termination
        );

        Ok(CrawlOutcome { pages, termination })
    }

    /// Records a finished page and enqueues its internal links
    fn handle_output(&self, output: PageOutput, frontier: &mut Frontier) -> Option<PageRecord> {
        let PageOutput { queued, result } = output;

        let page = match result {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", queued.url, e);
                return None;
            }
        };

        if frontier.can_expand(queued.depth) {
            let mut added = 0;
            for link in &page.internal_links {
                match Url::parse(link) {
                    Ok(url) => {
                        if frontier.push(url, queued.depth + 1) {
                            added += 1;
                        }
                    }
                    Err(e) => tracing::debug!("Failed to parse link {}: {}", link, e),
                }
            }
            tracing::debug!("Queued {} new links from {}", added, queued.url);
        }

        Some(page)
    }
}

/// Worker body: fetch one URL and analyze the response
async fn process_page(client: Client, queued: QueuedUrl) -> PageOutput {
    let result = async {
        let fetched = fetch_url(&client, &queued.url).await?;
        let page = analyze_page_with_base(
            &fetched.body,
            &queued.url,
            &fetched.final_url,
            queued.depth,
            Utc::now(),
        )?;
        Ok::<_, PageError>(page)
    }
    .await;

    PageOutput { queued, result }
}

/// Runs a complete crawl from `seed`
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `seed` - Normalized root URL
/// * `cancel` - Token that stops the crawl early
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - Pages gathered, possibly partial
/// * `Err(IntelError)` - The crawl could not start
pub async fn run_crawl(config: &Config, seed: Url, cancel: CancellationToken) -> Result<CrawlOutcome> {
    let mut coordinator = Coordinator::new(config, seed, cancel)?;
    coordinator.run().await
}
