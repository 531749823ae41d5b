//! Crawler coordinator - main crawl orchestration logic
//!
//! The coordinator drives the fetch → parse → extract → accumulate loop as an
//! explicit state machine:
//!
//! ```text
//! Start ──fetch page 1──▶ PageFetched ──listings──▶ (append) ──fetch n+1──▶ PageFetched
//!                              │
//!                              └──no listings──▶ Done
//! any fetch / extract step ──error──▶ Err(HarvestError)   (collection discarded)
//! cancel flag before a fetch ──────▶ Cancelled             (collection returned)
//! ```
//!
//! Pages are fetched strictly in increasing order, one at a time. The record
//! collection lives in `run`'s frame and is moved into the report.

use crate::config::{Config, ExtractionPolicy};
use crate::crawler::cancel::CancelFlag;
use crate::crawler::extractor::extract_record;
use crate::crawler::fetcher::{build_http_client, HttpFetcher, PageFetcher};
use crate::crawler::listing::{CatalogPage, ListingNode, ListingSelectors};
use crate::crawler::pagination::{has_listings, page_url, total_pages_hint};
use crate::record::{ProductRecord, RecordCollection};
use crate::HarvestError;
use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};
use url::Url;

/// How a crawl that did not fail came to an end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Page `empty_page` had no listings; every page before it was collected
    Exhausted { empty_page: u32 },

    /// The cancel flag was raised before page `next_page` was fetched
    Cancelled { next_page: u32 },
}

/// A listing dropped under [`ExtractionPolicy::Skip`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedListing {
    pub page: u32,
    /// 1-based position of the listing on its page
    pub position: usize,
    pub node: String,
    pub reason: String,
}

/// Result of a crawl that reached `Done` or was cancelled
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub records: RecordCollection,
    pub pages_fetched: u32,
    pub skipped: Vec<SkippedListing>,
    /// Page count announced by the first page's pagination control
    pub total_pages_hint: Option<u32>,
    pub termination: Termination,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlReport {
    /// True when the crawl ran until an empty page
    pub fn is_complete(&self) -> bool {
        matches!(self.termination, Termination::Exhausted { .. })
    }

    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

enum CrawlState {
    Start,
    PageFetched { page: u32, url: Url, body: String },
    Done { empty_page: u32 },
    Cancelled { next_page: u32 },
}

/// What one page contributed
struct PageOutcome {
    listing_count: usize,
    records: Vec<ProductRecord>,
    skipped: Vec<SkippedListing>,
    total_pages_hint: Option<u32>,
}

/// Main crawler coordinator structure
pub struct Coordinator<F> {
    base_url: Url,
    fetcher: F,
    selectors: ListingSelectors,
    max_pages: Option<u32>,
    policy: ExtractionPolicy,
    cancel: CancelFlag,
}

impl Coordinator<HttpFetcher> {
    /// Creates a coordinator that fetches over HTTP
    ///
    /// # Returns
    ///
    /// * `Err(HarvestError)` - The base URL, a selector or the HTTP client
    ///   could not be set up
    pub fn new(config: &Config, cancel: CancelFlag) -> Result<Self, HarvestError> {
        let timeout = Duration::from_secs(config.crawler.request_timeout_secs);
        let client = build_http_client(&config.user_agent, timeout)?;
        Self::with_fetcher(config, HttpFetcher::new(client), cancel)
    }
}

impl<F: PageFetcher> Coordinator<F> {
    /// Creates a coordinator around any page source
    pub fn with_fetcher(
        config: &Config,
        fetcher: F,
        cancel: CancelFlag,
    ) -> Result<Self, HarvestError> {
        Ok(Self {
            base_url: Url::parse(&config.crawler.base_url)?,
            fetcher,
            selectors: ListingSelectors::compile(&config.selectors)?,
            max_pages: config.crawler.max_pages,
            policy: config.crawler.extraction_policy,
            cancel,
        })
    }

    /// Runs the crawl to completion, cancellation or the first fatal error
    pub async fn run(self) -> Result<CrawlReport, HarvestError> {
        let started_at = Utc::now();
        let start_time = Instant::now();
        tracing::info!("Starting crawl of {}", self.base_url);

        let mut records = RecordCollection::new();
        let mut skipped = Vec::new();
        let mut pages_fetched = 0;
        let mut hint = None;
        let mut state = CrawlState::Start;

        let termination = loop {
            state = match state {
                CrawlState::Start => self.fetch(1).await?,

                CrawlState::PageFetched { page, url, body } => {
                    pages_fetched += 1;
                    let outcome = self.process_page(page, &url, &body)?;
                    if page == 1 {
                        hint = outcome.total_pages_hint;
                    }

                    if outcome.listing_count == 0 {
                        CrawlState::Done { empty_page: page }
                    } else {
                        records.extend(outcome.records);
                        skipped.extend(outcome.skipped);
                        self.fetch(page + 1).await?
                    }
                }

                CrawlState::Done { empty_page } => break Termination::Exhausted { empty_page },

                CrawlState::Cancelled { next_page } => {
                    break Termination::Cancelled { next_page }
                }
            };
        };

        if let (Termination::Exhausted { empty_page }, Some(hint)) = (termination, hint) {
            let non_empty = empty_page - 1;
            if non_empty != hint {
                tracing::warn!(
                    "Pagination announced {} pages but {} pages had listings",
                    hint,
                    non_empty
                );
            }
        }

        tracing::info!(
            "Crawl finished ({:?}): {} records from {} pages in {:?}, {} listings skipped",
            termination,
            records.len(),
            pages_fetched,
            start_time.elapsed(),
            skipped.len()
        );

        Ok(CrawlReport {
            records,
            pages_fetched,
            skipped,
            total_pages_hint: hint,
            termination,
            started_at,
            finished_at: Utc::now(),
        })
    }

    /// Fetches page `page`, unless cancelled or past the page ceiling
    async fn fetch(&self, page: u32) -> Result<CrawlState, HarvestError> {
        if self.cancel.is_cancelled() {
            tracing::warn!("Crawl cancelled before page {}", page);
            return Ok(CrawlState::Cancelled { next_page: page });
        }

        if let Some(limit) = self.max_pages {
            if page > limit {
                tracing::error!("Page limit {} reached without an empty page", limit);
                return Err(HarvestError::PageLimitExceeded { limit });
            }
        }

        let url = page_url(&self.base_url, page);
        let fetch_start = Instant::now();

        let body = self.fetcher.fetch(&url).await.map_err(|source| {
            tracing::error!("Failed to fetch page {}: {}", page, source);
            HarvestError::Fetch { page, source }
        })?;

        tracing::debug!(
            page,
            bytes = body.len(),
            elapsed_ms = fetch_start.elapsed().as_millis() as u64,
            "Fetched {}",
            url
        );

        Ok(CrawlState::PageFetched { page, url, body })
    }

    /// Parses one page and turns its listings into records
    ///
    /// Kept synchronous so the parsed document never lives across an await.
    fn process_page(&self, page: u32, url: &Url, body: &str) -> Result<PageOutcome, HarvestError> {
        let parse_start = Instant::now();
        let document = CatalogPage::parse(body);
        let announced = total_pages_hint(&document, &self.selectors);

        if !has_listings(&document, &self.selectors) {
            tracing::info!("Page {} has no listings, end of catalog", page);
            return Ok(PageOutcome {
                listing_count: 0,
                records: Vec::new(),
                skipped: Vec::new(),
                total_pages_hint: announced,
            });
        }

        let listings = document.listings(&self.selectors);
        let mut records = Vec::with_capacity(listings.len());
        let mut skipped = Vec::new();

        for (index, listing) in listings.iter().enumerate() {
            let position = index + 1;
            match extract_record(listing) {
                Ok(record) => records.push(record),
                Err(source) => match self.policy {
                    ExtractionPolicy::Abort => {
                        return Err(HarvestError::Listing {
                            page,
                            url: url.to_string(),
                            position,
                            source,
                        });
                    }
                    ExtractionPolicy::Skip => {
                        tracing::warn!(
                            "Skipping listing #{} on page {}: {}",
                            position,
                            page,
                            source
                        );
                        skipped.push(SkippedListing {
                            page,
                            position,
                            node: listing.describe(),
                            reason: source.to_string(),
                        });
                    }
                },
            }
        }

        tracing::info!(
            page,
            listings = listings.len(),
            records = records.len(),
            elapsed_ms = parse_start.elapsed().as_millis() as u64,
            "Processed {}",
            url
        );

        Ok(PageOutcome {
            listing_count: listings.len(),
            records,
            skipped,
            total_pages_hint: announced,
        })
    }
}

/// Crawls the catalog described by `config` over HTTP
///
/// # Example
///
/// ```no_run
/// use listing_harvester::config::load_config;
/// use listing_harvester::crawler::{run_crawl, CancelFlag};
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("harvest.toml"))?;
/// let report = run_crawl(&config, CancelFlag::new()).await?;
/// println!("{} records", report.records.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config, cancel: CancelFlag) -> Result<CrawlReport, HarvestError> {
    Coordinator::new(config, cancel)?.run().await
}
