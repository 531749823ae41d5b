//! Crawler module for catalog page fetching and listing extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching of numbered catalog pages
//! - Listing nodes and their `scraper`-backed implementation
//! - Field extraction into product records
//! - Pagination (page URLs, termination signal, total-page hint)
//! - Overall crawl coordination

mod cancel;
mod coordinator;
mod extractor;
mod fetcher;
mod listing;
mod pagination;

pub use cancel::CancelFlag;
pub use coordinator::{run_crawl, Coordinator, CrawlReport, SkippedListing, Termination};
pub use extractor::{extract, extract_record};
pub use fetcher::{build_http_client, fetch_page, user_agent_string, HttpFetcher, PageFetcher};
pub use listing::{CatalogPage, FieldRole, ListingNode, ListingSelectors, ScraperListing};
pub use pagination::{has_listings, page_url, total_pages_hint};

use crate::config::Config;
use crate::HarvestError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client and compile the selectors
/// 2. Fetch pages 1, 2, ... in order
/// 3. Extract every listing of each page into a record
/// 4. Stop at the first page without listings (or on cancellation)
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl reached an empty page or was cancelled
/// * `Err(HarvestError)` - Crawl failed; no records are returned
pub async fn crawl(config: &Config, cancel: CancelFlag) -> Result<CrawlReport, HarvestError> {
    run_crawl(config, cancel).await
}
