//! Pagination: page URLs, the termination signal and the total-page hint

use crate::crawler::listing::{CatalogPage, ListingSelectors};
use url::Url;

/// Builds the URL of page `page` by appending `page=<n>` to the base query
pub fn page_url(base: &Url, page: u32) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut().append_pair("page", &page.to_string());
    url
}

/// Returns true if the page holds at least one listing node
///
/// This is the only signal the crawl loop uses to stop.
pub fn has_listings(page: &CatalogPage, selectors: &ListingSelectors) -> bool {
    !page.listings(selectors).is_empty()
}

/// Total page count announced by the pagination control, if any
///
/// The second-to-last item is the last numbered page (the last one is the
/// "next" arrow). Diagnostic only: the crawl loop never relies on it.
pub fn total_pages_hint(page: &CatalogPage, selectors: &ListingSelectors) -> Option<u32> {
    let labels = page.pagination_labels(selectors);
    let index = labels.len().checked_sub(2)?;
    labels[index].parse().ok()
}
