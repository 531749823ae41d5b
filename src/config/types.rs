use serde::Deserialize;

/// Main configuration structure for Listing-Harvester
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub selectors: SelectorConfig,
    pub output: OutputConfig,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Catalog root; `page=<n>` is appended to its query string
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Hard ceiling on the number of pages fetched
    #[serde(rename = "max-pages", default)]
    pub max_pages: Option<u32>,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs", default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// What to do with a listing that fails extraction or normalization
    #[serde(rename = "extraction-policy", default)]
    pub extraction_policy: ExtractionPolicy,
}

fn default_timeout_secs() -> u64 {
    30
}

/// Handling of a listing that cannot be turned into a record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionPolicy {
    /// Fail the whole crawl
    #[default]
    Abort,
    /// Log the listing, count it in the report and carry on
    Skip,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// CSS selectors locating listings and their fields
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// One match per listing node
    pub listing: String,
    /// Image element inside a listing; its `src` is the image URL
    pub image: String,
    pub title: String,
    pub description: String,
    pub price: String,
    #[serde(rename = "review-count")]
    pub review_count: String,
    /// Items of the pagination control, used only for the total-page hint
    #[serde(rename = "pagination-item")]
    pub pagination_item: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            listing: "div.thumbnail".to_string(),
            image: "img.img-fluid".to_string(),
            title: "a.title".to_string(),
            description: "p.description".to_string(),
            price: "h4.price".to_string(),
            review_count: "p.review-count".to_string(),
            pagination_item: "ul.pagination li".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Destination file; the extension selects the format (`.csv` or `.xlsx`)
    pub path: String,

    /// Number of rows in each top-N table of the summary
    #[serde(rename = "summary-top-n", default = "default_top_n")]
    pub summary_top_n: usize,
}

fn default_top_n() -> usize {
    5
}
