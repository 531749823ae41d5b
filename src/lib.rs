//! Listing-Harvester: a paginated catalog crawler
//!
//! This crate walks the numbered pages of a product catalog, extracts one
//! typed record per listing and hands the complete, ordered collection to a
//! tabular writer. A crawl is all-or-nothing: any fetch, extraction or
//! normalization failure aborts it unless a skip policy is configured.

pub mod config;
pub mod crawler;
pub mod output;
pub mod record;

use thiserror::Error;

/// Main error type for Listing-Harvester operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Page {page}: {source}")]
    Fetch {
        page: u32,
        #[source]
        source: FetchError,
    },

    #[error("Page {page} ({url}), listing #{position}: {source}")]
    Listing {
        page: u32,
        url: String,
        position: usize,
        #[source]
        source: ListingError,
    },

    #[error("Page limit of {limit} reached before an empty page was seen")]
    PageLimitExceeded { limit: u32 },
}

/// Network or HTTP failure for a single page URL
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {source}")]
    Connect { url: String, source: reqwest::Error },

    #[error("Request failed for {url}: {source}")]
    Request { url: String, source: reqwest::Error },
}

impl FetchError {
    /// The URL whose fetch failed
    pub fn url(&self) -> &str {
        match self {
            Self::Status { url, .. }
            | Self::Timeout { url }
            | Self::Connect { url, .. }
            | Self::Request { url, .. } => url,
        }
    }
}

/// A listing node lacks one of the elements a record needs
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Missing {role} element in {node}")]
    MissingElement {
        role: crawler::FieldRole,
        node: String,
    },

    #[error("Empty title in {node}")]
    EmptyTitle { node: String },
}

/// A raw field could not be converted to its typed form
#[derive(Debug, Error, PartialEq)]
pub enum NormalizationError {
    #[error("Invalid price: {raw:?}")]
    Price { raw: String },

    #[error("Invalid review count: {raw:?}")]
    ReviewCount { raw: String },
}

/// Failure turning one listing node into a record
#[derive(Debug, Error)]
pub enum ListingError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Normalization(#[from] NormalizationError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid CSS selector for {field}: {selector:?}")]
    InvalidSelector { field: &'static str, selector: String },
}

/// Result type alias for Listing-Harvester operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, CancelFlag, CrawlReport, Termination};
pub use record::{ProductRecord, RawListing, RecordCollection};
