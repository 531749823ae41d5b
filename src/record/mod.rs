//! Product records and the ordered collection a crawl produces
//!
//! Extraction yields a [`RawListing`] holding the strings exactly as found in
//! the markup. Normalization turns it into a typed [`ProductRecord`]; keeping
//! the two apart means the raw values stay available when normalization fails.

mod normalize;

pub use normalize::{parse_price, parse_review_count};

use crate::NormalizationError;
use serde::{Deserialize, Serialize};

/// Column order of every tabular output
pub const COLUMNS: [&str; 5] = ["title", "description", "price", "review_count", "image_url"];

/// One listing as extracted from the markup, before normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawListing {
    pub title: String,
    pub description: String,
    /// Currency-formatted text, e.g. `"$1,299.00"`
    pub price: String,
    /// First whitespace-delimited token of the review text
    pub review_token: String,
    pub image_url: String,
}

impl RawListing {
    /// Converts the raw strings into a typed record
    pub fn normalize(self) -> Result<ProductRecord, NormalizationError> {
        let price = parse_price(&self.price)?;
        let review_count = parse_review_count(&self.review_token)?;

        Ok(ProductRecord {
            title: self.title,
            description: self.description,
            price,
            review_count,
            image_url: self.image_url,
        })
    }
}

/// One scraped listing in its normalized form
///
/// Field order matches [`COLUMNS`]; serializers rely on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub review_count: u64,
    pub image_url: String,
}

/// Ordered records of a crawl: page order, then document order within a page
///
/// Duplicates are kept. Only the crawler appends; callers get it by value once
/// the crawl is over.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordCollection {
    records: Vec<ProductRecord>,
}

impl RecordCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn extend(&mut self, records: impl IntoIterator<Item = ProductRecord>) {
        self.records.extend(records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProductRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[ProductRecord] {
        &self.records
    }

    pub fn into_vec(self) -> Vec<ProductRecord> {
        self.records
    }
}

impl FromIterator<ProductRecord> for RecordCollection {
    fn from_iter<I: IntoIterator<Item = ProductRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for RecordCollection {
    type Item = ProductRecord;
    type IntoIter = std::vec::IntoIter<ProductRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a RecordCollection {
    type Item = &'a ProductRecord;
    type IntoIter = std::slice::Iter<'a, ProductRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
