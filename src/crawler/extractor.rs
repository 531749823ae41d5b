//! Field extraction: listing node to record
//!
//! Extraction never emits a partial record. A missing sub-element for any of
//! the five roles fails the listing as a whole.

use crate::crawler::listing::{FieldRole, ListingNode};
use crate::record::{ProductRecord, RawListing};
use crate::{ExtractionError, ListingError};

/// Extracts the raw field strings of one listing
///
/// Strings are trimmed. The review field keeps only its first
/// whitespace-delimited token; the price is kept verbatim (e.g. `"$399.99"`).
///
/// # Returns
///
/// * `Ok(RawListing)` - All five sub-elements were found
/// * `Err(ExtractionError)` - A sub-element is missing or the title is empty
pub fn extract<N: ListingNode + ?Sized>(node: &N) -> Result<RawListing, ExtractionError> {
    let image_url = require(node, FieldRole::Image)?;
    let title = require(node, FieldRole::Title)?;
    let description = require(node, FieldRole::Description)?;
    let price = require(node, FieldRole::Price)?;
    let review_text = require(node, FieldRole::ReviewCount)?;

    if title.is_empty() {
        return Err(ExtractionError::EmptyTitle {
            node: node.describe(),
        });
    }

    let review_token = review_text
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string();

    Ok(RawListing {
        title,
        description,
        price,
        review_token,
        image_url,
    })
}

/// Extracts and normalizes one listing into a typed record
pub fn extract_record<N: ListingNode + ?Sized>(node: &N) -> Result<ProductRecord, ListingError> {
    Ok(extract(node)?.normalize()?)
}

fn require<N: ListingNode + ?Sized>(node: &N, role: FieldRole) -> Result<String, ExtractionError> {
    node.field(role)
        .ok_or_else(|| ExtractionError::MissingElement {
            role,
            node: node.describe(),
        })
}
