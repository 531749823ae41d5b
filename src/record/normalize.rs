//! Currency and review-count normalization

use crate::NormalizationError;
use regex::Regex;
use std::sync::LazyLock;

/// Currency symbol and thousands separator
static PRICE_NOISE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[$,]").unwrap());

/// Parses a currency-formatted string into a non-negative number
///
/// `$` and `,` are stripped; the remainder must be a plain decimal number.
///
/// # Example
///
/// ```
/// use listing_harvester::record::parse_price;
///
/// assert_eq!(parse_price("$1,299.00").unwrap(), 1299.0);
/// assert_eq!(parse_price("$0").unwrap(), 0.0);
/// assert!(parse_price("$").is_err());
/// ```
pub fn parse_price(raw: &str) -> Result<f64, NormalizationError> {
    let invalid = || NormalizationError::Price {
        raw: raw.to_string(),
    };

    let stripped = PRICE_NOISE.replace_all(raw, "");
    let stripped = stripped.trim();

    // f64::from_str also accepts "inf", "NaN" and exponents
    let is_plain_decimal = stripped.chars().any(|c| c.is_ascii_digit())
        && stripped.chars().all(|c| c.is_ascii_digit() || c == '.');
    if !is_plain_decimal {
        return Err(invalid());
    }

    stripped.parse::<f64>().map_err(|_| invalid())
}

/// Parses the leading review token (e.g. `"25"` from `"25 reviews"`)
///
/// Accepts either the bare token or the full review text; only the first
/// whitespace-delimited token is considered.
pub fn parse_review_count(raw: &str) -> Result<u64, NormalizationError> {
    let invalid = || NormalizationError::ReviewCount {
        raw: raw.to_string(),
    };

    let token = raw.split_whitespace().next().ok_or_else(invalid)?;
    if !token.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    token.parse::<u64>().map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_with_thousands_separator() {
        assert_eq!(parse_price("$1,299.00").unwrap(), 1299.0);
    }

    #[test]
    fn test_price_zero() {
        assert_eq!(parse_price("$0").unwrap(), 0.0);
    }

    #[test]
    fn test_price_with_surrounding_whitespace() {
        assert_eq!(parse_price("  $399.99 ").unwrap(), 399.99);
    }

    #[test]
    fn test_price_without_digits() {
        assert!(matches!(
            parse_price("$"),
            Err(NormalizationError::Price { .. })
        ));
        assert!(parse_price("").is_err());
        assert!(parse_price("$,,").is_err());
    }

    #[test]
    fn test_price_rejects_non_decimal_text() {
        assert!(parse_price("$inf").is_err());
        assert!(parse_price("$1e3").is_err());
        assert!(parse_price("-$5").is_err());
        assert!(parse_price("$1.2.3").is_err());
        assert!(parse_price("USD 12").is_err());
    }

    #[test]
    fn test_price_error_keeps_raw_value() {
        let err = parse_price("free").unwrap_err();
        assert_eq!(err.to_string(), "Invalid price: \"free\"");
    }

    #[test]
    fn test_review_count_from_text() {
        assert_eq!(parse_review_count("25 reviews").unwrap(), 25);
        assert_eq!(parse_review_count("0 reviews").unwrap(), 0);
    }

    #[test]
    fn test_review_count_from_token() {
        assert_eq!(parse_review_count("7").unwrap(), 7);
    }

    #[test]
    fn test_review_count_not_an_integer() {
        assert!(matches!(
            parse_review_count("many reviews"),
            Err(NormalizationError::ReviewCount { .. })
        ));
        assert!(parse_review_count("-1").is_err());
        assert!(parse_review_count("2.5").is_err());
        assert!(parse_review_count("").is_err());
    }
}
