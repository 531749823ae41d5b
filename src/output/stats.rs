//! Summary statistics over a record collection
//!
//! Mirrors the downstream analysis stage: descriptive statistics (count,
//! mean, std, min, quartiles, max) for price and review count, plus the most expensive, cheapest and most reviewed
//! products.

use crate::record::{ProductRecord, RecordCollection};
use std::cmp::Ordering;

/// Descriptive statistics of one numeric column
///
/// `std` is the sample standard deviation and is `None` for a single value.
/// Quartiles interpolate linearly between the closest ranks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldStats {
    pub count: usize,
    pub mean: f64,
    pub std: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl FieldStats {
    fn from_values(values: impl Iterator<Item = f64>) -> Option<Self> {
        let mut sorted: Vec<f64> = values.collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;
        let std = (count > 1).then(|| {
            let squares: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (squares / (count - 1) as f64).sqrt()
        });

        Some(Self {
            count,
            mean,
            std,
            min: sorted[0],
            q25: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q75: quantile(&sorted, 0.75),
            max: sorted[count - 1],
        })
    }
}

// `sorted` must be non-empty and ascending
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (position - lower as f64)
}

/// Summary of a crawl's records
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    /// `None` when there are no records
    pub price: Option<FieldStats>,
    pub review_count: Option<FieldStats>,
    pub most_expensive: Vec<ProductRecord>,
    pub cheapest: Vec<ProductRecord>,
    pub most_reviewed: Vec<ProductRecord>,
}

impl Summary {
    /// Computes the summary; top-N tables hold at most `top_n` rows
    ///
    /// Ties keep collection order.
    pub fn from_records(records: &RecordCollection, top_n: usize) -> Self {
        let records = records.as_slice();

        Self {
            count: records.len(),
            price: FieldStats::from_values(records.iter().map(|r| r.price)),
            review_count: FieldStats::from_values(records.iter().map(|r| r.review_count as f64)),
            most_expensive: top_by(records, top_n, |a, b| b.price.total_cmp(&a.price)),
            cheapest: top_by(records, top_n, |a, b| a.price.total_cmp(&b.price)),
            most_reviewed: top_by(records, top_n, |a, b| b.review_count.cmp(&a.review_count)),
        }
    }
}

fn top_by<F>(records: &[ProductRecord], top_n: usize, compare: F) -> Vec<ProductRecord>
where
    F: Fn(&ProductRecord, &ProductRecord) -> Ordering,
{
    let mut sorted: Vec<&ProductRecord> = records.iter().collect();
    // stable: equal keys stay in collection order
    sorted.sort_by(|a, b| compare(a, b));
    sorted.into_iter().take(top_n).cloned().collect()
}

/// Prints the summary to stdout in a formatted manner
pub fn print_summary(summary: &Summary) {
    println!("=== Catalog Summary ===\n");
    println!("Products: {}", summary.count);

    if let (Some(price), Some(reviews)) = (summary.price, summary.review_count) {
        println!("\n{:<6} {:>12} {:>14}", "", "price", "review_count");
        print_stat_row("mean", price.mean, reviews.mean);
        if let (Some(price_std), Some(reviews_std)) = (price.std, reviews.std) {
            print_stat_row("std", price_std, reviews_std);
        }
        print_stat_row("min", price.min, reviews.min);
        print_stat_row("25%", price.q25, reviews.q25);
        print_stat_row("50%", price.median, reviews.median);
        print_stat_row("75%", price.q75, reviews.q75);
        print_stat_row("max", price.max, reviews.max);
    }
    println!();

    print_table("Most expensive products", &summary.most_expensive);
    print_table("Least expensive products", &summary.cheapest);
    print_table("Most reviewed products", &summary.most_reviewed);
}

fn print_stat_row(label: &str, price: f64, reviews: f64) {
    println!("{:<6} {:>12.2} {:>14.2}", label, price, reviews);
}

fn print_table(heading: &str, rows: &[ProductRecord]) {
    if rows.is_empty() {
        return;
    }

    println!("{}:", heading);
    for (rank, record) in rows.iter().enumerate() {
        println!(
            "  {:>2}. {:<40} {:>10.2} {:>5} reviews",
            rank + 1,
            record.title,
            record.price,
            record.review_count
        );
    }
    println!();
}
