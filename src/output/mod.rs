//! Output module: the tabular boundary of a crawl
//!
//! This module handles:
//! - Choosing the file format from the output path
//! - Writing a record collection as CSV or XLSX with a fixed column order
//! - Loading a previously written CSV or XLSX file back into a collection
//! - Summary statistics over a collection

mod csv_output;
mod format;
pub mod stats;
mod xlsx_output;

pub use csv_output::{read_csv, write_csv};
pub use format::{OutputError, OutputFormat, OutputResult};
pub use stats::{print_summary, FieldStats, Summary};
pub use xlsx_output::{read_xlsx, write_xlsx};

use crate::record::RecordCollection;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Writes `records` to `path` in the format implied by its extension
///
/// Missing parent directories are created.
///
/// # Returns
///
/// * `Err(OutputError::UnsupportedFormat)` - The extension is neither `.csv`
///   nor `.xlsx`; nothing is written
pub fn write_records(records: &RecordCollection, path: &Path) -> OutputResult<()> {
    let format = OutputFormat::from_path(path)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    match format {
        OutputFormat::Csv => write_csv(records, BufWriter::new(File::create(path)?)),
        OutputFormat::Xlsx => write_xlsx(records, path),
    }?;

    tracing::info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Loads records previously written by [`write_records`]
///
/// The format is chosen from the extension, as for writing.
pub fn load_records(path: &Path) -> OutputResult<RecordCollection> {
    match OutputFormat::from_path(path)? {
        OutputFormat::Csv => read_csv(File::open(path)?),
        OutputFormat::Xlsx => read_xlsx(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ProductRecord;

    fn sample() -> RecordCollection {
        vec![
            ProductRecord {
                title: "Acer Aspire".to_string(),
                description: "15.6\", Core i3".to_string(),
                price: 494.71,
                review_count: 3,
                image_url: "/images/a.png".to_string(),
            },
            ProductRecord {
                title: "Dell Inspiron".to_string(),
                description: "".to_string(),
                price: 1299.0,
                review_count: 0,
                image_url: "/images/b.png".to_string(),
            },
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_write_then_load_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data/raw/products.csv");

        write_records(&sample(), &path).unwrap();
        let loaded = load_records(&path).unwrap();

        assert_eq!(loaded, sample());
    }

    #[test]
    fn test_write_then_load_xlsx() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data/raw/products.xlsx");

        write_records(&sample(), &path).unwrap();
        let loaded = load_records(&path).unwrap();

        assert_eq!(loaded, sample());
    }

    #[test]
    fn test_unsupported_extension_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");

        let err = write_records(&sample(), &path).unwrap_err();
        assert!(matches!(err, OutputError::UnsupportedFormat { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_load_unknown_extension_is_rejected() {
        let err = load_records(Path::new("products.parquet")).unwrap_err();
        assert!(matches!(err, OutputError::UnsupportedFormat { .. }));
    }
}
