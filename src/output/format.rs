use std::path::Path;
use thiserror::Error;

/// Errors that can occur at the output boundary
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Unsupported file format: {path} (expected .csv or .xlsx)")]
    UnsupportedFormat { path: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("XLSX read error: {0}")]
    XlsxRead(#[from] calamine::XlsxError),

    #[error("Malformed sheet at row {row}: {message}")]
    Malformed { row: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Supported tabular formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Xlsx,
}

impl OutputFormat {
    /// Picks the format from the file extension (case-insensitive)
    pub fn from_path(path: &Path) -> OutputResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("xlsx") => Ok(Self::Xlsx),
            _ => Err(OutputError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            OutputFormat::from_path(Path::new("out/products.csv")).unwrap(),
            OutputFormat::Csv
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("products.XLSX")).unwrap(),
            OutputFormat::Xlsx
        );
    }

    #[test]
    fn test_unsupported_extensions() {
        for path in ["products.xls", "products.json", "products", "csv"] {
            assert!(
                matches!(
                    OutputFormat::from_path(Path::new(path)),
                    Err(OutputError::UnsupportedFormat { .. })
                ),
                "{} should be rejected",
                path
            );
        }
    }
}
