/// Error types for loading and indexing the dataset
use chrono::NaiveDate;
use thiserror::Error;

/// Fatal errors raised while reading a source CSV.
///
/// Any of these aborts startup. Missing or malformed values inside an
/// otherwise readable row are not errors; they become absent values.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The source file could not be opened or read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// A required column is absent from the header row
    #[error("Missing required column `{column}` in {source_name}")]
    MissingColumn { source_name: String, column: String },
}

/// Errors raised by [`crate::DateIndex`] lookups.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum DateIndexError {
    /// Slider position outside `[0, len - 1]`
    #[error("Date index {index} out of range (index holds {len} dates)")]
    OutOfRange { index: usize, len: usize },

    /// Date not present in the index
    #[error("Date {0} not found in index")]
    NotFound(NaiveDate),
}
