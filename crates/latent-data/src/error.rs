//! Error types for dataset operations.

use thiserror::Error;

/// Result type for dataset operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while loading or validating a dataset.
#[derive(Debug, Error)]
pub enum DataError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// The file extension is not a supported dataset format
    #[error("Unsupported dataset format: {extension} (expected csv or parquet)")]
    UnsupportedFormat {
        /// Extension of the offending path
        extension: String,
    },

    /// A requested variable is absent from the dataset
    #[error("Variable not found in dataset: {name}")]
    MissingVariable {
        /// Name of the absent variable
        name: String,
    },

    /// A requested variable has a non-numeric type
    #[error("Variable {name} is not numeric (dtype: {dtype})")]
    NonNumericVariable {
        /// Name of the offending variable
        name: String,
        /// Observed Polars dtype
        dtype: String,
    },

    /// Missing values were found and the policy forbids dropping rows
    #[error("{count} rows contain missing values in the selected variables")]
    MissingValues {
        /// Number of incomplete rows
        count: usize,
    },

    /// Too few complete rows remain for the analysis
    #[error("Too few complete observations: need at least {required}, got {actual}")]
    TooFewRows {
        /// Minimum number of complete rows
        required: usize,
        /// Complete rows actually present
        actual: usize,
    },
}
