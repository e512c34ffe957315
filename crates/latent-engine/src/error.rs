//! Error type for the numerical engine.

use crate::config::ConfigError;
use thiserror::Error;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur while running a factor analysis.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The analysis configuration is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Requested factor count is out of range for the variable count
    #[error("Invalid factor count: requested {requested} factors for {variables} variables")]
    InvalidFactorCount {
        /// Factors requested
        requested: usize,
        /// Variables available
        variables: usize,
    },

    /// Too few observations for the computation
    #[error("Insufficient observations: need at least {required}, got {actual}")]
    InsufficientObservations {
        /// Required number of observations
        required: usize,
        /// Actual number of observations
        actual: usize,
    },

    /// A variable has no variance, so it cannot be standardized
    #[error("Variable at column {index} has zero variance")]
    ZeroVariance {
        /// Column index of the degenerate variable
        index: usize,
    },

    /// The correlation matrix is singular or too ill-conditioned to invert
    #[error("Correlation matrix is singular or not positive definite")]
    SingularMatrix,

    /// A retained factor has a non-positive eigenvalue
    #[error(
        "Not enough common variance: eigenvalue {eigenvalue} at factor {index} is not positive"
    )]
    NotEnoughCommonVariance {
        /// Zero-based index of the offending factor
        index: usize,
        /// The non-positive eigenvalue
        eigenvalue: f64,
    },

    /// An iterative procedure failed to converge
    #[error("{procedure} did not converge within {iterations} iterations")]
    NotConverged {
        /// Name of the procedure
        procedure: &'static str,
        /// Iteration budget that was exhausted
        iterations: usize,
    },

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Matrix dimensions do not agree
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Actual dimension
        actual: usize,
    },
}
