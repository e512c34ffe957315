//! Regression-method factor scores.
//!
//! Scoring coefficients are `W = R⁻¹ L`; a row of standardized
//! observations `z` then scores as `z W`.

use crate::correlation::Standardized;
use crate::eigen::invert_symmetric;
use crate::error::{EngineError, Result};
use ndarray::Array2;

/// Factor scoring coefficients, variables x factors.
pub fn scoring_coefficients(corr: &Array2<f64>, loadings: &Array2<f64>) -> Result<Array2<f64>> {
    if loadings.nrows() != corr.nrows() {
        return Err(EngineError::DimensionMismatch {
            expected: corr.nrows(),
            actual: loadings.nrows(),
        });
    }
    let inverse = invert_symmetric(corr)?;
    Ok(inverse.dot(loadings))
}

/// Score every standardized observation on every factor.
pub fn regression_scores(
    standardized: &Standardized,
    corr: &Array2<f64>,
    loadings: &Array2<f64>,
) -> Result<Array2<f64>> {
    if standardized.zscores.ncols() != corr.nrows() {
        return Err(EngineError::DimensionMismatch {
            expected: corr.nrows(),
            actual: standardized.zscores.ncols(),
        });
    }
    let coefficients = scoring_coefficients(corr, loadings)?;
    Ok(standardized.zscores.dot(&coefficients))
}
