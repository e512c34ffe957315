//! Bartlett's test of sphericity.
//!
//! Tests the null hypothesis that the correlation matrix is the identity,
//! i.e. that there is nothing to factor. The statistic is
//! `-(n - 1 - (2p + 5)/6) * ln|R|` on `p(p-1)/2` degrees of freedom.

use crate::eigen::determinant;
use crate::error::{EngineError, Result};
use crate::special::chi_square_survival;
use ndarray::Array2;

/// Result of Bartlett's test of sphericity.
#[derive(Debug, Clone, Copy)]
pub struct SphericityTest {
    /// Chi-square statistic.
    pub chi_square: f64,

    /// Degrees of freedom, `p(p-1)/2`.
    pub df: usize,

    /// Upper-tail p-value.
    pub p_value: f64,
}

/// Run Bartlett's test of sphericity for `n_obs` observations.
pub fn bartlett_sphericity(corr: &Array2<f64>, n_obs: usize) -> Result<SphericityTest> {
    let p = corr.nrows();
    if n_obs < 2 {
        return Err(EngineError::InsufficientObservations {
            required: 2,
            actual: n_obs,
        });
    }

    let det = determinant(corr)?;
    if det <= 0.0 {
        // A non-positive determinant means the matrix is singular (or worse)
        // and the log-likelihood statistic is undefined.
        return Err(EngineError::SingularMatrix);
    }

    let n = n_obs as f64;
    let p_f = p as f64;
    let chi_square = -(n - 1.0 - (2.0 * p_f + 5.0) / 6.0) * det.ln();
    let df = p * (p - 1) / 2;
    let p_value = chi_square_survival(chi_square.max(0.0), df)?;

    Ok(SphericityTest {
        chi_square,
        df,
        p_value,
    })
}
