//! Prior communality estimates.
//!
//! Principal-factor extraction replaces the unit diagonal of the correlation
//! matrix with prior communality estimates. The default is the squared
//! multiple correlation of each variable with all the others, computed from
//! the diagonal of the inverse correlation matrix.

use crate::config::PriorEstimate;
use crate::eigen::invert_symmetric;
use crate::error::Result;
use ndarray::{Array1, Array2};

/// Squared multiple correlations: `smc_i = 1 - 1 / r^{ii}`.
///
/// Requires an invertible correlation matrix; a singular one is reported as
/// [`crate::EngineError::SingularMatrix`].
pub fn smc(corr: &Array2<f64>) -> Result<Array1<f64>> {
    let inverse = invert_symmetric(corr)?;
    let mut priors = Array1::<f64>::zeros(corr.nrows());
    for i in 0..corr.nrows() {
        // The diagonal of the inverse of a correlation matrix is >= 1, so
        // this lands in [0, 1); clamp against rounding anyway.
        priors[i] = (1.0 - 1.0 / inverse[[i, i]]).clamp(0.0, 1.0);
    }
    Ok(priors)
}

/// Largest absolute off-diagonal correlation per variable.
pub fn max_absolute_correlation(corr: &Array2<f64>) -> Array1<f64> {
    let n = corr.nrows();
    let mut priors = Array1::<f64>::zeros(n);
    for i in 0..n {
        let mut max_abs = 0.0f64;
        for j in 0..n {
            if i != j {
                max_abs = max_abs.max(corr[[i, j]].abs());
            }
        }
        priors[i] = max_abs;
    }
    priors
}

/// Compute prior communalities under the configured strategy.
pub fn prior_communalities(corr: &Array2<f64>, estimate: PriorEstimate) -> Result<Array1<f64>> {
    match estimate {
        PriorEstimate::Smc => smc(corr),
        PriorEstimate::One => Ok(Array1::ones(corr.nrows())),
        PriorEstimate::Max => Ok(max_absolute_correlation(corr)),
    }
}
