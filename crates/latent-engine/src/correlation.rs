//! Standardization and the Pearson correlation matrix.

use crate::error::{EngineError, Result};
use ndarray::{Array1, Array2, Axis};

/// Column-standardized data together with the statistics used to produce it.
///
/// The means and standard deviations are kept because factor scoring has to
/// standardize new rows the same way.
#[derive(Debug, Clone)]
pub struct Standardized {
    /// Z-scores, same shape as the input.
    pub zscores: Array2<f64>,

    /// Column means.
    pub means: Array1<f64>,

    /// Column standard deviations (sample, n-1 denominator).
    pub std_devs: Array1<f64>,
}

/// Standardize each column to zero mean and unit sample variance.
///
/// Fails on a zero-variance column, which cannot enter a correlation matrix.
pub fn standardize(data: &Array2<f64>) -> Result<Standardized> {
    let n_obs = data.nrows();
    if n_obs < 2 {
        return Err(EngineError::InsufficientObservations {
            required: 2,
            actual: n_obs,
        });
    }

    let means = data
        .mean_axis(Axis(0))
        .expect("non-empty rows checked above");

    let mut std_devs = Array1::<f64>::zeros(data.ncols());
    for (j, column) in data.axis_iter(Axis(1)).enumerate() {
        let ss: f64 = column.iter().map(|&v| (v - means[j]).powi(2)).sum();
        let var = ss / (n_obs - 1) as f64;
        if var <= f64::EPSILON {
            return Err(EngineError::ZeroVariance { index: j });
        }
        std_devs[j] = var.sqrt();
    }

    let mut zscores = data.clone();
    for (j, mut column) in zscores.axis_iter_mut(Axis(1)).enumerate() {
        column.mapv_inplace(|v| (v - means[j]) / std_devs[j]);
    }

    Ok(Standardized {
        zscores,
        means,
        std_devs,
    })
}

/// Pearson correlation matrix of the columns of `data`.
///
/// R = Zᵀ Z / (n - 1) over the standardized columns; the diagonal is forced
/// to exactly 1 to absorb floating-point drift.
pub fn correlation_matrix(data: &Array2<f64>) -> Result<Array2<f64>> {
    let standardized = standardize(data)?;
    Ok(correlation_from_zscores(&standardized.zscores))
}

/// Correlation matrix from already-standardized columns.
pub fn correlation_from_zscores(z: &Array2<f64>) -> Array2<f64> {
    let n = z.nrows() as f64;
    let mut corr = z.t().dot(z) / (n - 1.0);

    for i in 0..corr.nrows() {
        corr[[i, i]] = 1.0;
    }
    // Symmetrize pairwise products computed in different orders.
    for i in 0..corr.nrows() {
        for j in (i + 1)..corr.ncols() {
            let r = 0.5 * (corr[[i, j]] + corr[[j, i]]);
            corr[[i, j]] = r;
            corr[[j, i]] = r;
        }
    }

    corr
}
