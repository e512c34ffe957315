//! Residual correlations.
//!
//! How much of each observed correlation the retained factors fail to
//! reproduce: `res_ij = r_ij - (L Lᵀ)_ij` for `i != j`. The diagonal is set
//! to zero; reproduction of a variable's own variance is already reported
//! as its communality.

use crate::error::{EngineError, Result};
use ndarray::{Array1, Array2};

/// Residual correlation matrix with its root-mean-square summaries.
#[derive(Debug, Clone)]
pub struct ResidualAnalysis {
    /// Residual matrix, zero diagonal.
    pub matrix: Array2<f64>,

    /// RMS of the off-diagonal residuals.
    pub rms_overall: f64,

    /// Per-variable RMS over that variable's off-diagonal residuals.
    pub rms_per_variable: Array1<f64>,
}

/// Compute residual correlations for a loading matrix.
pub fn residual_correlations(
    corr: &Array2<f64>,
    loadings: &Array2<f64>,
) -> Result<ResidualAnalysis> {
    let n = corr.nrows();
    if loadings.nrows() != n {
        return Err(EngineError::DimensionMismatch {
            expected: n,
            actual: loadings.nrows(),
        });
    }

    let reproduced = loadings.dot(&loadings.t());
    let mut matrix = corr - &reproduced;
    for i in 0..n {
        matrix[[i, i]] = 0.0;
    }

    let mut rms_per_variable = Array1::<f64>::zeros(n);
    let mut total = 0.0;
    for i in 0..n {
        let mut sum = 0.0;
        for j in 0..n {
            if i != j {
                sum += matrix[[i, j]] * matrix[[i, j]];
            }
        }
        rms_per_variable[i] = if n > 1 {
            (sum / (n - 1) as f64).sqrt()
        } else {
            0.0
        };
        total += sum;
    }

    let off_diagonal_count = n * n.saturating_sub(1);
    let rms_overall = if off_diagonal_count > 0 {
        (total / off_diagonal_count as f64).sqrt()
    } else {
        0.0
    };

    Ok(ResidualAnalysis {
        matrix,
        rms_overall,
        rms_per_variable,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_perfect_reproduction_has_zero_residuals() {
        // One factor generating the correlations exactly.
        let loadings = array![[0.8], [0.6], [0.5]];
        let mut corr = loadings.dot(&loadings.t());
        for i in 0..3 {
            corr[[i, i]] = 1.0;
        }

        let residuals = residual_correlations(&corr, &loadings).unwrap();
        assert_abs_diff_eq!(residuals.rms_overall, 0.0, epsilon = 1e-12);
        for i in 0..3 {
            for j in 0..3 {
                assert_abs_diff_eq!(residuals.matrix[[i, j]], 0.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_residuals_are_symmetric_with_zero_diagonal() {
        let corr = array![
            [1.0, 0.5, 0.3],
            [0.5, 1.0, 0.2],
            [0.3, 0.2, 1.0]
        ];
        let loadings = array![[0.7], [0.6], [0.4]];
        let residuals = residual_correlations(&corr, &loadings).unwrap();

        for i in 0..3 {
            assert_abs_diff_eq!(residuals.matrix[[i, i]], 0.0, epsilon = 1e-12);
            for j in 0..3 {
                assert_abs_diff_eq!(
                    residuals.matrix[[i, j]],
                    residuals.matrix[[j, i]],
                    epsilon = 1e-12
                );
            }
        }
    }

    #[test]
    fn test_rms_matches_hand_computation() {
        let corr = array![[1.0, 0.5], [0.5, 1.0]];
        let loadings = array![[0.6], [0.5]];
        // Single off-diagonal residual: 0.5 - 0.3 = 0.2.
        let residuals = residual_correlations(&corr, &loadings).unwrap();
        assert_abs_diff_eq!(residuals.rms_overall, 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(residuals.rms_per_variable[0], 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let corr = array![[1.0, 0.5], [0.5, 1.0]];
        let loadings = array![[0.6], [0.5], [0.4]];
        assert!(matches!(
            residual_correlations(&corr, &loadings).unwrap_err(),
            EngineError::DimensionMismatch { .. }
        ));
    }
}
