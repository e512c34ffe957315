//! Principal-factor extraction.
//!
//! Forms the reduced correlation matrix (prior communalities on the
//! diagonal), eigendecomposes it, and keeps the leading factors. With unit
//! priors this is ordinary principal components on the correlation matrix.

use crate::eigen::symmetric_eigen;
use crate::error::{EngineError, Result};
use ndarray::{Array1, Array2};

/// An unrotated principal-factor solution.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Unrotated loadings, variables x factors.
    pub loadings: Array2<f64>,

    /// Full eigenvalue spectrum of the reduced correlation matrix, in
    /// descending order. The first `n_factors` belong to the retained
    /// factors; the tail feeds the scree table.
    pub eigenvalues: Array1<f64>,

    /// Final communalities: row sums of squared retained loadings.
    pub communalities: Array1<f64>,

    /// The prior communalities that were placed on the diagonal.
    pub priors: Array1<f64>,
}

/// Extract `n_factors` principal factors from a correlation matrix.
///
/// Fails before computing anything if the factor count is zero or exceeds
/// the number of variables, and fails if a retained factor's eigenvalue is
/// not positive, which means the requested number of factors exceeds the
/// common variance the priors admit.
pub fn principal_factors(
    corr: &Array2<f64>,
    priors: &Array1<f64>,
    n_factors: usize,
) -> Result<Extraction> {
    let n_variables = corr.nrows();
    if corr.ncols() != n_variables {
        return Err(EngineError::DimensionMismatch {
            expected: n_variables,
            actual: corr.ncols(),
        });
    }
    if priors.len() != n_variables {
        return Err(EngineError::DimensionMismatch {
            expected: n_variables,
            actual: priors.len(),
        });
    }
    if n_factors == 0 || n_factors > n_variables {
        return Err(EngineError::InvalidFactorCount {
            requested: n_factors,
            variables: n_variables,
        });
    }

    let mut reduced = corr.clone();
    for i in 0..n_variables {
        reduced[[i, i]] = priors[i];
    }

    let decomp = symmetric_eigen(&reduced)?;

    let mut loadings = Array2::<f64>::zeros((n_variables, n_factors));
    for j in 0..n_factors {
        let lambda = decomp.eigenvalues[j];
        if lambda <= 0.0 {
            return Err(EngineError::NotEnoughCommonVariance {
                index: j,
                eigenvalue: lambda,
            });
        }
        let scale = lambda.sqrt();
        for i in 0..n_variables {
            loadings[[i, j]] = decomp.eigenvectors[[i, j]] * scale;
        }
    }

    let mut communalities = Array1::<f64>::zeros(n_variables);
    for i in 0..n_variables {
        communalities[i] = loadings.row(i).iter().map(|l| l * l).sum();
    }

    Ok(Extraction {
        loadings,
        eigenvalues: decomp.eigenvalues,
        communalities,
        priors: priors.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // Correlation matrix of two well-separated variable blocks.
    fn two_block_corr() -> Array2<f64> {
        array![
            [1.0, 0.8, 0.1, 0.1],
            [0.8, 1.0, 0.1, 0.1],
            [0.1, 0.1, 1.0, 0.7],
            [0.1, 0.1, 0.7, 1.0]
        ]
    }

    #[test]
    fn test_unit_priors_reproduce_pca() {
        let corr = two_block_corr();
        let priors = Array1::ones(4);
        let extraction = principal_factors(&corr, &priors, 4).unwrap();

        // With unit priors the eigenvalues sum to the trace, i.e. the
        // number of variables.
        let total: f64 = extraction.eigenvalues.iter().sum();
        assert_abs_diff_eq!(total, 4.0, epsilon = 1e-9);

        // Retaining every component reproduces full communalities.
        for &h in extraction.communalities.iter() {
            assert_abs_diff_eq!(h, 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_two_factors_capture_two_blocks() {
        let corr = two_block_corr();
        let priors = array![0.7, 0.7, 0.6, 0.6];
        let extraction = principal_factors(&corr, &priors, 2).unwrap();

        assert_eq!(extraction.loadings.dim(), (4, 2));
        // Eigenvalues come out sorted.
        assert!(extraction.eigenvalues[0] >= extraction.eigenvalues[1]);
        // Communalities are positive and bounded by 1 for this matrix.
        for &h in extraction.communalities.iter() {
            assert!(h > 0.0 && h <= 1.0 + 1e-9);
        }
    }

    #[test]
    fn test_communalities_match_loadings() {
        let corr = two_block_corr();
        let priors = array![0.7, 0.7, 0.6, 0.6];
        let extraction = principal_factors(&corr, &priors, 2).unwrap();

        for i in 0..4 {
            let expected: f64 = (0..2).map(|j| extraction.loadings[[i, j]].powi(2)).sum();
            assert_abs_diff_eq!(extraction.communalities[i], expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_factor_count_exceeding_variables_rejected() {
        let corr = two_block_corr();
        let priors = Array1::ones(4);
        let err = principal_factors(&corr, &priors, 5).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidFactorCount {
                requested: 5,
                variables: 4
            }
        ));
    }

    #[test]
    fn test_zero_factors_rejected() {
        let corr = two_block_corr();
        let priors = Array1::ones(4);
        assert!(matches!(
            principal_factors(&corr, &priors, 0).unwrap_err(),
            EngineError::InvalidFactorCount { .. }
        ));
    }

    #[test]
    fn test_requesting_more_factors_than_common_variance() {
        // Nearly diagonal correlation with tiny priors: the reduced matrix
        // has almost no positive spectrum beyond the first components.
        let corr = array![
            [1.0, 0.05, 0.0],
            [0.05, 1.0, 0.0],
            [0.0, 0.0, 1.0]
        ];
        let priors = array![0.01, 0.01, 0.0];
        let err = principal_factors(&corr, &priors, 3).unwrap_err();
        assert!(matches!(
            err,
            EngineError::NotEnoughCommonVariance { .. }
        ));
    }
}
