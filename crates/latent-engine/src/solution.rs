//! The assembled result of one factor-analysis run.

use crate::config::Rotation;
use crate::diagnostics::{ResidualAnalysis, SamplingAdequacy, SphericityTest};
use ndarray::{Array1, Array2};

/// Variance explained by one retained factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarianceExplained {
    /// One-based factor index.
    pub factor: usize,

    /// Eigenvalue of the reduced correlation matrix for this factor.
    pub eigenvalue: f64,

    /// Share of total variance explained, in [0, 1].
    pub proportion: f64,

    /// Cumulative share through this factor, non-decreasing.
    pub cumulative: f64,
}

/// Complete factor solution: pattern, communalities, variance accounting
/// and any requested diagnostics.
#[derive(Debug, Clone)]
pub struct FactorSolution {
    /// Variable names, in loading-row order.
    pub variables: Vec<String>,

    /// Number of complete observations that entered the analysis.
    pub n_obs: usize,

    /// Number of retained factors.
    pub n_factors: usize,

    /// Rotation that produced `loadings`.
    pub rotation: Rotation,

    /// Prior communality estimates.
    pub priors: Array1<f64>,

    /// Final communalities.
    pub communalities: Array1<f64>,

    /// Full eigenvalue spectrum of the reduced correlation matrix.
    pub eigenvalues: Array1<f64>,

    /// Unrotated loadings, variables x factors.
    pub unrotated: Array2<f64>,

    /// Final (rotated) loadings, variables x factors.
    pub loadings: Array2<f64>,

    /// Variance explained per retained factor, exactly `n_factors` entries.
    pub variance: Vec<VarianceExplained>,

    /// Sampling adequacy, when requested.
    pub sampling_adequacy: Option<SamplingAdequacy>,

    /// Bartlett's sphericity test, when requested.
    pub sphericity: Option<SphericityTest>,

    /// Residual correlations, when requested.
    pub residuals: Option<ResidualAnalysis>,

    /// Regression factor scores, observations x factors, when requested.
    pub scores: Option<Array2<f64>>,
}

impl FactorSolution {
    /// Number of variables in the solution.
    pub fn n_variables(&self) -> usize {
        self.variables.len()
    }

    /// Total communality: variance the retained factors explain in the
    /// units of variable count.
    pub fn total_communality(&self) -> f64 {
        self.communalities.sum()
    }
}

/// Build the variance-explained table from final loadings.
///
/// Proportions are shares of *total* variance, i.e. sums of squared
/// loadings divided by the number of variables, which keeps every
/// proportion in [0, 1] and the cumulative column monotone.
pub(crate) fn variance_table(
    loadings: &Array2<f64>,
    eigenvalues: &Array1<f64>,
) -> Vec<VarianceExplained> {
    let (n_variables, n_factors) = loadings.dim();
    let p = n_variables as f64;

    let mut cumulative = 0.0;
    (0..n_factors)
        .map(|j| {
            let ss: f64 = loadings.column(j).iter().map(|l| l * l).sum();
            let proportion = ss / p;
            cumulative += proportion;
            VarianceExplained {
                factor: j + 1,
                eigenvalue: eigenvalues[j],
                proportion,
                cumulative,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_variance_table_row_count_and_monotonicity() {
        let loadings = array![
            [0.8, 0.1],
            [0.7, 0.2],
            [0.1, 0.9],
            [0.2, 0.6]
        ];
        let eigenvalues = array![1.3, 1.1, 0.2, 0.1];
        let table = variance_table(&loadings, &eigenvalues);

        assert_eq!(table.len(), 2);
        assert_eq!(table[0].factor, 1);
        assert_eq!(table[1].factor, 2);
        assert!(table[1].cumulative >= table[0].cumulative);
        assert!(table[1].cumulative <= 1.0 + 1e-12);
        for row in &table {
            assert!(row.proportion >= 0.0 && row.proportion <= 1.0);
        }
    }

    #[test]
    fn test_variance_table_sums_squared_loadings() {
        let loadings = array![[0.6, 0.0], [0.8, 0.0], [0.0, 1.0]];
        let eigenvalues = array![1.0, 1.0, 0.0];
        let table = variance_table(&loadings, &eigenvalues);

        // SS of factor 1 is 0.36 + 0.64 = 1.0 over three variables.
        assert_abs_diff_eq!(table[0].proportion, 1.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(table[1].cumulative, 2.0 / 3.0, epsilon = 1e-12);
    }
}
