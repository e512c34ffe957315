//! Kaiser-Meyer-Olkin measure of sampling adequacy.
//!
//! Compares observed correlations against anti-image (partial)
//! correlations. Values near 1 mean the variables share enough common
//! variance to factor; values under roughly 0.5 mean they do not.

use crate::eigen::invert_symmetric;
use crate::error::Result;
use ndarray::{Array1, Array2};

/// Overall and per-variable sampling adequacy.
#[derive(Debug, Clone)]
pub struct SamplingAdequacy {
    /// Overall KMO statistic, in [0, 1].
    pub overall: f64,

    /// Per-variable KMO statistics, in roster order.
    pub per_variable: Array1<f64>,
}

/// Compute the KMO sampling adequacy from a correlation matrix.
///
/// The partial correlations come from the inverse correlation matrix:
/// `a_ij = -r^ij / sqrt(r^ii r^jj)`. A singular matrix is reported as
/// [`crate::EngineError::SingularMatrix`].
pub fn kmo(corr: &Array2<f64>) -> Result<SamplingAdequacy> {
    let inverse = invert_symmetric(corr)?;
    let n = corr.nrows();

    let mut partial = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in 0..n {
            if i != j {
                partial[[i, j]] =
                    -inverse[[i, j]] / (inverse[[i, i]] * inverse[[j, j]]).sqrt();
            }
        }
    }

    let mut per_variable = Array1::<f64>::zeros(n);
    let mut total_r2 = 0.0;
    let mut total_a2 = 0.0;

    for i in 0..n {
        let mut r2 = 0.0;
        let mut a2 = 0.0;
        for j in 0..n {
            if i != j {
                r2 += corr[[i, j]] * corr[[i, j]];
                a2 += partial[[i, j]] * partial[[i, j]];
            }
        }
        per_variable[i] = if r2 + a2 > 0.0 { r2 / (r2 + a2) } else { 0.0 };
        total_r2 += r2;
        total_a2 += a2;
    }

    let overall = if total_r2 + total_a2 > 0.0 {
        total_r2 / (total_r2 + total_a2)
    } else {
        0.0
    };

    Ok(SamplingAdequacy {
        overall,
        per_variable,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_kmo_in_unit_interval() {
        let corr = array![
            [1.0, 0.6, 0.5],
            [0.6, 1.0, 0.4],
            [0.5, 0.4, 1.0]
        ];
        let adequacy = kmo(&corr).unwrap();
        assert!((0.0..=1.0).contains(&adequacy.overall));
        for &m in adequacy.per_variable.iter() {
            assert!((0.0..=1.0).contains(&m));
        }
    }

    #[test]
    fn test_kmo_higher_for_shared_variance() {
        // One general factor driving everything: high adequacy.
        let shared = array![
            [1.0, 0.7, 0.7, 0.7],
            [0.7, 1.0, 0.7, 0.7],
            [0.7, 0.7, 1.0, 0.7],
            [0.7, 0.7, 0.7, 1.0]
        ];
        // Isolated pairs: every correlation is fully explained by one
        // partner, so the partials are as big as the correlations.
        let paired = array![
            [1.0, 0.7, 0.0, 0.0],
            [0.7, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.7],
            [0.0, 0.0, 0.7, 1.0]
        ];

        let kmo_shared = kmo(&shared).unwrap().overall;
        let kmo_paired = kmo(&paired).unwrap().overall;
        assert!(kmo_shared > kmo_paired);
    }

    #[test]
    fn test_kmo_rejects_singular_matrix() {
        let corr = array![[1.0, 1.0], [1.0, 1.0]];
        assert!(kmo(&corr).is_err());
    }
}
