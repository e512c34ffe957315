//! Symmetric eigendecomposition and derived matrix operations.
//!
//! Uses the cyclic Jacobi method: sweeps over all off-diagonal pairs,
//! annihilating each with a planar rotation, until the off-diagonal norm is
//! negligible. Jacobi is slow for large matrices but the matrices here are
//! correlation matrices with tens of variables, where it is accurate and
//! entirely adequate.

use crate::error::{EngineError, Result};
use ndarray::{Array1, Array2};

/// Sweep budget for the Jacobi iteration.
const MAX_SWEEPS: usize = 64;

/// Off-diagonal Frobenius norm below which the matrix counts as diagonal.
const OFF_DIAGONAL_TOLERANCE: f64 = 1e-12;

/// Relative eigenvalue threshold below which a matrix counts as singular.
const SINGULARITY_TOLERANCE: f64 = 1e-12;

/// Result of a symmetric eigendecomposition.
#[derive(Debug, Clone)]
pub struct EigenDecomposition {
    /// Eigenvalues, sorted in descending order.
    pub eigenvalues: Array1<f64>,

    /// Eigenvectors; column `j` belongs to `eigenvalues[j]`.
    pub eigenvectors: Array2<f64>,
}

/// Eigendecompose a symmetric matrix.
pub fn symmetric_eigen(matrix: &Array2<f64>) -> Result<EigenDecomposition> {
    let n = matrix.nrows();
    if n != matrix.ncols() {
        return Err(EngineError::DimensionMismatch {
            expected: n,
            actual: matrix.ncols(),
        });
    }

    let mut a = matrix.clone();
    let mut v = Array2::<f64>::eye(n);
    let mut converged = false;

    for _sweep in 0..MAX_SWEEPS {
        if off_diagonal_norm(&a) < OFF_DIAGONAL_TOLERANCE {
            converged = true;
            break;
        }
        for p in 0..n {
            for q in (p + 1)..n {
                if a[[p, q]].abs() < OFF_DIAGONAL_TOLERANCE / (n * n) as f64 {
                    continue;
                }
                let (cos_theta, sin_theta) = planar_rotation(a[[p, p]], a[[q, q]], a[[p, q]]);
                apply_rotation(&mut a, &mut v, p, q, cos_theta, sin_theta);
            }
        }
    }

    if !converged && off_diagonal_norm(&a) >= OFF_DIAGONAL_TOLERANCE {
        return Err(EngineError::NotConverged {
            procedure: "Jacobi eigendecomposition",
            iterations: MAX_SWEEPS,
        });
    }

    // Extract and sort descending, carrying the eigenvector columns along.
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| {
        a[[j, j]]
            .partial_cmp(&a[[i, i]])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let eigenvalues = Array1::from_iter(order.iter().map(|&i| a[[i, i]]));
    let mut eigenvectors = Array2::<f64>::zeros((n, n));
    for (new_col, &old_col) in order.iter().enumerate() {
        eigenvectors.column_mut(new_col).assign(&v.column(old_col));
    }

    Ok(EigenDecomposition {
        eigenvalues,
        eigenvectors,
    })
}

/// Invert a symmetric matrix through its eigendecomposition.
///
/// Fails with [`EngineError::SingularMatrix`] when any eigenvalue is
/// negligible relative to the largest, which is exactly the condition under
/// which SMC priors and partial correlations are undefined.
pub fn invert_symmetric(matrix: &Array2<f64>) -> Result<Array2<f64>> {
    let decomp = symmetric_eigen(matrix)?;
    let max_abs = decomp
        .eigenvalues
        .iter()
        .fold(0.0f64, |acc, &v| acc.max(v.abs()));

    if max_abs == 0.0 {
        return Err(EngineError::SingularMatrix);
    }

    let n = matrix.nrows();
    let mut inverse = Array2::<f64>::zeros((n, n));
    for (j, &lambda) in decomp.eigenvalues.iter().enumerate() {
        if lambda.abs() < SINGULARITY_TOLERANCE * max_abs {
            return Err(EngineError::SingularMatrix);
        }
        let column = decomp.eigenvectors.column(j);
        for r in 0..n {
            for c in 0..n {
                inverse[[r, c]] += column[r] * column[c] / lambda;
            }
        }
    }

    Ok(inverse)
}

/// Determinant of a symmetric matrix, as the product of its eigenvalues.
pub fn determinant(matrix: &Array2<f64>) -> Result<f64> {
    let decomp = symmetric_eigen(matrix)?;
    Ok(decomp.eigenvalues.iter().product())
}

fn off_diagonal_norm(a: &Array2<f64>) -> f64 {
    let n = a.nrows();
    let mut sum = 0.0;
    for i in 0..n {
        for j in (i + 1)..n {
            sum += 2.0 * a[[i, j]] * a[[i, j]];
        }
    }
    sum.sqrt()
}

/// Rotation (cos, sin) annihilating the (p, q) entry.
fn planar_rotation(app: f64, aqq: f64, apq: f64) -> (f64, f64) {
    if apq.abs() < 1e-300 {
        return (1.0, 0.0);
    }

    let tau = (aqq - app) / (2.0 * apq);
    let t = if tau >= 0.0 {
        1.0 / (tau + (1.0 + tau * tau).sqrt())
    } else {
        -1.0 / (-tau + (1.0 + tau * tau).sqrt())
    };

    let cos_theta = 1.0 / (1.0 + t * t).sqrt();
    let sin_theta = t * cos_theta;
    (cos_theta, sin_theta)
}

fn apply_rotation(
    a: &mut Array2<f64>,
    v: &mut Array2<f64>,
    p: usize,
    q: usize,
    cos_theta: f64,
    sin_theta: f64,
) {
    let n = a.nrows();
    let app = a[[p, p]];
    let aqq = a[[q, q]];
    let apq = a[[p, q]];

    a[[p, p]] = cos_theta * cos_theta * app - 2.0 * cos_theta * sin_theta * apq
        + sin_theta * sin_theta * aqq;
    a[[q, q]] = sin_theta * sin_theta * app
        + 2.0 * cos_theta * sin_theta * apq
        + cos_theta * cos_theta * aqq;
    a[[p, q]] = 0.0;
    a[[q, p]] = 0.0;

    for i in 0..n {
        if i != p && i != q {
            let aip = a[[i, p]];
            let aiq = a[[i, q]];

            a[[i, p]] = cos_theta * aip - sin_theta * aiq;
            a[[p, i]] = a[[i, p]];

            a[[i, q]] = sin_theta * aip + cos_theta * aiq;
            a[[q, i]] = a[[i, q]];
        }
    }

    for i in 0..n {
        let vip = v[[i, p]];
        let viq = v[[i, q]];
        v[[i, p]] = cos_theta * vip - sin_theta * viq;
        v[[i, q]] = sin_theta * vip + cos_theta * viq;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_identity_eigenvalues() {
        let decomp = symmetric_eigen(&Array2::<f64>::eye(4)).unwrap();
        for &v in decomp.eigenvalues.iter() {
            assert_abs_diff_eq!(v, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_diagonal_matrix_sorted_descending() {
        let m = Array2::from_diag(&array![2.0, 5.0, 1.0]);
        let decomp = symmetric_eigen(&m).unwrap();
        assert_abs_diff_eq!(decomp.eigenvalues[0], 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(decomp.eigenvalues[1], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(decomp.eigenvalues[2], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_reconstruction() {
        let m = array![
            [2.0, 1.0, 1.0],
            [1.0, 2.0, 1.0],
            [1.0, 1.0, 2.0]
        ];
        let decomp = symmetric_eigen(&m).unwrap();

        let n = m.nrows();
        let mut reconstructed = Array2::<f64>::zeros((n, n));
        for (j, &lambda) in decomp.eigenvalues.iter().enumerate() {
            let col = decomp.eigenvectors.column(j);
            for r in 0..n {
                for c in 0..n {
                    reconstructed[[r, c]] += lambda * col[r] * col[c];
                }
            }
        }

        for r in 0..n {
            for c in 0..n {
                assert_abs_diff_eq!(reconstructed[[r, c]], m[[r, c]], epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_eigenvectors_orthonormal() {
        let m = array![
            [4.0, 1.0, 0.5],
            [1.0, 9.0, 1.5],
            [0.5, 1.5, 16.0]
        ];
        let decomp = symmetric_eigen(&m).unwrap();
        let vtv = decomp.eigenvectors.t().dot(&decomp.eigenvectors);
        for r in 0..3 {
            for c in 0..3 {
                let expected = if r == c { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(vtv[[r, c]], expected, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_inverse() {
        let m = array![[4.0, 1.0], [1.0, 3.0]];
        let inv = invert_symmetric(&m).unwrap();
        let product = m.dot(&inv);
        assert_abs_diff_eq!(product[[0, 0]], 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(product[[0, 1]], 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(product[[1, 0]], 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(product[[1, 1]], 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_singular_matrix_rejected() {
        // Rank-one matrix.
        let m = array![[1.0, 1.0], [1.0, 1.0]];
        assert!(matches!(
            invert_symmetric(&m).unwrap_err(),
            EngineError::SingularMatrix
        ));
    }

    #[test]
    fn test_determinant() {
        let m = array![[2.0, 0.0], [0.0, 3.0]];
        assert_abs_diff_eq!(determinant(&m).unwrap(), 6.0, epsilon = 1e-9);

        let singular = array![[1.0, 1.0], [1.0, 1.0]];
        assert_abs_diff_eq!(determinant(&singular).unwrap(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_non_square_rejected() {
        let m = Array2::<f64>::zeros((2, 3));
        assert!(matches!(
            symmetric_eigen(&m).unwrap_err(),
            EngineError::DimensionMismatch { .. }
        ));
    }
}
