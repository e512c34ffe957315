//! Orthogonal rotation of factor loadings.
//!
//! Implements the orthomax family by pairwise planar rotations with Kaiser
//! row normalization. The criterion weight gamma selects the member: 1 is
//! varimax, 0 is quartimax. Each sweep visits every factor pair and rotates
//! it to its criterion-maximizing angle; sweeps repeat until the largest
//! rotation angle falls under the tolerance.

use crate::config::RotationConfig;
use crate::error::{EngineError, Result};
use ndarray::Array2;

/// Row weights below this are left unnormalized; a variable with no
/// communality carries no rotation information.
const MIN_COMMUNALITY: f64 = 1e-12;

/// A rotated loading matrix.
#[derive(Debug, Clone)]
pub struct Rotated {
    /// Rotated loadings, variables x factors, columns ordered by explained
    /// variance and sign-aligned.
    pub loadings: Array2<f64>,

    /// Sweeps used until convergence.
    pub sweeps: usize,

    /// Orthomax criterion value of the final loadings.
    pub criterion: f64,
}

/// Rotate loadings to maximize the orthomax criterion with weight `gamma`.
pub fn rotate_orthomax(
    loadings: &Array2<f64>,
    gamma: f64,
    config: &RotationConfig,
) -> Result<Rotated> {
    let (n_variables, n_factors) = loadings.dim();
    let mut rotated = loadings.clone();

    if n_factors < 2 {
        align_signs(&mut rotated);
        let criterion = orthomax_criterion(&rotated, gamma);
        return Ok(Rotated {
            loadings: rotated,
            sweeps: 0,
            criterion,
        });
    }

    // Kaiser normalization: weight each row to unit communality so highly
    // communal variables do not dominate the criterion.
    let mut weights = vec![1.0; n_variables];
    if config.kaiser_normalize {
        for i in 0..n_variables {
            let h = rotated.row(i).iter().map(|l| l * l).sum::<f64>().sqrt();
            if h > MIN_COMMUNALITY {
                weights[i] = h;
                for j in 0..n_factors {
                    rotated[[i, j]] /= h;
                }
            }
        }
    }

    let p = n_variables as f64;
    let mut converged = false;
    let mut sweeps = 0;

    for sweep in 1..=config.max_sweeps {
        let mut max_angle = 0.0f64;

        for fp in 0..n_factors {
            for fq in (fp + 1)..n_factors {
                let (mut a, mut b, mut c, mut d) = (0.0, 0.0, 0.0, 0.0);
                for i in 0..n_variables {
                    let x = rotated[[i, fp]];
                    let y = rotated[[i, fq]];
                    let u = x * x - y * y;
                    let v = 2.0 * x * y;
                    a += u;
                    b += v;
                    c += u * u - v * v;
                    d += 2.0 * u * v;
                }

                let numerator = d - gamma * 2.0 * a * b / p;
                let denominator = c - gamma * (a * a - b * b) / p;
                let angle = 0.25 * numerator.atan2(denominator);

                if angle.abs() > config.tolerance {
                    let (sin_t, cos_t) = angle.sin_cos();
                    for i in 0..n_variables {
                        let x = rotated[[i, fp]];
                        let y = rotated[[i, fq]];
                        rotated[[i, fp]] = cos_t * x + sin_t * y;
                        rotated[[i, fq]] = cos_t * y - sin_t * x;
                    }
                }
                max_angle = max_angle.max(angle.abs());
            }
        }

        sweeps = sweep;
        if max_angle < config.tolerance {
            converged = true;
            break;
        }
    }

    if !converged {
        return Err(EngineError::NotConverged {
            procedure: "orthomax rotation",
            iterations: config.max_sweeps,
        });
    }

    if config.kaiser_normalize {
        for i in 0..n_variables {
            for j in 0..n_factors {
                rotated[[i, j]] *= weights[i];
            }
        }
    }

    order_by_variance(&mut rotated);
    align_signs(&mut rotated);
    let criterion = orthomax_criterion(&rotated, gamma);

    Ok(Rotated {
        loadings: rotated,
        sweeps,
        criterion,
    })
}

/// Orthomax criterion Q = sum_j [ sum_i l^4 - gamma/p (sum_i l^2)^2 ].
pub fn orthomax_criterion(loadings: &Array2<f64>, gamma: f64) -> f64 {
    let (n_variables, n_factors) = loadings.dim();
    let p = n_variables as f64;
    let mut q = 0.0;
    for j in 0..n_factors {
        let mut fourth = 0.0;
        let mut second = 0.0;
        for i in 0..n_variables {
            let l2 = loadings[[i, j]] * loadings[[i, j]];
            fourth += l2 * l2;
            second += l2;
        }
        q += fourth - gamma * second * second / p;
    }
    q
}

/// Reorder factor columns by descending sum of squared loadings.
pub(crate) fn order_by_variance(loadings: &mut Array2<f64>) {
    let n_factors = loadings.ncols();
    let ss: Vec<f64> = (0..n_factors)
        .map(|j| loadings.column(j).iter().map(|l| l * l).sum())
        .collect();

    let mut order: Vec<usize> = (0..n_factors).collect();
    order.sort_by(|&a, &b| ss[b].partial_cmp(&ss[a]).unwrap_or(std::cmp::Ordering::Equal));

    if order.iter().enumerate().all(|(i, &j)| i == j) {
        return;
    }

    let original = loadings.clone();
    for (new_col, &old_col) in order.iter().enumerate() {
        loadings
            .column_mut(new_col)
            .assign(&original.column(old_col));
    }
}

/// Fix the sign of each factor so its largest-magnitude loading is positive.
pub fn align_signs(loadings: &mut Array2<f64>) {
    for j in 0..loadings.ncols() {
        let mut dominant = 0.0f64;
        for &l in loadings.column(j).iter() {
            if l.abs() > dominant.abs() {
                dominant = l;
            }
        }
        if dominant < 0.0 {
            for l in loadings.column_mut(j).iter_mut() {
                *l = -*l;
            }
        }
    }
}
