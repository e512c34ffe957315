//! Variable selection and observation matrix assembly.
//!
//! Validates the requested variable roster against a loaded [`DataFrame`]
//! and produces the dense `f64` matrix the numerical engine works on.
//! Non-finite values (NaN, infinities) are treated the same as nulls.

use crate::error::{DataError, Result};
use ndarray::Array2;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Minimum number of complete rows required to form a correlation matrix.
const MIN_ROWS: usize = 2;

/// How rows with missing values in the selected variables are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPolicy {
    /// Drop incomplete rows (listwise deletion).
    #[default]
    Listwise,

    /// Fail the run if any selected value is missing.
    Fail,
}

/// A dense observation matrix plus bookkeeping about how it was produced.
#[derive(Debug, Clone)]
pub struct Observations {
    /// Observation matrix, one row per complete observation, columns in
    /// roster order.
    pub matrix: Array2<f64>,

    /// Variable names, in column order of `matrix`.
    pub variables: Vec<String>,

    /// Rows dropped by listwise deletion.
    pub n_dropped: usize,
}

impl Observations {
    /// Number of complete observations.
    pub fn n_obs(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of variables.
    pub fn n_variables(&self) -> usize {
        self.matrix.ncols()
    }
}

/// Select the requested variables from a dataset and assemble the
/// observation matrix.
///
/// Every variable must exist and carry a numeric dtype; integer columns are
/// widened to `f64`. Rows with a null or non-finite value in any selected
/// variable are dropped under [`MissingPolicy::Listwise`] and rejected under
/// [`MissingPolicy::Fail`].
pub fn select_observations(
    df: &DataFrame,
    variables: &[String],
    missing: MissingPolicy,
) -> Result<Observations> {
    let mut columns = Vec::with_capacity(variables.len());
    for name in variables {
        let column = df.column(name).map_err(|_| DataError::MissingVariable {
            name: name.clone(),
        })?;
        if !is_numeric(column.dtype()) {
            return Err(DataError::NonNumericVariable {
                name: name.clone(),
                dtype: column.dtype().to_string(),
            });
        }
        columns.push(column.cast(&DataType::Float64)?);
    }

    let mut readers = Vec::with_capacity(columns.len());
    for column in &columns {
        readers.push(column.f64()?);
    }

    let n_rows = df.height();
    let mut values = Vec::with_capacity(n_rows * variables.len());
    let mut row = Vec::with_capacity(variables.len());
    let mut n_complete = 0;
    let mut n_dropped = 0;

    for i in 0..n_rows {
        row.clear();
        let mut complete = true;
        for reader in &readers {
            match reader.get(i) {
                Some(v) if v.is_finite() => row.push(v),
                _ => {
                    complete = false;
                    break;
                }
            }
        }
        if complete {
            values.extend_from_slice(&row);
            n_complete += 1;
        } else {
            n_dropped += 1;
        }
    }

    if n_dropped > 0 && missing == MissingPolicy::Fail {
        return Err(DataError::MissingValues { count: n_dropped });
    }
    if n_complete < MIN_ROWS {
        return Err(DataError::TooFewRows {
            required: MIN_ROWS,
            actual: n_complete,
        });
    }

    let matrix = Array2::from_shape_vec((n_complete, variables.len()), values)
        .expect("row-major buffer matches (n_complete, n_variables)");

    Ok(Observations {
        matrix,
        variables: variables.to_vec(),
        n_dropped,
    })
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn sample_frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new("x".into(), vec![1.0, 2.0, 3.0, 4.0]).into(),
            Series::new("y".into(), vec![Some(2.0), None, Some(6.0), Some(8.0)]).into(),
            Series::new("count".into(), vec![10i64, 20, 30, 40]).into(),
            Series::new("label".into(), vec!["a", "b", "c", "d"]).into(),
        ])
        .unwrap()
    }

    #[test]
    fn test_selects_in_roster_order() {
        let df = sample_frame();
        let obs = select_observations(&df, &vars(&["count", "x"]), MissingPolicy::Listwise).unwrap();
        assert_eq!(obs.variables, vars(&["count", "x"]));
        assert_eq!(obs.n_obs(), 4);
        assert_eq!(obs.n_dropped, 0);
        assert_eq!(obs.matrix[[0, 0]], 10.0); // integer widened to f64
        assert_eq!(obs.matrix[[0, 1]], 1.0);
    }

    #[test]
    fn test_listwise_deletion_counts_dropped_rows() {
        let df = sample_frame();
        let obs = select_observations(&df, &vars(&["x", "y"]), MissingPolicy::Listwise).unwrap();
        assert_eq!(obs.n_obs(), 3);
        assert_eq!(obs.n_dropped, 1);
        // Row with the null y is gone; survivors keep their order.
        assert_eq!(obs.matrix[[1, 0]], 3.0);
    }

    #[test]
    fn test_fail_policy_rejects_missing_values() {
        let df = sample_frame();
        let err = select_observations(&df, &vars(&["x", "y"]), MissingPolicy::Fail).unwrap_err();
        assert!(matches!(err, DataError::MissingValues { count: 1 }));
    }

    #[test]
    fn test_missing_variable_is_named() {
        let df = sample_frame();
        let err =
            select_observations(&df, &vars(&["x", "nope"]), MissingPolicy::Listwise).unwrap_err();
        assert!(matches!(err, DataError::MissingVariable { name } if name == "nope"));
    }

    #[test]
    fn test_non_numeric_variable_is_named() {
        let df = sample_frame();
        let err =
            select_observations(&df, &vars(&["label"]), MissingPolicy::Listwise).unwrap_err();
        assert!(matches!(err, DataError::NonNumericVariable { name, .. } if name == "label"));
    }

    #[test]
    fn test_too_few_complete_rows() {
        let df = DataFrame::new(vec![
            Series::new("x".into(), vec![Some(1.0), None, None, None]).into(),
        ])
        .unwrap();
        let err = select_observations(&df, &vars(&["x"]), MissingPolicy::Listwise).unwrap_err();
        assert!(matches!(
            err,
            DataError::TooFewRows {
                required: 2,
                actual: 1
            }
        ));
    }
}
