//! Export of factor-analysis result datasets.
//!
//! A [`latent_engine::FactorSolution`] flattens into tidy record vectors,
//! one vector per output dataset. Every record type serializes the same way
//! to CSV, compact JSON or pretty JSON, and writes are whole-file: a
//! dataset either appears complete or not at all.

use latent_engine::FactorSolution;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Name used for the roster-wide row of the MSA dataset.
const OVERALL_LABEL: &str = "OVERALL";

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid format error.
    #[error("Invalid format: {0} (expected csv, json or pretty-json)")]
    InvalidFormat(String),

    /// A dataset was requested that the solution does not carry.
    #[error("Solution does not contain the requested {0} dataset")]
    ComponentUnavailable(&'static str),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "pretty-json" => Ok(Self::PrettyJson),
            _ => Err(ExportError::InvalidFormat(s.to_string())),
        }
    }
}

/// One row of the factor-solution dataset.
///
/// The dataset stacks several statistics in one tidy table: `statistic`
/// names the block, `variable` and `factor` key the row where they apply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SolutionRecord {
    /// Which statistic this row carries: `prior`, `communality`,
    /// `eigenvalue`, `unrotated` or `loading`.
    pub statistic: String,

    /// Variable name, where the statistic is per-variable.
    pub variable: Option<String>,

    /// One-based factor index, where the statistic is per-factor.
    pub factor: Option<usize>,

    /// The value itself.
    pub value: f64,
}

impl SolutionRecord {
    /// Flatten a solution into its statistics dataset.
    pub fn from_solution(solution: &FactorSolution) -> Vec<Self> {
        let mut records = Vec::new();

        for (i, name) in solution.variables.iter().enumerate() {
            records.push(Self {
                statistic: "prior".to_string(),
                variable: Some(name.clone()),
                factor: None,
                value: solution.priors[i],
            });
        }
        for (i, name) in solution.variables.iter().enumerate() {
            records.push(Self {
                statistic: "communality".to_string(),
                variable: Some(name.clone()),
                factor: None,
                value: solution.communalities[i],
            });
        }
        for j in 0..solution.n_factors {
            records.push(Self {
                statistic: "eigenvalue".to_string(),
                variable: None,
                factor: Some(j + 1),
                value: solution.eigenvalues[j],
            });
        }
        for j in 0..solution.n_factors {
            for (i, name) in solution.variables.iter().enumerate() {
                records.push(Self {
                    statistic: "unrotated".to_string(),
                    variable: Some(name.clone()),
                    factor: Some(j + 1),
                    value: solution.unrotated[[i, j]],
                });
            }
        }
        for j in 0..solution.n_factors {
            for (i, name) in solution.variables.iter().enumerate() {
                records.push(Self {
                    statistic: "loading".to_string(),
                    variable: Some(name.clone()),
                    factor: Some(j + 1),
                    value: solution.loadings[[i, j]],
                });
            }
        }

        records
    }
}

/// One row of the variance-explained dataset; exactly one per retained
/// factor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VarianceRecord {
    /// One-based factor index.
    pub factor: usize,

    /// Eigenvalue of the reduced correlation matrix.
    pub eigenvalue: f64,

    /// Share of total variance explained by this factor.
    pub proportion: f64,

    /// Cumulative share through this factor.
    pub cumulative: f64,
}

impl VarianceRecord {
    /// Build the variance-explained dataset.
    pub fn from_solution(solution: &FactorSolution) -> Vec<Self> {
        solution
            .variance
            .iter()
            .map(|row| Self {
                factor: row.factor,
                eigenvalue: row.eigenvalue,
                proportion: row.proportion,
                cumulative: row.cumulative,
            })
            .collect()
    }
}

/// One off-diagonal entry of the residual correlation matrix.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResidualRecord {
    /// First variable of the pair.
    pub variable_a: String,

    /// Second variable of the pair.
    pub variable_b: String,

    /// Residual correlation left unexplained by the retained factors.
    pub residual: f64,
}

impl ResidualRecord {
    /// Build the residual dataset (upper triangle, `a` before `b`).
    pub fn from_solution(solution: &FactorSolution) -> Result<Vec<Self>, ExportError> {
        let residuals = solution
            .residuals
            .as_ref()
            .ok_or(ExportError::ComponentUnavailable("residual"))?;

        let mut records = Vec::new();
        let n = solution.variables.len();
        for i in 0..n {
            for j in (i + 1)..n {
                records.push(Self {
                    variable_a: solution.variables[i].clone(),
                    variable_b: solution.variables[j].clone(),
                    residual: residuals.matrix[[i, j]],
                });
            }
        }
        Ok(records)
    }
}

/// One row of the sampling-adequacy dataset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MsaRecord {
    /// Variable name, or `OVERALL` for the roster-wide statistic.
    pub variable: String,

    /// Kaiser-Meyer-Olkin measure.
    pub msa: f64,
}

impl MsaRecord {
    /// Build the sampling-adequacy dataset: per-variable rows followed by
    /// the overall row.
    pub fn from_solution(solution: &FactorSolution) -> Result<Vec<Self>, ExportError> {
        let adequacy = solution
            .sampling_adequacy
            .as_ref()
            .ok_or(ExportError::ComponentUnavailable("sampling adequacy"))?;

        let mut records: Vec<Self> = solution
            .variables
            .iter()
            .zip(adequacy.per_variable.iter())
            .map(|(name, &msa)| Self {
                variable: name.clone(),
                msa,
            })
            .collect();
        records.push(Self {
            variable: OVERALL_LABEL.to_string(),
            msa: adequacy.overall,
        });
        Ok(records)
    }
}

/// One point of the scree table: the full eigenvalue spectrum.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScreeRecord {
    /// One-based component index.
    pub component: usize,

    /// Eigenvalue of the reduced correlation matrix.
    pub eigenvalue: f64,
}

impl ScreeRecord {
    /// Build the scree dataset.
    pub fn from_solution(solution: &FactorSolution) -> Vec<Self> {
        solution
            .eigenvalues
            .iter()
            .enumerate()
            .map(|(i, &eigenvalue)| Self {
                component: i + 1,
                eigenvalue,
            })
            .collect()
    }
}

/// One factor score for one observation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreRecord {
    /// One-based observation index, in input row order after listwise
    /// deletion.
    pub observation: usize,

    /// One-based factor index.
    pub factor: usize,

    /// Regression-method factor score.
    pub score: f64,
}

impl ScoreRecord {
    /// Build the factor-score dataset.
    pub fn from_solution(solution: &FactorSolution) -> Result<Vec<Self>, ExportError> {
        let scores = solution
            .scores
            .as_ref()
            .ok_or(ExportError::ComponentUnavailable("score"))?;

        let mut records = Vec::with_capacity(scores.len());
        for i in 0..scores.nrows() {
            for j in 0..scores.ncols() {
                records.push(Self {
                    observation: i + 1,
                    factor: j + 1,
                    score: scores[[i, j]],
                });
            }
        }
        Ok(records)
    }
}

/// Trait for exportable datasets.
pub trait Exporter {
    /// Serialize to a string in the given format.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Serialize and write to a file.
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

fn serialize_records<T: Serialize>(
    records: &[T],
    format: ExportFormat,
) -> Result<String, ExportError> {
    match format {
        ExportFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(vec![]);
            for record in records {
                wtr.serialize(record)?;
            }
            let data = String::from_utf8(wtr.into_inner().map_err(|e| e.into_error())?)
                .expect("serde output is valid UTF-8");
            Ok(data)
        }
        ExportFormat::Json => Ok(serde_json::to_string(records)?),
        ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(records)?),
    }
}

impl Exporter for Vec<SolutionRecord> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        serialize_records(self, format)
    }
}

impl Exporter for Vec<VarianceRecord> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        serialize_records(self, format)
    }
}

impl Exporter for Vec<ResidualRecord> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        serialize_records(self, format)
    }
}

impl Exporter for Vec<MsaRecord> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        serialize_records(self, format)
    }
}

impl Exporter for Vec<ScreeRecord> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        serialize_records(self, format)
    }
}

impl Exporter for Vec<ScoreRecord> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        serialize_records(self, format)
    }
}
