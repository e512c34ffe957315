//! High-level orchestration of one factor-analysis run.

use crate::config::{AnalysisConfig, ExtractionMethod, PriorEstimate};
use crate::correlation::{correlation_from_zscores, standardize};
use crate::diagnostics::{bartlett_sphericity, kmo, residual_correlations};
use crate::error::{EngineError, Result};
use crate::extraction::principal_factors;
use crate::priors::prior_communalities;
use crate::rotation::{align_signs, rotate_orthomax};
use crate::scores::regression_scores;
use crate::solution::{FactorSolution, variance_table};
use ndarray::Array2;

/// A configured factor analysis, ready to run against observation matrices.
#[derive(Debug, Clone)]
pub struct FactorAnalysis {
    config: AnalysisConfig,
}

impl FactorAnalysis {
    /// Create an analysis from a configuration. Validation happens in
    /// [`Self::run`], so construction cannot fail.
    pub const fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// The configuration this analysis runs with.
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run the analysis against an observation matrix whose columns are in
    /// roster order.
    ///
    /// The run is a pure function of the inputs: identical data and
    /// configuration produce an identical solution.
    pub fn run(&self, data: &Array2<f64>) -> Result<FactorSolution> {
        self.config.validate()?;

        if data.ncols() != self.config.variables.len() {
            return Err(EngineError::DimensionMismatch {
                expected: self.config.variables.len(),
                actual: data.ncols(),
            });
        }

        let standardized = standardize(data)?;
        let corr = correlation_from_zscores(&standardized.zscores);

        let priors = match self.config.extraction {
            ExtractionMethod::Components => {
                prior_communalities(&corr, PriorEstimate::One)?
            }
            ExtractionMethod::Principal => {
                prior_communalities(&corr, self.config.priors)?
            }
        };

        let extraction = principal_factors(&corr, &priors, self.config.n_factors)?;

        let mut unrotated = extraction.loadings.clone();
        align_signs(&mut unrotated);

        let loadings = match self.config.rotation.gamma() {
            Some(gamma) => {
                rotate_orthomax(&extraction.loadings, gamma, &self.config.rotation_config)?
                    .loadings
            }
            None => unrotated.clone(),
        };

        let variance = variance_table(&loadings, &extraction.eigenvalues);

        let (sampling_adequacy, sphericity) = if self.config.msa {
            (
                Some(kmo(&corr)?),
                Some(bartlett_sphericity(&corr, data.nrows())?),
            )
        } else {
            (None, None)
        };

        let residuals = if self.config.residuals {
            Some(residual_correlations(&corr, &loadings)?)
        } else {
            None
        };

        let scores = if self.config.scores {
            Some(regression_scores(&standardized, &corr, &loadings)?)
        } else {
            None
        };

        Ok(FactorSolution {
            variables: self.config.variables.clone(),
            n_obs: data.nrows(),
            n_factors: self.config.n_factors,
            rotation: self.config.rotation,
            priors: extraction.priors,
            communalities: extraction.communalities,
            eigenvalues: extraction.eigenvalues,
            unrotated,
            loadings,
            variance,
            sampling_adequacy,
            sphericity,
            residuals,
            scores,
        })
    }
}
