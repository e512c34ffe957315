#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/latentworks/latent/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analysis;
pub mod config;
pub mod correlation;
pub mod diagnostics;
pub mod eigen;
pub mod error;
pub mod extraction;
pub mod priors;
pub mod rotation;
pub mod scores;
pub mod solution;
pub mod special;

pub use analysis::FactorAnalysis;
pub use config::{
    AnalysisConfig, ConfigError, ExtractionMethod, PriorEstimate, Rotation, RotationConfig,
};
pub use correlation::{
    Standardized, correlation_from_zscores, correlation_matrix, standardize,
};
pub use diagnostics::{
    ResidualAnalysis, SamplingAdequacy, SphericityTest, bartlett_sphericity, kmo,
    residual_correlations,
};
pub use eigen::{EigenDecomposition, determinant, invert_symmetric, symmetric_eigen};
pub use error::{EngineError, Result};
pub use extraction::{Extraction, principal_factors};
pub use priors::prior_communalities;
pub use rotation::{Rotated, align_signs, orthomax_criterion, rotate_orthomax};
pub use scores::{regression_scores, scoring_coefficients};
pub use solution::{FactorSolution, VarianceExplained};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
