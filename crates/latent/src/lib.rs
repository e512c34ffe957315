#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/latentworks/latent/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod variables;

// Re-export main types from sub-crates
pub use latent_data as data;
pub use latent_engine as engine;
pub use latent_output as output;

// Re-export the types most callers touch
pub use latent_data::{MissingPolicy, Observations, load_dataset, select_observations};
pub use latent_engine::{
    AnalysisConfig, FactorAnalysis, FactorSolution, PriorEstimate, Rotation,
};
pub use latent_output::{ExportFormat, SolutionReport};
pub use variables::{VariableSet, VariableSetError};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
