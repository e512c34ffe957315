//! Diagnostics for a factor solution.
//!
//! Everything here answers one of two questions: was the variable set
//! suitable for factoring at all (sampling adequacy, sphericity), and how
//! well does the extracted solution reproduce the observed correlations
//! (residuals).

pub mod bartlett;
pub mod kmo;
pub mod residuals;

pub use bartlett::{SphericityTest, bartlett_sphericity};
pub use kmo::{SamplingAdequacy, kmo};
pub use residuals::{ResidualAnalysis, residual_correlations};
