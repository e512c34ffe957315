//! Analysis configuration.
//!
//! An [`AnalysisConfig`] fully determines one run: the variable roster, the
//! number of factors to extract, the prior communality estimates, the
//! rotation, and the auxiliary-output flags. It is immutable for the
//! duration of a run and deserializable from JSON so a run can be described
//! by a config file.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Errors produced by configuration validation and option parsing.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// No variables were listed
    #[error("No variables configured for the analysis")]
    EmptyVariables,

    /// A variable appears twice in the roster
    #[error("Duplicate variable in roster: {name}")]
    DuplicateVariable {
        /// The repeated name
        name: String,
    },

    /// Zero factors requested
    #[error("Number of factors must be positive")]
    ZeroFactors,

    /// More factors requested than variables available
    #[error("Requested {requested} factors but only {variables} variables are listed")]
    TooManyFactors {
        /// Factors requested
        requested: usize,
        /// Variables in the roster
        variables: usize,
    },

    /// Unrecognized prior-estimate name
    #[error("Unknown prior estimate: {0} (expected smc, one or max)")]
    UnknownPriorEstimate(String),

    /// Unrecognized rotation name
    #[error("Unknown rotation: {0} (expected varimax, quartimax or none)")]
    UnknownRotation(String),

    /// Unrecognized extraction method name
    #[error("Unknown extraction method: {0} (expected principal or components)")]
    UnknownExtractionMethod(String),
}

/// Strategy for the prior communality estimates placed on the diagonal of
/// the reduced correlation matrix.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum PriorEstimate {
    /// Squared multiple correlation of each variable with all others.
    #[default]
    #[display("smc")]
    Smc,

    /// Unit priors; extraction then reduces to principal components.
    #[display("one")]
    One,

    /// Largest absolute off-diagonal correlation of each variable.
    #[display("max")]
    Max,
}

impl FromStr for PriorEstimate {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "smc" => Ok(Self::Smc),
            "one" => Ok(Self::One),
            "max" => Ok(Self::Max),
            _ => Err(ConfigError::UnknownPriorEstimate(s.to_string())),
        }
    }
}

/// Extraction method.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMethod {
    /// Principal-factor extraction on the reduced correlation matrix.
    #[default]
    #[display("principal")]
    Principal,

    /// Principal components: unit diagonal, priors ignored.
    #[display("components")]
    Components,
}

impl FromStr for ExtractionMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "principal" => Ok(Self::Principal),
            "components" => Ok(Self::Components),
            _ => Err(ConfigError::UnknownExtractionMethod(s.to_string())),
        }
    }
}

/// Orthogonal rotation applied to the extracted loadings.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    /// Varimax: maximize the variance of squared loadings per factor.
    #[default]
    #[display("varimax")]
    Varimax,

    /// Quartimax: maximize the variance of squared loadings per variable.
    #[display("quartimax")]
    Quartimax,

    /// No rotation; report the unrotated principal-factor pattern.
    #[display("none")]
    None,
}

impl Rotation {
    /// Orthomax criterion weight for this rotation, if it rotates at all.
    pub const fn gamma(self) -> Option<f64> {
        match self {
            Self::Varimax => Some(1.0),
            Self::Quartimax => Some(0.0),
            Self::None => None,
        }
    }
}

impl FromStr for Rotation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "varimax" => Ok(Self::Varimax),
            "quartimax" => Ok(Self::Quartimax),
            "none" => Ok(Self::None),
            _ => Err(ConfigError::UnknownRotation(s.to_string())),
        }
    }
}

/// Convergence parameters for the iterative rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    /// Maximum number of full sweeps over all factor pairs.
    pub max_sweeps: usize,

    /// Rotation angle below which a pair is considered settled.
    pub tolerance: f64,

    /// Whether to Kaiser-normalize rows (divide by the square root of the
    /// communality) before rotating.
    pub kaiser_normalize: bool,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            max_sweeps: 100,
            tolerance: 1e-8,
            kaiser_normalize: true,
        }
    }
}

/// Full configuration of one factor-analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Ordered variable roster.
    pub variables: Vec<String>,

    /// Number of factors to extract.
    pub n_factors: usize,

    /// Extraction method.
    pub extraction: ExtractionMethod,

    /// Prior communality estimates.
    pub priors: PriorEstimate,

    /// Rotation applied to the extracted loadings.
    pub rotation: Rotation,

    /// Convergence parameters for the rotation.
    pub rotation_config: RotationConfig,

    /// Compute the residual correlation matrix.
    pub residuals: bool,

    /// Compute sampling adequacy (KMO) and Bartlett's sphericity test.
    pub msa: bool,

    /// Emit the full eigenvalue spectrum as a scree table.
    pub scree: bool,

    /// Compute regression-method factor scores.
    pub scores: bool,

    /// Round values to three decimals in rendered reports.
    pub round: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            variables: Vec::new(),
            n_factors: 4,
            extraction: ExtractionMethod::default(),
            priors: PriorEstimate::default(),
            rotation: Rotation::default(),
            rotation_config: RotationConfig::default(),
            residuals: false,
            msa: false,
            scree: false,
            scores: false,
            round: false,
        }
    }
}

impl AnalysisConfig {
    /// Check roster and factor-count invariants.
    ///
    /// The factor count is validated against the roster here, before any
    /// data is touched, so a misconfigured run fails without producing
    /// partial output.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.variables.is_empty() {
            return Err(ConfigError::EmptyVariables);
        }
        for (i, name) in self.variables.iter().enumerate() {
            if self.variables[..i].contains(name) {
                return Err(ConfigError::DuplicateVariable { name: name.clone() });
            }
        }
        if self.n_factors == 0 {
            return Err(ConfigError::ZeroFactors);
        }
        if self.n_factors > self.variables.len() {
            return Err(ConfigError::TooManyFactors {
                requested: self.n_factors,
                variables: self.variables.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn config_with(variables: &[&str], n_factors: usize) -> AnalysisConfig {
        AnalysisConfig {
            variables: variables.iter().map(|s| s.to_string()).collect(),
            n_factors,
            ..AnalysisConfig::default()
        }
    }

    #[test]
    fn test_default_matches_reference_run() {
        let config = AnalysisConfig::default();
        assert_eq!(config.n_factors, 4);
        assert_eq!(config.priors, PriorEstimate::Smc);
        assert_eq!(config.rotation, Rotation::Varimax);
        assert_eq!(config.extraction, ExtractionMethod::Principal);
    }

    #[test]
    fn test_validate_ok() {
        assert!(config_with(&["a", "b", "c", "d"], 4).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_roster() {
        assert_eq!(
            config_with(&[], 4).validate().unwrap_err(),
            ConfigError::EmptyVariables
        );
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let err = config_with(&["a", "b", "a"], 2).validate().unwrap_err();
        assert_eq!(
            err,
            ConfigError::DuplicateVariable {
                name: "a".to_string()
            }
        );
    }

    #[test]
    fn test_validate_rejects_excess_factors() {
        let err = config_with(&["a", "b", "c"], 4).validate().unwrap_err();
        assert_eq!(
            err,
            ConfigError::TooManyFactors {
                requested: 4,
                variables: 3
            }
        );
    }

    #[test]
    fn test_validate_rejects_zero_factors() {
        assert_eq!(
            config_with(&["a", "b"], 0).validate().unwrap_err(),
            ConfigError::ZeroFactors
        );
    }

    #[rstest]
    #[case("varimax", Rotation::Varimax)]
    #[case("QUARTIMAX", Rotation::Quartimax)]
    #[case("none", Rotation::None)]
    fn test_rotation_from_str(#[case] input: &str, #[case] expected: Rotation) {
        assert_eq!(input.parse::<Rotation>().unwrap(), expected);
    }

    #[test]
    fn test_rotation_gamma() {
        assert_eq!(Rotation::Varimax.gamma(), Some(1.0));
        assert_eq!(Rotation::Quartimax.gamma(), Some(0.0));
        assert_eq!(Rotation::None.gamma(), None);
    }

    #[test]
    fn test_config_from_partial_json() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{"variables": ["a", "b"], "n_factors": 2}"#).unwrap();
        assert_eq!(config.n_factors, 2);
        assert_eq!(config.rotation, Rotation::Varimax);
        assert!(!config.msa);
    }
}
