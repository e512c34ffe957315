//! Rendered reports for a factor solution.
//!
//! Renders the solution tables the way they are read in print: rotated
//! pattern with communalities, variance explained, then diagnostics. Both a
//! plain-text and a Markdown rendering are available; the `round` flag
//! switches between three-decimal display and full precision.

use chrono::{DateTime, Utc};
use latent_engine::FactorSolution;
use std::fmt;

/// A renderable report over a factor solution.
#[derive(Debug)]
pub struct SolutionReport<'a> {
    solution: &'a FactorSolution,
    round: bool,
    generated_at: DateTime<Utc>,
}

impl<'a> SolutionReport<'a> {
    /// Create a report for a solution.
    pub fn new(solution: &'a FactorSolution, round: bool) -> Self {
        Self {
            solution,
            round,
            generated_at: Utc::now(),
        }
    }

    fn value(&self, v: f64) -> String {
        if self.round {
            format!("{v:.3}")
        } else {
            format!("{v:.6}")
        }
    }

    /// Render the report as plain text.
    pub fn to_ascii_table(&self) -> String {
        let s = self.solution;
        let mut out = String::new();

        out.push_str("Factor Analysis Solution\n");
        out.push_str("========================\n");
        out.push_str(&format!("Observations: {}\n", s.n_obs));
        out.push_str(&format!("Variables:    {}\n", s.n_variables()));
        out.push_str(&format!(
            "Factors:      {} (rotation: {})\n",
            s.n_factors, s.rotation
        ));
        out.push_str(&format!(
            "Generated:    {}\n\n",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        out.push_str("Rotated Factor Pattern\n");
        out.push_str(&format!("{:<12}", "variable"));
        for j in 1..=s.n_factors {
            out.push_str(&format!("{:>12}", format!("Factor{j}")));
        }
        out.push_str(&format!("{:>14}\n", "communality"));
        for (i, name) in s.variables.iter().enumerate() {
            out.push_str(&format!("{name:<12}"));
            for j in 0..s.n_factors {
                out.push_str(&format!("{:>12}", self.value(s.loadings[[i, j]])));
            }
            out.push_str(&format!("{:>14}\n", self.value(s.communalities[i])));
        }
        out.push('\n');

        out.push_str("Variance Explained\n");
        out.push_str(&format!(
            "{:<8}{:>12}{:>12}{:>12}\n",
            "factor", "eigenvalue", "proportion", "cumulative"
        ));
        for row in &s.variance {
            out.push_str(&format!(
                "{:<8}{:>12}{:>12}{:>12}\n",
                row.factor,
                self.value(row.eigenvalue),
                self.value(row.proportion),
                self.value(row.cumulative)
            ));
        }
        out.push('\n');

        if let Some(adequacy) = &s.sampling_adequacy {
            out.push_str(&format!(
                "Sampling adequacy (overall MSA): {}\n",
                self.value(adequacy.overall)
            ));
        }
        if let Some(test) = &s.sphericity {
            out.push_str(&format!(
                "Bartlett's sphericity: chi-square {} on {} df (p = {})\n",
                self.value(test.chi_square),
                test.df,
                self.value(test.p_value)
            ));
        }
        if let Some(residuals) = &s.residuals {
            out.push_str(&format!(
                "Residual correlations: RMS off-diagonal {}\n",
                self.value(residuals.rms_overall)
            ));
        }

        out
    }

    /// Render the report as Markdown.
    pub fn to_markdown(&self) -> String {
        let s = self.solution;
        let mut out = String::new();

        out.push_str("# Factor Analysis Solution\n\n");
        out.push_str(&format!(
            "{} observations, {} variables, {} factors (rotation: {}).\n\n",
            s.n_obs,
            s.n_variables(),
            s.n_factors,
            s.rotation
        ));

        out.push_str("## Rotated Factor Pattern\n\n");
        out.push_str("| Variable |");
        for j in 1..=s.n_factors {
            out.push_str(&format!(" Factor{j} |"));
        }
        out.push_str(" Communality |\n");
        out.push_str("|---|");
        for _ in 0..s.n_factors {
            out.push_str("---|");
        }
        out.push_str("---|\n");
        for (i, name) in s.variables.iter().enumerate() {
            out.push_str(&format!("| {name} |"));
            for j in 0..s.n_factors {
                out.push_str(&format!(" {} |", self.value(s.loadings[[i, j]])));
            }
            out.push_str(&format!(" {} |\n", self.value(s.communalities[i])));
        }
        out.push('\n');

        out.push_str("## Variance Explained\n\n");
        out.push_str("| Factor | Eigenvalue | Proportion | Cumulative |\n");
        out.push_str("|---|---|---|---|\n");
        for row in &s.variance {
            out.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                row.factor,
                self.value(row.eigenvalue),
                self.value(row.proportion),
                self.value(row.cumulative)
            ));
        }
        out.push('\n');

        if s.sampling_adequacy.is_some() || s.sphericity.is_some() || s.residuals.is_some() {
            out.push_str("## Diagnostics\n\n");
        }
        if let Some(adequacy) = &s.sampling_adequacy {
            out.push_str(&format!(
                "- Overall MSA: {}\n",
                self.value(adequacy.overall)
            ));
        }
        if let Some(test) = &s.sphericity {
            out.push_str(&format!(
                "- Bartlett's sphericity: chi-square {} on {} df (p = {})\n",
                self.value(test.chi_square),
                test.df,
                self.value(test.p_value)
            ));
        }
        if let Some(residuals) = &s.residuals {
            out.push_str(&format!(
                "- RMS off-diagonal residual: {}\n",
                self.value(residuals.rms_overall)
            ));
        }

        out
    }
}

impl fmt::Display for SolutionReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ascii_table())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use latent_engine::solution::VarianceExplained;
    use latent_engine::{FactorSolution, Rotation};
    use ndarray::{Array1, array};

    fn sample_solution() -> FactorSolution {
        let loadings = array![[0.8, 0.1], [0.7, 0.2], [0.1, 0.9]];
        FactorSolution {
            variables: vec!["n1".to_string(), "n2".to_string(), "w1".to_string()],
            n_obs: 50,
            n_factors: 2,
            rotation: Rotation::Varimax,
            priors: Array1::from_vec(vec![0.5, 0.45, 0.6]),
            communalities: Array1::from_vec(vec![0.65, 0.53, 0.82]),
            eigenvalues: Array1::from_vec(vec![1.4, 1.1, 0.2]),
            unrotated: loadings.clone(),
            loadings,
            variance: vec![
                VarianceExplained {
                    factor: 1,
                    eigenvalue: 1.4,
                    proportion: 0.38,
                    cumulative: 0.38,
                },
                VarianceExplained {
                    factor: 2,
                    eigenvalue: 1.1,
                    proportion: 0.29,
                    cumulative: 0.67,
                },
            ],
            sampling_adequacy: None,
            sphericity: None,
            residuals: None,
            scores: None,
        }
    }

    #[test]
    fn test_ascii_table_contents() {
        let solution = sample_solution();
        let report = SolutionReport::new(&solution, true);
        let text = report.to_ascii_table();

        assert!(text.contains("Observations: 50"));
        assert!(text.contains("Rotated Factor Pattern"));
        assert!(text.contains("Factor1"));
        assert!(text.contains("n1"));
        assert!(text.contains("Variance Explained"));
        assert!(text.contains("0.380"));
    }

    #[test]
    fn test_round_flag_switches_precision() {
        let solution = sample_solution();

        let rounded = SolutionReport::new(&solution, true).to_ascii_table();
        assert!(rounded.contains("0.800"));
        assert!(!rounded.contains("0.800000"));

        let full = SolutionReport::new(&solution, false).to_ascii_table();
        assert!(full.contains("0.800000"));
    }

    #[test]
    fn test_markdown_structure() {
        let solution = sample_solution();
        let md = SolutionReport::new(&solution, true).to_markdown();

        assert!(md.contains("# Factor Analysis Solution"));
        assert!(md.contains("## Rotated Factor Pattern"));
        assert!(md.contains("| Variable |"));
        assert!(md.contains("## Variance Explained"));
        // No diagnostics requested, no diagnostics section.
        assert!(!md.contains("## Diagnostics"));
    }

    #[test]
    fn test_display_matches_ascii() {
        let solution = sample_solution();
        let report = SolutionReport::new(&solution, true);
        assert_eq!(format!("{report}"), report.to_ascii_table());
    }
}
