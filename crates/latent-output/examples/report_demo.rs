//! Demonstration of report rendering and dataset export in latent-output.

use latent_engine::{AnalysisConfig, FactorAnalysis};
use latent_output::{
    ExportFormat, Exporter, SolutionRecord, SolutionReport, VarianceRecord,
};
use ndarray::Array2;

/// Build a small deterministic dataset with two variable blocks.
fn demo_data() -> Array2<f64> {
    let n_obs = 60;
    let mut data = Array2::<f64>::zeros((n_obs, 5));
    for i in 0..n_obs {
        let t = i as f64;
        let trend = t / n_obs as f64;
        let wave = (0.5 * t).sin();
        data[[i, 0]] = trend + 0.1 * (1.7 * t).sin();
        data[[i, 1]] = trend + 0.1 * (2.3 * t).cos();
        data[[i, 2]] = trend + 0.1 * (3.1 * t).sin();
        data[[i, 3]] = wave + 0.1 * (4.3 * t).cos();
        data[[i, 4]] = wave + 0.1 * (5.9 * t).sin();
    }
    data
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Latent Report Demo ===\n");

    let config = AnalysisConfig {
        variables: vec!["a1", "a2", "a3", "b1", "b2"]
            .into_iter()
            .map(String::from)
            .collect(),
        n_factors: 2,
        residuals: true,
        msa: true,
        round: true,
        ..AnalysisConfig::default()
    };

    let solution = FactorAnalysis::new(config).run(&demo_data())?;

    println!("{}", SolutionReport::new(&solution, true));

    println!("Variance dataset (CSV):");
    println!(
        "{}",
        VarianceRecord::from_solution(&solution).export_to_string(ExportFormat::Csv)?
    );

    println!("Solution dataset (pretty JSON, first records):");
    let records = SolutionRecord::from_solution(&solution);
    println!(
        "{}",
        records[..4.min(records.len())]
            .to_vec()
            .export_to_string(ExportFormat::PrettyJson)?
    );

    Ok(())
}
