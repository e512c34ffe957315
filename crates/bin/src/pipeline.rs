//! Integration glue: load, validate, analyze, report, export.

use latent::data::{DataError, MissingPolicy, load_dataset, select_observations};
use latent::engine::{AnalysisConfig, EngineError, FactorAnalysis};
use latent::output::{
    ExportError, ExportFormat, Exporter, MsaRecord, ResidualRecord, ScoreRecord, ScreeRecord,
    SolutionRecord, SolutionReport, VarianceRecord,
};
use latent::variables::VariableSetError;
use std::path::{Path, PathBuf};

/// Error type aggregating every layer of the pipeline.
#[derive(Debug, thiserror::Error)]
pub(crate) enum PipelineError {
    /// Dataset loading or validation failed.
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// The numerical engine rejected the run.
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Writing an output dataset failed.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// The variable roster was malformed.
    #[error("Variable roster error: {0}")]
    Roster(#[from] VariableSetError),

    /// The configuration file could not be parsed.
    #[error("Configuration file error: {0}")]
    ConfigFile(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything one `analyze` invocation needs.
pub(crate) struct RunOptions {
    pub input: PathBuf,
    pub config: AnalysisConfig,
    pub missing: MissingPolicy,
    pub out_dir: Option<PathBuf>,
    pub format: ExportFormat,
    pub markdown: bool,
}

/// Run the full analysis: load the dataset, run the engine, print the
/// report, and write the requested output datasets.
pub(crate) fn run_analysis(options: &RunOptions) -> Result<(), PipelineError> {
    let df = load_dataset(&options.input)?;
    let observations = select_observations(&df, &options.config.variables, options.missing)?;

    if observations.n_dropped > 0 {
        println!(
            "Note: dropped {} incomplete rows ({} observations remain)",
            observations.n_dropped,
            observations.n_obs()
        );
    }

    let solution = FactorAnalysis::new(options.config.clone()).run(&observations.matrix)?;

    let report = SolutionReport::new(&solution, options.config.round);
    if options.markdown {
        println!("{}", report.to_markdown());
    } else {
        println!("{report}");
    }

    if let Some(out_dir) = &options.out_dir {
        let written = write_datasets(out_dir, &solution, &options.config, options.format)?;
        for path in &written {
            println!("Wrote {}", path.display());
        }
    }

    Ok(())
}

/// Write the solution and variance datasets, plus whichever auxiliary
/// datasets the configuration requested.
fn write_datasets(
    out_dir: &Path,
    solution: &latent::FactorSolution,
    config: &AnalysisConfig,
    format: ExportFormat,
) -> Result<Vec<PathBuf>, PipelineError> {
    std::fs::create_dir_all(out_dir)?;
    let ext = format.extension();
    let mut written = Vec::new();

    let path = out_dir.join(format!("solution.{ext}"));
    SolutionRecord::from_solution(solution).export_to_file(&path, format)?;
    written.push(path);

    let path = out_dir.join(format!("variance.{ext}"));
    VarianceRecord::from_solution(solution).export_to_file(&path, format)?;
    written.push(path);

    if config.residuals {
        let path = out_dir.join(format!("residuals.{ext}"));
        ResidualRecord::from_solution(solution)?.export_to_file(&path, format)?;
        written.push(path);
    }
    if config.msa {
        let path = out_dir.join(format!("msa.{ext}"));
        MsaRecord::from_solution(solution)?.export_to_file(&path, format)?;
        written.push(path);
    }
    if config.scree {
        let path = out_dir.join(format!("scree.{ext}"));
        ScreeRecord::from_solution(solution).export_to_file(&path, format)?;
        written.push(path);
    }
    if config.scores {
        let path = out_dir.join(format!("scores.{ext}"));
        ScoreRecord::from_solution(solution)?.export_to_file(&path, format)?;
        written.push(path);
    }

    Ok(written)
}

/// Validate a dataset against a roster without running the analysis.
pub(crate) fn check_dataset(
    input: &Path,
    variables: &[String],
    missing: MissingPolicy,
) -> Result<(), PipelineError> {
    let df = load_dataset(input)?;
    let observations = select_observations(&df, variables, missing)?;

    println!(
        "{}: {} rows, {} columns",
        input.display(),
        df.height(),
        df.width()
    );
    println!(
        "Roster: {} variables, {} complete observations ({} dropped)",
        observations.n_variables(),
        observations.n_obs(),
        observations.n_dropped
    );

    Ok(())
}
