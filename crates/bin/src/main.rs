//! Latent CLI binary.
//!
//! Provides the command-line interface for the Latent factor-analysis
//! engine: `analyze` runs a full analysis, `check` validates a dataset
//! against a variable roster.

mod pipeline;

use clap::{Parser, Subcommand};
use latent::VariableSet;
use latent::data::MissingPolicy;
use latent::engine::{AnalysisConfig, ExtractionMethod, PriorEstimate, Rotation};
use latent::output::ExportFormat;
use pipeline::{PipelineError, RunOptions, check_dataset, run_analysis};
use std::fs::File;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "latent")]
#[command(about = "Latent: batch factor analysis for tabular datasets", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the factor analysis and write the output datasets
    Analyze {
        /// Input dataset (CSV or Parquet)
        input: PathBuf,

        /// Comma-separated variable roster, e.g. n1,n2,n3,w1,w2
        #[arg(long, value_delimiter = ',')]
        vars: Vec<String>,

        /// JSON configuration file; command-line flags override it
        #[arg(long)]
        config: Option<PathBuf>,

        /// Number of factors to extract
        #[arg(long)]
        factors: Option<usize>,

        /// Prior communality estimates (smc, one, max)
        #[arg(long)]
        priors: Option<PriorEstimate>,

        /// Extraction method (principal, components)
        #[arg(long)]
        extraction: Option<ExtractionMethod>,

        /// Rotation (varimax, quartimax, none)
        #[arg(long)]
        rotate: Option<Rotation>,

        /// Missing-value policy (listwise, fail)
        #[arg(long, default_value = "listwise", value_parser = parse_missing)]
        missing: MissingPolicy,

        /// Compute and write the residual correlation dataset
        #[arg(long)]
        residuals: bool,

        /// Compute and write sampling adequacy and sphericity diagnostics
        #[arg(long)]
        msa: bool,

        /// Write the eigenvalue spectrum as a scree dataset
        #[arg(long)]
        scree: bool,

        /// Compute and write regression factor scores
        #[arg(long)]
        scores: bool,

        /// Round report values to three decimals
        #[arg(long)]
        round: bool,

        /// Directory for the output datasets; nothing is written without it
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Output format (csv, json, pretty-json)
        #[arg(long, default_value = "csv")]
        format: ExportFormat,

        /// Print the report as Markdown instead of plain text
        #[arg(long)]
        markdown: bool,
    },

    /// Validate a dataset and roster without running the analysis
    Check {
        /// Input dataset (CSV or Parquet)
        input: PathBuf,

        /// Comma-separated variable roster
        #[arg(long, value_delimiter = ',')]
        vars: Vec<String>,

        /// Missing-value policy (listwise, fail)
        #[arg(long, default_value = "listwise", value_parser = parse_missing)]
        missing: MissingPolicy,
    },
}

fn parse_missing(s: &str) -> Result<MissingPolicy, String> {
    match s.to_ascii_lowercase().as_str() {
        "listwise" => Ok(MissingPolicy::Listwise),
        "fail" => Ok(MissingPolicy::Fail),
        other => Err(format!("unknown missing-value policy: {other}")),
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), PipelineError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            vars,
            config,
            factors,
            priors,
            extraction,
            rotate,
            missing,
            residuals,
            msa,
            scree,
            scores,
            round,
            out_dir,
            format,
            markdown,
        } => {
            let mut analysis_config = match config {
                Some(path) => serde_json::from_reader(File::open(path)?)?,
                None => AnalysisConfig::default(),
            };

            if !vars.is_empty() {
                analysis_config.variables = VariableSet::new(vars)?.into();
            }
            if let Some(n) = factors {
                analysis_config.n_factors = n;
            }
            if let Some(p) = priors {
                analysis_config.priors = p;
            }
            if let Some(e) = extraction {
                analysis_config.extraction = e;
            }
            if let Some(r) = rotate {
                analysis_config.rotation = r;
            }
            analysis_config.residuals |= residuals;
            analysis_config.msa |= msa;
            analysis_config.scree |= scree;
            analysis_config.scores |= scores;
            analysis_config.round |= round;

            run_analysis(&RunOptions {
                input,
                config: analysis_config,
                missing,
                out_dir,
                format,
                markdown,
            })
        }
        Commands::Check {
            input,
            vars,
            missing,
        } => {
            let roster: Vec<String> = VariableSet::new(vars)?.into();
            check_dataset(&input, &roster, missing)
        }
    }
}
