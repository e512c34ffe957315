#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/latentworks/latent/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod report;

pub use export::{
    ExportError, ExportFormat, Exporter, MsaRecord, ResidualRecord, ScoreRecord, ScreeRecord,
    SolutionRecord, VarianceRecord,
};
pub use report::SolutionReport;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
