#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/latentworks/latent/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod loader;
pub mod observations;

pub use error::{DataError, Result};
pub use loader::load_dataset;
pub use observations::{MissingPolicy, Observations, select_observations};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
