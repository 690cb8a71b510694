#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/hobartlabs/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod align;
pub mod memo;
pub mod pearson;

pub use align::align;
pub use memo::{CorrelationCache, fingerprint};
pub use pearson::{CorrelationMatrix, MIN_OVERLAP, correlate};

use thiserror::Error;

/// Errors that can occur during alignment and correlation
#[derive(Debug, Error)]
pub enum CorrError {
    /// Too few fully-overlapping days to correlate
    #[error("insufficient overlap: need at least {required} shared days, got {actual}")]
    InsufficientOverlap {
        /// Required number of overlapping days
        required: usize,
        /// Actual number of overlapping days
        actual: usize,
    },

    /// Polars error
    #[error("polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
