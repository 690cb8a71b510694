//! Error types for market data operations.

use thiserror::Error;

/// Result type for market data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while fetching or transforming market data.
#[derive(Debug, Error)]
pub enum DataError {
    /// The coin catalog could not be fetched. Fatal to the current rerun:
    /// without a catalog no selection is possible.
    #[error("catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A single identifier's market chart fetch failed. Recovered per
    /// identifier; never aborts the rerun.
    #[error("market chart fetch failed for {id}: {reason}")]
    ChartFetch {
        /// Identifier that was queried
        id: String,
        /// Reason for the failure
        reason: String,
    },

    /// The provider returned a chart without usable price points.
    #[error("missing price data for {id}: {reason}")]
    MissingData {
        /// Identifier that was queried
        id: String,
        /// Reason the data is unusable
        reason: String,
    },

    /// Polars error
    #[error("polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}
