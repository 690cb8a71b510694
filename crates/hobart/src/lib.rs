#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/hobartlabs/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cache;
pub mod catalog;
pub mod selection;
pub mod session;

pub use cache::{FetchOutcome, SeriesCache};
pub use catalog::CatalogCache;
pub use selection::SelectionState;
pub use session::{RerunOutcome, Session, SessionError};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
pub(crate) mod testing {
    use hobart_data::CoinGeckoClient;
    use polars::prelude::*;
    use std::time::Duration;

    /// A client pointed at a dead endpoint: every network attempt fails
    /// fast, so tests can prove that cached paths issue no requests.
    pub(crate) fn unroutable_client() -> CoinGeckoClient {
        CoinGeckoClient::with_rate_limit("http://127.0.0.1:9", "test-key", Duration::ZERO).unwrap()
    }

    /// Build a daily series frame: `date` starting at `start_day` (days
    /// since epoch) plus one price column named after the identifier.
    pub(crate) fn daily_frame(id: &str, start_day: i32, prices: &[f64]) -> DataFrame {
        let days: Vec<i32> = (0..prices.len() as i32).map(|i| start_day + i).collect();
        let dates = Series::new("date".into(), days)
            .cast(&DataType::Date)
            .unwrap();
        DataFrame::new(vec![
            dates.into(),
            Series::new(id.into(), prices.to_vec()).into(),
        ])
        .unwrap()
    }
}
