//! CoinGecko API access.
//!
//! Two endpoints back the whole dashboard: the coin catalog
//! (`/coins/list`) and the trailing daily price history for one
//! identifier (`/coins/{id}/market_chart`).

pub mod catalog;
pub mod chart;
pub mod client;

pub use catalog::{Asset, unique_symbols};
pub use chart::{MarketChart, resample_daily_mean};
pub use client::{CoinGeckoClient, TRAILING_DAYS, VS_CURRENCY};
