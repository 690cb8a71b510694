//! Market chart payloads and daily resampling.

use crate::error::{DataError, Result};
use polars::prelude::*;
use serde::Deserialize;

/// Response body of `/coins/{id}/market_chart`.
///
/// Each price point is `[epoch_ms, price]`. The endpoint also returns
/// market caps and volumes; the dashboard only consumes prices.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketChart {
    /// Price points as `(epoch_ms, usd_price)` pairs
    pub prices: Vec<(f64, f64)>,
}

/// Bucket millisecond price points into calendar days, averaging all
/// intraday points, and return a single-column daily series.
///
/// # Arguments
/// * `id` - Identifier the series belongs to; becomes the price column name
/// * `points` - Raw `(epoch_ms, price)` pairs as delivered by the provider
///
/// # Returns
/// A DataFrame with columns `date` (dtype Date, sorted ascending, one row
/// per calendar day) and `{id}` (mean price for that day).
///
/// # Errors
/// Returns `DataError::MissingData` if `points` is empty.
pub fn resample_daily_mean(id: &str, points: &[(f64, f64)]) -> Result<DataFrame> {
    if points.is_empty() {
        return Err(DataError::MissingData {
            id: id.to_string(),
            reason: "empty price array".to_string(),
        });
    }

    let timestamps: Vec<i64> = points.iter().map(|(ts, _)| *ts as i64).collect();
    let prices: Vec<f64> = points.iter().map(|(_, price)| *price).collect();

    let df = DataFrame::new(vec![
        Series::new("timestamp_ms".into(), timestamps).into(),
        Series::new("price".into(), prices).into(),
    ])?;

    // Millisecond instants -> calendar days, then mean per day
    let df = df
        .lazy()
        .with_column(
            (col("timestamp_ms") * lit(1_000_000i64))
                .cast(DataType::Datetime(TimeUnit::Nanoseconds, None))
                .cast(DataType::Date)
                .alias("date"),
        )
        .group_by([col("date")])
        .agg([col("price").mean().alias(id)])
        .sort(["date"], Default::default())
        .collect()?;

    Ok(df)
}
