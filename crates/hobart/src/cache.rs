//! Per-session cache of fetched daily price series.

use hobart_data::{CoinGeckoClient, DataError};
use polars::prelude::DataFrame;
use std::collections::BTreeMap;

/// Result of one [`SeriesCache::ensure`] call for one identifier.
///
/// A typed outcome per fetch, so callers can tell "already had it",
/// "fetched it now" and "failed" apart instead of inferring from absence.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The identifier was already cached; no request was issued.
    AlreadyCached,
    /// The series was fetched and cached by this call.
    Fetched,
    /// The fetch or transform failed; the identifier stays uncached.
    Failed(DataError),
}

impl FetchOutcome {
    /// Whether this outcome is a failure.
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Maps identifiers to their fetched, daily-resampled price series.
///
/// A series is fetched at most once per session: repeat requests for a
/// cached identifier are free. Nothing is evicted automatically; a
/// deselected identifier keeps its series until [`Self::evict`] or
/// [`Self::clear`] is called.
#[derive(Debug, Default)]
pub struct SeriesCache {
    charts: BTreeMap<String, DataFrame>,
}

impl SeriesCache {
    /// Create an empty cache.
    pub const fn new() -> Self {
        Self {
            charts: BTreeMap::new(),
        }
    }

    /// All cached series, keyed by identifier.
    pub const fn charts(&self) -> &BTreeMap<String, DataFrame> {
        &self.charts
    }

    /// The cached series for one identifier, if present.
    pub fn get(&self, id: &str) -> Option<&DataFrame> {
        self.charts.get(id)
    }

    /// Whether an identifier has a cached series.
    pub fn contains(&self, id: &str) -> bool {
        self.charts.contains_key(id)
    }

    /// Cached identifiers, in sorted order.
    pub fn ids(&self) -> Vec<&str> {
        self.charts.keys().map(String::as_str).collect()
    }

    /// Number of cached series.
    pub fn len(&self) -> usize {
        self.charts.len()
    }

    /// Whether the cache holds no series.
    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    /// Insert a series directly, bypassing the fetch path.
    pub fn insert(&mut self, id: impl Into<String>, series: DataFrame) {
        self.charts.insert(id.into(), series);
    }

    /// Remove one identifier's series, returning it if it was cached.
    pub fn evict(&mut self, id: &str) -> Option<DataFrame> {
        self.charts.remove(id)
    }

    /// Drop every cached series.
    pub fn clear(&mut self) {
        self.charts.clear();
    }

    /// Make sure `id` has a cached series, fetching it on first request.
    ///
    /// Idempotent: a cached identifier returns [`FetchOutcome::AlreadyCached`]
    /// without any network traffic. A failed fetch is logged and leaves the
    /// identifier uncached; the error is returned in the outcome rather than
    /// raised, so one bad identifier never blocks the others.
    pub async fn ensure(&mut self, client: &CoinGeckoClient, id: &str) -> FetchOutcome {
        if self.charts.contains_key(id) {
            tracing::debug!(%id, "series already cached");
            return FetchOutcome::AlreadyCached;
        }

        match client.market_chart(id).await {
            Ok(series) => {
                tracing::debug!(%id, rows = series.height(), "cached new series");
                self.charts.insert(id.to_string(), series);
                FetchOutcome::Fetched
            }
            Err(e) => {
                tracing::warn!(%id, error = %e, "market chart fetch failed, identifier left uncached");
                FetchOutcome::Failed(e)
            }
        }
    }

    /// Run [`Self::ensure`] for every identifier, in order, best-effort.
    pub async fn ensure_all(
        &mut self,
        client: &CoinGeckoClient,
        ids: &[String],
    ) -> Vec<(String, FetchOutcome)> {
        let mut outcomes = Vec::with_capacity(ids.len());
        for id in ids {
            let outcome = self.ensure(client, id).await;
            outcomes.push((id.clone(), outcome));
        }
        outcomes
    }
}
