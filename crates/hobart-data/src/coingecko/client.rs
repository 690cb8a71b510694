//! CoinGecko API client with rate limiting.

use crate::coingecko::catalog::Asset;
use crate::coingecko::chart::{MarketChart, resample_daily_mean};
use crate::error::{DataError, Result};
use polars::prelude::DataFrame;
use reqwest::header;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};

/// CoinGecko API base URL (v3)
pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Header carrying the demo-tier API key
const API_KEY_HEADER: &str = "x-cg-demo-api-key";

/// Default rate limit: ~30 requests per minute (demo tier allowance)
const DEFAULT_RATE_LIMIT: Duration = Duration::from_millis(2000);

/// Quote currency for all price series
pub const VS_CURRENCY: &str = "usd";

/// Length of the trailing price window, in days
pub const TRAILING_DAYS: u32 = 365;

/// Rate limiter to stay inside the provider's request allowance
struct RateLimiter {
    last_request: Instant,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Instant::now() - min_interval,
            min_interval,
        }
    }

    async fn wait(&mut self) {
        let elapsed = self.last_request.elapsed();
        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }
        self.last_request = Instant::now();
    }
}

/// CoinGecko API client with rate limiting.
pub struct CoinGeckoClient {
    client: reqwest::Client,
    rate_limiter: Arc<Mutex<RateLimiter>>,
    base_url: String,
    api_key: String,
}

impl CoinGeckoClient {
    /// Create a new client against the public API with default rate limiting.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    /// Create a new client against a custom base URL.
    ///
    /// Useful for proxies and for pointing tests at a local server.
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        Self::with_rate_limit(base_url, api_key, DEFAULT_RATE_LIMIT)
    }

    /// Create a new client with a custom minimum interval between requests.
    pub fn with_rate_limit(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        min_interval: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(DataError::Network)?;

        Ok(Self {
            client,
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(min_interval))),
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Fingerprint of the client's identity (base URL and credentials).
    ///
    /// Catalog memoization is keyed by this value: the same endpoint and key
    /// always reuse the cached catalog, a changed key invalidates it.
    pub fn cache_key(&self) -> u64 {
        let mut hasher = std::hash::DefaultHasher::new();
        self.base_url.hash(&mut hasher);
        self.api_key.hash(&mut hasher);
        hasher.finish()
    }

    /// Fetch the full coin catalog.
    ///
    /// # Returns
    /// Every listed asset as `(id, symbol, name)`.
    ///
    /// # Errors
    /// Returns `DataError::CatalogUnavailable` if the provider is
    /// unreachable, returns a non-success status, or the body does not
    /// parse. There is no retry.
    pub async fn list_coins(&self) -> Result<Vec<Asset>> {
        self.rate_limiter.lock().await.wait().await;

        let url = format!("{}/coins/list", self.base_url);
        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| DataError::CatalogUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DataError::CatalogUnavailable(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let assets: Vec<Asset> = response
            .json()
            .await
            .map_err(|e| DataError::CatalogUnavailable(format!("failed to parse coin list: {e}")))?;

        tracing::debug!(count = assets.len(), "fetched coin catalog");
        Ok(assets)
    }

    /// Fetch the trailing 365-day USD price history for one identifier and
    /// resample it to one mean price per calendar day.
    ///
    /// # Arguments
    /// * `id` - Provider identifier (e.g. `"bitcoin"`)
    ///
    /// # Returns
    /// A DataFrame with columns `date` and `{id}`, sorted by day.
    ///
    /// # Errors
    /// Returns `DataError::ChartFetch` on transport or status failures,
    /// `DataError::MissingData` when the price array is empty. There is no
    /// retry; callers recover per identifier.
    pub async fn market_chart(&self, id: &str) -> Result<DataFrame> {
        if id.is_empty() {
            return Err(DataError::ChartFetch {
                id: id.to_string(),
                reason: "empty identifier".to_string(),
            });
        }

        self.rate_limiter.lock().await.wait().await;

        let url = format!("{}/coins/{}/market_chart", self.base_url, id);
        let days = TRAILING_DAYS.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[("vs_currency", VS_CURRENCY), ("days", days.as_str())])
            .header(header::ACCEPT, "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(DataError::Network)?;

        if !response.status().is_success() {
            return Err(DataError::ChartFetch {
                id: id.to_string(),
                reason: format!("HTTP {}", response.status()),
            });
        }

        let chart: MarketChart = response.json().await.map_err(|e| DataError::ChartFetch {
            id: id.to_string(),
            reason: format!("unexpected payload shape: {e}"),
        })?;

        resample_daily_mean(id, &chart.prices)
    }
}

impl std::fmt::Debug for CoinGeckoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinGeckoClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_construction() {
        let client = CoinGeckoClient::new("demo-key").unwrap();
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_cache_key_stable_for_same_arguments() {
        let a = CoinGeckoClient::new("demo-key").unwrap();
        let b = CoinGeckoClient::new("demo-key").unwrap();
        assert_eq!(a.cache_key(), b.cache_key());
    }

    #[test]
    fn test_cache_key_differs_across_credentials() {
        let a = CoinGeckoClient::new("key-one").unwrap();
        let b = CoinGeckoClient::new("key-two").unwrap();
        assert_ne!(a.cache_key(), b.cache_key());
    }

    #[test]
    fn test_cache_key_differs_across_base_urls() {
        let a = CoinGeckoClient::new("demo-key").unwrap();
        let b = CoinGeckoClient::with_base_url("http://localhost:8080", "demo-key").unwrap();
        assert_ne!(a.cache_key(), b.cache_key());
    }

    #[tokio::test]
    async fn test_market_chart_rejects_empty_id() {
        let client = CoinGeckoClient::new("demo-key").unwrap();
        let result = client.market_chart("").await;
        assert!(matches!(result, Err(DataError::ChartFetch { .. })));
    }
}
