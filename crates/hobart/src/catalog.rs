//! Memoized coin catalog.

use hobart_data::{Asset, CoinGeckoClient, DataError};

/// Process-wide memoization of the coin catalog.
///
/// The catalog is fetched once per `(base_url, api_key)` fingerprint and
/// reused for every later call with the same client identity; a client with
/// a different fingerprint invalidates the entry and refetches. The cached
/// assets are read-only after first population.
#[derive(Debug, Default)]
pub struct CatalogCache {
    key: Option<u64>,
    assets: Vec<Asset>,
}

impl CatalogCache {
    /// Create an empty cache.
    pub const fn new() -> Self {
        Self {
            key: None,
            assets: Vec::new(),
        }
    }

    /// Whether a catalog is currently cached.
    pub const fn loaded(&self) -> bool {
        self.key.is_some()
    }

    /// Return the catalog, fetching it on the first call per client
    /// identity.
    ///
    /// # Errors
    /// Propagates `DataError::CatalogUnavailable`; fatal to the rerun, since
    /// no selection is possible without a catalog. No retry.
    pub async fn load(&mut self, client: &CoinGeckoClient) -> Result<&[Asset], DataError> {
        let key = client.cache_key();
        if self.key != Some(key) {
            self.assets = client.list_coins().await?;
            self.key = Some(key);
        }
        Ok(&self.assets)
    }

    /// Seed the cache with a known catalog for this client identity,
    /// skipping the fetch. Useful for offline runs and tests.
    pub fn prime(&mut self, client: &CoinGeckoClient, assets: Vec<Asset>) {
        self.key = Some(client.cache_key());
        self.assets = assets;
    }

    /// Drop the cached catalog; the next load refetches.
    pub fn invalidate(&mut self) {
        self.key = None;
        self.assets.clear();
    }
}
