//! Session context and the rerun pipeline.

use crate::cache::{FetchOutcome, SeriesCache};
use crate::catalog::CatalogCache;
use crate::selection::SelectionState;
use hobart_corr::{CorrError, CorrelationCache, CorrelationMatrix};
use hobart_data::{Asset, CoinGeckoClient, DataError};
use thiserror::Error;

/// Errors that can abort a rerun.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Market data error (catalog unavailable)
    #[error(transparent)]
    Data(#[from] DataError),

    /// Correlation error (insufficient overlap)
    #[error(transparent)]
    Corr(#[from] CorrError),
}

/// What one rerun produced.
#[derive(Debug)]
pub struct RerunOutcome {
    /// Per-identifier fetch outcomes, in selection order.
    pub fetches: Vec<(String, FetchOutcome)>,
    /// The correlation matrix over all cached series, or `None` when the
    /// cache is empty (the "no data" state).
    pub matrix: Option<CorrelationMatrix>,
}

/// Everything that persists across reruns within one user session.
///
/// Constructed at session start, dropped at session end. Each session owns
/// its state exclusively; nothing here is shared across sessions.
#[derive(Debug, Default)]
pub struct Session {
    /// Current symbol and identifier selection.
    pub selection: SelectionState,
    /// Memoized coin catalog.
    pub catalog: CatalogCache,
    /// Cached per-identifier price series.
    pub charts: SeriesCache,
    correlation: CorrelationCache,
}

impl Session {
    /// Create a fresh session with empty state.
    pub const fn new() -> Self {
        Self {
            selection: SelectionState::new(),
            catalog: CatalogCache::new(),
            charts: SeriesCache::new(),
            correlation: CorrelationCache::new(),
        }
    }

    /// Replace the symbol selection and reconcile the identifier selection
    /// against the new candidate set.
    ///
    /// # Returns
    /// The candidate assets (catalog entries whose symbol is now selected),
    /// which are the valid choices for [`Self::select_ids`].
    ///
    /// # Errors
    /// Fails if the catalog cannot be loaded.
    pub async fn select_symbols(
        &mut self,
        client: &CoinGeckoClient,
        symbols: Vec<String>,
    ) -> Result<Vec<Asset>, SessionError> {
        self.selection.set_symbols(symbols);
        let assets = self.catalog.load(client).await?;
        let candidates = self.selection.candidates(assets);
        self.selection.reconcile_ids(&candidates);
        Ok(candidates.into_iter().cloned().collect())
    }

    /// Replace the identifier selection with a subset of the current
    /// candidates. Identifiers outside the candidate set are rejected and
    /// logged, never cached.
    ///
    /// # Errors
    /// Fails if the catalog cannot be loaded.
    pub async fn select_ids(
        &mut self,
        client: &CoinGeckoClient,
        ids: Vec<String>,
    ) -> Result<(), SessionError> {
        let assets = self.catalog.load(client).await?;
        let candidates = self.selection.candidates(assets);
        let (accepted, rejected): (Vec<String>, Vec<String>) = ids
            .into_iter()
            .partition(|id| candidates.iter().any(|asset| asset.id == *id));
        for id in &rejected {
            tracing::warn!(%id, "identifier is not a candidate for the selected symbols, ignoring");
        }
        self.selection.reconcile_ids(&candidates);
        self.selection.set_ids(accepted);
        Ok(())
    }

    /// The candidate assets for the current symbol selection.
    ///
    /// # Errors
    /// Fails if the catalog cannot be loaded.
    pub async fn candidate_assets(
        &mut self,
        client: &CoinGeckoClient,
    ) -> Result<Vec<Asset>, SessionError> {
        let assets = self.catalog.load(client).await?;
        Ok(self
            .selection
            .candidates(assets)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Run the pipeline once: fill the series cache for every selected
    /// identifier (best-effort, one bad identifier never blocks the rest),
    /// then compute the correlation matrix over all cached series.
    ///
    /// # Errors
    /// Fails when the catalog is unavailable or when the cached series
    /// share fewer than two fully-overlapping days.
    pub async fn rerun(&mut self, client: &CoinGeckoClient) -> Result<RerunOutcome, SessionError> {
        let assets = self.catalog.load(client).await?;
        let candidates = self.selection.candidates(assets);
        self.selection.reconcile_ids(&candidates);

        let ids: Vec<String> = self.selection.selected_ids().to_vec();
        let fetches = self.charts.ensure_all(client, &ids).await;

        let matrix = self
            .correlation
            .get_or_compute(self.charts.charts())?
            .cloned();

        Ok(RerunOutcome { fetches, matrix })
    }
}
