//! Content-keyed memoization of the correlation matrix.
//!
//! Reruns of the dashboard pipeline happen on every user interaction, most
//! of which do not change the set of cached series. The cache fingerprints
//! the series mapping and only recomputes the matrix when the contents
//! actually change.

use crate::pearson::{CorrelationMatrix, correlate};
use crate::CorrError;
use polars::prelude::DataFrame;
use std::collections::BTreeMap;
use std::hash::{DefaultHasher, Hash, Hasher};

/// Fingerprint of a series mapping's contents.
///
/// Hashes each identifier together with its row count and boundary prices.
/// Series are immutable once cached, so this is enough to detect any change
/// to the mapping (an identifier added, removed, or replaced).
pub fn fingerprint(charts: &BTreeMap<String, DataFrame>) -> u64 {
    let mut hasher = DefaultHasher::new();
    for (id, df) in charts {
        id.hash(&mut hasher);
        df.height().hash(&mut hasher);
        if let Some(prices) = df.column(id).ok().and_then(|c| c.f64().ok()) {
            if let Some(first) = prices.get(0) {
                first.to_bits().hash(&mut hasher);
            }
            if let Some(last) = prices.last() {
                last.to_bits().hash(&mut hasher);
            }
        }
    }
    hasher.finish()
}

/// Memoized correlation over a series mapping.
#[derive(Debug, Default)]
pub struct CorrelationCache {
    key: Option<u64>,
    cached: Option<CorrelationMatrix>,
}

impl CorrelationCache {
    /// Create an empty cache.
    pub const fn new() -> Self {
        Self {
            key: None,
            cached: None,
        }
    }

    /// Return the correlation matrix for `charts`, recomputing only when the
    /// mapping's contents have changed since the last call.
    ///
    /// # Returns
    /// `Ok(None)` for an empty mapping, mirroring [`correlate`].
    ///
    /// # Errors
    /// Propagates [`correlate`] errors; a failed computation is not cached.
    pub fn get_or_compute(
        &mut self,
        charts: &BTreeMap<String, DataFrame>,
    ) -> Result<Option<&CorrelationMatrix>, CorrError> {
        let key = fingerprint(charts);
        if self.key != Some(key) {
            self.cached = correlate(charts)?;
            self.key = Some(key);
        }
        Ok(self.cached.as_ref())
    }

    /// Drop the memoized matrix; the next call recomputes.
    pub fn invalidate(&mut self) {
        self.key = None;
        self.cached = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::daily_frame;
    use approx::assert_abs_diff_eq;

    fn two_series() -> BTreeMap<String, DataFrame> {
        let mut charts = BTreeMap::new();
        charts.insert(
            "bitcoin".to_string(),
            daily_frame("bitcoin", 19000, &[1.0, 2.0, 3.0]),
        );
        charts.insert(
            "ethereum".to_string(),
            daily_frame("ethereum", 19000, &[2.0, 4.0, 6.0]),
        );
        charts
    }

    #[test]
    fn test_fingerprint_stable() {
        let charts = two_series();
        assert_eq!(fingerprint(&charts), fingerprint(&charts));
    }

    #[test]
    fn test_fingerprint_changes_with_contents() {
        let mut charts = two_series();
        let before = fingerprint(&charts);

        charts.insert(
            "tether".to_string(),
            daily_frame("tether", 19000, &[1.0, 1.0, 1.1]),
        );
        assert_ne!(before, fingerprint(&charts));
    }

    #[test]
    fn test_memoized_result_matches_direct_computation() {
        let charts = two_series();
        let mut cache = CorrelationCache::new();

        let memoized = cache.get_or_compute(&charts).unwrap().unwrap().clone();
        let direct = correlate(&charts).unwrap().unwrap();
        assert_eq!(memoized.ids(), direct.ids());
        assert_abs_diff_eq!(memoized.get(0, 1), direct.get(0, 1));
    }

    #[test]
    fn test_recompute_only_on_change() {
        let mut charts = two_series();
        let mut cache = CorrelationCache::new();

        let first = cache.get_or_compute(&charts).unwrap().unwrap().size();
        assert_eq!(first, 2);
        // Unchanged mapping hits the memo
        assert_eq!(cache.key, Some(fingerprint(&charts)));
        let again = cache.get_or_compute(&charts).unwrap().unwrap().size();
        assert_eq!(again, 2);

        // Adding a series grows the matrix on the next call
        charts.insert(
            "solana".to_string(),
            daily_frame("solana", 19000, &[3.0, 1.0, 2.0]),
        );
        let grown = cache.get_or_compute(&charts).unwrap().unwrap().size();
        assert_eq!(grown, 3);
    }

    #[test]
    fn test_empty_mapping_memoized_as_no_data() {
        let charts = BTreeMap::new();
        let mut cache = CorrelationCache::new();
        assert!(cache.get_or_compute(&charts).unwrap().is_none());
    }

    #[test]
    fn test_invalidate() {
        let charts = two_series();
        let mut cache = CorrelationCache::new();
        cache.get_or_compute(&charts).unwrap();
        cache.invalidate();
        assert!(cache.key.is_none());
        assert!(cache.get_or_compute(&charts).unwrap().is_some());
    }
}
