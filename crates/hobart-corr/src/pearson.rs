//! Pairwise Pearson correlation over aligned daily series.

use crate::{CorrError, align::align};
use ndarray::Array2;
use polars::prelude::DataFrame;
use std::collections::BTreeMap;

/// Minimum number of fully-overlapping days required to correlate
pub const MIN_OVERLAP: usize = 2;

/// Symmetric matrix of pairwise Pearson correlation coefficients.
///
/// Row and column `k` both correspond to `ids()[k]`. The diagonal is
/// exactly 1.0; off-diagonal cells lie in [-1, 1], or are NaN when a series
/// has zero variance over the overlapping days.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    ids: Vec<String>,
    values: Array2<f64>,
}

impl CorrelationMatrix {
    /// Identifiers labelling the rows and columns, in matrix order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// The coefficient matrix.
    pub const fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Coefficient for the pair at positions `(i, j)`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[[i, j]]
    }

    /// Number of identifiers (the matrix is `size x size`).
    pub fn size(&self) -> usize {
        self.ids.len()
    }
}

/// Compute the pairwise Pearson correlation matrix over all cached series.
///
/// The series are aligned onto their fully-overlapping days first; only
/// those days contribute to the coefficients.
///
/// # Arguments
/// * `charts` - Mapping from identifier to its daily series frame
///
/// # Returns
/// `Ok(None)` for an empty mapping (the "no data" state), otherwise the
/// matrix over the mapping's identifiers in key order.
///
/// # Errors
/// Returns `CorrError::InsufficientOverlap` when fewer than
/// [`MIN_OVERLAP`] days are shared by every series.
pub fn correlate(
    charts: &BTreeMap<String, DataFrame>,
) -> Result<Option<CorrelationMatrix>, CorrError> {
    if charts.is_empty() {
        return Ok(None);
    }

    let aligned = align(charts)?;
    let n_rows = aligned.height();
    if n_rows < MIN_OVERLAP {
        return Err(CorrError::InsufficientOverlap {
            required: MIN_OVERLAP,
            actual: n_rows,
        });
    }

    let ids: Vec<String> = charts.keys().cloned().collect();
    let mut columns: Vec<Vec<f64>> = Vec::with_capacity(ids.len());
    for id in &ids {
        let column: Vec<f64> = aligned
            .column(id)?
            .f64()?
            .into_no_null_iter()
            .collect();
        columns.push(column);
    }

    let n = ids.len();
    let mut values = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        values[[i, i]] = 1.0;
        for j in (i + 1)..n {
            let coefficient = pearson(&columns[i], &columns[j]);
            values[[i, j]] = coefficient;
            values[[j, i]] = coefficient;
        }
    }

    Ok(Some(CorrelationMatrix { ids, values }))
}

/// Pearson correlation coefficient between two equal-length samples.
///
/// A zero-variance input yields NaN (0/0), which is propagated rather than
/// treated as an error.
fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&a, &b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    cov / (var_x.sqrt() * var_y.sqrt())
}
