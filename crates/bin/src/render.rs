//! Text rendering of rerun results.

use hobart::FetchOutcome;
use hobart_corr::CorrelationMatrix;
use std::fmt::Write;

/// Message shown when no series is cached yet.
pub(crate) const NO_DATA_MESSAGE: &str = "No data to show";

/// Maximum label length on both axes, in characters
const LABEL_WIDTH: usize = 10;

/// Truncate an identifier to [`LABEL_WIDTH`] characters.
///
/// Character-based, not byte-based: ids are provider-supplied and carry no
/// ASCII guarantee.
fn truncate_label(id: &str) -> String {
    id.chars().take(LABEL_WIDTH).collect()
}

/// Render the correlation matrix as an annotated text heatmap.
///
/// Identifiers label both axes; every cell is annotated with its
/// coefficient on the fixed [-1, 1] scale. Zero-variance pairs show `NaN`.
pub(crate) fn heatmap(matrix: &CorrelationMatrix) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Correlation between cryptocurrencies");
    let _ = writeln!(out, "Pearson over fully-overlapping days, scale -1.000 .. 1.000");
    let _ = writeln!(out);

    let _ = write!(out, "{:<14}", "");
    for id in matrix.ids() {
        let _ = write!(out, "{:>12}", truncate_label(id));
    }
    let _ = writeln!(out);

    for (i, id) in matrix.ids().iter().enumerate() {
        let _ = write!(out, "{:<14}", truncate_label(id));
        for j in 0..matrix.size() {
            let _ = write!(out, "{:>12.3}", matrix.get(i, j));
        }
        let _ = writeln!(out);
    }

    out
}

/// One status line per identifier fetch, in selection order.
pub(crate) fn fetch_summary(fetches: &[(String, FetchOutcome)]) -> String {
    let mut out = String::new();
    for (id, outcome) in fetches {
        let status = match outcome {
            FetchOutcome::AlreadyCached => "cached".to_string(),
            FetchOutcome::Fetched => "fetched".to_string(),
            FetchOutcome::Failed(e) => format!("failed: {e}"),
        };
        let _ = writeln!(out, "  {:<20} {}", id, status);
    }
    out
}
