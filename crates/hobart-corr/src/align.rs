//! Alignment of per-identifier daily series onto a common day index.

use crate::CorrError;
use polars::prelude::*;
use std::collections::BTreeMap;

/// Join all per-identifier series into one table over their shared days.
///
/// Each input frame has columns `date` and `{id}`. The frames are
/// full-outer-joined on `date` (union of all days seen across all series),
/// then every row with a missing value for any identifier is dropped, so
/// only fully-overlapping days remain.
///
/// # Arguments
/// * `charts` - Mapping from identifier to its daily series frame
///
/// # Returns
/// A DataFrame with a `date` column plus one price column per identifier,
/// sorted by day. An empty mapping yields an empty frame.
pub fn align(charts: &BTreeMap<String, DataFrame>) -> Result<DataFrame, CorrError> {
    let mut frames = charts.values();
    let Some(first) = frames.next() else {
        return Ok(DataFrame::empty());
    };

    let mut joined = first.clone().lazy();
    for df in frames {
        joined = joined.join(
            df.clone().lazy(),
            [col("date")],
            [col("date")],
            JoinArgs::new(JoinType::Full).with_coalesce(JoinCoalesce::CoalesceColumns),
        );
    }

    let aligned = joined
        .drop_nulls(None)
        .sort(["date"], Default::default())
        .collect()?;

    Ok(aligned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::daily_frame;

    #[test]
    fn test_align_empty_mapping() {
        let charts = BTreeMap::new();
        let aligned = align(&charts).unwrap();
        assert_eq!(aligned.height(), 0);
    }

    #[test]
    fn test_align_single_series_passthrough() {
        let mut charts = BTreeMap::new();
        charts.insert(
            "bitcoin".to_string(),
            daily_frame("bitcoin", 19000, &[1.0, 2.0, 3.0]),
        );

        let aligned = align(&charts).unwrap();
        assert_eq!(aligned.height(), 3);
        assert_eq!(aligned.get_column_names(), vec!["date", "bitcoin"]);
    }

    #[test]
    fn test_align_drops_non_overlapping_days() {
        // A covers days [19000, 19001, 19002], B covers [19001, 19002, 19003];
        // only the two shared days survive.
        let mut charts = BTreeMap::new();
        charts.insert(
            "bitcoin".to_string(),
            daily_frame("bitcoin", 19000, &[1.0, 2.0, 3.0]),
        );
        charts.insert(
            "ethereum".to_string(),
            daily_frame("ethereum", 19001, &[10.0, 20.0, 30.0]),
        );

        let aligned = align(&charts).unwrap();
        assert_eq!(aligned.height(), 2);

        let days: Vec<i32> = aligned
            .column("date")
            .unwrap()
            .cast(&DataType::Int32)
            .unwrap()
            .i32()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(days, vec![19001, 19002]);
    }

    #[test]
    fn test_align_disjoint_series_yields_no_rows() {
        let mut charts = BTreeMap::new();
        charts.insert(
            "bitcoin".to_string(),
            daily_frame("bitcoin", 19000, &[1.0, 2.0]),
        );
        charts.insert(
            "ethereum".to_string(),
            daily_frame("ethereum", 19100, &[10.0, 20.0]),
        );

        let aligned = align(&charts).unwrap();
        assert_eq!(aligned.height(), 0);
    }
}
