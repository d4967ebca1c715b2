//! Data pipeline for fetching and aligning sector price data.
//!
//! Fetches each sector's proxy-ETF close series in sequence, skips
//! sectors whose feed is unusable, and merges the survivors into a
//! single date-aligned price table.

use chrono::{DateTime, Utc};
use indicatif::ProgressBar;
use polars::prelude::*;
use sectorlens::SectorUniverse;
use sectorlens_data::DataError;
use sectorlens_data::yahoo::YahooQuoteProvider;
use tracing::{info, warn};

/// Error type for data pipeline operations.
#[derive(Debug, thiserror::Error)]
pub(crate) enum DataPipelineError {
    /// Data fetch error from Yahoo.
    #[error("Data fetch error: {0}")]
    Fetch(#[from] DataError),
    /// Polars DataFrame error.
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// An aligned price table plus the sectors that survived fetching.
#[derive(Debug)]
pub(crate) struct SectorPrices {
    /// `date` plus one close column per surviving sector.
    pub prices: DataFrame,
    /// Surviving sector names, in universe order.
    pub sectors: Vec<String>,
}

/// Fetch and align close series for every sector in the universe.
///
/// Fetching is sequential, one symbol at a time. A sector whose feed is
/// empty, malformed, or too short is skipped with a warning and the run
/// continues; the pipeline fails only when no sector yields usable
/// data.
pub(crate) async fn fetch_sector_prices(
    provider: &YahooQuoteProvider,
    universe: &SectorUniverse,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    progress: Option<&ProgressBar>,
) -> Result<SectorPrices, DataPipelineError> {
    let mut frames: Vec<(String, DataFrame)> = Vec::new();

    for mapping in universe.mappings() {
        let sector = mapping.sector.name();
        let symbol = mapping.symbol.as_str();

        match provider.fetch_daily_closes(symbol, start, end).await {
            Ok(df) => {
                info!(sector, symbol, rows = df.height(), "fetched close series");
                frames.push((sector.to_string(), df));
            }
            Err(e) => {
                let log_skip = || warn!(sector, symbol, error = %e, "skipping sector");
                match progress {
                    Some(pb) => pb.suspend(log_skip),
                    None => log_skip(),
                }
            }
        }

        if let Some(pb) = progress {
            pb.inc(1);
        }
    }

    let (prices, sectors) = merge_aligned(frames)?;
    Ok(SectorPrices { prices, sectors })
}

/// Merge per-sector `[date, close]` frames into one aligned table.
///
/// Full outer join on `date` across all sectors, sort by date,
/// forward-fill each close series, then drop any row still missing a
/// value (dates before a sector's first observation). The result
/// satisfies the shared-index/no-null invariant the metrics engine
/// expects.
pub(crate) fn merge_aligned(
    frames: Vec<(String, DataFrame)>,
) -> Result<(DataFrame, Vec<String>), DataPipelineError> {
    let sectors: Vec<String> = frames.iter().map(|(name, _)| name.clone()).collect();

    let mut merged: Option<LazyFrame> = None;
    for (name, df) in frames {
        let lf = df
            .lazy()
            .select([col("date"), col("close").alias(name.as_str())]);

        merged = Some(match merged {
            None => lf,
            Some(acc) => acc.join(
                lf,
                [col("date")],
                [col("date")],
                JoinArgs::new(JoinType::Full).with_coalesce(JoinCoalesce::CoalesceColumns),
            ),
        });
    }

    let Some(merged) = merged else {
        return Err(DataPipelineError::Fetch(DataError::NoUsableData));
    };

    let joined = merged
        .sort(["date"], SortMultipleOptions::default())
        .collect()?;

    let filled: Vec<Column> = joined
        .get_columns()
        .iter()
        .map(|column| {
            let series = column.as_materialized_series();
            if series.name() == "date" {
                Ok(series.clone().into())
            } else {
                series
                    .fill_null(FillNullStrategy::Forward(None))
                    .map(Into::into)
            }
        })
        .collect::<PolarsResult<_>>()?;

    let prices = DataFrame::new(filled)?.lazy().drop_nulls(None).collect()?;

    Ok((prices, sectors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn close_frame(days: Vec<i32>, closes: Vec<Option<f64>>) -> DataFrame {
        let date = Series::new("date".into(), days)
            .cast(&DataType::Date)
            .unwrap();

        DataFrame::new(vec![
            date.into(),
            Series::new("close".into(), closes).into(),
        ])
        .unwrap()
    }

    fn column(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
        df.column(name)
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_iter()
            .collect()
    }

    #[test]
    fn test_merge_aligned_shared_dates() {
        let frames = vec![
            (
                "Energy".to_string(),
                close_frame(vec![1, 2, 3], vec![Some(10.0), Some(11.0), Some(12.0)]),
            ),
            (
                "Utilities".to_string(),
                close_frame(vec![1, 2, 3], vec![Some(20.0), Some(21.0), Some(22.0)]),
            ),
        ];

        let (prices, sectors) = merge_aligned(frames).unwrap();

        assert_eq!(sectors, vec!["Energy", "Utilities"]);
        assert_eq!(prices.height(), 3);
        assert_eq!(prices.get_column_names(), vec!["date", "Energy", "Utilities"]);
    }

    #[test]
    fn test_merge_aligned_forward_fills_gaps() {
        // Utilities has no observation on day 2; the day-1 close carries
        // forward.
        let frames = vec![
            (
                "Energy".to_string(),
                close_frame(vec![1, 2, 3], vec![Some(10.0), Some(11.0), Some(12.0)]),
            ),
            (
                "Utilities".to_string(),
                close_frame(vec![1, 3], vec![Some(20.0), Some(22.0)]),
            ),
        ];

        let (prices, _) = merge_aligned(frames).unwrap();

        assert_eq!(prices.height(), 3);
        let utilities = column(&prices, "Utilities");
        assert_abs_diff_eq!(utilities[1].unwrap(), 20.0, epsilon = 1e-12);
        assert_abs_diff_eq!(utilities[2].unwrap(), 22.0, epsilon = 1e-12);
    }

    #[test]
    fn test_merge_aligned_drops_leading_unfillable_rows() {
        // Utilities starts trading on day 2: day 1 cannot be filled and
        // is dropped so all series share the same index.
        let frames = vec![
            (
                "Energy".to_string(),
                close_frame(vec![1, 2, 3], vec![Some(10.0), Some(11.0), Some(12.0)]),
            ),
            (
                "Utilities".to_string(),
                close_frame(vec![2, 3], vec![Some(21.0), Some(22.0)]),
            ),
        ];

        let (prices, _) = merge_aligned(frames).unwrap();

        assert_eq!(prices.height(), 2);
        let energy = column(&prices, "Energy");
        assert_abs_diff_eq!(energy[0].unwrap(), 11.0, epsilon = 1e-12);
    }

    #[test]
    fn test_merge_aligned_fills_null_closes() {
        let frames = vec![(
            "Energy".to_string(),
            close_frame(vec![1, 2, 3], vec![Some(10.0), None, Some(12.0)]),
        )];

        let (prices, _) = merge_aligned(frames).unwrap();

        let energy = column(&prices, "Energy");
        assert_abs_diff_eq!(energy[1].unwrap(), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_merge_aligned_sorts_by_date() {
        let frames = vec![(
            "Energy".to_string(),
            close_frame(vec![3, 1, 2], vec![Some(12.0), Some(10.0), Some(11.0)]),
        )];

        let (prices, _) = merge_aligned(frames).unwrap();

        let energy = column(&prices, "Energy");
        assert_abs_diff_eq!(energy[0].unwrap(), 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(energy[2].unwrap(), 12.0, epsilon = 1e-12);
    }

    #[test]
    fn test_merge_aligned_empty_is_no_usable_data() {
        let result = merge_aligned(Vec::new());
        assert!(matches!(
            result,
            Err(DataPipelineError::Fetch(DataError::NoUsableData))
        ));
    }
}
