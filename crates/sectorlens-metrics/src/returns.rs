//! Daily return derivation from aligned price tables.

use crate::error::{MetricsError, Result};
use polars::prelude::*;

/// Names of the sector columns in a price table (everything but `date`).
pub fn sector_columns(prices: &DataFrame) -> Vec<String> {
    prices
        .get_column_names()
        .iter()
        .filter(|name| name.as_str() != "date")
        .map(|name| name.to_string())
        .collect()
}

/// Compute the daily returns table from a price table.
///
/// Each sector column becomes `price[t] / price[t-1] - 1`. The first
/// row has no prior observation and is dropped, so the result has one
/// fewer row than the input.
pub fn daily_returns(prices: &DataFrame) -> Result<DataFrame> {
    let sectors = sector_columns(prices);
    if sectors.is_empty() {
        return Err(MetricsError::NoSectors);
    }

    let exprs: Vec<Expr> = sectors
        .iter()
        .map(|name| {
            (col(name.as_str()) / col(name.as_str()).shift(lit(1)) - lit(1.0))
                .alias(name.as_str())
        })
        .collect();

    let returns = prices
        .clone()
        .lazy()
        .with_columns(exprs)
        .slice(1, IdxSize::MAX)
        .collect()?;

    Ok(returns)
}

/// Extract a sector column as a dense `f64` vector.
///
/// Fails if the series still contains nulls, which violates the
/// aligned-table precondition.
pub(crate) fn column_values(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let ca = df.column(name)?.as_materialized_series().f64()?.clone();

    if ca.null_count() > 0 {
        return Err(MetricsError::MissingValues {
            sector: name.to_string(),
        });
    }

    Ok(ca.into_no_null_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_daily_returns() {
        let prices = df!(
            "date" => ["2024-01-02", "2024-01-03", "2024-01-04"],
            "Energy" => [100.0, 110.0, 99.0],
        )
        .unwrap();

        let returns = daily_returns(&prices).unwrap();
        assert_eq!(returns.height(), 2);

        let energy = column_values(&returns, "Energy").unwrap();
        assert_abs_diff_eq!(energy[0], 0.10, epsilon = 1e-12);
        assert_abs_diff_eq!(energy[1], -0.10, epsilon = 1e-12);
    }

    #[test]
    fn test_daily_returns_no_sectors() {
        let prices = df!("date" => ["2024-01-02", "2024-01-03"]).unwrap();
        assert!(matches!(
            daily_returns(&prices),
            Err(MetricsError::NoSectors)
        ));
    }

    #[test]
    fn test_column_values_rejects_nulls() {
        let prices = df!(
            "date" => ["2024-01-02", "2024-01-03"],
            "Energy" => [Some(100.0), None],
        )
        .unwrap();

        assert!(matches!(
            column_values(&prices, "Energy"),
            Err(MetricsError::MissingValues { .. })
        ));
    }
}
