//! Raw price-table snapshots.
//!
//! The merged price table is the only artifact persisted by a run.
//! Derived metrics are recomputed on demand and never written.

use crate::error::Result;
use polars::prelude::*;
use std::path::Path;

/// Write the merged price table as a delimited flat file.
///
/// Columns are the sector names, one row per trading date. The snapshot
/// is an audit artifact, not a reload format.
pub fn write_price_table(prices: &DataFrame, path: &Path) -> Result<()> {
    let sectors: Vec<String> = prices
        .get_column_names()
        .iter()
        .filter(|name| name.as_str() != "date")
        .map(|name| name.to_string())
        .collect();

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&sectors)?;

    let columns: Vec<_> = sectors
        .iter()
        .map(|name| {
            prices
                .column(name)?
                .as_materialized_series()
                .f64()
                .map(Clone::clone)
                .map_err(Into::into)
        })
        .collect::<Result<Vec<Float64Chunked>>>()?;

    for row in 0..prices.height() {
        let record: Vec<String> = columns
            .iter()
            .map(|col| col.get(row).map_or_else(String::new, |v| v.to_string()))
            .collect();
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_prices() -> DataFrame {
        df!(
            "date" => ["2024-01-02", "2024-01-03"],
            "Energy" => [88.5, 89.0],
            "Utilities" => [64.25, 64.0],
        )
        .unwrap()
    }

    #[test]
    fn test_write_price_table() {
        let dir = std::env::temp_dir();
        let path = dir.join("sectorlens_snapshot_test.csv");
        let prices = sample_prices();

        write_price_table(&prices, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("Energy,Utilities"));
        assert_eq!(lines.next(), Some("88.5,64.25"));
        assert_eq!(lines.next(), Some("89,64"));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let path = Path::new("nonexistent-dir/snapshot.csv");
        let prices = sample_prices();

        assert!(write_price_table(&prices, path).is_err());
    }
}
