//! Plain-text analysis report.

use sectorlens_metrics::MetricsBundle;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const SEPARATOR_WIDTH: usize = 25;

/// Render the fixed-format text report.
///
/// Sectors are emitted in the given order, one block each: name header,
/// annual return and volatility as percentages (2dp), Sharpe ratio
/// (2dp), separator line. A sector missing any of the three scalar
/// metrics is skipped and the fold continues; a single bad sector never
/// aborts the report.
pub fn format_report(bundle: &MetricsBundle, sector_names: &[String]) -> String {
    let mut report = String::from("Sector Market Analysis Report\n");
    report.push_str(&"-".repeat(SEPARATOR_WIDTH));
    report.push_str("\n\n");

    sector_names.iter().fold(report, |mut out, sector| {
        let Some((annual, volatility, sharpe)) = bundle.scalar_metrics(sector) else {
            return out;
        };

        out.push_str(&format!("{} Sector:\n", sector));
        out.push_str(&format!("Annual Return: {:.2}%\n", annual * 100.0));
        out.push_str(&format!("Volatility: {:.2}%\n", volatility * 100.0));
        out.push_str(&format!("Sharpe Ratio: {:.2}\n", sharpe));
        out.push_str(&"-".repeat(SEPARATOR_WIDTH));
        out.push('\n');
        out
    })
}

/// Write the report to a file.
pub fn write_report(
    bundle: &MetricsBundle,
    sector_names: &[String],
    path: &Path,
) -> Result<(), ReportError> {
    fs::write(path, format_report(bundle, sector_names))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use sectorlens_metrics::compute;

    fn sample_bundle() -> MetricsBundle {
        let prices = df!(
            "date" => ["2024-01-02", "2024-01-03", "2024-01-04", "2024-01-05"],
            "Energy" => [88.0, 89.5, 87.25, 90.0],
            "Utilities" => [64.0, 63.5, 64.25, 64.5],
            "Flat" => [10.0, 10.0, 10.0, 10.0],
        )
        .unwrap();

        compute(&prices, 0.03).unwrap()
    }

    #[test]
    fn test_report_contains_sector_blocks() {
        let bundle = sample_bundle();
        let names = vec!["Energy".to_string(), "Utilities".to_string()];

        let report = format_report(&bundle, &names);

        assert!(report.starts_with("Sector Market Analysis Report\n"));
        assert!(report.contains("Energy Sector:\n"));
        assert!(report.contains("Utilities Sector:\n"));
        assert!(report.contains("Sharpe Ratio:"));
        assert!(report.contains(&"-".repeat(25)));

        // Energy comes before Utilities, matching the requested order.
        let energy = report.find("Energy Sector:").unwrap();
        let utilities = report.find("Utilities Sector:").unwrap();
        assert!(energy < utilities);
    }

    #[test]
    fn test_report_skips_missing_sector() {
        let bundle = sample_bundle();
        let names = vec![
            "Energy".to_string(),
            "Flat".to_string(),
            "Materials".to_string(),
            "Utilities".to_string(),
        ];

        let report = format_report(&bundle, &names);

        // "Flat" is degenerate (no Sharpe) and "Materials" is absent
        // entirely; both blocks are skipped, the rest survive.
        assert!(report.contains("Energy Sector:"));
        assert!(report.contains("Utilities Sector:"));
        assert!(!report.contains("Flat Sector:"));
        assert!(!report.contains("Materials Sector:"));
    }

    #[test]
    fn test_percentages_rounded_to_two_decimals() {
        let bundle = sample_bundle();
        let names = vec!["Energy".to_string()];

        let report = format_report(&bundle, &names);
        let line = report
            .lines()
            .find(|l| l.starts_with("Annual Return:"))
            .unwrap();

        let value = line
            .trim_start_matches("Annual Return: ")
            .trim_end_matches('%');
        let decimals = value.split('.').nth(1).unwrap();
        assert_eq!(decimals.len(), 2);
    }

    #[test]
    fn test_write_report() {
        let bundle = sample_bundle();
        let names = vec!["Energy".to_string()];
        let path = std::env::temp_dir().join("sectorlens_report_test.txt");

        write_report(&bundle, &names, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("Energy Sector:"));

        std::fs::remove_file(&path).ok();
    }
}
