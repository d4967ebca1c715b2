//! Performance metrics over an aligned sector price table.
//!
//! The engine is a pure transform: given a price table and a risk-free
//! rate it derives annualized return, volatility, Sharpe ratio, the
//! cross-sector correlation matrix, and cumulative returns. It holds no
//! state, so repeated calls on the same input yield identical bundles.

use crate::correlation::CorrelationMatrix;
use crate::error::{MetricsError, Result};
use crate::returns::{column_values, sector_columns};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Trading days per year used for annualization.
///
/// A fixed market convention, not derived from the actual date span.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Why a sector was excluded from risk-adjusted metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DegenerateReason {
    /// All daily returns are identical, so volatility is exactly zero
    /// and the Sharpe ratio is undefined.
    ZeroVolatility,

    /// Only one daily return exists; the sample standard deviation is
    /// undefined.
    SingleReturn,
}

impl fmt::Display for DegenerateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroVolatility => write!(f, "zero volatility"),
            Self::SingleReturn => write!(f, "single return observation"),
        }
    }
}

/// A per-sector skip record emitted instead of a NaN metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegenerateSector {
    /// Sector that was skipped.
    pub sector: String,
    /// Why it was skipped.
    pub reason: DegenerateReason,
}

/// Derived metrics for an aligned sector price table.
///
/// Scalar metrics are keyed by sector name. A sector absent from a map
/// was skipped for that metric; the skip is always mirrored by an entry
/// in [`degenerate`](Self::degenerate).
#[derive(Debug, Clone)]
pub struct MetricsBundle {
    /// Geometric annualization of total return over the window.
    pub annual_return: BTreeMap<String, f64>,

    /// Annualized sample standard deviation of daily returns. Absent
    /// when fewer than two daily returns exist.
    pub volatility: BTreeMap<String, f64>,

    /// Risk-adjusted excess return. Absent when volatility is zero or
    /// undefined.
    pub sharpe_ratio: BTreeMap<String, f64>,

    /// Pearson correlation of daily returns across non-degenerate
    /// sectors.
    pub correlation: CorrelationMatrix,

    /// `date` plus one column per sector: running product of
    /// `1 + daily_return`, seeded at 1.0 on the first date.
    pub cumulative_returns: DataFrame,

    /// Sectors excluded from risk-adjusted metrics, with reasons.
    pub degenerate: Vec<DegenerateSector>,
}

impl MetricsBundle {
    /// The three scalar metrics for a sector, if all are present.
    pub fn scalar_metrics(&self, sector: &str) -> Option<(f64, f64, f64)> {
        Some((
            *self.annual_return.get(sector)?,
            *self.volatility.get(sector)?,
            *self.sharpe_ratio.get(sector)?,
        ))
    }
}

/// Compute the full metrics bundle for an aligned price table.
///
/// # Arguments
/// * `prices` - DataFrame with a `date` column plus one `f64` column
///   per sector; at least 2 rows, no nulls
/// * `risk_free_rate` - annualized risk-free rate in the same units as
///   annual return (0.03 = 3%)
///
/// # Errors
/// `InsufficientData` when fewer than 2 rows, `NoSectors` when only the
/// date column is present, `MissingValues` when a series still contains
/// nulls. A zero-volatility sector is not an error: it is excluded from
/// the Sharpe and correlation outputs and recorded in `degenerate`.
pub fn compute(prices: &DataFrame, risk_free_rate: f64) -> Result<MetricsBundle> {
    if !risk_free_rate.is_finite() {
        return Err(MetricsError::InvalidRiskFreeRate(risk_free_rate));
    }

    let sectors = sector_columns(prices);
    if sectors.is_empty() {
        return Err(MetricsError::NoSectors);
    }

    let n_prices = prices.height();
    if n_prices < 2 {
        return Err(MetricsError::InsufficientData {
            required: 2,
            actual: n_prices,
        });
    }

    let mut annual_return = BTreeMap::new();
    let mut volatility = BTreeMap::new();
    let mut sharpe_ratio = BTreeMap::new();
    let mut degenerate = Vec::new();
    let mut clean_returns: Vec<(String, Vec<f64>)> = Vec::new();
    let mut cumulative_cols: Vec<Column> = vec![prices.column("date")?.clone()];

    for sector in &sectors {
        let closes = column_values(prices, sector)?;
        let returns: Vec<f64> = closes.windows(2).map(|w| w[1] / w[0] - 1.0).collect();

        let total_return = closes[n_prices - 1] / closes[0];
        let annual = total_return.powf(TRADING_DAYS_PER_YEAR / n_prices as f64) - 1.0;
        annual_return.insert(sector.clone(), annual);

        let mut cumulative = Vec::with_capacity(n_prices);
        cumulative.push(1.0);
        for r in &returns {
            cumulative.push(cumulative[cumulative.len() - 1] * (1.0 + r));
        }
        cumulative_cols.push(Series::new(sector.as_str().into(), cumulative).into());

        let Some(daily_std) = sample_std(&returns) else {
            degenerate.push(DegenerateSector {
                sector: sector.clone(),
                reason: DegenerateReason::SingleReturn,
            });
            continue;
        };

        let vol = daily_std * TRADING_DAYS_PER_YEAR.sqrt();
        volatility.insert(sector.clone(), vol);

        if vol == 0.0 {
            degenerate.push(DegenerateSector {
                sector: sector.clone(),
                reason: DegenerateReason::ZeroVolatility,
            });
            continue;
        }

        sharpe_ratio.insert(sector.clone(), (annual - risk_free_rate) / vol);
        clean_returns.push((sector.clone(), returns));
    }

    Ok(MetricsBundle {
        annual_return,
        volatility,
        sharpe_ratio,
        correlation: CorrelationMatrix::from_series(&clean_returns),
        cumulative_returns: DataFrame::new(cumulative_cols)?,
        degenerate,
    })
}

/// Sample standard deviation (n−1 denominator); `None` below 2 samples.
fn sample_std(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();

    Some((sum_sq / (n - 1) as f64).sqrt())
}
