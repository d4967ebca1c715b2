//! Static chart rendering.
//!
//! Three illustrative PNGs per run: a cumulative-performance line
//! chart, a correlation heatmap, and a risk/return scatter. None of
//! them is bit-exact output; they exist to eyeball the metrics.

mod heatmap;
mod performance;
mod risk_return;

pub use heatmap::render_correlation_heatmap;
pub use performance::render_performance;
pub use risk_return::render_risk_return;

use sectorlens_metrics::MetricsBundle;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during chart rendering.
#[derive(Debug, Error)]
pub enum ChartError {
    /// Drawing backend error
    #[error("Chart rendering error: {0}")]
    Render(String),

    /// The bundle has nothing to plot
    #[error("No data to plot: {0}")]
    Empty(String),

    /// Malformed chart input
    #[error("Invalid chart input: {0}")]
    InvalidData(String),

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}

/// Map any drawing-layer error into a [`ChartError`].
pub(crate) fn chart_err(err: impl std::fmt::Display) -> ChartError {
    ChartError::Render(err.to_string())
}

/// File name of the performance line chart.
pub const PERFORMANCE_FILE: &str = "performance.png";
/// File name of the correlation heatmap.
pub const CORRELATION_FILE: &str = "correlation.png";
/// File name of the risk/return scatter.
pub const RISK_RETURN_FILE: &str = "risk_return.png";

/// Render all three charts into a directory with fixed file names.
pub fn render_all(bundle: &MetricsBundle, dir: &Path) -> Result<(), ChartError> {
    render_performance(bundle, &dir.join(PERFORMANCE_FILE))?;
    render_correlation_heatmap(bundle, &dir.join(CORRELATION_FILE))?;
    render_risk_return(bundle, &dir.join(RISK_RETURN_FILE))?;
    Ok(())
}
