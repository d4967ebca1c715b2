//! Error types for metrics computation.

use thiserror::Error;

/// Result type for metrics operations.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Errors that can occur during metrics computation.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Insufficient data for computation
    #[error("Insufficient data: need at least {required} price rows, got {actual}")]
    InsufficientData {
        /// Required number of rows
        required: usize,
        /// Actual number of rows
        actual: usize,
    },

    /// The price table has no sector columns
    #[error("Price table has no sector columns")]
    NoSectors,

    /// Missing values in a sector series
    #[error("Missing values in {sector} price series")]
    MissingValues {
        /// Sector whose series contains nulls
        sector: String,
    },

    /// Non-finite risk-free rate
    #[error("Risk-free rate must be finite, got {0}")]
    InvalidRiskFreeRate(f64),

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}
