//! Error types for data operations.

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur during data operations.
///
/// The per-symbol variants double as skip signals: the pipeline recovers
/// from them by excluding the affected sector, and only `NoUsableData`
/// is fatal for a run.
#[derive(Debug, Error)]
pub enum DataError {
    /// Yahoo Finance API error
    #[error("Yahoo Finance API error: {0}")]
    YahooApi(String),

    /// Invalid date range
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date of the range
        start: String,
        /// End date of the range
        end: String,
    },

    /// Invalid symbol
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// The feed returned no rows at all for a symbol
    #[error("Empty response for {symbol}")]
    EmptyResponse {
        /// Symbol that was queried
        symbol: String,
    },

    /// The feed returned rows, but no usable close prices
    #[error("No usable close prices for {symbol}")]
    NoUsableCloses {
        /// Symbol that was queried
        symbol: String,
    },

    /// Fewer observations than the minimum needed downstream
    #[error("Too few observations for {symbol}: got {actual}, need at least 2")]
    TooFewObservations {
        /// Symbol that was queried
        symbol: String,
        /// Number of usable observations returned
        actual: usize,
    },

    /// No sector in the universe yielded usable data
    #[error("No valid data collected for any sector")]
    NoUsableData,

    /// Time conversion error
    #[error("Time conversion error: {0}")]
    TimeConversion(String),

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// CSV serialization error
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<yahoo_finance_api::YahooError> for DataError {
    fn from(err: yahoo_finance_api::YahooError) -> Self {
        Self::YahooApi(err.to_string())
    }
}
