//! Close-price fetching from Yahoo Finance.

use crate::error::{DataError, Result};
use chrono::{DateTime, Utc};
use polars::prelude::*;
use std::time::Duration;
use tokio::time::sleep;
use yahoo_finance_api as yahoo;

/// Yahoo Finance quote provider with rate limiting.
pub struct YahooQuoteProvider {
    provider: yahoo::YahooConnector,
    rate_limit_delay: Duration,
}

impl std::fmt::Debug for YahooQuoteProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooQuoteProvider")
            .field("rate_limit_delay", &self.rate_limit_delay)
            .finish_non_exhaustive()
    }
}

impl YahooQuoteProvider {
    /// Create a new Yahoo Finance quote provider with default rate limiting (1 req/sec).
    pub fn new() -> Self {
        Self {
            provider: yahoo::YahooConnector::new().expect("Failed to create Yahoo connector"),
            rate_limit_delay: Duration::from_millis(1000),
        }
    }

    /// Create a new Yahoo Finance quote provider with custom rate limiting.
    pub fn with_rate_limit(rate_limit_delay: Duration) -> Self {
        Self {
            provider: yahoo::YahooConnector::new().expect("Failed to create Yahoo connector"),
            rate_limit_delay,
        }
    }

    /// Fetch the daily close series for a single symbol.
    ///
    /// # Arguments
    /// * `symbol` - The ticker symbol (e.g., "XLK")
    /// * `start` - Start date for the data
    /// * `end` - End date for the data
    ///
    /// # Returns
    /// A Polars DataFrame with columns: date, close. Closes are
    /// dividend/split-adjusted; non-finite values come back as nulls for
    /// the caller to fill.
    pub async fn fetch_daily_closes(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<DataFrame> {
        // Validate date range
        if start > end {
            return Err(DataError::InvalidDateRange {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }

        // Validate symbol
        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        // Convert chrono DateTime to time::OffsetDateTime
        let start_time = time::OffsetDateTime::from_unix_timestamp(start.timestamp())
            .map_err(|e| DataError::TimeConversion(e.to_string()))?;
        let end_time = time::OffsetDateTime::from_unix_timestamp(end.timestamp())
            .map_err(|e| DataError::TimeConversion(e.to_string()))?;

        // Fetch data from Yahoo Finance
        let response = self
            .provider
            .get_quote_history(symbol, start_time, end_time)
            .await?;

        let quotes = response
            .quotes()
            .map_err(|e| DataError::YahooApi(e.to_string()))?;

        let df = build_close_frame(symbol, &quotes)?;

        // Apply rate limiting
        sleep(self.rate_limit_delay).await;

        Ok(df)
    }
}

impl Default for YahooQuoteProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert raw quotes into a `[date, close]` DataFrame.
///
/// Non-finite closes become nulls. Signals the per-symbol skip
/// conditions: empty response, no usable closes, too few observations.
fn build_close_frame(symbol: &str, quotes: &[yahoo::Quote]) -> Result<DataFrame> {
    if quotes.is_empty() {
        return Err(DataError::EmptyResponse {
            symbol: symbol.to_string(),
        });
    }

    let timestamps: Vec<i64> = quotes.iter().map(|q| q.timestamp).collect();
    let closes: Vec<Option<f64>> = quotes
        .iter()
        .map(|q| q.adjclose.is_finite().then_some(q.adjclose))
        .collect();

    let usable = closes.iter().flatten().count();
    if usable == 0 {
        return Err(DataError::NoUsableCloses {
            symbol: symbol.to_string(),
        });
    }
    if usable < 2 {
        return Err(DataError::TooFewObservations {
            symbol: symbol.to_string(),
            actual: usable,
        });
    }

    let df = DataFrame::new(vec![
        Series::new("timestamp".into(), timestamps).into(),
        Series::new("close".into(), closes).into(),
    ])?;

    // Convert timestamp to date
    let df = df
        .lazy()
        .with_column(
            (col("timestamp") * lit(1_000_000_000))
                .cast(DataType::Datetime(TimeUnit::Nanoseconds, None))
                .cast(DataType::Date)
                .alias("date"),
        )
        .select(&[col("date"), col("close")])
        .collect()?;

    Ok(df)
}
