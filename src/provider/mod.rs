// =============================================================================
// Market Data Provider — the input-contract boundary
// =============================================================================
//
// The engine never fetches data itself; it consumes ordered daily bars from
// a provider behind this trait. Implementations: the HTTP chart-API client
// in `http`, and the in-memory `StaticProvider` for tests and offline use.
//
// A provider returns either bars or a typed error; an empty result is the
// `NoData` error, never an empty Vec, so callers cannot accidentally build
// an empty `TimeSeries`.
// =============================================================================

pub mod http;

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::series::Bar;

/// Typed provider failures. `NoData` and `Http` are per-instrument and
/// recoverable at the batch level; `Malformed` usually indicates an API
/// contract change worth surfacing loudly.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    #[error("no data returned for {symbol}")]
    NoData { symbol: String },

    #[error("request failed for {symbol}: {reason}")]
    Http { symbol: String, reason: String },

    #[error("malformed response for {symbol}: {reason}")]
    Malformed { symbol: String, reason: String },
}

/// Source of daily OHLCV history for one instrument over a date range.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch bars for `symbol` with `start <= date <= end`, oldest first.
    async fn daily_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Bar>, ProviderError>;
}

// =============================================================================
// StaticProvider
// =============================================================================

/// In-memory provider backed by pre-loaded bar series. Used by tests and as
/// an offline data source.
#[derive(Debug, Default)]
pub struct StaticProvider {
    series: HashMap<String, Vec<Bar>>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `bars` (oldest first) under `symbol`.
    pub fn insert(&mut self, symbol: impl Into<String>, bars: Vec<Bar>) {
        self.series.insert(symbol.into(), bars);
    }
}

#[async_trait]
impl MarketDataProvider for StaticProvider {
    async fn daily_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Bar>, ProviderError> {
        let bars: Vec<Bar> = self
            .series
            .get(symbol)
            .map(|bars| {
                bars.iter()
                    .filter(|b| b.date >= start && b.date <= end)
                    .copied()
                    .collect()
            })
            .unwrap_or_default();

        if bars.is_empty() {
            return Err(ProviderError::NoData {
                symbol: symbol.to_string(),
            });
        }
        Ok(bars)
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn bar(date: &str, close: f64) -> Bar {
        Bar::new(d(date), close, 1_000.0, close + 1.0, close - 1.0)
    }

    #[tokio::test]
    async fn static_provider_filters_by_range() {
        let mut provider = StaticProvider::new();
        provider.insert(
            "TEST",
            vec![
                bar("2024-01-01", 1.0),
                bar("2024-01-02", 2.0),
                bar("2024-01-03", 3.0),
            ],
        );

        let bars = provider
            .daily_history("TEST", d("2024-01-02"), d("2024-01-03"))
            .await
            .unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].close, 2.0);
    }

    #[tokio::test]
    async fn unknown_symbol_is_no_data() {
        let provider = StaticProvider::new();
        let err = provider
            .daily_history("MISSING", d("2024-01-01"), d("2024-12-31"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::NoData { .. }));
    }

    #[tokio::test]
    async fn empty_range_is_no_data() {
        let mut provider = StaticProvider::new();
        provider.insert("TEST", vec![bar("2024-06-01", 1.0)]);
        let err = provider
            .daily_history("TEST", d("2024-01-01"), d("2024-02-01"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::NoData { .. }));
    }
}
