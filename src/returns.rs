// =============================================================================
// Returns Comparator — trailing-period return across an instrument basket
// =============================================================================
//
// For the target instrument plus a fixed comparison basket (indices,
// commodities, crypto), fetches a trailing price history per instrument and
// computes
//
//   return% = (last - first) / first * 100
//
// Every instrument is fetched concurrently with its own timeout. A failed,
// timed-out, or empty fetch logs a warning and omits that instrument; the
// remaining records are unaffected. Partial results are a normal outcome,
// not an error state.
// =============================================================================

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use futures_util::future::join_all;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{ComparisonInstrument, ReturnsParams};
use crate::provider::MarketDataProvider;

/// One instrument's trailing-period return.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnRecord {
    pub label: String,
    pub symbol: String,
    pub return_pct: f64,
}

/// Computes trailing returns across the configured comparison basket.
pub struct ReturnsComparator {
    provider: Arc<dyn MarketDataProvider>,
    lookback_days: i64,
    fetch_timeout: Duration,
    comparison: Vec<ComparisonInstrument>,
}

impl ReturnsComparator {
    pub fn new(provider: Arc<dyn MarketDataProvider>, params: &ReturnsParams) -> Self {
        Self {
            provider,
            lookback_days: params.lookback_days,
            fetch_timeout: Duration::from_secs(params.fetch_timeout_secs),
            comparison: params.comparison.clone(),
        }
    }

    /// Compute returns for `target` plus the comparison basket, trailing
    /// back `lookback_days` from `as_of`. Instruments whose data cannot be
    /// fetched are simply absent from the result.
    pub async fn compare(
        &self,
        target: &ComparisonInstrument,
        as_of: NaiveDate,
    ) -> Vec<ReturnRecord> {
        let start = as_of - chrono::Duration::days(self.lookback_days);

        // The target leads; a basket entry with the same symbol would be a
        // duplicate row.
        let instruments: Vec<&ComparisonInstrument> = std::iter::once(target)
            .chain(
                self.comparison
                    .iter()
                    .filter(|inst| inst.symbol != target.symbol),
            )
            .collect();

        let fetches = instruments
            .iter()
            .map(|inst| self.trailing_return(inst, start, as_of));

        let records: Vec<ReturnRecord> = join_all(fetches).await.into_iter().flatten().collect();

        debug!(
            requested = instruments.len(),
            resolved = records.len(),
            "return comparison complete"
        );
        records
    }

    /// Fetch one instrument and compute its return. `None` means the
    /// instrument is omitted from the comparison.
    async fn trailing_return(
        &self,
        inst: &ComparisonInstrument,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Option<ReturnRecord> {
        let fetched = tokio::time::timeout(
            self.fetch_timeout,
            self.provider.daily_history(&inst.symbol, start, end),
        )
        .await;

        let bars = match fetched {
            Err(_) => {
                warn!(symbol = %inst.symbol, "return comparison fetch timed out — instrument omitted");
                return None;
            }
            Ok(Err(e)) => {
                warn!(symbol = %inst.symbol, error = %e, "return comparison fetch failed — instrument omitted");
                return None;
            }
            Ok(Ok(bars)) => bars,
        };

        let first = bars.first()?.close;
        let last = bars.last()?.close;

        if first == 0.0 {
            warn!(symbol = %inst.symbol, "first price is zero — instrument omitted");
            return None;
        }

        Some(ReturnRecord {
            label: inst.label.clone(),
            symbol: inst.symbol.clone(),
            return_pct: (last - first) / first * 100.0,
        })
    }
}

/// Order records ascending by return for display. Ordering is a presentation
/// concern; the record set itself is unordered.
pub fn sorted_ascending(mut records: Vec<ReturnRecord>) -> Vec<ReturnRecord> {
    records.sort_by(|a, b| {
        a.return_pct
            .partial_cmp(&b.return_pct)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    records
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::StaticProvider;
    use crate::series::Bar;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    /// A two-bar year: first price at the range start, last at the end.
    fn year_bars(first: f64, last: f64) -> Vec<Bar> {
        vec![
            Bar::new(d("2024-01-10"), first, 0.0, first, first),
            Bar::new(d("2024-12-20"), last, 0.0, last, last),
        ]
    }

    fn comparator(provider: StaticProvider, basket: &[(&str, &str)]) -> ReturnsComparator {
        let params = ReturnsParams {
            lookback_days: 365,
            fetch_timeout_secs: 5,
            comparison: basket
                .iter()
                .map(|(label, symbol)| ComparisonInstrument::new(*label, *symbol))
                .collect(),
        };
        ReturnsComparator::new(Arc::new(provider), &params)
    }

    #[tokio::test]
    async fn ten_percent_gain_reference_case() {
        let mut provider = StaticProvider::new();
        provider.insert("A", year_bars(100.0, 110.0));

        let comparator = comparator(provider, &[]);
        let records = comparator
            .compare(&ComparisonInstrument::new("A", "A"), d("2024-12-31"))
            .await;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].symbol, "A");
        assert!((records[0].return_pct - 10.0).abs() < 1e-10);
    }

    #[tokio::test]
    async fn failing_instrument_does_not_affect_others() {
        let mut provider = StaticProvider::new();
        provider.insert("A", year_bars(100.0, 110.0));
        provider.insert("GOLD", year_bars(50.0, 40.0));
        // "MISSING" has no data registered.

        let comparator = comparator(provider, &[("Gold", "GOLD"), ("Missing", "MISSING")]);
        let records = comparator
            .compare(&ComparisonInstrument::new("A", "A"), d("2024-12-31"))
            .await;

        assert_eq!(records.len(), 2);
        assert!(records.iter().any(|r| r.symbol == "A"));
        assert!(records.iter().any(|r| r.symbol == "GOLD"));
        assert!(!records.iter().any(|r| r.symbol == "MISSING"));
    }

    #[tokio::test]
    async fn zero_first_price_is_omitted() {
        let mut provider = StaticProvider::new();
        provider.insert("ZERO", year_bars(0.0, 10.0));

        let comparator = comparator(provider, &[]);
        let records = comparator
            .compare(&ComparisonInstrument::new("Zero", "ZERO"), d("2024-12-31"))
            .await;
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn target_duplicated_in_basket_appears_once() {
        let mut provider = StaticProvider::new();
        provider.insert("A", year_bars(100.0, 120.0));

        let comparator = comparator(provider, &[("A again", "A")]);
        let records = comparator
            .compare(&ComparisonInstrument::new("A", "A"), d("2024-12-31"))
            .await;
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn sorted_ascending_orders_by_return() {
        let records = vec![
            ReturnRecord {
                label: "B".into(),
                symbol: "B".into(),
                return_pct: 5.0,
            },
            ReturnRecord {
                label: "A".into(),
                symbol: "A".into(),
                return_pct: -3.0,
            },
            ReturnRecord {
                label: "C".into(),
                symbol: "C".into(),
                return_pct: 12.0,
            },
        ];
        let sorted = sorted_ascending(records);
        assert_eq!(sorted[0].symbol, "A");
        assert_eq!(sorted[2].symbol, "C");
    }
}
