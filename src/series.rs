// =============================================================================
// Time series containers — Bar, TimeSeries, NumericSeries
// =============================================================================
//
// `TimeSeries` is the validated, immutable history of one instrument: bars
// sorted ascending by date with no duplicates, never empty. Every derived
// series is a `NumericSeries` aligned 1:1 with the source date axis.
//
// `NumericSeries` carries undefined-ness explicitly: a position whose
// defining window has insufficient history is `None`, not 0 and not NaN.
// Serialisation emits JSON `null` at those positions so the chart layer can
// gap the line instead of plotting a fake zero.
// =============================================================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

// =============================================================================
// Bar
// =============================================================================

/// One trading day of OHLCV data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub close: f64,
    pub volume: f64,
    pub high: f64,
    pub low: f64,
}

impl Bar {
    pub fn new(date: NaiveDate, close: f64, volume: f64, high: f64, low: f64) -> Self {
        Self {
            date,
            close,
            volume,
            high,
            low,
        }
    }
}

// =============================================================================
// TimeSeries
// =============================================================================

/// Ordered daily history of a single instrument. Construction validates the
/// date axis; afterwards the series is read-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    symbol: String,
    bars: Vec<Bar>,
}

impl TimeSeries {
    /// Build a validated series from externally supplied bars.
    ///
    /// Fails with `DataError` when `bars` is empty or the dates are not
    /// strictly increasing (unsorted input and duplicate dates both violate
    /// the ordering invariant).
    pub fn new(symbol: impl Into<String>, bars: Vec<Bar>) -> Result<Self, EngineError> {
        let symbol = symbol.into();

        if bars.is_empty() {
            return Err(EngineError::data(symbol, "empty series"));
        }

        for pair in bars.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(EngineError::data(
                    symbol,
                    format!(
                        "dates not strictly increasing: {} followed by {}",
                        pair[0].date, pair[1].date
                    ),
                ));
            }
        }

        Ok(Self { symbol, bars })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Number of bars. Never zero after construction.
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn last_bar(&self) -> &Bar {
        self.bars.last().expect("TimeSeries is never empty")
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume).collect()
    }
}

// =============================================================================
// NumericSeries
// =============================================================================

/// A derived (or raw) per-day value series aligned 1:1 with a `TimeSeries`
/// date axis. `None` marks positions where the defining window has
/// insufficient history or the arithmetic is degenerate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSeries(Vec<Option<f64>>);

impl NumericSeries {
    /// Wrap an already Option-valued vector.
    pub fn from_options(values: Vec<Option<f64>>) -> Self {
        Self(values)
    }

    /// Wrap a fully defined vector (every position `Some`).
    pub fn from_values(values: Vec<f64>) -> Self {
        Self(values.into_iter().map(Some).collect())
    }

    /// An all-undefined series of length `len`.
    pub fn undefined(len: usize) -> Self {
        Self(vec![None; len])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value at `index`, flattened: out-of-range and undefined both read as
    /// `None`.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied().flatten()
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.0.iter().copied()
    }

    /// The most recent defined value, if any position is defined at all.
    pub fn last_defined(&self) -> Option<f64> {
        self.0.iter().rev().find_map(|v| *v)
    }

    /// Index of the first defined position.
    pub fn first_defined_index(&self) -> Option<usize> {
        self.0.iter().position(|v| v.is_some())
    }

    /// Apply `op` position-wise against `other`. A position is defined in the
    /// output only where both inputs are defined.
    pub fn zip_with(&self, other: &NumericSeries, op: impl Fn(f64, f64) -> f64) -> NumericSeries {
        let values = self
            .0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| match (a, b) {
                (Some(a), Some(b)) => Some(op(*a, *b)),
                _ => None,
            })
            .collect();
        NumericSeries(values)
    }

    /// Apply `op` to every defined position.
    pub fn map(&self, op: impl Fn(f64) -> f64) -> NumericSeries {
        NumericSeries(self.0.iter().map(|v| v.map(&op)).collect())
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

    // ---- TimeSeries ------------------------------------------------------

    #[test]
    fn empty_bars_is_data_error() {
        let err = TimeSeries::new("KCHOL.IS", vec![]).unwrap_err();
        assert!(matches!(err, EngineError::Data { .. }));
        assert!(err.to_string().contains("KCHOL.IS"));
    }

    #[test]
    fn unsorted_dates_rejected() {
        let bars = vec![bar("2024-01-03", 10.0), bar("2024-01-02", 11.0)];
        let err = TimeSeries::new("TEST", bars).unwrap_err();
        assert!(matches!(err, EngineError::Data { .. }));
    }

    #[test]
    fn duplicate_dates_rejected() {
        let bars = vec![bar("2024-01-02", 10.0), bar("2024-01-02", 11.0)];
        assert!(TimeSeries::new("TEST", bars).is_err());
    }

    #[test]
    fn accessors_preserve_order() {
        let bars = vec![
            bar("2024-01-02", 10.0),
            bar("2024-01-03", 11.0),
            bar("2024-01-04", 12.0),
        ];
        let series = TimeSeries::new("TEST", bars).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.closes(), vec![10.0, 11.0, 12.0]);
        assert_eq!(series.last_bar().close, 12.0);
        assert_eq!(series.dates()[0], d("2024-01-02"));
    }

    // ---- NumericSeries ---------------------------------------------------

    #[test]
    fn last_defined_skips_trailing_none() {
        let s = NumericSeries::from_options(vec![None, Some(1.0), Some(2.0), None]);
        assert_eq!(s.last_defined(), Some(2.0));
        assert_eq!(s.first_defined_index(), Some(1));
    }

    #[test]
    fn zip_with_undefined_propagates() {
        let a = NumericSeries::from_options(vec![Some(1.0), None, Some(3.0)]);
        let b = NumericSeries::from_options(vec![Some(10.0), Some(20.0), None]);
        let sum = a.zip_with(&b, |x, y| x + y);
        assert_eq!(sum.values(), &[Some(11.0), None, None]);
    }

    #[test]
    fn serializes_undefined_as_null() {
        let s = NumericSeries::from_options(vec![None, Some(1.5)]);
        assert_eq!(serde_json::to_string(&s).unwrap(), "[null,1.5]");
    }
}
