// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
//   macd      = ema(close, fast) - ema(close, slow)
//   signal    = ema(macd, signal_span)
//   histogram = macd - signal
//
// Because the EMA recurrence is defined from its first sample, all three
// series are defined at every index. The histogram sign flip is the trend
// reversal signal the dashboard highlights.
// =============================================================================

use serde::Serialize;

use crate::error::EngineError;
use crate::indicators::ema::ema;
use crate::series::NumericSeries;

/// MACD line, signal line, and histogram, aligned with the source closes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Macd {
    pub macd: NumericSeries,
    pub signal: NumericSeries,
    pub histogram: NumericSeries,
}

/// Compute MACD over `closes` with the given spans (conventionally 12/26/9).
///
/// A zero span is a `ConfigError`; empty input yields empty series.
pub fn macd(
    closes: &[f64],
    fast: usize,
    slow: usize,
    signal_span: usize,
) -> Result<Macd, EngineError> {
    let ema_fast = ema(closes, fast)?;
    let ema_slow = ema(closes, slow)?;

    let macd_line: Vec<f64> = ema_fast
        .iter()
        .zip(ema_slow.iter())
        .map(|(f, s)| f - s)
        .collect();

    let signal_line = ema(&macd_line, signal_span)?;

    let histogram: Vec<f64> = macd_line
        .iter()
        .zip(signal_line.iter())
        .map(|(m, s)| m - s)
        .collect();

    Ok(Macd {
        macd: NumericSeries::from_values(macd_line),
        signal: NumericSeries::from_values(signal_line),
        histogram: NumericSeries::from_values(histogram),
    })
}
