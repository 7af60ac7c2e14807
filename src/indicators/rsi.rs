// =============================================================================
// Relative Strength Index (RSI) — simple rolling mean variant
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes to evaluate
// whether an instrument is overbought or oversold.
//
// Step 1 — delta[t] = close[t] - close[t-1]  (undefined at t = 0)
// Step 2 — gain[t] = max(delta[t], 0),  loss[t] = max(-delta[t], 0)
// Step 3 — avg_gain = sma(gain, period),  avg_loss = sma(loss, period)
// Step 4 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// The averages are plain rolling means, NOT Wilder's smoothing; this is the
// reference behaviour and must not be "corrected". Because the delta series
// is undefined at index 0, the first defined RSI lands at index `period`.
//
// Degenerate windows: avg_loss == 0 with avg_gain > 0 pins RSI to 100;
// a completely flat window (both averages zero) is undefined and stays
// `None` rather than defaulting to 0 or 50.
// =============================================================================

use crate::error::EngineError;
use crate::indicators::rolling;
use crate::series::NumericSeries;

/// Compute the full RSI series for the given `closes` and `period`.
///
/// The output is aligned 1:1 with the input; every value is in [0, 100]
/// wherever defined.
pub fn rsi(closes: &[f64], period: usize) -> Result<NumericSeries, EngineError> {
    if period == 0 {
        return Err(EngineError::config(
            "rsi_period",
            "must be greater than zero",
        ));
    }

    let deltas = rolling::diff(closes);
    let gains = deltas.map(|d| d.max(0.0));
    let losses = deltas.map(|d| (-d).max(0.0));

    let avg_gain = rolling::sma(&gains, period)?;
    let avg_loss = rolling::sma(&losses, period)?;

    let values = (0..closes.len())
        .map(|i| match (avg_gain.get(i), avg_loss.get(i)) {
            (Some(gain), Some(loss)) => {
                if loss == 0.0 {
                    // All gains: pinned to 100. No movement at all: undefined.
                    if gain > 0.0 {
                        Some(100.0)
                    } else {
                        None
                    }
                } else {
                    let rs = gain / loss;
                    Some(100.0 - 100.0 / (1.0 + rs))
                }
            }
            _ => None,
        })
        .collect();

    Ok(NumericSeries::from_options(values))
}
