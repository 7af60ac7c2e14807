// =============================================================================
// Exponential Moving Average (EMA) — span-based recurrence
// =============================================================================
//
// EMA gives more weight to recent prices, making it more responsive to new
// information than the Simple Moving Average.
//
// Formula:
//   alpha  = 2 / (span + 1)
//   ema[0] = value[0]
//   ema[t] = value[t] * alpha + ema[t-1] * (1 - alpha)
//
// Unlike the rolling-window operations, every output index is defined from
// the first sample: the recurrence seeds with the raw first value, there is
// no warm-up region and no centered or "adjusted" weighting. Downstream
// consumers (MACD and its signal line) rely on this exact recurrence.
// =============================================================================

use crate::error::EngineError;

/// Compute the EMA series for fully defined input `values` and smoothing
/// `span`.
///
/// The output has the same length as the input, defined at every index.
/// `span == 0` is a `ConfigError`; an empty input yields an empty output.
pub fn ema(values: &[f64], span: usize) -> Result<Vec<f64>, EngineError> {
    if span == 0 {
        return Err(EngineError::config("span", "must be greater than zero"));
    }

    let alpha = 2.0 / (span + 1) as f64;

    let mut result = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;

    for &value in values {
        let next = match prev {
            None => value,
            Some(p) => value * alpha + p * (1.0 - alpha),
        };
        result.push(next);
        prev = Some(next);
    }

    Ok(result)
}
