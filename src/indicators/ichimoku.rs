// =============================================================================
// Ichimoku Cloud — rolling-extrema trend lines
// =============================================================================
//
//   tenkan = (max(high, 9)  + min(low, 9))  / 2    conversion line
//   kijun  = (max(high, 26) + min(low, 26)) / 2    base line
//   spanA  = (tenkan + kijun) / 2                  leading span A
//   spanB  = (max(high, 52) + min(low, 52)) / 2    leading span B
//
// Every rolling extremum uses a full window (min_periods == window), so
// each line becomes defined once its window fills; spanA inherits the
// kijun warm-up. Spans are kept on the source date axis (not displaced
// forward) so all snapshot series share one axis.
//
// Trend classification against the two spans lives in the zone classifier.
// =============================================================================

use serde::Serialize;

use crate::config::IchimokuParams;
use crate::error::EngineError;
use crate::indicators::rolling::{rolling_max, rolling_min};
use crate::series::NumericSeries;

/// The four Ichimoku series, aligned with the source highs/lows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ichimoku {
    pub tenkan: NumericSeries,
    pub kijun: NumericSeries,
    pub span_a: NumericSeries,
    pub span_b: NumericSeries,
}

/// Midpoint of the rolling high/low extrema over `window`.
fn midline(
    highs: &NumericSeries,
    lows: &NumericSeries,
    window: usize,
) -> Result<NumericSeries, EngineError> {
    let hi = rolling_max(highs, window, window)?;
    let lo = rolling_min(lows, window, window)?;
    Ok(hi.zip_with(&lo, |h, l| (h + l) / 2.0))
}

/// Compute the Ichimoku lines over aligned `highs` and `lows`.
///
/// The slices must be equally long (they come from one bar series). A zero
/// window is a `ConfigError`.
pub fn ichimoku(
    highs: &[f64],
    lows: &[f64],
    params: &IchimokuParams,
) -> Result<Ichimoku, EngineError> {
    let highs = NumericSeries::from_values(highs.to_vec());
    let lows = NumericSeries::from_values(lows.to_vec());

    let tenkan = midline(&highs, &lows, params.tenkan)?;
    let kijun = midline(&highs, &lows, params.kijun)?;
    let span_a = tenkan.zip_with(&kijun, |t, k| (t + k) / 2.0);
    let span_b = midline(&highs, &lows, params.span_b)?;

    Ok(Ichimoku {
        tenkan,
        kijun,
        span_a,
        span_b,
    })
}
