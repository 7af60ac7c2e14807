// =============================================================================
// Bollinger Bands
// =============================================================================
//
// A middle band (SMA) flanked by bands at ± `num_std` sample standard
// deviations:
//
//   mid   = sma(close, window)
//   upper = mid + num_std * std
//   lower = mid - num_std * std
//
// Wherever defined, `lower <= mid <= upper` holds because std >= 0 and
// `num_std` is validated non-negative. All three series share the source
// date axis and are undefined before the window fills.
// =============================================================================

use serde::Serialize;

use crate::error::EngineError;
use crate::indicators::rolling;
use crate::series::NumericSeries;

/// The three Bollinger band series, aligned with the source closes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BollingerBands {
    pub middle: NumericSeries,
    pub upper: NumericSeries,
    pub lower: NumericSeries,
}

/// Compute Bollinger Bands over `closes`.
///
/// `window == 0` and `num_std < 0` are `ConfigError`s; an empty input
/// yields empty band series.
pub fn bollinger(
    closes: &[f64],
    window: usize,
    num_std: f64,
) -> Result<BollingerBands, EngineError> {
    if num_std < 0.0 {
        return Err(EngineError::config(
            "bollinger.num_std",
            "must be non-negative",
        ));
    }

    let source = NumericSeries::from_values(closes.to_vec());
    let middle = rolling::sma(&source, window)?;
    let std = rolling::rolling_std(&source, window)?;

    let upper = middle.zip_with(&std, |m, s| m + num_std * s);
    let lower = middle.zip_with(&std, |m, s| m - num_std * s);

    Ok(BollingerBands {
        middle,
        upper,
        lower,
    })
}
