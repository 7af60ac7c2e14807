// =============================================================================
// Rolling-window operations — causal SMA / min / max / std / diff
// =============================================================================
//
// All operations are causal: the value at index i depends only on the
// trailing window ending at i, never on future samples.
//
// Undefined propagation:
//   - `sma` and `rolling_std` require a full window of defined values; any
//     `None` inside the window makes the output `None`.
//   - `rolling_min` / `rolling_max` count only defined samples against
//     `min_periods`, so with `min_periods = 1` they are defined from the
//     first sample and the window widens up to `window`.
//
// `window == 0` is a `ConfigError`; an empty input series yields an empty
// output, not an error.
// =============================================================================

use crate::error::EngineError;
use crate::series::NumericSeries;

/// Collect the trailing window ending at `index` as defined values only.
/// Returns `(defined_values, slots_in_window)`.
fn trailing_window(
    series: &NumericSeries,
    index: usize,
    window: usize,
) -> (Vec<f64>, usize) {
    let lo = (index + 1).saturating_sub(window);
    let slots = index + 1 - lo;
    let defined = series.values()[lo..=index]
        .iter()
        .filter_map(|v| *v)
        .collect();
    (defined, slots)
}

/// Simple moving average over a trailing `window`.
///
/// Defined at index i only when `i >= window - 1` and every value in the
/// window is defined; the value is the arithmetic mean of the last `window`
/// samples.
pub fn sma(series: &NumericSeries, window: usize) -> Result<NumericSeries, EngineError> {
    if window == 0 {
        return Err(EngineError::config("window", "must be greater than zero"));
    }

    let values = (0..series.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            let (defined, slots) = trailing_window(series, i, window);
            if defined.len() < slots {
                return None;
            }
            Some(defined.iter().sum::<f64>() / window as f64)
        })
        .collect();

    Ok(NumericSeries::from_options(values))
}

/// Rolling minimum over a trailing `window`, defined once at least
/// `min_periods` samples in the window are defined.
pub fn rolling_min(
    series: &NumericSeries,
    window: usize,
    min_periods: usize,
) -> Result<NumericSeries, EngineError> {
    rolling_extremum(series, window, min_periods, f64::min)
}

/// Rolling maximum over a trailing `window`, defined once at least
/// `min_periods` samples in the window are defined.
pub fn rolling_max(
    series: &NumericSeries,
    window: usize,
    min_periods: usize,
) -> Result<NumericSeries, EngineError> {
    rolling_extremum(series, window, min_periods, f64::max)
}

fn rolling_extremum(
    series: &NumericSeries,
    window: usize,
    min_periods: usize,
    pick: impl Fn(f64, f64) -> f64,
) -> Result<NumericSeries, EngineError> {
    if window == 0 {
        return Err(EngineError::config("window", "must be greater than zero"));
    }
    if min_periods == 0 || min_periods > window {
        return Err(EngineError::config(
            "min_periods",
            format!("must be in 1..={window}"),
        ));
    }

    let values = (0..series.len())
        .map(|i| {
            let (defined, _) = trailing_window(series, i, window);
            if defined.len() < min_periods {
                return None;
            }
            defined.into_iter().reduce(&pick)
        })
        .collect();

    Ok(NumericSeries::from_options(values))
}

/// Sample standard deviation (n − 1 denominator) over a trailing `window`.
///
/// Undefined before `window` samples and everywhere when `window == 1`
/// (the sample variance of a single observation is undefined). A window of
/// identical values yields exactly 0.
pub fn rolling_std(series: &NumericSeries, window: usize) -> Result<NumericSeries, EngineError> {
    if window == 0 {
        return Err(EngineError::config("window", "must be greater than zero"));
    }

    let values = (0..series.len())
        .map(|i| {
            if i + 1 < window || window == 1 {
                return None;
            }
            let (defined, slots) = trailing_window(series, i, window);
            if defined.len() < slots {
                return None;
            }
            let mean = defined.iter().sum::<f64>() / window as f64;
            let var = defined
                .iter()
                .map(|x| (x - mean) * (x - mean))
                .sum::<f64>()
                / (window - 1) as f64;
            Some(var.sqrt())
        })
        .collect();

    Ok(NumericSeries::from_options(values))
}

/// Per-index difference series: `out[i] = values[i] - values[i-1]`,
/// undefined at index 0. Feeds both the RSI gain/loss decomposition and the
/// daily volume-delta chart.
pub fn diff(values: &[f64]) -> NumericSeries {
    let out = (0..values.len())
        .map(|i| {
            if i == 0 {
                None
            } else {
                Some(values[i] - values[i - 1])
            }
        })
        .collect();
    NumericSeries::from_options(out)
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn defined(values: &[f64]) -> NumericSeries {
        NumericSeries::from_values(values.to_vec())
    }

    // ---- sma -------------------------------------------------------------

    #[test]
    fn sma_window_zero_is_config_error() {
        let err = sma(&defined(&[1.0, 2.0]), 0).unwrap_err();
        assert!(matches!(err, EngineError::Config { .. }));
    }

    #[test]
    fn sma_empty_input_yields_empty_output() {
        let out = sma(&NumericSeries::from_values(vec![]), 5).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn sma_undefined_before_window_minus_one() {
        let out = sma(&defined(&[1.0, 2.0, 3.0, 4.0, 5.0]), 3).unwrap();
        assert_eq!(out.get(0), None);
        assert_eq!(out.get(1), None);
        assert_eq!(out.get(2), Some(2.0));
        assert_eq!(out.get(3), Some(3.0));
        assert_eq!(out.get(4), Some(4.0));
    }

    #[test]
    fn sma_window_longer_than_series_is_all_undefined() {
        let out = sma(&defined(&[1.0, 2.0]), 5).unwrap();
        assert_eq!(out.values(), &[None, None]);
    }

    #[test]
    fn sma_undefined_input_poisons_window() {
        // A None at index 1 makes every window containing it undefined.
        let input = NumericSeries::from_options(vec![Some(1.0), None, Some(3.0), Some(5.0)]);
        let out = sma(&input, 2).unwrap();
        assert_eq!(out.values(), &[None, None, None, Some(4.0)]);
    }

    // ---- rolling_min / rolling_max ---------------------------------------

    #[test]
    fn rolling_extremum_min_periods_one_defined_from_first_sample() {
        let out = rolling_min(&defined(&[5.0, 3.0, 4.0, 1.0]), 3, 1).unwrap();
        assert_eq!(out.values(), &[Some(5.0), Some(3.0), Some(3.0), Some(1.0)]);
    }

    #[test]
    fn rolling_max_widening_window() {
        let out = rolling_max(&defined(&[1.0, 4.0, 2.0, 3.0]), 3, 1).unwrap();
        assert_eq!(out.values(), &[Some(1.0), Some(4.0), Some(4.0), Some(4.0)]);
    }

    #[test]
    fn rolling_max_full_min_periods_waits_for_window() {
        let out = rolling_max(&defined(&[1.0, 4.0, 2.0, 3.0]), 3, 3).unwrap();
        assert_eq!(out.values(), &[None, None, Some(4.0), Some(4.0)]);
    }

    #[test]
    fn rolling_min_skips_undefined_samples() {
        let input = NumericSeries::from_options(vec![None, Some(2.0), Some(4.0)]);
        let out = rolling_min(&input, 3, 1).unwrap();
        assert_eq!(out.values(), &[None, Some(2.0), Some(2.0)]);
    }

    #[test]
    fn rolling_extremum_invalid_min_periods() {
        assert!(rolling_min(&defined(&[1.0]), 3, 0).is_err());
        assert!(rolling_min(&defined(&[1.0]), 3, 4).is_err());
    }

    // ---- rolling_std -----------------------------------------------------

    #[test]
    fn rolling_std_known_value() {
        // Sample std of [1, 2, 3, 4]: mean 2.5, var (2.25+0.25+0.25+2.25)/3.
        let out = rolling_std(&defined(&[1.0, 2.0, 3.0, 4.0]), 4).unwrap();
        let expected = (5.0_f64 / 3.0).sqrt();
        assert!((out.get(3).unwrap() - expected).abs() < 1e-12);
        assert_eq!(out.get(2), None);
    }

    #[test]
    fn rolling_std_equal_values_is_zero() {
        let out = rolling_std(&defined(&[7.0; 5]), 3).unwrap();
        assert_eq!(out.get(4), Some(0.0));
    }

    #[test]
    fn rolling_std_window_one_is_undefined() {
        let out = rolling_std(&defined(&[1.0, 2.0, 3.0]), 1).unwrap();
        assert_eq!(out.values(), &[None, None, None]);
    }

    // ---- diff ------------------------------------------------------------

    #[test]
    fn diff_undefined_at_first_index() {
        let out = diff(&[10.0, 12.0, 11.0]);
        assert_eq!(out.values(), &[None, Some(2.0), Some(-1.0)]);
    }

    #[test]
    fn diff_empty_input() {
        assert!(diff(&[]).is_empty());
    }
}
