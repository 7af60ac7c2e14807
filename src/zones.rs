// =============================================================================
// Zone Classifier — current value against band/level thresholds
// =============================================================================
//
// Maps the most recent defined value of an indicator family to the discrete
// label the dashboard cards render. All classifiers are pure functions of
// their inputs; the snapshot builder decides which values to feed them.
// =============================================================================

use crate::indicators::fibonacci::FibonacciLevel;
use crate::types::{BollingerPosition, FibonacciZone, RsiStatus, TrendLabel};

/// RSI status: above 70 overbought, below 30 oversold, otherwise normal.
/// The thresholds themselves classify as normal.
pub fn rsi_status(value: f64) -> RsiStatus {
    if value > 70.0 {
        RsiStatus::Overbought
    } else if value < 30.0 {
        RsiStatus::Oversold
    } else {
        RsiStatus::Normal
    }
}

/// Position of `price` relative to the Bollinger Bands. Collapsed bands
/// (flat window, upper == lower) classify as `Between`.
pub fn bollinger_position(price: f64, upper: f64, lower: f64) -> BollingerPosition {
    if price > upper {
        BollingerPosition::AboveUpper
    } else if price < lower {
        BollingerPosition::BelowLower
    } else {
        BollingerPosition::Between
    }
}

/// Ichimoku trend: bullish above both leading spans, bearish below both,
/// neutral inside the cloud (or touching either span).
pub fn ichimoku_trend(price: f64, span_a: f64, span_b: f64) -> TrendLabel {
    if price > span_a && price > span_b {
        TrendLabel::Bullish
    } else if price < span_a && price < span_b {
        TrendLabel::Bearish
    } else {
        TrendLabel::Neutral
    }
}

/// Classify `price` into a Fibonacci retracement zone.
///
/// `levels` must be the seven canonical levels in ascending level-fraction
/// order (prices non-increasing). The price falls into the half-open band
/// `(levels[i+1].price, levels[i].price]` for the first `i` that fits;
/// above the 0% price it is resistance territory, at or below the 100%
/// price it is support territory. A zero-range history (all level prices
/// equal) reports a single-point zone without dividing by anything.
pub fn fibonacci_zone(price: f64, levels: &[FibonacciLevel]) -> FibonacciZone {
    let (Some(first), Some(last)) = (levels.first(), levels.last()) else {
        return FibonacciZone::SinglePoint;
    };

    if first.price == last.price {
        return FibonacciZone::SinglePoint;
    }

    for pair in levels.windows(2) {
        if price <= pair[0].price && price > pair[1].price {
            return FibonacciZone::Band {
                upper: pair[0].level,
                lower: pair[1].level,
            };
        }
    }

    if price > first.price {
        FibonacciZone::AboveResistance
    } else {
        FibonacciZone::BelowSupport
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::fibonacci::retracement_levels;

    // ---- rsi_status ------------------------------------------------------

    #[test]
    fn rsi_thresholds_are_exclusive() {
        assert_eq!(rsi_status(70.0), RsiStatus::Normal);
        assert_eq!(rsi_status(70.1), RsiStatus::Overbought);
        assert_eq!(rsi_status(30.0), RsiStatus::Normal);
        assert_eq!(rsi_status(29.9), RsiStatus::Oversold);
        assert_eq!(rsi_status(50.0), RsiStatus::Normal);
    }

    // ---- bollinger_position ----------------------------------------------

    #[test]
    fn bollinger_position_bands() {
        assert_eq!(bollinger_position(11.0, 10.0, 8.0), BollingerPosition::AboveUpper);
        assert_eq!(bollinger_position(7.0, 10.0, 8.0), BollingerPosition::BelowLower);
        assert_eq!(bollinger_position(9.0, 10.0, 8.0), BollingerPosition::Between);
    }

    #[test]
    fn bollinger_collapsed_bands_classify_between() {
        assert_eq!(bollinger_position(50.0, 50.0, 50.0), BollingerPosition::Between);
    }

    // ---- ichimoku_trend --------------------------------------------------

    #[test]
    fn ichimoku_trend_against_cloud() {
        assert_eq!(ichimoku_trend(12.0, 10.0, 11.0), TrendLabel::Bullish);
        assert_eq!(ichimoku_trend(9.0, 10.0, 11.0), TrendLabel::Bearish);
        assert_eq!(ichimoku_trend(10.5, 10.0, 11.0), TrendLabel::Neutral);
        assert_eq!(ichimoku_trend(10.0, 10.0, 11.0), TrendLabel::Neutral);
    }

    // ---- fibonacci_zone --------------------------------------------------

    #[test]
    fn fibonacci_zone_band_boundaries_are_half_open() {
        let levels = retracement_levels(120.0, 80.0);
        // 100.0 sits exactly on the 50% line: belongs to the (61.8%, 50%]
        // band below it, not the band above.
        assert_eq!(
            fibonacci_zone(100.0, &levels),
            FibonacciZone::Band {
                upper: 0.5,
                lower: 0.618
            }
        );
        assert_eq!(
            fibonacci_zone(105.0, &levels),
            FibonacciZone::Band {
                upper: 0.236,
                lower: 0.382
            }
        );
    }

    #[test]
    fn fibonacci_zone_extremes() {
        let levels = retracement_levels(120.0, 80.0);
        assert_eq!(fibonacci_zone(125.0, &levels), FibonacciZone::AboveResistance);
        assert_eq!(fibonacci_zone(75.0, &levels), FibonacciZone::BelowSupport);
        // The high itself belongs to the top band.
        assert_eq!(
            fibonacci_zone(120.0, &levels),
            FibonacciZone::Band {
                upper: 0.0,
                lower: 0.236
            }
        );
        // The low sits on the 100% line, which is support territory.
        assert_eq!(fibonacci_zone(80.0, &levels), FibonacciZone::BelowSupport);
    }

    #[test]
    fn fibonacci_zone_degenerate_range() {
        let levels = retracement_levels(42.0, 42.0);
        assert_eq!(fibonacci_zone(42.0, &levels), FibonacciZone::SinglePoint);
    }
}
