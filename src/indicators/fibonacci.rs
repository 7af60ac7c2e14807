// =============================================================================
// Fibonacci Retracement Levels
// =============================================================================
//
// Candidate support/resistance lines between a period's extreme closes:
//
//   price(level) = high - level * (high - low)
//
// for the canonical fractions 0, 23.6%, 38.2%, 50%, 61.8%, 78.6%, 100%.
// Level prices are non-increasing as the fraction grows (0% sits at the
// high, 100% at the low). When `high == low` every level collapses onto
// the same price; the zone classifier reports that as a single-point range
// instead of dividing by the zero span.
// =============================================================================

use serde::Serialize;

/// The canonical retracement fractions, in ascending order.
pub const LEVELS: [f64; 7] = [0.0, 0.236, 0.382, 0.5, 0.618, 0.786, 1.0];

/// One retracement line: its fraction and the price it sits at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FibonacciLevel {
    pub level: f64,
    pub price: f64,
}

/// Compute the seven retracement levels between `high` and `low`
/// (the max/min close of the analysed range).
pub fn retracement_levels(high: f64, low: f64) -> Vec<FibonacciLevel> {
    let span = high - low;
    LEVELS
        .iter()
        .map(|&level| FibonacciLevel {
            level,
            price: high - level * span,
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retracement_reference_values() {
        // high = 120, low = 80: span 40, price = 120 - level * 40.
        let levels = retracement_levels(120.0, 80.0);
        let expected = [120.0, 110.56, 104.72, 100.0, 95.28, 88.56, 80.0];
        assert_eq!(levels.len(), 7);
        for (lvl, want) in levels.iter().zip(expected.iter()) {
            assert!(
                (lvl.price - want).abs() < 0.005,
                "level {} expected {want}, got {}",
                lvl.level,
                lvl.price
            );
        }
    }

    #[test]
    fn retracement_prices_non_increasing() {
        let levels = retracement_levels(57.3, 12.9);
        for pair in levels.windows(2) {
            assert!(pair[1].price <= pair[0].price);
        }
    }

    #[test]
    fn retracement_endpoints_are_extremes() {
        let levels = retracement_levels(120.0, 80.0);
        assert_eq!(levels[0].price, 120.0);
        assert_eq!(levels[6].price, 80.0);
    }

    #[test]
    fn degenerate_range_collapses_all_levels() {
        let levels = retracement_levels(42.0, 42.0);
        for lvl in levels {
            assert_eq!(lvl.price, 42.0);
        }
    }
}
