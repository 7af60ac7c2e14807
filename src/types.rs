// =============================================================================
// Shared classification labels
// =============================================================================
//
// Discrete labels produced by the zone classifier and rendered as dashboard
// cards. `Display` gives the user-facing wording; `Serialize` the wire form.
// =============================================================================

use serde::{Deserialize, Serialize};

/// Directional trend state. Produced both by the MA20/MA50 comparison and by
/// the Ichimoku cloud test (which is the only producer of `Neutral`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendLabel {
    Bullish,
    Bearish,
    Neutral,
}

impl std::fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bullish => write!(f, "Bullish"),
            Self::Bearish => write!(f, "Bearish"),
            Self::Neutral => write!(f, "Neutral"),
        }
    }
}

/// RSI classification: above 70 overbought, below 30 oversold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RsiStatus {
    Overbought,
    Oversold,
    Normal,
}

impl std::fmt::Display for RsiStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overbought => write!(f, "Overbought"),
            Self::Oversold => write!(f, "Oversold"),
            Self::Normal => write!(f, "Normal"),
        }
    }
}

/// Position of the latest price relative to the Bollinger Bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BollingerPosition {
    AboveUpper,
    BelowLower,
    Between,
}

impl std::fmt::Display for BollingerPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AboveUpper => write!(f, "Above upper band"),
            Self::BelowLower => write!(f, "Below lower band"),
            Self::Between => write!(f, "Between bands"),
        }
    }
}

/// Fibonacci retracement zone of the latest price.
///
/// `Band` carries the bounding level fractions (e.g. `upper: 0.236,
/// lower: 0.382` means the price sits between the 23.6% and 38.2% lines).
/// `SinglePoint` is the degenerate zero-range case where every level price
/// coincides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "zone")]
pub enum FibonacciZone {
    AboveResistance,
    Band { upper: f64, lower: f64 },
    BelowSupport,
    SinglePoint,
}

impl std::fmt::Display for FibonacciZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AboveResistance => write!(f, "above 0% (resistance)"),
            Self::Band { upper, lower } => {
                write!(f, "{:.1}% - {:.1}%", upper * 100.0, lower * 100.0)
            }
            Self::BelowSupport => write!(f, "below 100% (support)"),
            Self::SinglePoint => write!(f, "single-point range"),
        }
    }
}
