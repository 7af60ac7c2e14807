// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the derived analytic series.
// Every rolling operation threads explicit undefined-ness through
// `NumericSeries`: a position whose defining window has insufficient history
// is `None`, and callers are forced to handle it rather than receiving a
// silent 0 or NaN.

pub mod bollinger;
pub mod ema;
pub mod fibonacci;
pub mod ichimoku;
pub mod macd;
pub mod rolling;
pub mod rsi;
