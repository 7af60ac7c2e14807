// =============================================================================
// QuoteLens — Technical Analysis Engine
// =============================================================================
//
// Computes derived analytic series (moving averages, oscillators, bands,
// trend-cloud boundaries) and classification labels (trend state,
// overbought/oversold, crossover events, retracement zone) from a single
// instrument's daily OHLCV history, plus a trailing-return comparison across
// an independent instrument set.
//
// The engine itself is synchronous and stateless: every analysis request
// builds a fresh `TimeSeries` and derives an `IndicatorSnapshot` from it.
// Undefined positions (insufficient window history, degenerate arithmetic)
// are explicit `None` values inside `NumericSeries`, never NaN and never a
// sentinel. The only async component is the returns comparator, which fans
// out one provider fetch per comparison instrument.
// =============================================================================

pub mod api;
pub mod app_state;
pub mod config;
pub mod crossover;
pub mod error;
pub mod indicators;
pub mod provider;
pub mod returns;
pub mod series;
pub mod snapshot;
pub mod types;
pub mod zones;

pub use config::AnalysisConfig;
pub use error::EngineError;
pub use series::{Bar, NumericSeries, TimeSeries};
pub use snapshot::{build_snapshot, IndicatorSnapshot};
