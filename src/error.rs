// =============================================================================
// Engine errors
// =============================================================================
//
// Two fatal kinds only:
//   - Config: an invalid window/period, rejected before computation starts.
//   - Data:   an empty or malformed input series; fatal for that instrument's
//             snapshot but never for a whole batch.
//
// An undefined value is NOT an error. Insufficient window history and
// degenerate arithmetic (0/0 in RSI) are represented as `None` inside a
// `NumericSeries` and propagate through every downstream computation.
// =============================================================================

use serde::Serialize;

/// Fatal errors surfaced by the analysis engine.
#[derive(Debug, Clone, Serialize, thiserror::Error)]
pub enum EngineError {
    /// An invalid configuration value (e.g. a zero window). Raised before
    /// any computation starts.
    #[error("invalid configuration for {parameter}: {reason}")]
    Config {
        parameter: &'static str,
        reason: String,
    },

    /// A bad input series for one instrument (empty, unsorted, duplicate
    /// dates). The caller may still analyse other instruments.
    #[error("bad input series for {symbol}: {reason}")]
    Data { symbol: String, reason: String },
}

impl EngineError {
    pub fn config(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::Config {
            parameter,
            reason: reason.into(),
        }
    }

    pub fn data(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Data {
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }
}
