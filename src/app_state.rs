// =============================================================================
// Shared serving-layer state
// =============================================================================
//
// Ties the analysis configuration, the market-data provider, and the
// dashboard error log together for the REST handlers.
//
// There is deliberately NO computed-series cache here: every analysis
// request constructs a fresh `TimeSeries` and snapshot owned by the request,
// so nothing mutable survives between UI interactions.
//
// Thread safety: parking_lot::RwLock around the two mutable members, Arc
// around the provider which manages its own interior state (an HTTP client).
// =============================================================================

use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::provider::MarketDataProvider;

/// Maximum number of recent errors to retain for the dashboard error card.
const MAX_RECENT_ERRORS: usize = 50;

/// A recorded error event for the dashboard error log.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorRecord {
    /// Human-readable error message.
    pub message: String,
    /// Instrument the error pertains to, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// ISO 8601 timestamp.
    pub at: String,
}

/// State shared across all REST handlers via `Arc<AppState>`.
pub struct AppState {
    pub analysis_config: RwLock<AnalysisConfig>,
    pub provider: Arc<dyn MarketDataProvider>,
    pub recent_errors: RwLock<Vec<ErrorRecord>>,
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(config: AnalysisConfig, provider: Arc<dyn MarketDataProvider>) -> Self {
        Self {
            analysis_config: RwLock::new(config),
            provider,
            recent_errors: RwLock::new(Vec::new()),
            start_time: std::time::Instant::now(),
        }
    }

    /// Record an error for the dashboard log. The ring buffer is capped at
    /// [`MAX_RECENT_ERRORS`]; oldest entries are evicted first.
    pub fn push_error(&self, message: impl Into<String>, symbol: Option<String>) {
        let record = ErrorRecord {
            message: message.into(),
            symbol,
            at: Utc::now().to_rfc3339(),
        };

        let mut errors = self.recent_errors.write();
        errors.push(record);
        while errors.len() > MAX_RECENT_ERRORS {
            errors.remove(0);
        }
    }

    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
