// =============================================================================
// Analysis Configuration — caller-supplied parameters with full defaults
// =============================================================================
//
// Every tunable window and period lives here so the dashboard can reconfigure
// an analysis without a rebuild. All fields carry `#[serde(default)]` so that
// adding new fields never breaks loading an older config file.
//
// Persistence uses an atomic tmp + rename pattern to prevent corruption on
// crash. `validate()` runs before any computation and rejects degenerate
// windows with a `ConfigError` naming the offending parameter.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::EngineError;

/// Default on-disk location of the analysis configuration.
pub const CONFIG_PATH: &str = "analysis_config.json";

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_ma_short() -> usize {
    20
}

fn default_ma_medium() -> usize {
    50
}

fn default_ma_long() -> usize {
    200
}

fn default_rsi_period() -> usize {
    14
}

fn default_bollinger_window() -> usize {
    20
}

fn default_bollinger_num_std() -> f64 {
    2.0
}

fn default_macd_fast() -> usize {
    12
}

fn default_macd_slow() -> usize {
    26
}

fn default_macd_signal() -> usize {
    9
}

fn default_ichimoku_tenkan() -> usize {
    9
}

fn default_ichimoku_kijun() -> usize {
    26
}

fn default_ichimoku_span_b() -> usize {
    52
}

fn default_lookback_days() -> i64 {
    365
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

fn default_comparison_set() -> Vec<ComparisonInstrument> {
    vec![
        ComparisonInstrument::new("BIST 100", "XU100.IS"),
        ComparisonInstrument::new("S&P 500", "^GSPC"),
        ComparisonInstrument::new("Gold", "GC=F"),
        ComparisonInstrument::new("Bitcoin", "BTC-USD"),
        ComparisonInstrument::new("USD/TRY", "TRY=X"),
    ]
}

// =============================================================================
// Parameter groups
// =============================================================================

/// Moving-average windows for the price chart and the crossover scan. The
/// medium/long pair (default 50/200) feeds the Golden/Death cross detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaWindows {
    #[serde(default = "default_ma_short")]
    pub short: usize,
    #[serde(default = "default_ma_medium")]
    pub medium: usize,
    #[serde(default = "default_ma_long")]
    pub long: usize,
}

impl Default for MaWindows {
    fn default() -> Self {
        Self {
            short: default_ma_short(),
            medium: default_ma_medium(),
            long: default_ma_long(),
        }
    }
}

/// Bollinger Band parameters: SMA window and band width in standard
/// deviations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BollingerParams {
    #[serde(default = "default_bollinger_window")]
    pub window: usize,
    #[serde(default = "default_bollinger_num_std")]
    pub num_std: f64,
}

impl Default for BollingerParams {
    fn default() -> Self {
        Self {
            window: default_bollinger_window(),
            num_std: default_bollinger_num_std(),
        }
    }
}

/// MACD spans: fast EMA, slow EMA, and the signal-line EMA over the MACD
/// line itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdParams {
    #[serde(default = "default_macd_fast")]
    pub fast: usize,
    #[serde(default = "default_macd_slow")]
    pub slow: usize,
    #[serde(default = "default_macd_signal")]
    pub signal: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast: default_macd_fast(),
            slow: default_macd_slow(),
            signal: default_macd_signal(),
        }
    }
}

/// Ichimoku rolling-extrema windows (tenkan / kijun / senkou span B).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IchimokuParams {
    #[serde(default = "default_ichimoku_tenkan")]
    pub tenkan: usize,
    #[serde(default = "default_ichimoku_kijun")]
    pub kijun: usize,
    #[serde(default = "default_ichimoku_span_b")]
    pub span_b: usize,
}

impl Default for IchimokuParams {
    fn default() -> Self {
        Self {
            tenkan: default_ichimoku_tenkan(),
            kijun: default_ichimoku_kijun(),
            span_b: default_ichimoku_span_b(),
        }
    }
}

/// One instrument in the return-comparison basket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonInstrument {
    /// Display label, e.g. "Gold".
    pub label: String,
    /// Provider symbol, e.g. "GC=F".
    pub symbol: String,
}

impl ComparisonInstrument {
    pub fn new(label: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            symbol: symbol.into(),
        }
    }
}

/// Return-comparator parameters: trailing lookback, per-instrument fetch
/// timeout, and the comparison basket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnsParams {
    #[serde(default = "default_lookback_days")]
    pub lookback_days: i64,
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    #[serde(default = "default_comparison_set")]
    pub comparison: Vec<ComparisonInstrument>,
}

impl Default for ReturnsParams {
    fn default() -> Self {
        Self {
            lookback_days: default_lookback_days(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            comparison: default_comparison_set(),
        }
    }
}

// =============================================================================
// AnalysisConfig
// =============================================================================

/// Top-level analysis configuration.
///
/// Every field has a serde default so that older JSON files missing new
/// fields still deserialise correctly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub ma: MaWindows,

    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,

    #[serde(default)]
    pub bollinger: BollingerParams,

    #[serde(default)]
    pub macd: MacdParams,

    #[serde(default)]
    pub ichimoku: IchimokuParams,

    #[serde(default)]
    pub returns: ReturnsParams,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            ma: MaWindows::default(),
            rsi_period: default_rsi_period(),
            bollinger: BollingerParams::default(),
            macd: MacdParams::default(),
            ichimoku: IchimokuParams::default(),
            returns: ReturnsParams::default(),
        }
    }
}

impl AnalysisConfig {
    /// Reject degenerate parameters before any computation starts.
    ///
    /// Every window and period must be positive; the Bollinger band width
    /// must be non-negative so the `lower <= mid <= upper` ordering holds.
    pub fn validate(&self) -> Result<(), EngineError> {
        let windows: [(&'static str, usize); 10] = [
            ("ma.short", self.ma.short),
            ("ma.medium", self.ma.medium),
            ("ma.long", self.ma.long),
            ("rsi_period", self.rsi_period),
            ("bollinger.window", self.bollinger.window),
            ("macd.fast", self.macd.fast),
            ("macd.slow", self.macd.slow),
            ("macd.signal", self.macd.signal),
            ("ichimoku.tenkan", self.ichimoku.tenkan),
            ("ichimoku.kijun", self.ichimoku.kijun),
        ];
        for (name, value) in windows {
            if value == 0 {
                return Err(EngineError::config(name, "must be greater than zero"));
            }
        }
        if self.ichimoku.span_b == 0 {
            return Err(EngineError::config(
                "ichimoku.span_b",
                "must be greater than zero",
            ));
        }
        if self.bollinger.num_std < 0.0 {
            return Err(EngineError::config(
                "bollinger.num_std",
                "must be non-negative",
            ));
        }
        if self.returns.lookback_days <= 0 {
            return Err(EngineError::config(
                "returns.lookback_days",
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read analysis config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse analysis config from {}", path.display()))?;

        info!(
            path = %path.display(),
            comparison = config.returns.comparison.len(),
            "analysis config loaded"
        );

        Ok(config)
    }

    /// Persist the current configuration to `path` using an atomic write
    /// (write to `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content =
            serde_json::to_string_pretty(self).context("failed to serialise analysis config")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "analysis config saved (atomic)");
        Ok(())
    }
}
