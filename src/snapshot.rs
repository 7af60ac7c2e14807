// =============================================================================
// Indicator Snapshot — full analysis output for one instrument
// =============================================================================
//
// Composes every derived series plus the latest-value summary cards from an
// immutable `TimeSeries` and an `AnalysisConfig`.
//
// The snapshot is a pure function of its inputs: no ids, no timestamps, no
// cached state, so recomputing it from the same series yields an identical
// value. All member series share the source date axis; the presentation
// layer charts the series and renders the summary as cards.
// =============================================================================

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::crossover::{detect_crossovers, last_of_kind, CrossoverEvent, CrossoverKind};
use crate::error::EngineError;
use crate::indicators::bollinger::{bollinger, BollingerBands};
use crate::indicators::fibonacci::{retracement_levels, FibonacciLevel};
use crate::indicators::ichimoku::{ichimoku, Ichimoku};
use crate::indicators::macd::{macd, Macd};
use crate::indicators::rolling;
use crate::indicators::rsi::rsi;
use crate::series::{NumericSeries, TimeSeries};
use crate::types::{BollingerPosition, FibonacciZone, RsiStatus, TrendLabel};
use crate::zones;

// =============================================================================
// Output types
// =============================================================================

/// The three moving-average series (default 20/50/200 day).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovingAverages {
    pub short: NumericSeries,
    pub medium: NumericSeries,
    pub long: NumericSeries,
}

/// Latest defined values and classification labels for the dashboard cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotSummary {
    pub last_date: NaiveDate,
    pub last_price: f64,
    pub last_volume: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_delta: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ma_short: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ma_medium: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ma_long: Option<f64>,

    /// Short-term trend from the MA short/medium pair at the latest bar.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ma_trend: Option<TrendLabel>,

    /// Most recent defined RSI value and its status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi_status: Option<RsiStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bollinger_position: Option<BollingerPosition>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub macd: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macd_signal: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ichimoku_trend: Option<TrendLabel>,

    pub fibonacci_zone: FibonacciZone,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_golden_cross: Option<CrossoverEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_death_cross: Option<CrossoverEvent>,
}

/// All derived series plus the latest-value summary for one instrument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSnapshot {
    pub symbol: String,
    pub dates: Vec<NaiveDate>,
    pub close: NumericSeries,
    pub volume: NumericSeries,
    pub volume_delta: NumericSeries,
    pub ma: MovingAverages,
    pub rsi: NumericSeries,
    pub bollinger: BollingerBands,
    pub macd: Macd,
    pub ichimoku: Ichimoku,
    pub fibonacci: Vec<FibonacciLevel>,
    pub crossovers: Vec<CrossoverEvent>,
    pub summary: SnapshotSummary,
}

// =============================================================================
// Builder
// =============================================================================

/// Derive the full `IndicatorSnapshot` for `series` under `config`.
///
/// Validates the configuration first (`ConfigError` on a degenerate window);
/// the series itself was validated at construction, so the only remaining
/// failure is a crossover alignment bug, which cannot happen for series
/// derived here.
pub fn build_snapshot(
    series: &TimeSeries,
    config: &AnalysisConfig,
) -> Result<IndicatorSnapshot, EngineError> {
    config.validate()?;

    let closes = series.closes();
    let close_series = NumericSeries::from_values(closes.clone());

    // ── Moving averages & crossovers ────────────────────────────────────
    let ma = MovingAverages {
        short: rolling::sma(&close_series, config.ma.short)?,
        medium: rolling::sma(&close_series, config.ma.medium)?,
        long: rolling::sma(&close_series, config.ma.long)?,
    };
    let crossovers = detect_crossovers(series, &ma.medium, &ma.long)?;

    // ── Oscillators & bands ─────────────────────────────────────────────
    let rsi_series = rsi(&closes, config.rsi_period)?;
    let bands = bollinger(&closes, config.bollinger.window, config.bollinger.num_std)?;
    let macd_out = macd(&closes, config.macd.fast, config.macd.slow, config.macd.signal)?;
    let cloud = ichimoku(&series.highs(), &series.lows(), &config.ichimoku)?;

    // ── Volume ──────────────────────────────────────────────────────────
    let volumes = series.volumes();
    let volume_delta = rolling::diff(&volumes);

    // ── Fibonacci range over the queried closes ─────────────────────────
    let range_high = closes.iter().copied().fold(f64::MIN, f64::max);
    let range_low = closes.iter().copied().fold(f64::MAX, f64::min);
    let fibonacci = retracement_levels(range_high, range_low);

    // ── Summary cards ───────────────────────────────────────────────────
    let last = series.last_bar();
    let i_last = series.len() - 1;

    let ma_short_last = ma.short.get(i_last);
    let ma_medium_last = ma.medium.get(i_last);
    let ma_trend = match (ma_short_last, ma_medium_last) {
        (Some(s), Some(m)) if s > m => Some(TrendLabel::Bullish),
        (Some(s), Some(m)) if s < m => Some(TrendLabel::Bearish),
        (Some(_), Some(_)) => Some(TrendLabel::Neutral),
        _ => None,
    };

    let rsi_last = rsi_series.last_defined();
    let rsi_status = rsi_last.map(zones::rsi_status);

    let bollinger_position = match (bands.upper.get(i_last), bands.lower.get(i_last)) {
        (Some(up), Some(lo)) => Some(zones::bollinger_position(last.close, up, lo)),
        _ => None,
    };

    let ichimoku_trend = match (cloud.span_a.get(i_last), cloud.span_b.get(i_last)) {
        (Some(a), Some(b)) => Some(zones::ichimoku_trend(last.close, a, b)),
        _ => None,
    };

    let summary = SnapshotSummary {
        last_date: last.date,
        last_price: last.close,
        last_volume: last.volume,
        volume_delta: volume_delta.get(i_last),
        ma_short: ma_short_last,
        ma_medium: ma_medium_last,
        ma_long: ma.long.get(i_last),
        ma_trend,
        rsi: rsi_last,
        rsi_status,
        bollinger_position,
        macd: macd_out.macd.get(i_last),
        macd_signal: macd_out.signal.get(i_last),
        ichimoku_trend,
        fibonacci_zone: zones::fibonacci_zone(last.close, &fibonacci),
        last_golden_cross: last_of_kind(&crossovers, CrossoverKind::Golden),
        last_death_cross: last_of_kind(&crossovers, CrossoverKind::Death),
    };

    Ok(IndicatorSnapshot {
        symbol: series.symbol().to_string(),
        dates: series.dates(),
        close: close_series,
        volume: NumericSeries::from_values(volumes),
        volume_delta,
        ma,
        rsi: rsi_series,
        bollinger: bands,
        macd: macd_out,
        ichimoku: cloud,
        fibonacci,
        crossovers,
        summary,
    })
}
