// =============================================================================
// HTTP Quote Provider — public daily-chart API client
// =============================================================================
//
// Fetches daily OHLCV history from a Yahoo-Finance-compatible chart endpoint:
//
//   GET {base}/v8/finance/chart/{symbol}?period1=..&period2=..&interval=1d
//
// The response carries parallel arrays (timestamp, close, high, low, volume).
// Rows with a null or non-finite value are skipped with a warning rather
// than failing the whole series; exchanges routinely publish gap rows for
// halted days. No authentication is required for daily history.
// =============================================================================

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use tracing::{debug, warn};

use crate::provider::{MarketDataProvider, ProviderError};
use crate::series::Bar;

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// REST client for the public chart API.
#[derive(Clone)]
pub struct HttpQuoteProvider {
    base_url: String,
    client: reqwest::Client,
}

impl Default for HttpQuoteProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpQuoteProvider {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .user_agent("quotelens/1.0")
            .build()
            .expect("failed to build reqwest client");

        debug!("HttpQuoteProvider initialised (base_url={DEFAULT_BASE_URL})");

        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            client,
        }
    }

    /// Override the endpoint base, e.g. to point at a local stub server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn epoch_seconds(date: NaiveDate) -> i64 {
        date.and_hms_opt(0, 0, 0)
            .expect("midnight is always a valid time")
            .and_utc()
            .timestamp()
    }
}

/// Pull one f64 out of a parallel-array column at row `i`, if present and
/// finite.
fn column_value(column: Option<&serde_json::Value>, i: usize) -> Option<f64> {
    column?.get(i)?.as_f64().filter(|v| v.is_finite())
}

/// Parse the chart-API response body into bars, oldest first.
///
/// Visible for testing: the HTTP transport and the parsing are separable
/// failure modes.
pub fn parse_chart_response(
    symbol: &str,
    body: &serde_json::Value,
) -> Result<Vec<Bar>, ProviderError> {
    let malformed = |reason: &str| ProviderError::Malformed {
        symbol: symbol.to_string(),
        reason: reason.to_string(),
    };

    let chart = body.get("chart").ok_or_else(|| malformed("missing chart"))?;

    if let Some(error) = chart.get("error").filter(|e| !e.is_null()) {
        return Err(ProviderError::Http {
            symbol: symbol.to_string(),
            reason: error.to_string(),
        });
    }

    let result = chart
        .get("result")
        .and_then(|r| r.get(0))
        .ok_or_else(|| malformed("missing chart.result[0]"))?;

    let timestamps = result
        .get("timestamp")
        .and_then(|t| t.as_array())
        .ok_or_else(|| malformed("missing timestamp array"))?;

    let quote = result
        .pointer("/indicators/quote/0")
        .ok_or_else(|| malformed("missing indicators.quote[0]"))?;

    let closes = quote.get("close");
    let highs = quote.get("high");
    let lows = quote.get("low");
    let volumes = quote.get("volume");

    let mut bars = Vec::with_capacity(timestamps.len());

    for (i, ts) in timestamps.iter().enumerate() {
        let Some(ts) = ts.as_i64() else {
            warn!(symbol, row = i, "skipping row with non-integer timestamp");
            continue;
        };
        let Some(date) = DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive()) else {
            warn!(symbol, row = i, ts, "skipping row with out-of-range timestamp");
            continue;
        };

        let (Some(close), Some(high), Some(low)) = (
            column_value(closes, i),
            column_value(highs, i),
            column_value(lows, i),
        ) else {
            warn!(symbol, row = i, "skipping row with null OHLC values");
            continue;
        };
        // Volume may legitimately be missing for indices; treat as zero.
        let volume = column_value(volumes, i).unwrap_or(0.0);

        bars.push(Bar::new(date, close, volume, high, low));
    }

    if bars.is_empty() {
        return Err(ProviderError::NoData {
            symbol: symbol.to_string(),
        });
    }

    Ok(bars)
}

#[async_trait]
impl MarketDataProvider for HttpQuoteProvider {
    async fn daily_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Bar>, ProviderError> {
        let url = format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d",
            self.base_url,
            symbol,
            Self::epoch_seconds(start),
            // The API treats period2 as exclusive; include the end date.
            Self::epoch_seconds(end) + 86_400,
        );

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::Http {
                symbol: symbol.to_string(),
                reason: e.to_string(),
            })?;

        let status = resp.status();
        let body: serde_json::Value = resp.json().await.map_err(|e| ProviderError::Malformed {
            symbol: symbol.to_string(),
            reason: format!("response is not JSON: {e}"),
        })?;

        if !status.is_success() {
            return Err(ProviderError::Http {
                symbol: symbol.to_string(),
                reason: format!("chart endpoint returned {status}: {body}"),
            });
        }

        let bars = parse_chart_response(symbol, &body)?;
        debug!(symbol, count = bars.len(), "daily history fetched");
        Ok(bars)
    }
}
