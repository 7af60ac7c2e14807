// =============================================================================
// QuoteLens — Main Entry Point
// =============================================================================
//
// Thin delivery binary: loads the analysis configuration, wires the market
// data provider into the shared state, and serves the engine's output
// contract to the dashboard over HTTP. All numeric substance lives in the
// library.
// =============================================================================

use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use quotelens::api;
use quotelens::app_state::AppState;
use quotelens::config::{AnalysisConfig, CONFIG_PATH};
use quotelens::provider::http::HttpQuoteProvider;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("QuoteLens analysis engine starting up");

    let config = AnalysisConfig::load(CONFIG_PATH).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AnalysisConfig::default()
    });

    if let Err(e) = config.validate() {
        error!(error = %e, "Loaded config is invalid — refusing to start");
        anyhow::bail!("invalid analysis config: {e}");
    }

    info!(
        comparison = config.returns.comparison.len(),
        lookback_days = config.returns.lookback_days,
        "Analysis parameters loaded"
    );

    // ── 2. Build shared state ────────────────────────────────────────────
    let provider = Arc::new(HttpQuoteProvider::new());
    let state = Arc::new(AppState::new(config, provider));

    // ── 3. Start the API server ──────────────────────────────────────────
    let bind_addr =
        std::env::var("QUOTELENS_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3001".into());

    let app = api::rest::router(state.clone());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            warn!("Shutdown signal received — stopping gracefully");
        })
        .await?;

    // ── 4. Graceful shutdown ─────────────────────────────────────────────
    if let Err(e) = state.analysis_config.read().save(CONFIG_PATH) {
        error!(error = %e, "Failed to save analysis config on shutdown");
    }

    info!("QuoteLens shut down complete.");
    Ok(())
}
