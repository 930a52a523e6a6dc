//! bitcoin-exporter
//!
//! Serves Bitcoin exchange rates from the blockchain.info ticker at
//! `GET /metrics`. Each scrape of that endpoint triggers one ticker fetch.

mod config;
mod handlers;
mod state;

use std::sync::Arc;

use axum::{Router, routing::get};
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bitcoin_rates::{BlockchainTicker, ExporterCollector, RateFetcher};

use crate::config::Cli;
use crate::handlers::metrics_handler;
use crate::state::AppState;

/// Build the HTTP router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = cli.socket_addr()?;

    // Initialize ticker client
    let ticker: Arc<dyn RateFetcher> = Arc::new(BlockchainTicker::from_config(cli.ticker_config())?);
    tracing::info!(
        endpoint = ticker.source(),
        timeout_secs = ?cli.fetch_timeout,
        "Ticker configured"
    );

    let collector = ExporterCollector::new(ticker)?;
    for desc in collector.describe() {
        tracing::info!(metric = %desc.fq_name, labels = ?desc.variable_labels, "Exposing");
    }

    let state = AppState {
        collector: Arc::new(collector),
    };

    // Start server
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            return Err(e.into());
        }
    };

    tracing::info!("bitcoin-exporter listening on http://{}/metrics", addr);

    axum::serve(listener, router(state)).await?;

    Ok(())
}
