//! Command-line configuration

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use bitcoin_rates::ticker::{DEFAULT_TICKER_URL, TickerConfig};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "bitcoin-exporter", version, about = "Prometheus exporter for Bitcoin exchange rates")]
pub struct Cli {
    /// The address to listen on for HTTP requests
    #[arg(long, env = "LISTEN_ADDRESS", default_value = ":8080")]
    pub listen_address: String,

    /// Ticker endpoint to scrape
    #[arg(long, env = "TICKER_URL", default_value = DEFAULT_TICKER_URL)]
    pub ticker_url: String,

    /// Give up on a ticker request after this many seconds (no limit when unset)
    #[arg(long, env = "FETCH_TIMEOUT_SECS")]
    pub fetch_timeout: Option<u64>,

    /// Log level, used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    pub fn ticker_config(&self) -> TickerConfig {
        TickerConfig {
            endpoint: self.ticker_url.clone(),
            timeout: self.fetch_timeout.map(Duration::from_secs),
        }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        parse_listen_address(&self.listen_address)
    }
}

/// Parse a listen address, where `:PORT` means every interface
pub fn parse_listen_address(address: &str) -> anyhow::Result<SocketAddr> {
    let normalized = if address.starts_with(':') {
        format!("0.0.0.0{address}")
    } else {
        address.to_string()
    };

    normalized
        .parse()
        .with_context(|| format!("invalid listen address `{address}`"))
}
