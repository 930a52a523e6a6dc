//! Blockchain.info Ticker Client

use std::time::Duration;

use async_trait::async_trait;

use super::RateFetcher;
use crate::error::{FetchError, Result};
use crate::model::PriceRecord;

pub const DEFAULT_TICKER_URL: &str = "https://blockchain.info/ticker";

/// Ticker client configuration
#[derive(Clone, Debug)]
pub struct TickerConfig {
    /// Ticker endpoint URL
    pub endpoint: String,

    /// Whole-request timeout. `None` keeps the client default, which never
    /// gives up on a hung endpoint.
    pub timeout: Option<Duration>,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_TICKER_URL.into(),
            timeout: None,
        }
    }
}

/// Fetches quotes from the blockchain.info ticker
pub struct BlockchainTicker {
    client: reqwest::Client,
    endpoint: String,
}

impl BlockchainTicker {
    /// Create from configuration
    pub fn from_config(config: TickerConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: config.endpoint,
        })
    }

    /// Create with the public endpoint and no timeout
    pub fn new() -> Result<Self> {
        Self::from_config(TickerConfig::default())
    }
}

#[async_trait]
impl RateFetcher for BlockchainTicker {
    async fn fetch(&self) -> std::result::Result<PriceRecord, FetchError> {
        // The response owns the connection; every return below drops it.
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await?
            .error_for_status()?;

        let body = response.bytes().await?;
        let record: PriceRecord = serde_json::from_slice(&body)?;

        Ok(record)
    }

    fn source(&self) -> &str {
        &self.endpoint
    }
}
