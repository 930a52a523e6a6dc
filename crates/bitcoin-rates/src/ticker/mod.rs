//! Ticker Integration
//!
//! Sources of exchange-rate quotes for the collector.

mod blockchain;
mod mock;

pub use blockchain::{BlockchainTicker, TickerConfig, DEFAULT_TICKER_URL};
pub use mock::MockTicker;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::model::PriceRecord;

/// Rate fetcher trait (Strategy pattern)
///
/// One call is one attempt: implementations must not retry or cache.
#[async_trait]
pub trait RateFetcher: Send + Sync {
    /// Fetch the current quotes for every currency the source publishes
    async fn fetch(&self) -> Result<PriceRecord, FetchError>;

    /// Where quotes come from, for logs
    fn source(&self) -> &str;
}
