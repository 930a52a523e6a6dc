//! # bitcoin-rates
//!
//! Scrapes Bitcoin exchange rates from the blockchain.info ticker and exposes
//! them as Prometheus metrics.
//!
//! ## Metrics
//!
//! ```text
//! bitcoin_up                                  gauge    1 if the last scrape succeeded
//! bitcoin_exporter_total_scrapes              counter  successful scrapes so far
//! bitcoin_exchange_rate{currency,class}       gauge    class = ltp | ask | bid
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use bitcoin_rates::{ExporterCollector, render, ticker::BlockchainTicker};
//!
//! let collector = ExporterCollector::new(Arc::new(BlockchainTicker::new()?))?;
//! let body = render::render(&collector.collect().await)?;
//! ```
//!
//! Every call to `collect` performs exactly one fetch. A failing ticker never
//! turns into an error for the caller; it shows up as `bitcoin_up 0` while
//! the last known rates stay exposed.

pub mod collector;
pub mod error;
pub mod model;
pub mod render;
pub mod ticker;

pub use collector::ExporterCollector;
pub use error::{ExporterError, FetchError, FetchErrorKind, Result};
pub use model::{Price, PriceClass, PriceRecord};
pub use ticker::{BlockchainTicker, MockTicker, RateFetcher, TickerConfig};
