//! Exporter Collector
//!
//! Owns the exporter's metric state and refreshes it from a [`RateFetcher`]
//! on every poll.
//!
//! ```text
//! poll ──► write lock ──► fetch ──┬─ Ok  ──► up=1, scrapes+=1, rates overwritten
//!                                 └─ Err ──► up=0, everything else left stale
//!          snapshot ◄─────────────┘
//!          unlock
//! ```

use std::sync::Arc;

use prometheus::core::{Collector, Desc};
use prometheus::proto::{LabelPair, MetricFamily};
use prometheus::{Gauge, GaugeVec, IntCounter, Opts};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::Result;
use crate::model::{PriceClass, PriceRecord};
use crate::ticker::RateFetcher;

pub const NAMESPACE: &str = "bitcoin";

/// Label names of `bitcoin_exchange_rate`
pub const RATE_LABELS: [&str; 2] = ["currency", "class"];

/// The three exposed metrics, guarded as one unit
struct ExporterMetrics {
    up: Gauge,
    total_scrapes: IntCounter,
    exchange_rate: GaugeVec,
}

impl ExporterMetrics {
    fn new() -> Result<Self> {
        let up = Gauge::with_opts(
            Opts::new("up", "Was the last scrape of Blockchain Exchange Rates API successful")
                .namespace(NAMESPACE),
        )?;

        let total_scrapes = IntCounter::with_opts(
            Opts::new(
                "exporter_total_scrapes",
                "Current total Blockchain Exchange Rates API scrapes",
            )
            .namespace(NAMESPACE),
        )?;

        let exchange_rate = GaugeVec::new(
            Opts::new(
                "exchange_rate",
                "Exchange rate retrieved by Blockchain Exchange Rates API",
            )
            .namespace(NAMESPACE),
            &RATE_LABELS,
        )?;

        Ok(Self {
            up,
            total_scrapes,
            exchange_rate,
        })
    }

    fn record_success(&self, record: &PriceRecord) {
        self.up.set(1.0);
        self.total_scrapes.inc();

        for (currency, price) in record.iter() {
            for class in PriceClass::ALL {
                self.exchange_rate
                    .with_label_values(&[currency, class.label()])
                    .set(price.value(class));
            }
        }
    }

    fn record_failure(&self) {
        self.up.set(0.0);
    }

    fn snapshot(&self) -> Vec<MetricFamily> {
        let mut families = Vec::with_capacity(3);
        families.extend(self.up.collect());
        families.extend(self.total_scrapes.collect());
        families.extend(self.exchange_rate.collect());

        // No rates until the first successful scrape
        families.retain(|family| !family.get_metric().is_empty());

        for family in &mut families {
            family.mut_metric().sort_by(|a, b| {
                let a = a.get_label().iter().map(LabelPair::get_value);
                let b = b.get_label().iter().map(LabelPair::get_value);
                a.cmp(b)
            });
        }

        families
    }

    fn descs(&self) -> Vec<Desc> {
        self.up
            .desc()
            .into_iter()
            .chain(self.total_scrapes.desc())
            .chain(self.exchange_rate.desc())
            .cloned()
            .collect()
    }
}

/// Stateful collector behind `GET /metrics`.
///
/// Construct one per process and share it behind an `Arc`; nothing is
/// registered globally.
pub struct ExporterCollector {
    fetcher: Arc<dyn RateFetcher>,
    metrics: RwLock<ExporterMetrics>,
    descs: Vec<Desc>,
}

impl ExporterCollector {
    pub fn new(fetcher: Arc<dyn RateFetcher>) -> Result<Self> {
        let metrics = ExporterMetrics::new()?;
        let descs = metrics.descs();

        Ok(Self {
            fetcher,
            metrics: RwLock::new(metrics),
            descs,
        })
    }

    /// Static schema of every exposed metric.
    ///
    /// Reads no live values and never fetches.
    pub fn describe(&self) -> Vec<Desc> {
        self.descs.clone()
    }

    /// Scrape the ticker once and return a snapshot of all metrics.
    ///
    /// Blocks until the fetch finishes. Concurrent calls are serialized on an
    /// exclusive lock held from before the fetch until after the snapshot, so
    /// a snapshot never mixes two scrapes. A failed fetch only flips
    /// `bitcoin_up` to 0; this method itself cannot fail.
    pub async fn collect(&self) -> Vec<MetricFamily> {
        let metrics = self.metrics.write().await;

        match self.fetcher.fetch().await {
            Ok(record) => {
                metrics.record_success(&record);
                debug!(currencies = record.len(), "Scraped exchange rates");
            }
            Err(err) => {
                metrics.record_failure();
                warn!(
                    kind = %err.kind(),
                    endpoint = self.fetcher.source(),
                    error = %err,
                    "Exchange rate scrape failed"
                );
            }
        }

        metrics.snapshot()
    }
}
