//! Mock Ticker
//!
//! For testing and demo purposes. Replays a script of fetch outcomes.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::RateFetcher;
use crate::error::FetchError;
use crate::model::PriceRecord;

/// Mock ticker that returns scripted outcomes in order.
///
/// The last outcome repeats once the script runs out. An empty script
/// behaves like an unreachable endpoint.
pub struct MockTicker {
    script: Mutex<VecDeque<Result<PriceRecord, FetchError>>>,
    last: Mutex<Option<Result<PriceRecord, FetchError>>>,
    /// Simulated network latency per fetch
    delay: Duration,
}

impl Default for MockTicker {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl MockTicker {
    pub fn new(script: impl IntoIterator<Item = Result<PriceRecord, FetchError>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            last: Mutex::new(None),
            delay: Duration::ZERO,
        }
    }

    /// Always return the same record
    pub fn always(record: PriceRecord) -> Self {
        Self::new([Ok(record)])
    }

    /// Always fail with the given error
    pub fn failing(err: FetchError) -> Self {
        Self::new([Err(err)])
    }

    /// Sleep before answering each fetch
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl RateFetcher for MockTicker {
    async fn fetch(&self) -> Result<PriceRecord, FetchError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let next = self.script.lock().await.pop_front();
        let mut last = self.last.lock().await;
        if let Some(outcome) = next {
            *last = Some(outcome);
        }

        last.clone()
            .unwrap_or_else(|| Err(FetchError::Transport("mock ticker has no script".into())))
    }

    fn source(&self) -> &str {
        "mock"
    }
}
