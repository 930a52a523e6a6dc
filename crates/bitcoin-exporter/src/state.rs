//! Application State

use std::sync::Arc;

use bitcoin_rates::ExporterCollector;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The process's single collector
    pub collector: Arc<ExporterCollector>,
}
