//! Error Types for Bitcoin Rates

use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExporterError>;

/// Errors raised while building or rendering the exporter
#[derive(Error, Debug)]
pub enum ExporterError {
    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("Encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Failure of a single ticker fetch.
///
/// Never reaches the polling caller; the collector folds it into `bitcoin_up`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Network failure or non-2xx response
    #[error("send HTTP request: {0}")]
    Transport(String),

    /// Body was not the expected JSON shape
    #[error("decode HTTP response as JSON: {0}")]
    Decode(String),
}

impl FetchError {
    pub const fn kind(&self) -> FetchErrorKind {
        match self {
            Self::Transport(_) => FetchErrorKind::Transport,
            Self::Decode(_) => FetchErrorKind::Decode,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Transport,
    Decode,
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport => f.write_str("transport"),
            Self::Decode => f.write_str("decode"),
        }
    }
}
