//! Failure kinds surfaced by rate loading.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RatesError {
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDateFormat(String),

    #[error("no rates published for {0}")]
    NoDataForDate(String),

    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("currency {code} not found for {date}")]
    CurrencyCodeNotFound { date: String, code: String },
}

impl From<reqwest::Error> for RatesError {
    fn from(e: reqwest::Error) -> Self {
        Self::UpstreamUnavailable(e.to_string())
    }
}

impl From<serde_json::Error> for RatesError {
    fn from(e: serde_json::Error) -> Self {
        Self::UpstreamUnavailable(format!("unparseable response: {e}"))
    }
}
