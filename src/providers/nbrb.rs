use crate::core::{DateKey, RateSet, RatesError, RatesSource};
use anyhow::Context;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Client for the National Bank daily rates endpoint.
pub struct NbrbProvider {
    base_url: String,
    client: reqwest::Client,
}

impl NbrbProvider {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("nbrates/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(NbrbProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn parse_body(text: &str) -> Result<RateSet, RatesError> {
        if text.trim().is_empty() {
            return Ok(RateSet::new());
        }
        let rates: Option<RateSet> = serde_json::from_str(text)?;
        Ok(rates.unwrap_or_default())
    }
}

#[async_trait]
impl RatesSource for NbrbProvider {
    #[instrument(name = "NbrbRatesFetch", skip(self), fields(date = %date))]
    async fn fetch(&self, date: &DateKey) -> Result<RateSet, RatesError> {
        let url = format!(
            "{}/api/exrates/rates?ondate={}&periodicity=0",
            self.base_url, date
        );
        debug!("Requesting rates from {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(RatesError::UpstreamUnavailable(format!(
                "HTTP error: {} for date: {}",
                response.status(),
                date
            )));
        }

        let text = response.text().await?;

        match Self::parse_body(&text) {
            Ok(rates) => {
                debug!(count = rates.len(), "Received rates");
                Ok(rates)
            }
            Err(e) => {
                error!(error = %e, response = %text, "Failed to parse rates response");
                Err(e)
            }
        }
    }
}
