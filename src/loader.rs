//! Validated, cached access to a day's rate set.

use crate::core::{Cache, DateKey, RateSet, RatesError, RatesSource};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Entry point for obtaining a date's rates.
///
/// Successful fetches are stored once per date and served from the cache for
/// the rest of the process lifetime. Failures and empty answers are never
/// cached, so a later call for the same date asks upstream again.
#[derive(Clone)]
pub struct RateLoader {
    source: Arc<dyn RatesSource>,
    cache: Arc<Cache<String, RateSet>>,
}

impl RateLoader {
    pub fn new(source: Arc<dyn RatesSource>, cache: Arc<Cache<String, RateSet>>) -> Self {
        Self { source, cache }
    }

    /// Validates `date` and returns its rate set.
    pub async fn load_rates(&self, date: &str) -> Result<RateSet, RatesError> {
        let key = DateKey::parse(date)?;
        self.load(&key).await
    }

    #[instrument(skip(self), fields(date = %key))]
    pub async fn load(&self, key: &DateKey) -> Result<RateSet, RatesError> {
        let cache_key = key.as_str().to_string();
        if let Some(cached) = self.cache.get(&cache_key).await {
            return Ok(cached);
        }

        let rates = self.source.fetch(key).await?;
        if rates.is_empty() {
            debug!("Upstream returned no rates");
            return Err(RatesError::NoDataForDate(cache_key));
        }

        self.cache.put(cache_key, rates.clone()).await;
        Ok(rates)
    }

    #[cfg(test)]
    pub(crate) fn cache(&self) -> &Arc<Cache<String, RateSet>> {
        &self.cache
    }
}
