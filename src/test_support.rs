//! In-process fakes shared by unit tests.

use crate::core::{DateKey, RateRecord, RateSet, RatesError, RatesSource};
use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;

pub(crate) fn record(id: i64, abbreviation: &str, rate: f64) -> RateRecord {
    serde_json::from_value(json!({
        "Cur_ID": id,
        "Date": "2024-01-02T00:00:00",
        "Cur_Abbreviation": abbreviation,
        "Cur_Scale": 1,
        "Cur_OfficialRate": rate,
    }))
    .unwrap()
}

/// Serves canned rate sets per date and records every date requested.
/// Dates without a canned answer have no data.
#[derive(Default)]
pub(crate) struct FakeSource {
    days: HashMap<String, Result<RateSet, RatesError>>,
    calls: Mutex<Vec<String>>,
}

impl FakeSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_day(mut self, date: &str, rates: RateSet) -> Self {
        self.days.insert(date.to_string(), Ok(rates));
        self
    }

    pub(crate) fn with_error(mut self, date: &str, err: RatesError) -> Self {
        self.days.insert(date.to_string(), Err(err));
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RatesSource for FakeSource {
    async fn fetch(&self, date: &DateKey) -> Result<RateSet, RatesError> {
        self.calls.lock().unwrap().push(date.to_string());
        self.days
            .get(date.as_str())
            .cloned()
            .unwrap_or_else(|| Ok(RateSet::new()))
    }
}
