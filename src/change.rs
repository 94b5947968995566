//! Day-over-day rate movement.

use crate::core::rates::find_rate;
use crate::core::{DateKey, RateChange, RateRecord, RatesError};
use crate::loader::RateLoader;
use tracing::debug;

const DECIMALS: i32 = 4;

/// Rounds half away from zero, normalising `-0.0` to `0.0`.
pub fn round_delta(value: f64) -> f64 {
    let scale = 10f64.powi(DECIMALS);
    let rounded = (value * scale).round() / scale;
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Difference between `record`'s official rate on `date` and the same
/// currency's rate on the previous calendar day.
///
/// A currency missing from the previous day's set yields
/// [`RateChange::NotFound`]. Failing to load the previous day at all is an
/// error.
pub async fn rate_change(
    loader: &RateLoader,
    date: &DateKey,
    record: &RateRecord,
) -> Result<RateChange, RatesError> {
    let previous_date = date
        .previous()
        .ok_or_else(|| RatesError::InvalidDateFormat(date.to_string()))?;
    let previous_rates = loader.load(&previous_date).await?;

    let change = match find_rate(&previous_rates, record.currency_id()) {
        Some(previous) => {
            RateChange::Delta(round_delta(record.official_rate() - previous.official_rate()))
        }
        None => RateChange::NotFound,
    };
    debug!(
        currency = %record.currency_id(),
        previous = %previous_date,
        ?change,
        "Computed rate change"
    );
    Ok(change)
}
