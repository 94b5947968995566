//! Canonical `YYYY-MM-DD` date keys.

use super::error::RatesError;
use chrono::{Datelike, NaiveDate};
use std::fmt::Display;

const FORMAT: &str = "%Y-%m-%d";
const MIN_YEAR: i32 = 1;

/// A validated calendar date together with its canonical string form.
///
/// The string is what gets used for cache keys and upstream requests, so a
/// `DateKey` can only be obtained from input that is already canonical.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DateKey {
    date: NaiveDate,
    key: String,
}

impl DateKey {
    pub fn parse(input: &str) -> Result<Self, RatesError> {
        let invalid = || RatesError::InvalidDateFormat(input.to_string());

        if !has_canonical_shape(input) {
            return Err(invalid());
        }
        let date = NaiveDate::parse_from_str(input, FORMAT).map_err(|_| invalid())?;
        if date.year() < MIN_YEAR {
            return Err(invalid());
        }

        Ok(Self::from_date(date))
    }

    fn from_date(date: NaiveDate) -> Self {
        Self {
            date,
            key: date.format(FORMAT).to_string(),
        }
    }

    /// The calendar day before this one, if it is still in year 1 or later.
    pub fn previous(&self) -> Option<Self> {
        self.date
            .pred_opt()
            .filter(|date| date.year() >= MIN_YEAR)
            .map(Self::from_date)
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }
}

fn has_canonical_shape(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

impl Display for DateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.key)
    }
}
