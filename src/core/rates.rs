//! Rate records as published by the upstream provider.

use super::date::DateKey;
use super::error::RatesError;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt::Display;

pub const CURRENCY_ID_FIELD: &str = "Cur_ID";
pub const OFFICIAL_RATE_FIELD: &str = "Cur_OfficialRate";
pub const CHANGE_FIELD: &str = "change";

/// Currency identifier in canonical string form.
///
/// Integer identifiers compare equal whether they arrived as JSON numbers or
/// strings, e.g. `431`, `"431"` and `"0431"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrencyId(String);

impl CurrencyId {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<i64>() {
            Ok(n) => Self(n.to_string()),
            Err(_) => Self(trimmed.to_string()),
        }
    }

    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::parse(s)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Self(i.to_string()))
                } else if let Some(u) = n.as_u64() {
                    Some(Self(u.to_string()))
                } else {
                    let f = n.as_f64()?;
                    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                        Some(Self((f as i64).to_string()))
                    } else {
                        Some(Self(n.to_string()))
                    }
                }
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CurrencyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Day-over-day movement attached to a record at response time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RateChange {
    Delta(f64),
    /// The currency was not listed on the previous day.
    NotFound,
}

impl Serialize for RateChange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RateChange::Delta(delta) => serializer.serialize_f64(*delta),
            RateChange::NotFound => serializer.serialize_str("Not found"),
        }
    }
}

/// One currency's entry for a date.
///
/// The provider's object is kept verbatim, field order included, and only
/// the identifier and official rate are interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct RateRecord {
    id: CurrencyId,
    official_rate: f64,
    fields: Map<String, Value>,
}

impl RateRecord {
    pub fn currency_id(&self) -> &CurrencyId {
        &self.id
    }

    pub fn official_rate(&self) -> f64 {
        self.official_rate
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Response-local copy of the record with `change` appended.
    pub fn with_change(&self, change: RateChange) -> Map<String, Value> {
        let mut fields = self.fields.clone();
        let value = match change {
            RateChange::Delta(delta) => Value::from(delta),
            RateChange::NotFound => Value::from("Not found"),
        };
        fields.insert(CHANGE_FIELD.to_string(), value);
        fields
    }
}

impl TryFrom<Map<String, Value>> for RateRecord {
    type Error = String;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let id = fields
            .get(CURRENCY_ID_FIELD)
            .and_then(CurrencyId::from_json)
            .ok_or_else(|| format!("missing or invalid {CURRENCY_ID_FIELD}"))?;
        let official_rate = fields
            .get(OFFICIAL_RATE_FIELD)
            .and_then(Value::as_f64)
            .ok_or_else(|| format!("missing or invalid {OFFICIAL_RATE_FIELD}"))?;

        Ok(Self {
            id,
            official_rate,
            fields,
        })
    }
}

impl<'de> Deserialize<'de> for RateRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = Map::<String, Value>::deserialize(deserializer)?;
        RateRecord::try_from(fields).map_err(serde::de::Error::custom)
    }
}

impl Serialize for RateRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

/// All records for one date, in upstream order.
pub type RateSet = Vec<RateRecord>;

/// Linear scan for the record matching `code`.
pub fn find_rate<'a>(rates: &'a [RateRecord], code: &CurrencyId) -> Option<&'a RateRecord> {
    rates.iter().find(|record| record.currency_id() == code)
}

/// Fetches a day's rates from an upstream provider.
///
/// An empty set means the provider answered but published nothing for that
/// date.
#[async_trait]
pub trait RatesSource: Send + Sync {
    async fn fetch(&self, date: &DateKey) -> Result<RateSet, RatesError>;
}
